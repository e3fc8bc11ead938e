#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::backends::traits::VisualizationApi;
    use mockito::Server;
    use serde_json::json;
    use std::time::Duration;

    fn create_test_api(server: &Server) -> CounterApi {
        CounterApi::new(&server.url(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_fetch_visualization() {
        let mut server = Server::new_async().await;
        let api = create_test_api(&server);

        let _m = server
            .mock("GET", "/visualization/Examplecomv1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"visualization": {"id": "rec-1", "count": 41}}).to_string())
            .create_async()
            .await;

        let record = api.fetch_visualization("Examplecomv1").await.unwrap();

        assert_eq!(record.id, "rec-1");
        assert_eq!(record.count, 41);
    }

    #[tokio::test]
    async fn test_add_visualization() {
        let mut server = Server::new_async().await;
        let api = create_test_api(&server);

        let m = server
            .mock("POST", "/visualization/rec-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"message": "Visualization added"}).to_string())
            .expect(1)
            .create_async()
            .await;

        let message = api.add_visualization("rec-1").await.unwrap();

        assert_eq!(message, "Visualization added");
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_network_error() {
        let mut server = Server::new_async().await;
        let api = create_test_api(&server);

        let _m = server
            .mock("GET", "/visualization/missing")
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let err = api.fetch_visualization("missing").await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_malformed_body_is_network_error() {
        let mut server = Server::new_async().await;
        let api = create_test_api(&server);

        let _m = server
            .mock("GET", "/visualization/broken")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let err = api.fetch_visualization("broken").await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_base_url_with_path_prefix() {
        let mut server = Server::new_async().await;
        let api = CounterApi::new(&format!("{}/api/", server.url()), Duration::from_secs(5));

        let _m = server
            .mock("GET", "/api/visualization/abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"visualization": {"id": 7, "count": 1}}).to_string())
            .create_async()
            .await;

        let record = api.fetch_visualization("abc").await.unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(api.base_url(), format!("{}/api", server.url()));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) is not expected to run an HTTP server
        let api = CounterApi::new("http://127.0.0.1:9", Duration::from_secs(1));
        let err = api.add_visualization("rec-1").await.unwrap_err();
        assert!(err.is_network());
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let api = CounterApi::new("not a url", Duration::from_secs(1));
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let err = runtime.block_on(api.fetch_visualization("abc")).unwrap_err();
        assert!(matches!(err, crate::utils::AppError::Configuration(_)));
    }
}
