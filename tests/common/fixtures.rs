use serde_json::json;

pub struct Fixtures;

impl Fixtures {
    pub fn visualization(id: &str, count: u64) -> String {
        json!({
            "visualization": {
                "id": id,
                "count": count
            }
        })
        .to_string()
    }

    pub fn message(text: &str) -> String {
        json!({ "message": text }).to_string()
    }
}
