use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::backends::{Visualization, VisualizationApi};
use crate::utils::AppError;

/// Derive the counter-service key for a source.
///
/// Strips a leading literal `http://` (`https://` is kept) and then drops every
/// character that is not an ASCII letter or digit. Different sources can collapse
/// to the same key; the counter service has always been keyed this way.
pub fn normalize_key(source: &str) -> String {
    source
        .strip_prefix("http://")
        .unwrap_or(source)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// View count for the currently loaded source
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewRecord {
    pub key: String,
    /// Server-side record id, known once a fetch succeeds
    pub id: Option<String>,
    pub count: u64,
    pub counted_this_session: bool,
}

impl ViewRecord {
    fn new(key: String) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }
}

/// Results of counter-service requests, delivered back to the owning thread
#[derive(Debug)]
pub enum TrackerOutput {
    CountFetched {
        generation: u64,
        visualization: Visualization,
    },
    FetchFailed {
        generation: u64,
        key: String,
        error: AppError,
    },
    IncrementAcknowledged {
        target: String,
        message: String,
    },
    IncrementFailed {
        target: String,
        error: AppError,
    },
}

/// A spawned request that can be cancelled before it reports back
struct RequestHandle {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl RequestHandle {
    fn cancel(&self) {
        self.token.cancel();
    }
}

/// Tracks views for the loaded source: fetches the count when a source is
/// loaded and records one view per load once playback passes the threshold.
///
/// Requests are spawned on the current Tokio runtime. Their outcomes are queued
/// and only touch the record when the owner calls [`poll`](Self::poll),
/// [`next_output`](Self::next_output) or [`flush`](Self::flush).
pub struct ViewCountTracker {
    api: Arc<dyn VisualizationApi>,
    threshold: f64,
    record: ViewRecord,
    generation: u64,
    fetch: Option<RequestHandle>,
    increments: Vec<JoinHandle<()>>,
    output_tx: mpsc::UnboundedSender<TrackerOutput>,
    output_rx: mpsc::UnboundedReceiver<TrackerOutput>,
}

impl ViewCountTracker {
    pub fn new(api: Arc<dyn VisualizationApi>, threshold: f64) -> Self {
        let (output_tx, output_rx) = mpsc::unbounded_channel();
        Self {
            api,
            threshold,
            record: ViewRecord::default(),
            generation: 0,
            fetch: None,
            increments: Vec::new(),
            output_tx,
            output_rx,
        }
    }

    pub fn record(&self) -> &ViewRecord {
        &self.record
    }

    pub fn count(&self) -> u64 {
        self.record.count
    }

    /// Start tracking a newly loaded source. Cancels the fetch still running
    /// for the previous source and resets the once-per-load guard.
    pub fn begin(&mut self, source: &str) {
        if let Some(previous) = self.fetch.take() {
            previous.cancel();
        }
        self.generation += 1;
        self.record = ViewRecord::new(normalize_key(source));
        debug!(
            "Tracking views for key '{}' (load #{})",
            self.record.key, self.generation
        );
        self.fetch_count();
    }

    /// Fetch the count for the current key. Failures leave the count as it is.
    pub fn fetch_count(&mut self) {
        if let Some(previous) = self.fetch.take() {
            previous.cancel();
        }
        if self.record.key.is_empty() {
            debug!("Source has no usable key, not fetching a count");
            return;
        }

        let api = self.api.clone();
        let tx = self.output_tx.clone();
        let key = self.record.key.clone();
        let generation = self.generation;
        let token = CancellationToken::new();
        let child = token.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = child.cancelled() => {
                    debug!("Fetch for key '{}' cancelled", key);
                }
                result = api.fetch_visualization(&key) => {
                    let output = match result {
                        Ok(visualization) => TrackerOutput::CountFetched { generation, visualization },
                        Err(error) => TrackerOutput::FetchFailed { generation, key: key.clone(), error },
                    };
                    let _ = tx.send(output);
                }
            }
        });

        self.fetch = Some(RequestHandle { token, handle });
    }

    /// Feed a played fraction. Returns true if this call recorded the view.
    pub fn observe_progress(&mut self, played: f64) -> bool {
        if played > self.threshold && !self.record.counted_this_session {
            self.on_threshold_crossed()
        } else {
            false
        }
    }

    /// Record one view for the current load: bump the local count right away and
    /// send the increment. A failed increment is logged and not rolled back.
    pub fn on_threshold_crossed(&mut self) -> bool {
        if self.record.counted_this_session {
            return false;
        }
        self.record.counted_this_session = true;
        if self.record.key.is_empty() {
            debug!("Source has no usable key, not recording a view");
            return false;
        }
        self.record.count += 1;

        // Without a fetched record the key is the best id we have
        let target = self
            .record
            .id
            .clone()
            .unwrap_or_else(|| self.record.key.clone());
        info!("Recording view for '{}'", target);

        let api = self.api.clone();
        let tx = self.output_tx.clone();
        self.increments.retain(|handle| !handle.is_finished());
        self.increments.push(tokio::spawn(async move {
            let result = api.add_visualization(&target).await;
            let output = match result {
                Ok(message) => TrackerOutput::IncrementAcknowledged { target, message },
                Err(error) => TrackerOutput::IncrementFailed { target, error },
            };
            let _ = tx.send(output);
        }));

        true
    }

    /// Apply one request outcome to the record.
    pub fn apply(&mut self, output: TrackerOutput) {
        match output {
            TrackerOutput::CountFetched {
                generation,
                visualization,
            } => {
                if generation != self.generation {
                    debug!(
                        "Discarding stale count for record {} (load #{}, current #{})",
                        visualization.id, generation, self.generation
                    );
                    return;
                }
                debug!(
                    "Fetched {} views for '{}' (record {})",
                    visualization.count, self.record.key, visualization.id
                );
                self.record.id = Some(visualization.id);
                self.record.count = visualization.count;
            }
            TrackerOutput::FetchFailed {
                generation,
                key,
                error,
            } => {
                if generation != self.generation {
                    debug!("Ignoring stale fetch failure for '{}': {}", key, error);
                    return;
                }
                error!("Error fetching visualizations for '{}': {}", key, error);
            }
            TrackerOutput::IncrementAcknowledged { target, message } => {
                info!("Visualization response for '{}': {}", target, message);
            }
            TrackerOutput::IncrementFailed { target, error } => {
                warn!("Failed to add visualization for '{}': {}", target, error);
            }
        }
    }

    /// Apply every outcome that has already arrived. Never blocks.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(output) = self.output_rx.try_recv() {
            self.apply(output);
            applied += 1;
        }
        applied
    }

    /// Wait for the next outcome and apply it.
    pub async fn next_output(&mut self) {
        if let Some(output) = self.output_rx.recv().await {
            self.apply(output);
        }
    }

    /// Wait for every outstanding request to finish, then apply their outcomes.
    pub async fn flush(&mut self) {
        if let Some(fetch) = self.fetch.take() {
            if let Err(e) = fetch.handle.await {
                warn!("Fetch task ended abnormally: {}", e);
            }
        }
        for handle in self.increments.drain(..) {
            if let Err(e) = handle.await {
                warn!("Increment task ended abnormally: {}", e);
            }
        }
        self.poll();
    }
}

impl Drop for ViewCountTracker {
    fn drop(&mut self) {
        // Pending increments are left to finish; only the count read is dropped
        if let Some(fetch) = self.fetch.take() {
            fetch.cancel();
        }
    }
}
