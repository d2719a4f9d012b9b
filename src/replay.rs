// File-backed Cortex client that replays a recorded session.
//
// Reads a JSON-lines event log (one `CortexEvent` per line) and delivers it
// at a configurable pace. Useful for exercising the bridge without headset
// hardware or Cortex credentials, and for soak-testing downstream consumers
// against recorded sessions.

use crate::cortex::{CortexClient, CortexResult};
use crate::types::{CortexEvent, StreamKind};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct ReplayClient {
    path: PathBuf,
    pace: Option<Duration>,
    wanted_headset: Option<String>,
    task: Option<JoinHandle<()>>,
}

impl ReplayClient {
    pub fn new(path: impl Into<PathBuf>, pace_ms: Option<u64>) -> Self {
        Self {
            path: path.into(),
            pace: pace_ms.map(Duration::from_millis),
            wanted_headset: None,
            task: None,
        }
    }
}

#[async_trait]
impl CortexClient for ReplayClient {
    async fn set_wanted_headset(&mut self, headset_id: &str) -> CortexResult<()> {
        debug!(headset_id, "replay client noting wanted headset");
        self.wanted_headset = Some(headset_id.to_string());
        Ok(())
    }

    async fn open(&mut self, events: mpsc::Sender<CortexEvent>) -> CortexResult<()> {
        let file = File::open(&self.path).await?;
        info!(path = %self.path.display(), "replaying recorded cortex session");

        let session_id = Uuid::new_v4().to_string();
        let pace = self.pace;
        let task = tokio::spawn(async move {
            // A real client emits this once discovery/authorization finish.
            if events
                .send(CortexEvent::SessionCreated { session_id })
                .await
                .is_err()
            {
                return;
            }

            let mut lines = BufReader::new(file).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<CortexEvent>(line) {
                            Ok(event) => {
                                if events.send(event).await.is_err() {
                                    warn!("event receiver closed, stopping replay");
                                    return;
                                }
                            }
                            Err(e) => warn!("skipping malformed replay line: {}", e),
                        }
                        if let Some(delay) = pace {
                            sleep(delay).await;
                        }
                    }
                    Ok(None) => {
                        info!("replay reached end of log");
                        return;
                    }
                    Err(e) => {
                        warn!("replay read failed: {}", e);
                        return;
                    }
                }
            }
        });
        self.task = Some(task);
        Ok(())
    }

    async fn sub_request(&mut self, streams: &[StreamKind]) -> CortexResult<()> {
        // The recorded log already reflects a subscription; nothing to do.
        debug!(?streams, "replay client acknowledging subscribe");
        Ok(())
    }

    async fn unsub_request(&mut self, streams: &[StreamKind]) -> CortexResult<()> {
        debug!(?streams, "replay client acknowledging unsubscribe");
        Ok(())
    }

    async fn close(&mut self) -> CortexResult<()> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        Ok(())
    }
}
