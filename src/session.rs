use crate::cortex::CortexClient;
use crate::error::{BridgeError, BridgeResult};
use crate::gate::ConnectivityGate;
use crate::labels::LabelRegistry;
use crate::metrics;
use crate::osc::MetricsSink;
use crate::types::{CortexEvent, DataFrame, DerivedMetrics, StreamKind, QUALITY_INDEX};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Session lifecycle. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Starting,
    SessionOpen,
    Subscribed,
    Closed,
}

/// Counters accumulated over one session, logged on close.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStats {
    pub band_power_frames: u64,
    pub emissions: u64,
    pub zeroed_emissions: u64,
    pub malformed_frames: u64,
    pub protocol_errors: u64,
}

/// Owns the protocol-client and transport handles and routes every inbound
/// event to its handler.
///
/// One instance per process; all state is mutated serially from the event
/// loop, so no internal synchronization is needed.
pub struct SessionOrchestrator {
    client: Box<dyn CortexClient>,
    sink: Box<dyn MetricsSink>,
    osc_address: String,
    labels: LabelRegistry,
    gate: ConnectivityGate,
    state: SessionState,
    streams: Vec<StreamKind>,
    stats: SessionStats,
}

impl SessionOrchestrator {
    pub fn new(
        client: Box<dyn CortexClient>,
        sink: Box<dyn MetricsSink>,
        osc_address: impl Into<String>,
    ) -> Self {
        Self {
            client,
            sink,
            osc_address: osc_address.into(),
            labels: LabelRegistry::new(),
            gate: ConnectivityGate::new(),
            state: SessionState::Idle,
            streams: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn labels(&self) -> &LabelRegistry {
        &self.labels
    }

    pub fn is_connected(&self) -> bool {
        self.gate.is_connected()
    }

    /// Record the desired streams and open the client. Subscription itself
    /// is issued once the client reports `SessionCreated`.
    pub async fn start(
        &mut self,
        streams: &[StreamKind],
        headset_id: Option<&str>,
        events: mpsc::Sender<CortexEvent>,
    ) -> BridgeResult<()> {
        match self.state {
            SessionState::Idle => {}
            SessionState::Closed => return Err(BridgeError::Closed),
            _ => return Err(BridgeError::AlreadyStarted),
        }

        self.streams = streams.to_vec();
        if let Some(id) = headset_id {
            self.client.set_wanted_headset(id).await?;
        }
        self.state = SessionState::Starting;
        info!(streams = ?self.streams, "opening cortex session");
        self.client.open(events).await?;
        Ok(())
    }

    /// Drive the event loop until the client's channel closes.
    pub async fn run(&mut self, mut events: mpsc::Receiver<CortexEvent>) {
        while let Some(event) = events.recv().await {
            if self.state == SessionState::Closed {
                break;
            }
            self.handle_event(event).await;
        }
    }

    /// Dispatch one inbound event.
    pub async fn handle_event(&mut self, event: CortexEvent) {
        match event {
            CortexEvent::SessionCreated { session_id } => {
                self.on_session_created(&session_id).await;
            }
            CortexEvent::DataLabels { stream, labels } => {
                info!(stream = %stream, count = labels.len(), "stream labels announced");
                self.labels.record(stream, labels);
            }
            CortexEvent::EegData(frame) => {
                debug!(time = frame.time, channels = frame.values.len(), "eeg frame");
            }
            CortexEvent::MotionData(frame) => {
                debug!(time = frame.time, channels = frame.values.len(), "motion frame");
            }
            CortexEvent::PerformanceMetricData(frame) => {
                debug!(time = frame.time, values = ?frame.values, "performance metrics frame");
            }
            CortexEvent::DeviceData(frame) => self.on_device_data(&frame),
            CortexEvent::BandPowerData(frame) => self.on_band_power(&frame),
            CortexEvent::Error { code, message } => {
                // Side channel: surfaced but never alters session state.
                self.stats.protocol_errors += 1;
                warn!(code, "cortex reported an error: {}", message);
            }
        }
    }

    /// Forward an unsubscribe request to the client.
    pub async fn unsub(&mut self, streams: &[StreamKind]) -> BridgeResult<()> {
        self.client.unsub_request(streams).await?;
        Ok(())
    }

    /// Release the protocol-client connection. Terminal and idempotent.
    pub async fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        if let Err(e) = self.client.close().await {
            warn!("error closing cortex connection: {}", e);
        }
        self.state = SessionState::Closed;
        info!(stats = ?self.stats, "session closed");
    }

    async fn on_session_created(&mut self, session_id: &str) {
        info!(session_id, "cortex session created, subscribing");
        if self.state == SessionState::Starting {
            self.state = SessionState::SessionOpen;
        }
        match self.client.sub_request(&self.streams).await {
            Ok(()) => self.state = SessionState::Subscribed,
            Err(e) => warn!("subscribe request failed: {}", e),
        }
    }

    fn on_device_data(&mut self, frame: &DataFrame) {
        match frame.values.get(QUALITY_INDEX) {
            Some(&quality) => self.gate.update(quality),
            None => {
                self.stats.malformed_frames += 1;
                warn!(
                    len = frame.values.len(),
                    "device frame too short for quality field"
                );
            }
        }
    }

    fn on_band_power(&mut self, frame: &DataFrame) {
        self.stats.band_power_frames += 1;

        // Zero-fill whenever the frame cannot be trusted: the consumer
        // always receives a vector of the expected shape.
        let out = if self.gate.is_connected() {
            match metrics::compute(&frame.values) {
                Some(m) => m,
                None => {
                    self.stats.malformed_frames += 1;
                    warn!(
                        len = frame.values.len(),
                        "unusable band-power frame, emitting zeros"
                    );
                    DerivedMetrics::zeroed()
                }
            }
        } else {
            self.stats.zeroed_emissions += 1;
            DerivedMetrics::zeroed()
        };

        self.stats.emissions += 1;
        if let Err(e) = self.sink.send_metrics(&self.osc_address, &out.to_args()) {
            warn!("failed to send metrics datagram: {}", e);
        }
    }
}
