use crate::types::QUALITY_THRESHOLD;
use tracing::info;

/// Latched boolean tracking whether the headset is usably connected.
///
/// Edge-triggered: the state flips only on a genuine crossing of the
/// quality threshold, so repeated samples on the same side are no-ops.
/// There is no hysteresis beyond the single threshold.
#[derive(Debug, Default)]
pub struct ConnectivityGate {
    connected: bool,
}

impl ConnectivityGate {
    /// Starts disconnected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one signal-quality sample (0-100 scale).
    pub fn update(&mut self, quality: f64) {
        if quality < QUALITY_THRESHOLD && self.connected {
            self.connected = false;
            info!(quality, "headset signal degraded, gating emissions");
        } else if quality >= QUALITY_THRESHOLD && !self.connected {
            self.connected = true;
            info!(quality, "headset signal restored, emissions live");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}
