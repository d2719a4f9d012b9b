use serde::{Deserialize, Serialize};
use std::fmt;

/// Values per band-power frame: 5 sites x 5 bands, site-major.
pub const BAND_POWER_LEN: usize = 25;

/// Bands per site, in wire order: theta, alpha, betaL, betaH, gamma.
pub const BAND_COUNT: usize = 5;

/// Position of the signal-quality field inside a device frame.
pub const QUALITY_INDEX: usize = 2;

/// Signal quality (0-100) at or above which the headset counts as connected.
pub const QUALITY_THRESHOLD: f64 = 50.0;

/// Default OSC address the derived metrics vector is published under.
pub const DEFAULT_OSC_ADDRESS: &str = "/pow_proportion";

/// Telemetry stream categories exposed by the Cortex service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamKind {
    #[serde(rename = "eeg")]
    Eeg,
    #[serde(rename = "mot")]
    Motion,
    #[serde(rename = "dev")]
    Device,
    #[serde(rename = "met")]
    PerformanceMetric,
    #[serde(rename = "pow")]
    BandPower,
    #[serde(rename = "eq")]
    SignalQuality,
}

impl StreamKind {
    /// Short tag used by the Cortex subscription protocol.
    pub fn wire_tag(&self) -> &'static str {
        match self {
            StreamKind::Eeg => "eeg",
            StreamKind::Motion => "mot",
            StreamKind::Device => "dev",
            StreamKind::PerformanceMetric => "met",
            StreamKind::BandPower => "pow",
            StreamKind::SignalQuality => "eq",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_tag())
    }
}

/// One sampled vector from a subscribed stream.
///
/// Values are positional; their meaning comes from the labels announced for
/// the stream at subscription time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataFrame {
    pub values: Vec<f64>,
    /// Unix timestamp (seconds) assigned by the headset service.
    pub time: f64,
}

/// Events delivered by the headset-communication client.
///
/// This is the complete inbound contract: one variant per callback the
/// original protocol exposes. The tagged representation doubles as the
/// recorded-session log format used by the replay client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CortexEvent {
    /// Session established; data subscription may now be requested.
    SessionCreated { session_id: String },
    /// Channel labels for one stream, announced once per subscription.
    DataLabels {
        stream: StreamKind,
        labels: Vec<String>,
    },
    EegData(DataFrame),
    MotionData(DataFrame),
    DeviceData(DataFrame),
    PerformanceMetricData(DataFrame),
    BandPowerData(DataFrame),
    /// Protocol-level error reported by the service. Informational only.
    Error { code: i64, message: String },
}

/// The 7-element vector published downstream per band-power frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub theta: f64,
    pub alpha: f64,
    pub beta_low: f64,
    pub beta_high: f64,
    pub gamma: f64,
    pub meditation: f64,
    pub attention: f64,
}

impl DerivedMetrics {
    /// Neutral vector sent while the headset is not usably connected.
    pub fn zeroed() -> Self {
        Self {
            theta: 0.0,
            alpha: 0.0,
            beta_low: 0.0,
            beta_high: 0.0,
            gamma: 0.0,
            meditation: 0.0,
            attention: 0.0,
        }
    }

    /// Wire order: 5 band proportions, then meditation, then attention.
    pub fn to_args(&self) -> [f64; 7] {
        [
            self.theta,
            self.alpha,
            self.beta_low,
            self.beta_high,
            self.gamma,
            self.meditation,
            self.attention,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_kind_round_trips_through_wire_tag() {
        let json = serde_json::to_string(&StreamKind::BandPower).unwrap();
        assert_eq!(json, "\"pow\"");
        let back: StreamKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StreamKind::BandPower);
    }

    #[test]
    fn event_log_format_is_tagged() {
        let line = r#"{"event":"band_power_data","values":[1.0,2.0],"time":1627459390.1}"#;
        let event: CortexEvent = serde_json::from_str(line).unwrap();
        match event {
            CortexEvent::BandPowerData(frame) => {
                assert_eq!(frame.values, vec![1.0, 2.0]);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn zeroed_metrics_serialize_to_seven_zeros() {
        let args = DerivedMetrics::zeroed().to_args();
        assert_eq!(args, [0.0; 7]);
    }
}
