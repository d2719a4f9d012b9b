pub mod config;
pub mod cortex;
pub mod error;
pub mod gate;
pub mod labels;
pub mod metrics;
pub mod osc;
pub mod replay;
pub mod session;
pub mod types;

pub use config::{BridgeConfig, ConfigError};
pub use cortex::{CortexClient, CortexError, CortexResult};
pub use error::{BridgeError, BridgeResult};
pub use gate::ConnectivityGate;
pub use labels::LabelRegistry;
pub use osc::{MetricsSink, OscError, OscResult, OscSender};
pub use replay::ReplayClient;
pub use session::{SessionOrchestrator, SessionState, SessionStats};
pub use types::*;
