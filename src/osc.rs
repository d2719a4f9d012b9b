use rosc::{encoder, OscMessage, OscPacket, OscType};
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use thiserror::Error;

/// Errors from the outbound OSC transport.
#[derive(Debug, Error)]
pub enum OscError {
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),

    #[error("OSC encoding error: {0}")]
    Encoding(String),

    #[error("Invalid OSC target: {0}")]
    InvalidTarget(String),
}

pub type OscResult<T> = Result<T, OscError>;

/// Outbound sink for derived metric vectors.
///
/// The production implementation is [`OscSender`]; tests substitute a
/// recording sink. Sends are best-effort: a failure must be logged by the
/// caller and never stop the event loop.
pub trait MetricsSink: Send + Sync {
    fn send_metrics(&self, address: &str, values: &[f64]) -> OscResult<()>;
}

/// Connectionless OSC-over-UDP sender.
pub struct OscSender {
    socket: UdpSocket,
    target: SocketAddr,
}

impl OscSender {
    /// Bind an ephemeral local socket aimed at `host:port`.
    pub fn new(host: &str, port: u16) -> OscResult<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        let target = (host, port)
            .to_socket_addrs()
            .map_err(|e| OscError::InvalidTarget(format!("{}:{}: {}", host, port, e)))?
            .next()
            .ok_or_else(|| OscError::InvalidTarget(format!("{}:{}", host, port)))?;
        Ok(Self { socket, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl MetricsSink for OscSender {
    fn send_metrics(&self, address: &str, values: &[f64]) -> OscResult<()> {
        let msg = OscMessage {
            addr: address.to_string(),
            args: values.iter().map(|&v| OscType::Float(v as f32)).collect(),
        };
        let bytes = encoder::encode(&OscPacket::Message(msg))
            .map_err(|e| OscError::Encoding(format!("{:?}", e)))?;
        self.socket.send_to(&bytes, self.target)?;
        Ok(())
    }
}
