use crate::session::ConnectionState;
use std::time::Duration;

/// Errors raised while serving a connection. Any of them ends that connection only.
#[derive(Debug, thiserror::Error)]
pub enum SaverError {
    #[error("malformed VarInt: more than 5 bytes or truncated")]
    MalformedVarInt,

    #[error("invalid packet length {0}")]
    InvalidLength(i32),

    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("no data received within {0:?}")]
    DeadlineExceeded(Duration),

    #[error("unexpected packet 0x{id:02x} in {state} state")]
    UnexpectedPacket { state: ConnectionState, id: i32 },

    #[error("unexpected end of packet: need {need} bytes, have {have}")]
    UnexpectedEof { need: usize, have: usize },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SaverError>;
