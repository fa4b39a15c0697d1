pub mod config;
pub mod error;
pub mod logger;
pub mod protocol;
pub mod server;
pub mod session;
pub mod world;

// Re-export commonly used items
pub use config::ServerConfig;
pub use error::{Result, SaverError};
pub use logger::{log, LogSeverity};
pub use protocol::packet::{Packet, RawPacket};
pub use protocol::revision::ProtocolRevision;
pub use server::Server;
