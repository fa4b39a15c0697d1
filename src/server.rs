use crate::config::ServerConfig;
use crate::error::{Result, SaverError};
use crate::logger::{log, LogSeverity::*};
use crate::protocol::codec::PacketCodec;
use crate::session::Session;
use crate::world::{ChunkGenerator, HeightmapGenerator};
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_util::codec::Framed;

/// Listening server. Every accepted connection gets its own task; the only things shared
/// between tasks are the read-only config and chunk generator.
pub struct Server {
    listener: TcpListener,
    config: Arc<ServerConfig>,
    generator: Arc<dyn ChunkGenerator>,
}

impl Server {
    /// Binds the listener to the configured address. Port 0 picks a free port.
    pub async fn bind(config: ServerConfig) -> Result<Self> {
        let listener = TcpListener::bind(config.socket_addr()).await?;
        Ok(Self {
            listener,
            config: Arc::new(config),
            generator: Arc::new(HeightmapGenerator),
        })
    }

    /// Replaces the terrain generator used for the spawn chunk.
    pub fn with_generator(mut self, generator: Arc<dyn ChunkGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts connections forever. Accept errors are logged and do not stop the loop.
    pub async fn run(self) -> Result<()> {
        log(
            format!(
                "Listening on {} speaking {}",
                self.local_addr()?,
                self.config.revision
            ),
            Info,
        );

        loop {
            match self.listener.accept().await {
                Ok((socket, addr)) => {
                    log(format!("New connection from: {}", addr), Info);
                    tokio::spawn(handle_connection(
                        socket,
                        addr,
                        Arc::clone(&self.config),
                        Arc::clone(&self.generator),
                    ));
                }
                Err(accept_error) => {
                    log(format!("Failed to accept connection: {}", accept_error), Error)
                }
            }
        }
    }
}

/// Starts the server with `config` and runs it until the process exits.
pub async fn run(config: ServerConfig) -> Result<()> {
    Server::bind(config).await?.run().await
}

/// Runs one connection to completion and logs how it ended.
async fn handle_connection(
    socket: TcpStream,
    addr: SocketAddr,
    config: Arc<ServerConfig>,
    generator: Arc<dyn ChunkGenerator>,
) {
    match serve(socket, &config, generator.as_ref()).await {
        Ok(()) => log(format!("Closed connection from {}", addr), Debug),
        Err(SaverError::ConnectionClosed) => {
            log(format!("{} disconnected", addr), Info)
        }
        Err(err @ SaverError::DeadlineExceeded(_)) => {
            log(format!("Dropping {}: {}", addr, err), Info)
        }
        Err(err) => log(format!("Dropping {}: {}", addr, err), Warning),
    }
}

/// The read loop: one frame in, the session's reply out, until the session asks to close,
/// the peer leaves, the idle deadline passes or any read/write fails.
async fn serve(socket: TcpStream, config: &ServerConfig, generator: &dyn ChunkGenerator) -> Result<()> {
    let idle_timeout = config.idle_timeout();
    let mut framed = Framed::new(socket, PacketCodec::new(config.revision));
    let mut session = Session::new(config, generator);

    loop {
        let packet = match timeout(idle_timeout, framed.next()).await {
            Err(_) => return Err(SaverError::DeadlineExceeded(idle_timeout)),
            Ok(None) => return Err(SaverError::ConnectionClosed),
            Ok(Some(packet)) => packet?,
        };

        let previous_state = session.state();
        let reply = match session.handle(packet) {
            Err(SaverError::UnexpectedPacket { state, id }) => {
                log(
                    format!("Received unknown packet 0x{:02x} in {} state", id, state),
                    Debug,
                );
                continue;
            }
            reply => reply?,
        };

        for packet in reply.packets {
            framed.feed(packet).await?;
        }
        framed.flush().await?;

        if session.state() != previous_state {
            log(
                format!("Connection moved from {} to {}", previous_state, session.state()),
                Debug,
            );
        }

        if reply.close {
            framed.get_mut().shutdown().await?;
            return Ok(());
        }
    }
}
