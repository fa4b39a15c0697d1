//! Per-connection protocol state machine.
//!
//! A [`Session`] takes one decoded frame at a time and answers with the frames to send back.
//! It never touches the socket, so the whole Handshake -> Status | Login -> Play flow can be
//! driven directly in tests.

use crate::config::ServerConfig;
use crate::error::{Result, SaverError};
use crate::logger::{log, LogSeverity::*};
use crate::protocol::block_change::BlockChangePacket;
use crate::protocol::chunk_data::ChunkDataPacket;
use crate::protocol::handshake::HandshakePacket;
use crate::protocol::join_game::JoinGamePacket;
use crate::protocol::login::{offline_uuid, LoginStartPacket, LoginSuccessPacket};
use crate::protocol::packet::{Packet, RawPacket};
use crate::protocol::player_digging::PlayerDiggingPacket;
use crate::protocol::player_movement::{PlayerPositionPacket, PlayerPositionRotationPacket};
use crate::protocol::player_position_and_look::PlayerPositionAndLook;
use crate::protocol::revision::Serverbound;
use crate::protocol::spawn_position::SpawnPositionPacket;
use crate::protocol::status::{PingPacket, PongPacket, ServerStatus, StatusResponsePacket};
use crate::world::chunk::AIR;
use crate::world::{Chunk, ChunkGenerator};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Protocol phase of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Handshake,
    Status,
    Login,
    Play,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Handshake => write!(f, "handshake"),
            ConnectionState::Status => write!(f, "status"),
            ConnectionState::Login => write!(f, "login"),
            ConnectionState::Play => write!(f, "play"),
        }
    }
}

/// Frames to send in response to one packet, in order.
#[derive(Debug, Default)]
pub struct Reply {
    pub packets: Vec<RawPacket>,
    /// Close the connection once `packets` are flushed
    pub close: bool,
}

impl Reply {
    fn none() -> Self {
        Self::default()
    }
}

/// Teleport id of the one position-and-look sent at login.
const LOGIN_TELEPORT_ID: i32 = 1;

/// Transient entity id from the wall clock, truncated to 31 bits. Two logins in the same
/// instant can collide; nothing checks for it.
fn entity_id_from_clock() -> i32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    (nanos & 0x7FFF_FFFF) as i32
}

/// State owned by a single connection. Never shared.
pub struct Session<'a> {
    config: &'a ServerConfig,
    generator: &'a dyn ChunkGenerator,
    state: ConnectionState,
    protocol_version: Option<i32>,
    username: Option<Vec<u8>>,
    entity_id: Option<i32>,
    /// Terrain sent at login. Digging edits this copy only; it dies with the session.
    chunk: Option<Chunk>,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a ServerConfig, generator: &'a dyn ChunkGenerator) -> Self {
        Self {
            config,
            generator,
            state: ConnectionState::Handshake,
            protocol_version: None,
            username: None,
            entity_id: None,
            chunk: None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Protocol version the client announced in its handshake. Informational only.
    pub fn protocol_version(&self) -> Option<i32> {
        self.protocol_version
    }

    /// Username exactly as the client sent it; not necessarily UTF-8.
    pub fn username(&self) -> Option<&[u8]> {
        self.username.as_deref()
    }

    pub fn entity_id(&self) -> Option<i32> {
        self.entity_id
    }

    pub fn chunk(&self) -> Option<&Chunk> {
        self.chunk.as_ref()
    }

    fn encode<P: Packet>(&self, packet: &P) -> Result<RawPacket> {
        RawPacket::encode(packet, self.config.revision)
    }

    fn decode<P: Packet>(&self, packet: &RawPacket) -> Result<P> {
        packet.decode(self.config.revision)
    }

    /// Handles one incoming packet.
    ///
    /// Ids that the configured revision does not define for the current state come back as
    /// [`SaverError::UnexpectedPacket`]; the caller may skip them. Any other error means the
    /// connection should be dropped.
    pub fn handle(&mut self, packet: RawPacket) -> Result<Reply> {
        let Some(kind) = self.config.revision.serverbound(self.state, packet.id) else {
            return Err(SaverError::UnexpectedPacket {
                state: self.state,
                id: packet.id,
            });
        };

        match kind {
            Serverbound::Handshake => self.handle_handshake(&packet),
            Serverbound::StatusRequest => self.handle_status_request(),
            Serverbound::Ping => self.handle_ping(&packet),
            Serverbound::LoginStart => self.handle_login_start(&packet),
            Serverbound::PlayerPosition => {
                let position: PlayerPositionPacket = self.decode(&packet)?;
                log(format!("Player moved: {:?}", position), Debug);
                Ok(Reply::none())
            }
            Serverbound::PlayerPositionAndLook => {
                let position: PlayerPositionRotationPacket = self.decode(&packet)?;
                log(format!("Player moved and looked: {:?}", position), Debug);
                Ok(Reply::none())
            }
            Serverbound::PlayerDigging => self.handle_digging(&packet),
            Serverbound::BlockPlacement => {
                log(
                    format!("Ignoring block placement ({} bytes)", packet.payload.len()),
                    Debug,
                );
                Ok(Reply::none())
            }
        }
    }

    fn handle_handshake(&mut self, packet: &RawPacket) -> Result<Reply> {
        let handshake: HandshakePacket = self.decode(packet)?;
        log(format!("Received handshake: {:?}", handshake), Debug);
        self.protocol_version = Some(handshake.protocol_version);

        match handshake.next_state {
            HandshakePacket::NEXT_STATUS => self.state = ConnectionState::Status,
            HandshakePacket::NEXT_LOGIN => self.state = ConnectionState::Login,
            // The client now waits for a reply that never comes; the idle deadline ends it
            other => log(format!("Unknown next state: {}", other), Warning),
        }
        Ok(Reply::none())
    }

    fn handle_status_request(&self) -> Result<Reply> {
        let status = ServerStatus::from_config(self.config);
        Ok(Reply {
            packets: vec![self.encode(&StatusResponsePacket::new(&status)?)?],
            close: false,
        })
    }

    fn handle_ping(&self, packet: &RawPacket) -> Result<Reply> {
        let ping: PingPacket = self.decode(packet)?;
        Ok(Reply {
            packets: vec![self.encode(&PongPacket::from(ping))?],
            close: true,
        })
    }

    /// Login success, join game, the spawn chunk, spawn position and the initial
    /// position-and-look, then straight into Play without waiting for the client.
    fn handle_login_start(&mut self, packet: &RawPacket) -> Result<Reply> {
        let login_start: LoginStartPacket = self.decode(packet)?;
        let username = login_start.username;
        let entity_id = entity_id_from_clock();
        let spawn = self.config.spawn;

        log(
            format!(
                "Player {} logging in (uuid {}, entity {})",
                String::from_utf8_lossy(&username),
                offline_uuid(&username),
                entity_id
            ),
            Info,
        );

        let chunk = self.generator.generate(0, 0);
        let packets = vec![
            self.encode(&LoginSuccessPacket::new(username.clone()))?,
            self.encode(&JoinGamePacket::new(entity_id, self.config))?,
            self.encode(&ChunkDataPacket::new(&chunk, 0, 0))?,
            self.encode(&SpawnPositionPacket { position: spawn })?,
            self.encode(&PlayerPositionAndLook::new(
                spawn.x as f64,
                spawn.y as f64,
                spawn.z as f64,
                0.0,
                0.0,
                PlayerPositionAndLook::ABSOLUTE,
                LOGIN_TELEPORT_ID,
            ))?,
        ];

        self.username = Some(username);
        self.entity_id = Some(entity_id);
        self.chunk = Some(chunk);
        self.state = ConnectionState::Play;

        Ok(Reply {
            packets,
            close: false,
        })
    }

    fn handle_digging(&mut self, packet: &RawPacket) -> Result<Reply> {
        let digging: PlayerDiggingPacket = self.decode(packet)?;
        let position = digging.position;

        let Some((x, y, z)) = Chunk::local(position) else {
            log(format!("Ignoring dig outside the spawn chunk: {:?}", position), Debug);
            return Ok(Reply::none());
        };
        if let Some(chunk) = self.chunk.as_mut() {
            chunk.set_block(x, y, z, AIR);
        }

        Ok(Reply {
            packets: vec![self.encode(&BlockChangePacket {
                x: position.x,
                z: position.z,
            })?],
            close: false,
        })
    }
}
