//! Protocol revision table.
//!
//! The two supported revisions disagree on packet ids, id width, join-game fields and chunk
//! layout. Everything revision-dependent is answered here so the rest of the server never
//! mixes fields from both.

use crate::session::ConnectionState;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
pub enum ProtocolRevision {
    /// Protocol 340
    #[default]
    #[serde(rename = "1.12.2")]
    #[value(name = "1.12.2")]
    V1_12_2,
    /// Protocol 498
    #[serde(rename = "1.14.4")]
    #[value(name = "1.14.4")]
    V1_14_4,
}

/// How the packet id is written between the length prefix and the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdEncoding {
    Byte,
    VarInt,
}

/// Wire layout of the chunk data payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkLayout {
    /// Bitmask plus one length-prefixed section per non-empty 16-block slice, lit, with biomes.
    MultiSection,
    /// A single raw 16x16x16 block array for the bottom section.
    SingleSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clientbound {
    StatusResponse,
    Pong,
    LoginSuccess,
    JoinGame,
    ChunkData,
    SpawnPosition,
    PlayerPositionAndLook,
    BlockChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Serverbound {
    Handshake,
    StatusRequest,
    Ping,
    LoginStart,
    PlayerPosition,
    PlayerPositionAndLook,
    PlayerDigging,
    BlockPlacement,
}

impl Serverbound {
    pub const ALL: [Serverbound; 8] = [
        Serverbound::Handshake,
        Serverbound::StatusRequest,
        Serverbound::Ping,
        Serverbound::LoginStart,
        Serverbound::PlayerPosition,
        Serverbound::PlayerPositionAndLook,
        Serverbound::PlayerDigging,
        Serverbound::BlockPlacement,
    ];

    /// The only state in which the client may send this packet.
    pub fn state(self) -> ConnectionState {
        match self {
            Serverbound::Handshake => ConnectionState::Handshake,
            Serverbound::StatusRequest | Serverbound::Ping => ConnectionState::Status,
            Serverbound::LoginStart => ConnectionState::Login,
            Serverbound::PlayerPosition
            | Serverbound::PlayerPositionAndLook
            | Serverbound::PlayerDigging
            | Serverbound::BlockPlacement => ConnectionState::Play,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketKind {
    Clientbound(Clientbound),
    Serverbound(Serverbound),
}

impl ProtocolRevision {
    pub fn protocol_number(self) -> i32 {
        match self {
            ProtocolRevision::V1_12_2 => 340,
            ProtocolRevision::V1_14_4 => 498,
        }
    }

    pub fn version_name(self) -> &'static str {
        match self {
            ProtocolRevision::V1_12_2 => "1.12.2",
            ProtocolRevision::V1_14_4 => "1.14.4",
        }
    }

    pub fn id_encoding(self) -> IdEncoding {
        match self {
            ProtocolRevision::V1_12_2 => IdEncoding::Byte,
            ProtocolRevision::V1_14_4 => IdEncoding::VarInt,
        }
    }

    pub fn chunk_layout(self) -> ChunkLayout {
        match self {
            ProtocolRevision::V1_12_2 => ChunkLayout::MultiSection,
            ProtocolRevision::V1_14_4 => ChunkLayout::SingleSection,
        }
    }

    /// Wire id of `kind` under this revision.
    pub fn packet_id(self, kind: PacketKind) -> i32 {
        use Clientbound as C;
        use PacketKind::{Clientbound as Out, Serverbound as In};
        use ProtocolRevision::*;
        use Serverbound as S;

        match (self, kind) {
            // Handshake, status and login ids are shared by both revisions
            (_, In(S::Handshake)) => 0x00,
            (_, In(S::StatusRequest)) => 0x00,
            (_, In(S::Ping)) => 0x01,
            (_, In(S::LoginStart)) => 0x00,
            (_, Out(C::StatusResponse)) => 0x00,
            (_, Out(C::Pong)) => 0x01,
            (_, Out(C::LoginSuccess)) => 0x02,
            (_, Out(C::BlockChange)) => 0x0B,

            (V1_12_2, Out(C::JoinGame)) => 0x23,
            (V1_12_2, Out(C::ChunkData)) => 0x20,
            (V1_12_2, Out(C::SpawnPosition)) => 0x43,
            (V1_12_2, Out(C::PlayerPositionAndLook)) => 0x2F,
            (V1_12_2, In(S::PlayerPosition)) => 0x0E,
            (V1_12_2, In(S::PlayerPositionAndLook)) => 0x0F,
            (V1_12_2, In(S::PlayerDigging)) => 0x13,
            (V1_12_2, In(S::BlockPlacement)) => 0x14,

            (V1_14_4, Out(C::JoinGame)) => 0x25,
            (V1_14_4, Out(C::ChunkData)) => 0x21,
            (V1_14_4, Out(C::SpawnPosition)) => 0x4D,
            (V1_14_4, Out(C::PlayerPositionAndLook)) => 0x35,
            (V1_14_4, In(S::PlayerPosition)) => 0x11,
            (V1_14_4, In(S::PlayerPositionAndLook)) => 0x12,
            (V1_14_4, In(S::PlayerDigging)) => 0x1A,
            (V1_14_4, In(S::BlockPlacement)) => 0x2C,
        }
    }

    /// Dispatch table lookup: which serverbound packet `id` is while in `state`.
    /// `None` means the pair is not part of this revision.
    pub fn serverbound(self, state: ConnectionState, id: i32) -> Option<Serverbound> {
        Serverbound::ALL.into_iter().find(|kind| {
            kind.state() == state && self.packet_id(PacketKind::Serverbound(*kind)) == id
        })
    }
}

impl fmt::Display for ProtocolRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (protocol {})", self.version_name(), self.protocol_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVISIONS: [ProtocolRevision; 2] = [ProtocolRevision::V1_12_2, ProtocolRevision::V1_14_4];

    #[test]
    fn test_dispatch_finds_every_serverbound_packet() {
        for revision in REVISIONS {
            for kind in Serverbound::ALL {
                let id = revision.packet_id(PacketKind::Serverbound(kind));
                assert_eq!(revision.serverbound(kind.state(), id), Some(kind));
            }
        }
    }

    #[test]
    fn test_dispatch_is_state_scoped() {
        let revision = ProtocolRevision::V1_12_2;
        assert_eq!(
            revision.serverbound(ConnectionState::Handshake, 0x00),
            Some(Serverbound::Handshake)
        );
        assert_eq!(
            revision.serverbound(ConnectionState::Status, 0x00),
            Some(Serverbound::StatusRequest)
        );
        assert_eq!(
            revision.serverbound(ConnectionState::Login, 0x00),
            Some(Serverbound::LoginStart)
        );
        assert_eq!(revision.serverbound(ConnectionState::Handshake, 0x01), None);
        assert_eq!(revision.serverbound(ConnectionState::Play, 0x00), None);
    }

    #[test]
    fn test_play_ids_differ_between_revisions() {
        assert_eq!(
            ProtocolRevision::V1_12_2.serverbound(ConnectionState::Play, 0x13),
            Some(Serverbound::PlayerDigging)
        );
        assert_eq!(
            ProtocolRevision::V1_14_4.serverbound(ConnectionState::Play, 0x13),
            None
        );
        assert_eq!(
            ProtocolRevision::V1_14_4.serverbound(ConnectionState::Play, 0x1A),
            Some(Serverbound::PlayerDigging)
        );
    }

    #[test]
    fn test_one_byte_ids_fit() {
        for kind in [
            Clientbound::StatusResponse,
            Clientbound::Pong,
            Clientbound::LoginSuccess,
            Clientbound::JoinGame,
            Clientbound::ChunkData,
            Clientbound::SpawnPosition,
            Clientbound::PlayerPositionAndLook,
            Clientbound::BlockChange,
        ] {
            let id = ProtocolRevision::V1_12_2.packet_id(PacketKind::Clientbound(kind));
            assert!((0..=0xFF).contains(&id));
        }
    }

    #[test]
    fn test_revision_display() {
        assert_eq!(
            ProtocolRevision::V1_12_2.to_string(),
            "1.12.2 (protocol 340)"
        );
        assert_eq!(ProtocolRevision::default(), ProtocolRevision::V1_12_2);
    }
}
