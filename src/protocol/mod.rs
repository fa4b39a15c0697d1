pub mod block_change;
pub mod chunk_data;
pub mod codec;
pub mod handshake;
pub mod join_game;
pub mod login;
pub mod packet;
pub mod player_digging;
pub mod player_movement;
pub mod player_position_and_look;
pub mod revision;
pub mod spawn_position;
pub mod status;
pub mod varint;
