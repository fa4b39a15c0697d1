use futures::StreamExt;
use savermc::config::ServerConfig;
use savermc::protocol::codec::{send_packet, PacketCodec};
use savermc::protocol::handshake::HandshakePacket;
use savermc::protocol::packet::{Packet, RawPacket};
use savermc::protocol::revision::{Clientbound, PacketKind, ProtocolRevision};
use savermc::world::ChunkGenerator;
use savermc::{Result, Server};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::codec::Framed;

pub type Client = Framed<TcpStream, PacketCodec>;

/// Upper bound on how long any single read in these tests may take.
pub const READ_TIMEOUT: Duration = Duration::from_secs(5);

pub fn test_config(revision: ProtocolRevision) -> ServerConfig {
    ServerConfig {
        port: 0,
        revision,
        ..ServerConfig::default()
    }
}

/// Binds a server on a free loopback port and runs it in the background.
pub async fn start_server(config: ServerConfig) -> SocketAddr {
    let server = Server::bind(config).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());
    addr
}

/// Same as [`start_server`] but with the spawn chunk coming from `generator`.
pub async fn start_server_with(config: ServerConfig, generator: Arc<dyn ChunkGenerator>) -> SocketAddr {
    let server = Server::bind(config).await.unwrap().with_generator(generator);
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());
    addr
}

pub async fn connect(addr: SocketAddr, revision: ProtocolRevision) -> Client {
    let socket = TcpStream::connect(addr).await.unwrap();
    Framed::new(socket, PacketCodec::new(revision))
}

pub async fn send<P: Packet>(client: &mut Client, packet: &P, revision: ProtocolRevision) {
    send_packet(packet, client, revision).await.unwrap();
}

pub async fn send_handshake(client: &mut Client, revision: ProtocolRevision, next_state: i32) {
    let handshake = HandshakePacket {
        protocol_version: revision.protocol_number(),
        server_address: "localhost".to_string(),
        server_port: 25565,
        next_state,
    };
    send(client, &handshake, revision).await;
}

/// Next frame from the server, or `None` once it has closed the connection.
pub async fn next_frame(client: &mut Client) -> Option<Result<RawPacket>> {
    timeout(READ_TIMEOUT, client.next())
        .await
        .expect("server did not answer in time")
}

/// Reads the next frame and checks that it carries `expected`.
pub async fn expect_frame(
    client: &mut Client,
    revision: ProtocolRevision,
    expected: Clientbound,
) -> RawPacket {
    let packet = next_frame(client)
        .await
        .expect("connection closed early")
        .unwrap();
    assert_eq!(
        packet.id,
        revision.packet_id(PacketKind::Clientbound(expected)),
        "expected {:?}",
        expected
    );
    packet
}
