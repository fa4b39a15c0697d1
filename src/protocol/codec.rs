use crate::error::{Result, SaverError};
use crate::protocol::packet::{Packet, RawPacket};
use crate::protocol::revision::{IdEncoding, ProtocolRevision};
use crate::protocol::varint::{decode_varint, put_varint, varint_len};
use bytes::{Buf, BufMut, BytesMut};
use futures::{Sink, SinkExt};
use tokio_util::codec::{Decoder, Encoder};

/// Largest frame a vanilla client will send or accept (3-byte VarInt).
pub const MAX_PACKET_LENGTH: i32 = 2_097_151;

/// Length-prefixed packet framer.
///
/// A frame is `VarInt(len) | id | payload` where `len` covers the id and payload. The decoder
/// only yields a packet once the whole declared length has arrived, so the payload handed out
/// is exactly the frame body and an unhandled packet can be dropped without losing sync.
#[derive(Debug, Clone, Copy)]
pub struct PacketCodec {
    revision: ProtocolRevision,
}

impl PacketCodec {
    pub fn new(revision: ProtocolRevision) -> Self {
        Self { revision }
    }

    fn id_len(&self, id: i32) -> usize {
        match self.revision.id_encoding() {
            IdEncoding::Byte => 1,
            IdEncoding::VarInt => varint_len(id),
        }
    }
}

impl Decoder for PacketCodec {
    type Item = RawPacket;
    type Error = SaverError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<RawPacket>> {
        let Some((length, prefix_len)) = decode_varint(src)? else {
            return Ok(None);
        };
        if !(1..=MAX_PACKET_LENGTH).contains(&length) {
            return Err(SaverError::InvalidLength(length));
        }

        let frame_len = prefix_len + length as usize;
        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        src.advance(prefix_len);
        let mut frame = src.split_to(length as usize);
        let id = match self.revision.id_encoding() {
            IdEncoding::Byte => frame.get_u8() as i32,
            IdEncoding::VarInt => {
                let (id, id_len) = decode_varint(&frame)?.ok_or(SaverError::MalformedVarInt)?;
                frame.advance(id_len);
                id
            }
        };

        Ok(Some(RawPacket {
            id,
            payload: frame.freeze(),
        }))
    }
}

impl Encoder<RawPacket> for PacketCodec {
    type Error = SaverError;

    fn encode(&mut self, packet: RawPacket, dst: &mut BytesMut) -> Result<()> {
        let body_len = self.id_len(packet.id) + packet.payload.len();
        if body_len > MAX_PACKET_LENGTH as usize {
            return Err(SaverError::InvalidLength(body_len as i32));
        }

        dst.reserve(varint_len(body_len as i32) + body_len);
        put_varint(dst, body_len as i32);
        match self.revision.id_encoding() {
            IdEncoding::Byte => dst.put_u8(packet.id as u8),
            IdEncoding::VarInt => put_varint(dst, packet.id),
        }
        dst.extend_from_slice(&packet.payload);
        Ok(())
    }
}

/// Encodes `packet` for `revision` and writes it to the sink as one frame, flushing it.
pub async fn send_packet<P, S>(packet: &P, sink: &mut S, revision: ProtocolRevision) -> Result<()>
where
    P: Packet,
    S: Sink<RawPacket, Error = SaverError> + Unpin,
{
    sink.send(RawPacket::encode(packet, revision)?).await
}
