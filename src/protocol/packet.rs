use crate::error::{Result, SaverError};
use crate::protocol::revision::{PacketKind, ProtocolRevision};
use crate::protocol::varint::{decode_varint, put_varint};
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use bytes::Bytes;

/// Packet trait. Reads and writes the payload only; the id and length prefix belong to the
/// framer, since the id of a packet depends on the protocol revision.
pub trait Packet: Sized {
    /// Which packet this is, resolved to a wire id by [`ProtocolRevision::packet_id`].
    const KIND: PacketKind;

    /// Reads the packet payload from the buffer.
    fn read_from_buffer(
        buffer: &mut MinecraftPacketBuffer,
        revision: ProtocolRevision,
    ) -> Result<Self>;

    /// Writes the packet payload to the buffer.
    fn write_to_buffer(
        &self,
        buffer: &mut MinecraftPacketBuffer,
        revision: ProtocolRevision,
    ) -> Result<()>;
}

/// One packet as it travels through the framer: the wire id and the raw payload after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPacket {
    pub id: i32,
    pub payload: Bytes,
}

impl RawPacket {
    pub fn new(id: i32, payload: impl Into<Bytes>) -> Self {
        Self {
            id,
            payload: payload.into(),
        }
    }

    /// Serializes `packet` and tags it with the id `revision` assigns to it.
    pub fn encode<P: Packet>(packet: &P, revision: ProtocolRevision) -> Result<Self> {
        let mut buffer = MinecraftPacketBuffer::new();
        packet.write_to_buffer(&mut buffer, revision)?;
        Ok(Self::new(revision.packet_id(P::KIND), buffer.buffer))
    }

    /// Parses the payload as `P`. The id is not checked; dispatch already did that.
    pub fn decode<P: Packet>(&self, revision: ProtocolRevision) -> Result<P> {
        let mut buffer = MinecraftPacketBuffer::from_bytes(self.payload.to_vec());
        P::read_from_buffer(&mut buffer, revision)
    }
}

/// Reinterprets a big-endian bit pattern as an IEEE-754 double.
pub fn f64_from_be_bytes(bytes: [u8; 8]) -> f64 {
    BigEndian::read_f64(&bytes)
}

/// Reinterprets a big-endian bit pattern as an IEEE-754 float.
pub fn f32_from_be_bytes(bytes: [u8; 4]) -> f32 {
    BigEndian::read_f32(&bytes)
}

/// Minecraft packet buffer. Contains the buffer and the cursor.
/// The cursor is used to keep track of the current position in the buffer.
/// All fixed-width values are big-endian.
#[derive(Debug, Default)]
pub struct MinecraftPacketBuffer {
    pub buffer: Vec<u8>,
    cursor: usize,
}

impl MinecraftPacketBuffer {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
        }
    }

    /// Creates a buffer over `bytes` with the cursor at the start.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            buffer: bytes,
            cursor: 0,
        }
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    fn take(&mut self, len: usize) -> Result<&[u8]> {
        let have = self.remaining();
        if len > have {
            return Err(SaverError::UnexpectedEof { need: len, have });
        }
        let start = self.cursor;
        self.cursor += len;
        Ok(&self.buffer[start..start + len])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Writes a VarInt to the buffer.
    /// A VarInt is encoded using 7 bits per byte, least significant group first, with the
    /// most significant bit of each byte set to 1 unless it is the final byte.
    pub fn write_varint(&mut self, value: i32) {
        put_varint(&mut self.buffer, value);
    }

    /// Reads a VarInt from the buffer. Running out of bytes mid-VarInt is malformed, since
    /// the buffer always holds a complete packet.
    pub fn read_varint(&mut self) -> Result<i32> {
        match decode_varint(&self.buffer[self.cursor..])? {
            Some((value, len)) => {
                self.cursor += len;
                Ok(value)
            }
            None => Err(SaverError::MalformedVarInt),
        }
    }

    /// Writes a VarInt length followed by the raw bytes.
    pub fn write_byte_string(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as i32);
        self.buffer.extend_from_slice(bytes);
    }

    /// Reads a VarInt length followed by that many raw bytes. No UTF-8 validation.
    pub fn read_byte_string(&mut self) -> Result<Vec<u8>> {
        let length = self.read_varint()?;
        if length < 0 {
            return Err(SaverError::MalformedVarInt);
        }
        Ok(self.take(length as usize)?.to_vec())
    }

    pub fn write_string(&mut self, value: &str) {
        self.write_byte_string(value.as_bytes());
    }

    /// Reads a string. Invalid UTF-8 sequences are not rejected; they become U+FFFD.
    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_byte_string()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn write_bytes_raw(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn read_bytes_raw(&mut self, len: usize) -> Result<Vec<u8>> {
        Ok(self.take(len)?.to_vec())
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(value as u8);
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    // Write an u16 in network (big-endian) order.
    pub fn write_u16(&mut self, value: u16) {
        self.buffer.push((value >> 8) as u8);
        self.buffer.push((value & 0xFF) as u8);
    }

    // Read an u16 in network (big-endian) order.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.buffer.write_i32::<BigEndian>(value)?;
        Ok(())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.take(4)?))
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.buffer.write_f32::<BigEndian>(value)?;
        Ok(())
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32_from_be_bytes(self.take_array()?))
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.buffer.write_f64::<BigEndian>(value)?;
        Ok(())
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64_from_be_bytes(self.take_array()?))
    }
}
