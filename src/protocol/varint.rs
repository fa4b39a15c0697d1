use crate::error::{Result, SaverError};
use bytes::BufMut;

/// A 32-bit VarInt never spans more than 5 groups of 7 bits.
pub const MAX_VARINT_LEN: usize = 5;

/// Writes `value` as a VarInt. Negative values are zero-extended as unsigned 32-bit,
/// so they always take the full 5 bytes.
pub fn put_varint<B: BufMut>(buf: &mut B, value: i32) {
    let mut value = value as u32;
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Number of bytes `put_varint` emits for `value`.
pub fn varint_len(value: i32) -> usize {
    let mut value = value as u32;
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

/// Decodes a VarInt from the front of `bytes`.
///
/// Returns the value and the number of bytes it occupied, or `Ok(None)` when `bytes` ends
/// before the final group. More than 5 groups is a `MalformedVarInt`.
pub fn decode_varint(bytes: &[u8]) -> Result<Option<(i32, usize)>> {
    let mut result: u32 = 0;
    for (i, &byte) in bytes.iter().take(MAX_VARINT_LEN).enumerate() {
        result |= ((byte & 0x7F) as u32) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(Some((result as i32, i + 1)));
        }
    }
    if bytes.len() >= MAX_VARINT_LEN {
        return Err(SaverError::MalformedVarInt);
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn encode(value: i32) -> Vec<u8> {
        let mut out = Vec::new();
        put_varint(&mut out, value);
        out
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(1), vec![0x01]);
        assert_eq!(encode(127), vec![0x7F]);
        assert_eq!(encode(128), vec![0x80, 0x01]);
        assert_eq!(encode(255), vec![0xFF, 0x01]);
        assert_eq!(encode(25565), vec![0xDD, 0xC7, 0x01]);
        assert_eq!(encode(2147483647), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x07]);
        assert_eq!(encode(-1), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn test_round_trip_across_widths() {
        let mut value: i64 = 0;
        while value <= i32::MAX as i64 {
            let v = value as i32;
            let bytes = encode(v);
            assert_eq!(bytes.len(), varint_len(v));
            assert_eq!(decode_varint(&bytes).unwrap(), Some((v, bytes.len())));
            value = value * 3 + 1;
        }
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        assert_eq!(decode_varint(&[0xAC, 0x02, 0xFF]).unwrap(), Some((300, 2)));
    }

    #[test]
    fn test_incomplete_needs_more() {
        assert_eq!(decode_varint(&[]).unwrap(), None);
        assert_eq!(decode_varint(&[0x80, 0x80]).unwrap(), None);
    }

    #[test]
    fn test_too_long_is_malformed() {
        assert_matches!(
            decode_varint(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF]),
            Err(SaverError::MalformedVarInt)
        );
        assert_matches!(
            decode_varint(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]),
            Err(SaverError::MalformedVarInt)
        );
    }
}
