// Copyright (c) 2021 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use byteorder::{BigEndian, WriteBytesExt};

use crate::byte_array::ByteArray;
use crate::error::{DecodeError, EncodeError};

/// Reads a length-prefixed UTF-8 string: a big-endian `u16` byte length followed by
/// that many UTF-8 bytes.
///
/// # Errors
///
/// Returns `DecodeError` if the input is exhausted or the bytes are not well-formed
/// UTF-8.
pub fn decode_utf8_string(ba: &mut ByteArray) -> Result<String, DecodeError> {
    let len = ba.read_u16()?;
    ba.read_utf8_string(len as usize)
}

/// Writes `text` as a length-prefixed UTF-8 string.
///
/// # Errors
///
/// Returns `EncodeError` if `text` is longer than 65,535 bytes.
pub fn encode_utf8_string(text: &str, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    let len = u16::try_from(text.len())
        .map_err(|_| EncodeError::invalid(format!("string of {} bytes exceeds u16", text.len())))?;
    buf.write_u16::<BigEndian>(len)
        .expect("writing to a Vec<u8> cannot fail");
    buf.extend_from_slice(text.as_bytes());
    Ok(())
}

/// Byte length `text` would occupy once length-prefixed.
#[must_use]
pub fn utf8_string_bytes(text: &str) -> usize {
    2 + text.len()
}

#[cfg(test)]
mod tests {
    use super::{decode_utf8_string, encode_utf8_string, utf8_string_bytes};
    use crate::byte_array::ByteArray;

    #[test]
    fn round_trips() {
        let mut buf = Vec::new();
        encode_utf8_string("a/b", &mut buf).unwrap();
        assert_eq!(buf, [0x00, 0x03, b'a', b'/', b'b']);
        assert_eq!(utf8_string_bytes("a/b"), buf.len());

        let mut ba = ByteArray::new(&buf);
        assert_eq!(decode_utf8_string(&mut ba).unwrap(), "a/b");
    }

    #[test]
    fn empty_string_round_trips() {
        let mut buf = Vec::new();
        encode_utf8_string("", &mut buf).unwrap();
        assert_eq!(buf, [0x00, 0x00]);
        let mut ba = ByteArray::new(&buf);
        assert_eq!(decode_utf8_string(&mut ba).unwrap(), "");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let buf = [0x00, 0x02, 0xff, 0xfe];
        let mut ba = ByteArray::new(&buf);
        assert!(decode_utf8_string(&mut ba).is_err());
    }

    #[test]
    fn rejects_truncated_length_prefix() {
        let buf = [0x00, 0x05, b'h', b'i'];
        let mut ba = ByteArray::new(&buf);
        assert!(decode_utf8_string(&mut ba).is_err());
    }
}
