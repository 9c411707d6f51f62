// Copyright (c) 2021 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use byteorder::{BigEndian, WriteBytesExt};

use crate::byte_array::ByteArray;
use crate::error::{DecodeError, EncodeError};

/// Reads a length-prefixed opaque byte blob: a big-endian `u16` byte length followed
/// by that many bytes, taken verbatim (no UTF-8 validation, unlike [`crate::string_data`]).
///
/// # Errors
///
/// Returns `DecodeError` if the input is exhausted before `len` bytes are available.
pub fn decode_blob(ba: &mut ByteArray) -> Result<Vec<u8>, DecodeError> {
    let len = ba.read_u16()?;
    Ok(ba.read_bytes(len as usize)?.to_vec())
}

/// Writes `data` as a length-prefixed opaque byte blob.
///
/// # Errors
///
/// Returns `EncodeError` if `data` is longer than 65,535 bytes.
pub fn encode_blob(data: &[u8], buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    let len = u16::try_from(data.len())
        .map_err(|_| EncodeError::invalid(format!("blob of {} bytes exceeds u16", data.len())))?;
    buf.write_u16::<BigEndian>(len)
        .expect("writing to a Vec<u8> cannot fail");
    buf.extend_from_slice(data);
    Ok(())
}

/// Byte length `data` would occupy once length-prefixed.
#[must_use]
pub const fn blob_bytes(data: &[u8]) -> usize {
    2 + data.len()
}

#[cfg(test)]
mod tests {
    use super::{decode_blob, encode_blob, blob_bytes};
    use crate::byte_array::ByteArray;

    #[test]
    fn round_trips_arbitrary_bytes() {
        let data = [0xde, 0xad, 0xbe, 0xef];
        let mut buf = Vec::new();
        encode_blob(&data, &mut buf).unwrap();
        assert_eq!(buf, [0x00, 0x04, 0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(blob_bytes(&data), buf.len());

        let mut ba = ByteArray::new(&buf);
        assert_eq!(decode_blob(&mut ba).unwrap(), data);
    }

    #[test]
    fn rejects_truncated_blob() {
        let buf = [0x00, 0x04, 0x01, 0x02];
        let mut ba = ByteArray::new(&buf);
        assert!(decode_blob(&mut ba).is_err());
    }
}
