// Copyright (c) 2020 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use crate::binary_data::{decode_blob, encode_blob};
use crate::byte_array::ByteArray;
use crate::client_id::ClientIdentifier;
use crate::error::{DecodeError, EncodeError};
use crate::message::{Credentials, Message, Will};
use crate::qos::QoS;
use crate::string_data::{decode_utf8_string, encode_utf8_string};

const PROTOCOL_NAME: &[u8] = b"\x00\x04MQTT";
const PROTOCOL_LEVEL: u8 = 0x04;

const RESERVED_BIT: u8 = 0b0000_0001;
const CLEAN_SESSION_BIT: u8 = 0b0000_0010;
const WILL_FLAG_BIT: u8 = 0b0000_0100;
const WILL_QOS_MASK: u8 = 0b0001_1000;
const WILL_RETAIN_BIT: u8 = 0b0010_0000;
const PASSWORD_FLAG_BIT: u8 = 0b0100_0000;
const USERNAME_FLAG_BIT: u8 = 0b1000_0000;

/// Decodes a Connect packet body. `flags` must equal zero [MQTT-2.2.2-1]; the fixed
/// header carries no per-packet data for Connect, so the wire flags are validated
/// here instead.
pub(crate) fn decode(ba: &mut ByteArray, flags: u8) -> Result<Message, DecodeError> {
    if flags != 0 {
        return Err(DecodeError::malformed("Connect header flags must be zero"));
    }

    let protocol_name = ba.read_bytes(PROTOCOL_NAME.len())?;
    if protocol_name != PROTOCOL_NAME {
        return Err(DecodeError::malformed("invalid protocol name"));
    }

    let protocol_level = ba.read_byte()?;
    if protocol_level != PROTOCOL_LEVEL {
        return Err(DecodeError::malformed(format!(
            "unsupported protocol level 0x{protocol_level:02x}, only MQTT 3.1.1 (0x04) is supported"
        )));
    }

    let connect_flags = ba.read_byte()?;
    if connect_flags & RESERVED_BIT != 0 {
        // [MQTT-3.1.2-3]
        return Err(DecodeError::malformed("Connect reserved flag bit is set"));
    }

    let clean_session = connect_flags & CLEAN_SESSION_BIT != 0;
    let will_flag = connect_flags & WILL_FLAG_BIT != 0;
    let will_qos = QoS::from_bits((connect_flags & WILL_QOS_MASK) >> 3)
        .map_err(|_err| DecodeError::malformed("[MQTT-3.1.2-14] invalid will qos bits"))?;
    let will_retain = connect_flags & WILL_RETAIN_BIT != 0;
    let has_password = connect_flags & PASSWORD_FLAG_BIT != 0;
    let has_username = connect_flags & USERNAME_FLAG_BIT != 0;

    if !will_flag && (will_qos.is_some() || will_retain) {
        // [MQTT-3.1.2-11], [MQTT-3.1.2-13]
        return Err(DecodeError::malformed(
            "will qos/retain set without will flag",
        ));
    }
    if !has_username && has_password {
        // [MQTT-3.1.2-22]
        return Err(DecodeError::malformed(
            "password flag set without username flag",
        ));
    }

    let keep_alive = ba.read_u16()?;

    let client_id = decode_utf8_string(ba)?;
    if client_id.is_empty() {
        // Stricter than [MQTT-3.1.3-6]: this codec never assigns a server-side id.
        return Err(DecodeError::malformed("client identifier must not be empty"));
    }
    let client_id = ClientIdentifier::from_validated(client_id);

    let will = if will_flag {
        let topic = decode_utf8_string(ba)?;
        let message = decode_blob(ba)?;
        Some(Will {
            topic,
            message,
            qos: will_qos,
            retain: will_retain,
        })
    } else {
        None
    };

    let credentials = if has_username {
        let username = decode_utf8_string(ba)?;
        let password = if has_password {
            Some(decode_blob(ba)?)
        } else {
            None
        };
        Some(Credentials { username, password })
    } else {
        None
    };

    Ok(Message::Connect {
        client_id,
        clean_session,
        keep_alive,
        will,
        credentials,
    })
}

/// Computes the remaining length for a Connect message without allocating.
///
/// The constant 12 covers the 6-byte protocol name, 1-byte protocol level, 1-byte
/// connect flags, 2-byte keep-alive, and the 2-byte length prefix of the client-id
/// string itself (§4.3); the `4` and `2` below are the length prefixes of the will's
/// two fields and the credentials' username, respectively.
pub(crate) fn remaining_length(
    client_id: &ClientIdentifier,
    will: &Option<Will>,
    credentials: &Option<Credentials>,
) -> usize {
    let mut len = 12 + client_id.as_ref().len();
    if let Some(will) = will {
        len += 4 + will.topic.len() + will.message.len();
    }
    if let Some(credentials) = credentials {
        len += 2 + credentials.username.len();
        if let Some(password) = &credentials.password {
            len += 2 + password.len();
        }
    }
    len
}

pub(crate) fn encode(
    client_id: &ClientIdentifier,
    clean_session: bool,
    keep_alive: u16,
    will: &Option<Will>,
    credentials: &Option<Credentials>,
    buf: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    buf.extend_from_slice(PROTOCOL_NAME);
    buf.push(PROTOCOL_LEVEL);

    let mut flags = 0u8;
    if clean_session {
        flags |= CLEAN_SESSION_BIT;
    }
    if let Some(will) = will {
        flags |= WILL_FLAG_BIT;
        flags |= QoS::to_bits(will.qos) << 3;
        if will.retain {
            flags |= WILL_RETAIN_BIT;
        }
    }
    if let Some(credentials) = credentials {
        flags |= USERNAME_FLAG_BIT;
        if credentials.password.is_some() {
            flags |= PASSWORD_FLAG_BIT;
        }
    }
    buf.push(flags);

    buf.extend_from_slice(&keep_alive.to_be_bytes());
    encode_utf8_string(client_id.as_ref(), buf)?;

    if let Some(will) = will {
        encode_utf8_string(&will.topic, buf)?;
        encode_blob(&will.message, buf)?;
    }
    if let Some(credentials) = credentials {
        encode_utf8_string(&credentials.username, buf)?;
        if let Some(password) = &credentials.password {
            encode_blob(password, buf)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, remaining_length};
    use crate::byte_array::ByteArray;
    use crate::client_id::ClientIdentifier;
    use crate::message::Message;

    #[test]
    fn decodes_minimal_connect() {
        let buf = [
            0x00, 0x04, b'M', b'Q', b'T', b'T', 0x04, 0x02, 0x00, 0x3c, 0x00, 0x01, b'a',
        ];
        let mut ba = ByteArray::new(&buf);
        let message = decode(&mut ba, 0).unwrap();
        match message {
            Message::Connect {
                client_id,
                clean_session,
                keep_alive,
                will,
                credentials,
            } => {
                assert_eq!(client_id.as_ref(), "a");
                assert!(clean_session);
                assert_eq!(keep_alive, 60);
                assert!(will.is_none());
                assert!(credentials.is_none());
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_protocol_name() {
        let buf = [0x00, 0x04, b'x', b'x', b'x', b'x', 0x04, 0x00, 0x00, 0x00, 0x00, 0x00];
        let mut ba = ByteArray::new(&buf);
        assert!(decode(&mut ba, 0).is_err());
    }

    #[test]
    fn rejects_password_without_username() {
        let buf = [
            0x00, 0x04, b'M', b'Q', b'T', b'T', 0x04, 0b0100_0000, 0x00, 0x00, 0x00, 0x01, b'a',
        ];
        let mut ba = ByteArray::new(&buf);
        assert!(decode(&mut ba, 0).is_err());
    }

    #[test]
    fn encode_matches_hand_computed_length() {
        let client_id = ClientIdentifier::new("a").unwrap();
        let len = remaining_length(&client_id, &None, &None);
        let mut buf = Vec::new();
        encode(&client_id, true, 60, &None, &None, &mut buf).unwrap();
        assert_eq!(len, buf.len());
    }
}
