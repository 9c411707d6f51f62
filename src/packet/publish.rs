// Copyright (c) 2020 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use crate::byte_array::ByteArray;
use crate::error::{DecodeError, EncodeError};
use crate::message::{Message, PacketId};
use crate::qos::QoS;
use crate::string_data::{decode_utf8_string, encode_utf8_string, utf8_string_bytes};

const DUP_BIT: u8 = 0b0000_1000;
const QOS_MASK: u8 = 0b0000_0110;
const RETAIN_BIT: u8 = 0b0000_0001;

/// Decodes a Publish body. `ba` must be scoped to exactly this packet's
/// remaining-length bytes; whatever is left after the variable header is the payload.
pub(crate) fn decode(ba: &mut ByteArray, flags: u8) -> Result<Message, DecodeError> {
    let dup = flags & DUP_BIT != 0;
    let retain = flags & RETAIN_BIT != 0;
    let qos = QoS::from_bits((flags & QOS_MASK) >> 1)
        .map_err(|_err| DecodeError::malformed("[MQTT-3.3.1-4] invalid publish qos bits"))?;
    if qos.is_none() && dup {
        // [MQTT-3.3.1-2]
        return Err(DecodeError::malformed(
            "Publish dup flag set on a QoS 0 message",
        ));
    }

    let topic = decode_utf8_string(ba)?;
    if topic.is_empty() {
        return Err(DecodeError::malformed("Publish topic name must not be empty"));
    }

    let qos = match qos {
        Some(level) => {
            let packet_id = ba.read_u16()?;
            Some((level, packet_id))
        }
        None => None,
    };

    let payload = ba.read_bytes(ba.remaining_bytes())?.to_vec();

    Ok(Message::Publish {
        dup,
        retain,
        topic,
        qos,
        payload,
    })
}

pub(crate) fn flags(dup: bool, retain: bool, qos: Option<(QoS, PacketId)>) -> u8 {
    let mut flags = 0u8;
    if dup {
        flags |= DUP_BIT;
    }
    if retain {
        flags |= RETAIN_BIT;
    }
    flags |= QoS::to_bits(qos.map(|(level, _)| level)) << 1;
    flags
}

pub(crate) fn remaining_length(topic: &str, qos: &Option<(QoS, PacketId)>, payload: &[u8]) -> usize {
    let packet_id_bytes = if qos.is_some() { 2 } else { 0 };
    utf8_string_bytes(topic) + packet_id_bytes + payload.len()
}

pub(crate) fn encode(
    topic: &str,
    qos: Option<(QoS, PacketId)>,
    payload: &[u8],
    buf: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    encode_utf8_string(topic, buf)?;
    if let Some((_, packet_id)) = qos {
        buf.extend_from_slice(&packet_id.to_be_bytes());
    }
    buf.extend_from_slice(payload);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, flags, remaining_length};
    use crate::byte_array::ByteArray;
    use crate::message::Message;
    use crate::qos::QoS;

    #[test]
    fn decodes_qos1_publish() {
        let buf = [0x00, 0x03, b'a', b'/', b'b', 0x00, 0x2a, b'h', b'i'];
        let mut ba = ByteArray::new(&buf);
        let message = decode(&mut ba, DUP_BIT_FOR_TEST | 0b0000_0010).unwrap();
        match message {
            Message::Publish {
                dup,
                retain,
                topic,
                qos,
                payload,
            } => {
                assert!(dup);
                assert!(!retain);
                assert_eq!(topic, "a/b");
                assert_eq!(qos, Some((QoS::AtLeastOnce, 42)));
                assert_eq!(payload, b"hi");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    const DUP_BIT_FOR_TEST: u8 = 0b0000_1000;

    #[test]
    fn decodes_qos0_publish_without_packet_id() {
        let buf = [0x00, 0x01, b't', b'x'];
        let mut ba = ByteArray::new(&buf);
        let message = decode(&mut ba, 0).unwrap();
        match message {
            Message::Publish { qos, payload, .. } => {
                assert_eq!(qos, None);
                assert_eq!(payload, b"x");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn rejects_dup_on_qos0() {
        let buf = [0x00, 0x01, b't', b'x'];
        let mut ba = ByteArray::new(&buf);
        assert!(decode(&mut ba, DUP_BIT_FOR_TEST).is_err());
    }

    #[test]
    fn rejects_empty_topic() {
        let buf = [0x00, 0x00];
        let mut ba = ByteArray::new(&buf);
        assert!(decode(&mut ba, 0).is_err());
    }

    #[test]
    fn flags_and_length_round_trip() {
        let qos = Some((QoS::ExactlyOnce, 7));
        assert_eq!(flags(false, true, qos), 0b0000_0101);
        let len = remaining_length("a", &qos, b"payload");
        let mut buf = Vec::new();
        encode("a", qos, b"payload", &mut buf).unwrap();
        assert_eq!(len, buf.len());
    }
}
