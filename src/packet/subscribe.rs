// Copyright (c) 2020 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use crate::byte_array::ByteArray;
use crate::error::{DecodeError, EncodeError};
use crate::message::{Message, PacketId};
use crate::qos::QoS;
use crate::string_data::{decode_utf8_string, encode_utf8_string, utf8_string_bytes};

pub(crate) const FLAGS: u8 = 0b0010;

/// Decodes a Subscribe body: a packet id followed by one or more (topic filter,
/// requested QoS) pairs, repeated until the packet's remaining-length bytes are
/// exhausted. `ba` must be scoped to exactly those bytes.
pub(crate) fn decode(ba: &mut ByteArray, flags: u8) -> Result<Message, DecodeError> {
    if flags != FLAGS {
        return Err(DecodeError::malformed("Subscribe header flags must be 0b0010"));
    }

    let packet_id = ba.read_u16()?;

    let mut filters = Vec::new();
    while !ba.is_empty() {
        let topic = decode_utf8_string(ba)?;
        let options = ba.read_byte()?;
        if options & 0b1111_1100 != 0 {
            // [MQTT-3.8.3-4]
            return Err(DecodeError::malformed(
                "Subscribe requested qos reserved bits are set",
            ));
        }
        let qos = QoS::from_bits(options & 0b11)
            .map_err(|_err| DecodeError::malformed("invalid Subscribe requested qos"))?;
        filters.push((topic, qos));
    }

    if filters.is_empty() {
        // [MQTT-3.8.3-3]
        return Err(DecodeError::malformed(
            "Subscribe must carry at least one topic filter",
        ));
    }

    Ok(Message::Subscribe { packet_id, filters })
}

pub(crate) fn remaining_length(filters: &[(String, Option<QoS>)]) -> usize {
    2 + filters
        .iter()
        .map(|(topic, _)| utf8_string_bytes(topic) + 1)
        .sum::<usize>()
}

pub(crate) fn encode(
    packet_id: PacketId,
    filters: &[(String, Option<QoS>)],
    buf: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    if filters.is_empty() {
        return Err(EncodeError::invalid(
            "Subscribe must carry at least one topic filter",
        ));
    }
    buf.extend_from_slice(&packet_id.to_be_bytes());
    for (topic, qos) in filters {
        encode_utf8_string(topic, buf)?;
        buf.push(QoS::to_bits(*qos));
    }
    Ok(())
}
