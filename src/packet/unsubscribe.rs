// Copyright (c) 2020 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use crate::byte_array::ByteArray;
use crate::error::{DecodeError, EncodeError};
use crate::message::{Message, PacketId};
use crate::string_data::{decode_utf8_string, encode_utf8_string, utf8_string_bytes};

pub(crate) const FLAGS: u8 = 0b0010;

/// Decodes an Unsubscribe body: a packet id followed by one or more topic filters,
/// repeated until the packet's remaining-length bytes are exhausted. `ba` must be
/// scoped to exactly those bytes.
pub(crate) fn decode(ba: &mut ByteArray, flags: u8) -> Result<Message, DecodeError> {
    if flags != FLAGS {
        return Err(DecodeError::malformed(
            "Unsubscribe header flags must be 0b0010",
        ));
    }

    let packet_id = ba.read_u16()?;

    let mut filters = Vec::new();
    while !ba.is_empty() {
        filters.push(decode_utf8_string(ba)?);
    }

    if filters.is_empty() {
        // [MQTT-3.10.3-2]
        return Err(DecodeError::malformed(
            "Unsubscribe must carry at least one topic filter",
        ));
    }

    Ok(Message::Unsubscribe { packet_id, filters })
}

pub(crate) fn remaining_length(filters: &[String]) -> usize {
    2 + filters.iter().map(|topic| utf8_string_bytes(topic)).sum::<usize>()
}

pub(crate) fn encode(
    packet_id: PacketId,
    filters: &[String],
    buf: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    if filters.is_empty() {
        return Err(EncodeError::invalid(
            "Unsubscribe must carry at least one topic filter",
        ));
    }
    buf.extend_from_slice(&packet_id.to_be_bytes());
    for topic in filters {
        encode_utf8_string(topic, buf)?;
    }
    Ok(())
}
