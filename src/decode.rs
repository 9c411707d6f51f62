// Copyright (c) 2021 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

//! Top-level decoder: reads the fixed header, slices off exactly
//! `remaining_length` bytes, dispatches to the per-type sub-decoder in
//! [`crate::packet`], and checks that the sub-decoder consumed the slice
//! exactly (§4.2 of the wire contract).

use crate::byte_array::ByteArray;
use crate::error::DecodeError;
use crate::header::{FixedHeader, PacketTypeTag};
use crate::message::Message;
use crate::packet::{
    connect, connect_ack, empty, packet_id_ack, publish, publish_release, subscribe,
    subscribe_ack, unsubscribe,
};

/// Decodes one [`Message`] from the start of `data`.
///
/// Returns the decoded message together with the number of bytes consumed from
/// `data`; the caller advances its own cursor by that amount.
///
/// # Errors
///
/// Returns `DecodeError` if `data` does not begin with a complete, well-formed
/// MQTT 3.1.1 control packet.
pub fn decode(data: &[u8]) -> Result<(Message, usize), DecodeError> {
    let mut ba = ByteArray::new(data);
    let message = decode_message(&mut ba)?;
    Ok((message, ba.offset()))
}

/// Decodes one [`Message`] by reading through `ba`, advancing it by exactly the
/// bytes consumed.
///
/// This is the cursor-based counterpart of [`decode`], for callers that already
/// hold a [`ByteArray`] over a larger buffer (for example one that accumulates
/// bytes across several transport reads) and want to decode one frame at a time
/// without re-slicing.
///
/// # Errors
///
/// Returns `DecodeError` if the bytes remaining in `ba` do not begin with a
/// complete, well-formed MQTT 3.1.1 control packet.
pub fn decode_message(ba: &mut ByteArray) -> Result<Message, DecodeError> {
    let header = FixedHeader::decode(ba)?;
    let body = ba.read_bytes(header.remaining_length)?;
    let mut body_ba = ByteArray::new(body);

    let message = dispatch(header.packet_type, header.flags, header.remaining_length, &mut body_ba)?;

    if body_ba.offset() != header.remaining_length {
        return Err(DecodeError::malformed(format!(
            "remaining length mismatch: expected {}, consumed {}",
            header.remaining_length,
            body_ba.offset()
        )));
    }

    Ok(message)
}

fn dispatch(
    packet_type: PacketTypeTag,
    flags: u8,
    remaining_length: usize,
    ba: &mut ByteArray,
) -> Result<Message, DecodeError> {
    match packet_type {
        PacketTypeTag::Connect => connect::decode(ba, flags),
        PacketTypeTag::ConnectAck => connect_ack::decode(ba, flags),
        PacketTypeTag::Publish => publish::decode(ba, flags),
        PacketTypeTag::PubAck => packet_id_ack::decode(ba, flags, "PubAck").map(Message::PubAck),
        PacketTypeTag::PubRec => packet_id_ack::decode(ba, flags, "PubRec").map(Message::PubRec),
        PacketTypeTag::PubRel => publish_release::decode(ba, flags).map(Message::PubRel),
        PacketTypeTag::PubComp => {
            packet_id_ack::decode(ba, flags, "PubComp").map(Message::PubComp)
        }
        PacketTypeTag::Subscribe => subscribe::decode(ba, flags),
        PacketTypeTag::SubscribeAck => subscribe_ack::decode(ba, flags),
        PacketTypeTag::Unsubscribe => unsubscribe::decode(ba, flags),
        PacketTypeTag::UnsubscribeAck => {
            packet_id_ack::decode(ba, flags, "UnsubscribeAck").map(Message::UnsubscribeAck)
        }
        PacketTypeTag::PingRequest => {
            empty::decode(flags, remaining_length, "PingReq").map(|()| Message::PingRequest)
        }
        PacketTypeTag::PingResponse => {
            empty::decode(flags, remaining_length, "PingResp").map(|()| Message::PingResponse)
        }
        PacketTypeTag::Disconnect => {
            empty::decode(flags, remaining_length, "Disconnect").map(|()| Message::Disconnect)
        }
    }
}
