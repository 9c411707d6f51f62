// Copyright (c) 2021 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

//! Top-level encoder: computes the remaining length as a pure function of a
//! [`Message`]'s semantic fields, then emits the fixed header, variable header
//! and payload through the per-type encoder in [`crate::packet`] (§4.3).

use crate::error::EncodeError;
use crate::header::{encode_fixed_header, PacketTypeTag};
use crate::message::Message;
use crate::packet::{
    connect, connect_ack, empty, packet_id_ack, publish, publish_release, subscribe,
    subscribe_ack, unsubscribe,
};

/// Encodes `message` to its canonical MQTT 3.1.1 wire bytes.
///
/// # Errors
///
/// Returns `EncodeError` if a field exceeds the limits the wire format allows
/// (for example a UTF-8 string or blob longer than 65,535 bytes, or an empty
/// Subscribe/Unsubscribe filter list).
pub fn encode(message: &Message) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();

    match message {
        Message::Connect {
            client_id,
            clean_session,
            keep_alive,
            will,
            credentials,
        } => {
            let remaining_length = connect::remaining_length(client_id, will, credentials);
            encode_fixed_header(PacketTypeTag::Connect, 0, remaining_length, &mut buf)?;
            connect::encode(client_id, *clean_session, *keep_alive, will, credentials, &mut buf)?;
        }
        Message::ConnectAck(result) => {
            encode_fixed_header(PacketTypeTag::ConnectAck, 0, connect_ack::REMAINING_LENGTH, &mut buf)?;
            connect_ack::encode(*result, &mut buf)?;
        }
        Message::Publish {
            dup,
            retain,
            topic,
            qos,
            payload,
        } => {
            let flags = publish::flags(*dup, *retain, *qos);
            let remaining_length = publish::remaining_length(topic, qos, payload);
            encode_fixed_header(PacketTypeTag::Publish, flags, remaining_length, &mut buf)?;
            publish::encode(topic, *qos, payload, &mut buf)?;
        }
        Message::PubAck(packet_id) => {
            encode_fixed_header(PacketTypeTag::PubAck, 0, packet_id_ack::REMAINING_LENGTH, &mut buf)?;
            packet_id_ack::encode(*packet_id, &mut buf)?;
        }
        Message::PubRec(packet_id) => {
            encode_fixed_header(PacketTypeTag::PubRec, 0, packet_id_ack::REMAINING_LENGTH, &mut buf)?;
            packet_id_ack::encode(*packet_id, &mut buf)?;
        }
        Message::PubRel(packet_id) => {
            encode_fixed_header(
                PacketTypeTag::PubRel,
                publish_release::FLAGS,
                publish_release::REMAINING_LENGTH,
                &mut buf,
            )?;
            publish_release::encode(*packet_id, &mut buf)?;
        }
        Message::PubComp(packet_id) => {
            encode_fixed_header(PacketTypeTag::PubComp, 0, packet_id_ack::REMAINING_LENGTH, &mut buf)?;
            packet_id_ack::encode(*packet_id, &mut buf)?;
        }
        Message::Subscribe { packet_id, filters } => {
            let remaining_length = subscribe::remaining_length(filters);
            encode_fixed_header(PacketTypeTag::Subscribe, subscribe::FLAGS, remaining_length, &mut buf)?;
            subscribe::encode(*packet_id, filters, &mut buf)?;
        }
        Message::SubscribeAck { packet_id, results } => {
            let remaining_length = subscribe_ack::remaining_length(results);
            encode_fixed_header(PacketTypeTag::SubscribeAck, 0, remaining_length, &mut buf)?;
            subscribe_ack::encode(*packet_id, results, &mut buf)?;
        }
        Message::Unsubscribe { packet_id, filters } => {
            let remaining_length = unsubscribe::remaining_length(filters);
            encode_fixed_header(
                PacketTypeTag::Unsubscribe,
                unsubscribe::FLAGS,
                remaining_length,
                &mut buf,
            )?;
            unsubscribe::encode(*packet_id, filters, &mut buf)?;
        }
        Message::UnsubscribeAck(packet_id) => {
            encode_fixed_header(PacketTypeTag::UnsubscribeAck, 0, packet_id_ack::REMAINING_LENGTH, &mut buf)?;
            packet_id_ack::encode(*packet_id, &mut buf)?;
        }
        Message::PingRequest => {
            encode_fixed_header(PacketTypeTag::PingRequest, 0, empty::REMAINING_LENGTH, &mut buf)?;
        }
        Message::PingResponse => {
            encode_fixed_header(PacketTypeTag::PingResponse, 0, empty::REMAINING_LENGTH, &mut buf)?;
        }
        Message::Disconnect => {
            encode_fixed_header(PacketTypeTag::Disconnect, 0, empty::REMAINING_LENGTH, &mut buf)?;
        }
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::encode;
    use crate::message::Message;

    #[test]
    fn encodes_ping_request() {
        assert_eq!(encode(&Message::PingRequest).unwrap(), [0xc0, 0x00]);
    }

    #[test]
    fn encodes_disconnect() {
        assert_eq!(encode(&Message::Disconnect).unwrap(), [0xe0, 0x00]);
    }

    #[test]
    fn encodes_pubrel_with_fixed_flags() {
        let bytes = encode(&Message::PubRel(1)).unwrap();
        assert_eq!(bytes, [0x62, 0x02, 0x00, 0x01]);
    }

    #[test]
    fn encodes_connack_refusal() {
        use crate::message::ConnectionRefusal;
        let bytes = encode(&Message::ConnectAck(Err(ConnectionRefusal::BadUsernameOrPassword))).unwrap();
        assert_eq!(bytes, [0x20, 0x02, 0x00, 0x04]);
    }
}
