// Copyright (c) 2020 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use crate::byte_array::ByteArray;
use crate::error::{DecodeError, EncodeError};
use crate::message::{Message, PacketId, SubscribeAckResult};
use crate::qos::QoS;

const FAILURE_CODE: u8 = 0x80;

/// Decodes a SubscribeAck body: a packet id followed by one result byte per
/// requested filter, repeated until the packet's remaining-length bytes are
/// exhausted. `ba` must be scoped to exactly those bytes.
pub(crate) fn decode(ba: &mut ByteArray, flags: u8) -> Result<Message, DecodeError> {
    if flags != 0 {
        return Err(DecodeError::malformed("SubscribeAck header flags must be zero"));
    }

    let packet_id = ba.read_u16()?;

    let mut results = Vec::new();
    while !ba.is_empty() {
        let code = ba.read_byte()?;
        let result = if code == FAILURE_CODE {
            SubscribeAckResult::Failure
        } else {
            let qos = QoS::from_bits(code)
                .map_err(|_err| DecodeError::malformed(format!("invalid SubscribeAck return code {code}")))?;
            SubscribeAckResult::Granted(qos)
        };
        results.push(result);
    }

    if results.is_empty() {
        return Err(DecodeError::malformed(
            "SubscribeAck must carry at least one result",
        ));
    }

    Ok(Message::SubscribeAck { packet_id, results })
}

pub(crate) fn remaining_length(results: &[SubscribeAckResult]) -> usize {
    2 + results.len()
}

pub(crate) fn encode(
    packet_id: PacketId,
    results: &[SubscribeAckResult],
    buf: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    if results.is_empty() {
        return Err(EncodeError::invalid(
            "SubscribeAck must carry at least one result",
        ));
    }
    buf.extend_from_slice(&packet_id.to_be_bytes());
    for result in results {
        let code = match result {
            SubscribeAckResult::Granted(qos) => QoS::to_bits(*qos),
            SubscribeAckResult::Failure => FAILURE_CODE,
        };
        buf.push(code);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, remaining_length};
    use crate::byte_array::ByteArray;
    use crate::message::{Message, SubscribeAckResult};
    use crate::qos::QoS;

    #[test]
    fn decodes_mixed_results() {
        let buf = [0x00, 0x01, 0x01, 0x80];
        let mut ba = ByteArray::new(&buf);
        let message = decode(&mut ba, 0).unwrap();
        match message {
            Message::SubscribeAck { packet_id, results } => {
                assert_eq!(packet_id, 1);
                assert_eq!(
                    results,
                    vec![
                        SubscribeAckResult::Granted(Some(QoS::AtLeastOnce)),
                        SubscribeAckResult::Failure,
                    ]
                );
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_return_code() {
        let buf = [0x00, 0x01, 0x03];
        let mut ba = ByteArray::new(&buf);
        assert!(decode(&mut ba, 0).is_err());
    }

    #[test]
    fn rejects_empty_result_list() {
        let buf = [0x00, 0x01];
        let mut ba = ByteArray::new(&buf);
        assert!(decode(&mut ba, 0).is_err());
    }

    #[test]
    fn encode_matches_hand_computed_length() {
        let results = vec![SubscribeAckResult::Granted(None)];
        let len = remaining_length(&results);
        let mut buf = Vec::new();
        encode(1, &results, &mut buf).unwrap();
        assert_eq!(len, buf.len());
    }
}
