// Copyright (c) 2020 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use crate::byte_array::ByteArray;
use crate::error::{DecodeError, EncodeError};
use crate::message::{ConnectionRefusal, Message};

const SESSION_PRESENT_BIT: u8 = 0b0000_0001;

/// `remaining_length` for every ConnAck: one flags byte, one return-code byte.
pub(crate) const REMAINING_LENGTH: usize = 2;

pub(crate) fn decode(ba: &mut ByteArray, flags: u8) -> Result<Message, DecodeError> {
    if flags != 0 {
        return Err(DecodeError::malformed("ConnAck header flags must be zero"));
    }

    let ack_flags = ba.read_byte()?;
    if ack_flags & !SESSION_PRESENT_BIT != 0 {
        // [MQTT-3.2.2-1]
        return Err(DecodeError::malformed(
            "ConnAck acknowledge flags reserved bits are set",
        ));
    }
    let session_present = ack_flags & SESSION_PRESENT_BIT != 0;

    let return_code = ba.read_byte()?;
    let result = if return_code == 0 {
        Ok(session_present)
    } else {
        let refusal = ConnectionRefusal::from_return_code(return_code).ok_or_else(|| {
            DecodeError::malformed(format!("unknown ConnAck return code {return_code}"))
        })?;
        if session_present {
            // [MQTT-3.2.2-4]: a Server MUST set session present to 0 if it sends a
            // non-zero return code.
            return Err(DecodeError::malformed(
                "ConnAck session present set alongside a refusal return code",
            ));
        }
        Err(refusal)
    };

    Ok(Message::ConnectAck(result))
}

pub(crate) fn encode(result: Result<bool, ConnectionRefusal>, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    match result {
        Ok(session_present) => {
            buf.push(u8::from(session_present));
            buf.push(0);
        }
        Err(refusal) => {
            buf.push(0);
            buf.push(refusal.to_return_code());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use crate::byte_array::ByteArray;
    use crate::message::{ConnectionRefusal, Message};

    #[test]
    fn decodes_accepted_with_session_present() {
        let buf = [0x01, 0x00];
        let mut ba = ByteArray::new(&buf);
        let message = decode(&mut ba, 0).unwrap();
        assert_eq!(message, Message::ConnectAck(Ok(true)));
    }

    #[test]
    fn decodes_refusal() {
        let buf = [0x00, 0x05];
        let mut ba = ByteArray::new(&buf);
        let message = decode(&mut ba, 0).unwrap();
        assert_eq!(
            message,
            Message::ConnectAck(Err(ConnectionRefusal::NotAuthorized))
        );
    }

    #[test]
    fn rejects_session_present_alongside_refusal() {
        let buf = [0x01, 0x05];
        let mut ba = ByteArray::new(&buf);
        assert!(decode(&mut ba, 0).is_err());
    }

    #[test]
    fn encodes_refusal() {
        let mut buf = Vec::new();
        encode(Err(ConnectionRefusal::ServerUnavailable), &mut buf).unwrap();
        assert_eq!(buf, [0x00, 0x03]);
    }
}
