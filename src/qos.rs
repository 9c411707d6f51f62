// Copyright (c) 2020 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Quality of Service level for a Publish, Will, or subscription request.
///
/// MQTT actually defines three levels (0, 1, 2); this codec represents "at-most-once"
/// as the absence of a `QoS` (an `Option<QoS>` that is `None`) rather than as a third
/// enum member. `None` and `Some(QoS::AtLeastOnce | QoS::ExactlyOnce)` together
/// cover the full wire range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QoS {
    #[default]
    AtLeastOnce,
    ExactlyOnce,
}

impl QoS {
    /// Decodes the two-bit QoS field used by Publish flags and Will flags.
    ///
    /// `0b00` is not representable as a `QoS` value on its own; callers that accept
    /// "no QoS" (most do) should call [`decode_nullable`] instead.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if `bits` is `0b11`, the one combination MQTT reserves.
    pub(crate) fn from_bits(bits: u8) -> Result<Option<Self>, DecodeError> {
        match bits {
            0b00 => Ok(None),
            0b01 => Ok(Some(Self::AtLeastOnce)),
            0b10 => Ok(Some(Self::ExactlyOnce)),
            _ => Err(DecodeError::malformed("invalid qos bits 0b11")),
        }
    }

    /// Two-bit wire encoding, with `None` mapping to `0b00`.
    #[must_use]
    pub(crate) fn to_bits(qos: Option<Self>) -> u8 {
        match qos {
            None => 0b00,
            Some(Self::AtLeastOnce) => 0b01,
            Some(Self::ExactlyOnce) => 0b10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QoS;

    #[test]
    fn bits_round_trip() {
        for qos in [None, Some(QoS::AtLeastOnce), Some(QoS::ExactlyOnce)] {
            let bits = QoS::to_bits(qos);
            assert_eq!(QoS::from_bits(bits).unwrap(), qos);
        }
    }

    #[test]
    fn rejects_reserved_bits() {
        assert!(QoS::from_bits(0b11).is_err());
    }
}
