// Copyright (c) 2020 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use serde::{Deserialize, Serialize};

use crate::client_id::ClientIdentifier;
use crate::qos::QoS;

/// Packet identifier used to correlate acknowledgements with the originating
/// Publish/Subscribe/Unsubscribe. The codec accepts zero on the wire even though
/// higher layers typically forbid it for QoS > 0 flows (§9, open question).
pub type PacketId = u16;

/// A message the broker publishes on the client's behalf upon abnormal disconnect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Will {
    pub topic: String,
    pub message: Vec<u8>,
    pub qos: Option<QoS>,
    pub retain: bool,
}

/// Credentials carried in a Connect packet's payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: Option<Vec<u8>>,
}

/// Reason a Server refused a Connect request, in the fixed order corresponding to
/// wire return codes 1..5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionRefusal {
    /// Return code 1: the Server does not support the requested protocol level.
    UnacceptableProtocolVersion,
    /// Return code 2: the client identifier is correct UTF-8 but rejected by the Server.
    IdentifierRejected,
    /// Return code 3: the network connection is made but the MQTT service is unavailable.
    ServerUnavailable,
    /// Return code 4: the username or password is malformed.
    BadUsernameOrPassword,
    /// Return code 5: the client is not authorized to connect.
    NotAuthorized,
}

impl ConnectionRefusal {
    pub(crate) const fn from_return_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::UnacceptableProtocolVersion),
            2 => Some(Self::IdentifierRejected),
            3 => Some(Self::ServerUnavailable),
            4 => Some(Self::BadUsernameOrPassword),
            5 => Some(Self::NotAuthorized),
            _ => None,
        }
    }

    pub(crate) const fn to_return_code(self) -> u8 {
        match self {
            Self::UnacceptableProtocolVersion => 1,
            Self::IdentifierRejected => 2,
            Self::ServerUnavailable => 3,
            Self::BadUsernameOrPassword => 4,
            Self::NotAuthorized => 5,
        }
    }
}

/// A Server's reply to a Subscribe request for one topic filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscribeAckResult {
    /// The subscription was accepted at the given QoS (absent means at-most-once).
    Granted(Option<QoS>),
    /// Wire code 0x80: the subscription was rejected.
    Failure,
}

/// The tagged union of all 14 MQTT 3.1.1 control packet shapes.
///
/// `Message` values are produced only by [`crate::decode::decode`] or built directly
/// by a caller for [`crate::encode::encode`]; they own their payload and carry no
/// reference to the transport, so they are freely `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Message {
    Connect {
        client_id: ClientIdentifier,
        clean_session: bool,
        keep_alive: u16,
        will: Option<Will>,
        credentials: Option<Credentials>,
    },
    ConnectAck(Result<bool, ConnectionRefusal>),
    Publish {
        dup: bool,
        retain: bool,
        topic: String,
        qos: Option<(QoS, PacketId)>,
        payload: Vec<u8>,
    },
    PubAck(PacketId),
    PubRec(PacketId),
    PubRel(PacketId),
    PubComp(PacketId),
    Subscribe {
        packet_id: PacketId,
        filters: Vec<(String, Option<QoS>)>,
    },
    SubscribeAck {
        packet_id: PacketId,
        results: Vec<SubscribeAckResult>,
    },
    Unsubscribe {
        packet_id: PacketId,
        filters: Vec<String>,
    },
    UnsubscribeAck(PacketId),
    PingRequest,
    PingResponse,
    Disconnect,
}

impl Message {
    /// Human-readable packet-type name, mainly useful for log lines.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Connect { .. } => "CONNECT",
            Self::ConnectAck(_) => "CONNACK",
            Self::Publish { .. } => "PUBLISH",
            Self::PubAck(_) => "PUBACK",
            Self::PubRec(_) => "PUBREC",
            Self::PubRel(_) => "PUBREL",
            Self::PubComp(_) => "PUBCOMP",
            Self::Subscribe { .. } => "SUBSCRIBE",
            Self::SubscribeAck { .. } => "SUBACK",
            Self::Unsubscribe { .. } => "UNSUBSCRIBE",
            Self::UnsubscribeAck(_) => "UNSUBACK",
            Self::PingRequest => "PINGREQ",
            Self::PingResponse => "PINGRESP",
            Self::Disconnect => "DISCONNECT",
        }
    }
}
