// Copyright (c) 2025 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use mqtt311_codec::{decode, encode, Message, QoS};

fn main() {
    let wire = [0x32, 0x07, 0x00, 0x01, b't', 0x00, 0x07, b'H', b'i'];
    let (message, consumed) = decode(&wire).expect("well-formed Publish frame");
    println!("decoded {consumed} bytes: {message:?}");

    if let Message::Publish { topic, qos, .. } = &message {
        println!("topic={topic} qos={qos:?}");
    }

    let reply = Message::PubAck(match message {
        Message::Publish {
            qos: Some((QoS::AtLeastOnce, packet_id)),
            ..
        } => packet_id,
        _ => unreachable!("sample frame is always QoS 1"),
    });
    println!("encoded ack: {:02x?}", encode(&reply).unwrap());
}
