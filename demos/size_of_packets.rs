// Copyright (c) 2025 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use std::mem::size_of;

use mqtt311_codec::{ByteArray, ClientIdentifier, Message, QoS};

fn main() {
    println!("ByteArray: {}", size_of::<ByteArray>());
    println!("ClientIdentifier: {}", size_of::<ClientIdentifier>());
    println!("QoS: {}", size_of::<QoS>());
    println!("Message: {}", size_of::<Message>());
}
