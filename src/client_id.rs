// Copyright (c) 2020 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// A Connect packet's client identifier.
///
/// MQTT 3.1.1 permits a zero-length client id as a request for a server-assigned
/// one; this codec takes the stricter reading and rejects an empty identifier both
/// at construction and at decode time — document this at the API boundary if you
/// embed this crate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientIdentifier(String);

impl ClientIdentifier {
    /// Wraps `id` as a client identifier.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if `id` is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, EncodeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(EncodeError::invalid("client identifier must not be empty"));
        }
        Ok(Self(id))
    }

    /// Generates a random alphanumeric client identifier of `len` characters.
    ///
    /// Convenience for callers assembling an outbound Connect that don't care about
    /// a stable id; never used by the decoder itself.
    #[must_use]
    pub fn random(len: usize) -> Self {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect();
        Self(id)
    }

    pub(crate) fn from_validated(id: String) -> Self {
        debug_assert!(!id.is_empty());
        Self(id)
    }
}

impl AsRef<str> for ClientIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
