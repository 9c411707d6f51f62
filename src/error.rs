// Copyright (c) 2020 Xu Shaohua <shaohua@biofan.org>. All rights reserved.
// Use of this source is governed by Apache-2.0 License that can be found
// in the LICENSE file.

use std::fmt;

/// A single malformed-frame classification, carrying a short diagnostic string
/// describing the clause or condition that was violated.
///
/// Every rejection the decoder can make is reported through this one type rather
/// than an exhaustive enum of causes; the caller closes the connection either way,
/// so the diagnostic string is for logs, not for branching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        let message = message.into();
        log::debug!("codec: rejecting frame: {message}");
        Self { message }
    }

    /// Diagnostic string naming the violated clause or condition.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed frame: {}", self.message)
    }
}

impl std::error::Error for DecodeError {}

impl From<std::string::FromUtf8Error> for DecodeError {
    fn from(_err: std::string::FromUtf8Error) -> Self {
        Self::malformed("invalid UTF-8 in string field")
    }
}

/// Encoder-side counterpart of [`DecodeError`]; limited to programmer errors such
/// as a field exceeding the u16 length limit. The codec never silently truncates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError {
    message: String,
}

impl EncodeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        let message = message.into();
        log::debug!("codec: refusing to encode: {message}");
        Self { message }
    }

    /// Diagnostic string naming the violated condition.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid message: {}", self.message)
    }
}

impl std::error::Error for EncodeError {}
