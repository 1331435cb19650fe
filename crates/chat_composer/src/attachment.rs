// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// A file picked by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl Attachment {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_image(&self) -> bool {
        self.mime_type
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
    }
}

/// The single file staged for the next message, with its preview once one
/// has been decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingAttachment {
    pub file: Attachment,
    pub preview_data_url: Option<String>,
}

/// Identifies one preview request, so that results arriving after the
/// attachment was replaced or sent can be recognised and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PreviewTicket(u64);

impl PreviewTicket {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }
}

/// Work the host should do off the UI thread: decode `bytes` and hand the
/// result back through `ComposerModel::complete_preview`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewRequest {
    pub ticket: PreviewTicket,
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl PreviewRequest {
    pub fn decode(&self) -> Result<String, PreviewError> {
        decode_preview(&self.bytes)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreviewError {
    #[error("The file is empty")]
    Empty,
    #[error("The file is not in a recognised image format")]
    Unrecognized,
    #[error("Failed to decode {format} image: {reason}")]
    Corrupt { format: String, reason: String },
}

/// Decode image bytes into a `data:` URL suitable for an `<img>` preview.
/// The bytes are fully decoded first so that truncated or corrupt files are
/// rejected rather than shown as a broken image.
pub fn decode_preview(bytes: &[u8]) -> Result<String, PreviewError> {
    if bytes.is_empty() {
        return Err(PreviewError::Empty);
    }
    let format =
        image::guess_format(bytes).map_err(|_| PreviewError::Unrecognized)?;
    image::load_from_memory_with_format(bytes, format).map_err(|err| {
        PreviewError::Corrupt {
            format: format!("{format:?}"),
            reason: err.to_string(),
        }
    })?;
    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        STANDARD.encode(bytes)
    ))
}
