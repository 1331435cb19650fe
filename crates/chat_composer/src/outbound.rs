// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::PendingAttachment;

/// One composed message, handed to the [`MessageSender`] on submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    /// The message HTML, empty for an attachment sent without a caption.
    pub content: String,
    pub attachment: Option<PendingAttachment>,
}

/// Whatever delivers messages: the composer does not wait for the result.
pub trait MessageSender {
    fn send_message(&mut self, message: OutboundMessage);
}

impl<F> MessageSender for F
where
    F: FnMut(OutboundMessage),
{
    fn send_message(&mut self, message: OutboundMessage) {
        self(message)
    }
}
