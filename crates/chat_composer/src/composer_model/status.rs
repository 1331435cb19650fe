// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::ComposerModel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentState {
    Empty,
    Composing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachmentState {
    NoAttachment,
    AttachmentStaged,
}

/// Where the composer is in its lifecycle, as the parent view sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComposerStatus {
    pub content: ContentState,
    pub attachment: AttachmentState,
    pub send_enabled: bool,
}

impl ComposerModel {
    pub fn status(&self) -> ComposerStatus {
        ComposerStatus {
            content: self.content_state(),
            attachment: self.attachment_state(),
            send_enabled: self.send_enabled(),
        }
    }

    pub fn content_state(&self) -> ContentState {
        if self.is_empty() {
            ContentState::Empty
        } else {
            ContentState::Composing
        }
    }

    pub fn attachment_state(&self) -> AttachmentState {
        if self.attachment.is_some() {
            AttachmentState::AttachmentStaged
        } else {
            AttachmentState::NoAttachment
        }
    }

    /// There is something to send and nothing stopping it.
    pub fn send_enabled(&self) -> bool {
        let has_payload = self.content_state() == ContentState::Composing
            || self.attachment_state() == AttachmentState::AttachmentStaged;
        has_payload && !self.config.disabled
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Attachment;

    #[test]
    fn empty_composer_cannot_send() {
        let model = ComposerModel::new();
        assert_eq!(
            model.status(),
            ComposerStatus {
                content: ContentState::Empty,
                attachment: AttachmentState::NoAttachment,
                send_enabled: false,
            }
        );
    }

    #[test]
    fn typing_enables_send() {
        let mut model = ComposerModel::new();
        model.replace_text("hello");
        assert_eq!(model.content_state(), ContentState::Composing);
        assert!(model.send_enabled());
    }

    #[test]
    fn an_attachment_alone_enables_send() {
        let mut model = ComposerModel::new();
        model.select_attachment(Attachment::new("a.txt", "text/plain", vec![1]));
        assert_eq!(model.attachment_state(), AttachmentState::AttachmentStaged);
        assert_eq!(model.content_state(), ContentState::Empty);
        assert!(model.send_enabled());
    }

    #[test]
    fn disabled_composer_cannot_send() {
        let mut model = ComposerModel::new();
        model.replace_text("hello");
        model.set_disabled(true);
        assert!(!model.send_enabled());
    }
}
