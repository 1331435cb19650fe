// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::{debug, warn};

use crate::{
    Attachment, ComposerModel, ComposerUpdate, PendingAttachment, PreviewError,
    PreviewRequest, PreviewTicket,
};

impl ComposerModel {
    pub fn attachment(&self) -> Option<&PendingAttachment> {
        self.attachment.as_ref()
    }

    /// Stage `file` for the next message, replacing any staged file. Images
    /// come back with a [`PreviewRequest`] for the host to decode.
    pub fn select_attachment(&mut self, file: Attachment) -> ComposerUpdate {
        if self.config.disabled {
            debug!(name = %file.name, "Ignoring attachment while disabled");
            return ComposerUpdate::keep();
        }
        let preview_request = if file.is_image() {
            let ticket = self.next_preview_ticket();
            Some(PreviewRequest {
                ticket,
                mime_type: file.mime_type.clone(),
                bytes: file.bytes.clone(),
            })
        } else {
            None
        };
        debug!(
            name = %file.name,
            size = file.size(),
            mime_type = %file.mime_type,
            "Staged attachment"
        );
        self.preview_ticket = preview_request.as_ref().map(|request| request.ticket);
        self.attachment = Some(PendingAttachment {
            file,
            preview_data_url: None,
        });
        self.create_update_menu_state()
            .with_preview_request(preview_request)
    }

    /// Deliver a decoded preview. Results for an attachment that has since
    /// been replaced, removed or sent are dropped.
    pub fn complete_preview(
        &mut self,
        ticket: PreviewTicket,
        result: Result<String, PreviewError>,
    ) -> ComposerUpdate {
        if self.preview_ticket != Some(ticket) {
            debug!(?ticket, "Dropping stale preview");
            return ComposerUpdate::keep();
        }
        self.preview_ticket = None;
        match (result, self.attachment.as_mut()) {
            (Ok(data_url), Some(attachment)) => {
                attachment.preview_data_url = Some(data_url);
            }
            (Err(err), Some(attachment)) => {
                warn!(%err, name = %attachment.file.name, "Staging attachment without a preview");
            }
            (_, None) => return ComposerUpdate::keep(),
        }
        self.create_update_menu_state()
    }

    pub fn clear_attachment(&mut self) -> ComposerUpdate {
        self.preview_ticket = None;
        if self.attachment.take().is_none() {
            return ComposerUpdate::keep();
        }
        self.create_update_menu_state()
    }
}

#[cfg(test)]
mod test {
    use crate::attachment::test::png_bytes;
    use crate::{Attachment, AttachmentState, ComposerModel, PreviewError};

    fn image() -> Attachment {
        Attachment::new("cat.png", "image/png", png_bytes())
    }

    #[test]
    fn images_come_with_a_preview_request() {
        let mut model = ComposerModel::new();
        let update = model.select_attachment(image());
        let request = update.preview_request.unwrap();
        assert_eq!(request.mime_type, "image/png");
        let data_url = request.decode().unwrap();
        model.complete_preview(request.ticket, Ok(data_url.clone()));
        assert_eq!(
            model.attachment().unwrap().preview_data_url,
            Some(data_url)
        );
    }

    #[test]
    fn other_files_have_no_preview() {
        let mut model = ComposerModel::new();
        let update = model.select_attachment(Attachment::new(
            "report.pdf",
            "application/pdf",
            vec![1, 2, 3],
        ));
        assert!(update.preview_request.is_none());
        assert_eq!(model.attachment_state(), AttachmentState::AttachmentStaged);
    }

    #[test]
    fn failed_decodes_keep_the_attachment() {
        let mut model = ComposerModel::new();
        let broken = Attachment::new("cat.png", "image/png", b"nope".to_vec());
        let request = model.select_attachment(broken).preview_request.unwrap();
        let result = request.decode();
        assert_eq!(result, Err(PreviewError::Unrecognized));
        model.complete_preview(request.ticket, result);
        let staged = model.attachment().unwrap();
        assert_eq!(staged.file.name, "cat.png");
        assert_eq!(staged.preview_data_url, None);
    }

    #[test]
    fn previews_for_replaced_attachments_are_dropped() {
        let mut model = ComposerModel::new();
        let first = model.select_attachment(image()).preview_request.unwrap();
        let second = model.select_attachment(image()).preview_request.unwrap();
        assert_ne!(first.ticket, second.ticket);
        model.complete_preview(first.ticket, Ok("data:stale".to_owned()));
        assert_eq!(model.attachment().unwrap().preview_data_url, None);
        model.complete_preview(second.ticket, Ok("data:fresh".to_owned()));
        assert_eq!(
            model.attachment().unwrap().preview_data_url.as_deref(),
            Some("data:fresh")
        );
    }

    #[test]
    fn previews_after_clearing_are_dropped() {
        let mut model = ComposerModel::new();
        let request = model.select_attachment(image()).preview_request.unwrap();
        model.clear_attachment();
        model.complete_preview(request.ticket, Ok("data:late".to_owned()));
        assert!(model.attachment().is_none());
    }

    #[test]
    fn clearing_twice_is_harmless() {
        let mut model = ComposerModel::new();
        model.select_attachment(image());
        model.clear_attachment();
        model.clear_attachment();
        assert_eq!(model.attachment_state(), AttachmentState::NoAttachment);
    }

    #[test]
    fn disabled_composers_refuse_attachments() {
        let mut model = ComposerModel::new();
        model.set_disabled(true);
        model.select_attachment(image());
        assert!(model.attachment().is_none());
    }
}
