// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::{debug, info};

use crate::dom::Dom;
use crate::{ComposerModel, ComposerUpdate, LinkFlowState, MessageSender, OutboundMessage};

impl ComposerModel {
    /// Hand the message and any staged attachment to `sender`, then reset
    /// the composer. Nothing happens if there is nothing to send, the
    /// composer is disabled or the link modal is open.
    pub fn submit<S>(&mut self, sender: &mut S) -> ComposerUpdate
    where
        S: MessageSender + ?Sized,
    {
        if !self.send_enabled() {
            debug!("Nothing to send");
            return ComposerUpdate::keep();
        }
        if self.link_flow != LinkFlowState::Idle {
            debug!("Not sending while a link is being edited");
            return ComposerUpdate::keep();
        }

        self.purge_markers();
        let content = if self.is_empty() {
            String::new()
        } else {
            self.get_content_as_html()
        };
        let attachment = self.attachment.take();
        self.preview_ticket = None;
        info!(
            content_len = content.len(),
            has_attachment = attachment.is_some(),
            "Sending message"
        );
        sender.send_message(OutboundMessage {
            content,
            attachment,
        });

        self.replace_dom(Dom::default());
        self.create_update_replace_all()
    }
}

#[cfg(test)]
mod test {
    use crate::attachment::test::png_bytes;
    use crate::composer_model::base::test::{model_with, select};
    use crate::{
        Attachment, ComposerModel, ContentState, OutboundMessage, TextUpdate,
    };

    fn submit(model: &mut ComposerModel) -> Vec<OutboundMessage> {
        let mut sent = Vec::new();
        model.submit(&mut |message: OutboundMessage| sent.push(message));
        sent
    }

    #[test]
    fn submitting_sends_html_and_clears() {
        let mut model = model_with("<b>hi</b> there");
        let sent = submit(&mut model);
        assert_eq!(
            sent,
            vec![OutboundMessage {
                content: "<b>hi</b> there".to_owned(),
                attachment: None,
            }]
        );
        assert_eq!(model.content_state(), ContentState::Empty);
        assert_eq!(model.get_content_as_html(), "");
        assert!(!model.send_enabled());
    }

    #[test]
    fn empty_composers_send_nothing() {
        let mut model = model_with(" <br /> ");
        let update = submit_update(&mut model);
        assert_eq!(update, TextUpdate::Keep);
        assert!(submit(&mut model).is_empty());
    }

    fn submit_update(model: &mut ComposerModel) -> TextUpdate {
        model.submit(&mut |_: OutboundMessage| {}).text_update
    }

    #[test]
    fn attachments_can_be_sent_without_text() {
        let mut model = ComposerModel::new();
        model.select_attachment(Attachment::new("cat.png", "image/png", png_bytes()));
        let sent = submit(&mut model);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].content, "");
        assert_eq!(sent[0].attachment.as_ref().unwrap().file.name, "cat.png");
        assert!(model.attachment().is_none());
        assert!(!model.send_enabled());
    }

    #[test]
    fn whitespace_with_an_attachment_sends_empty_content() {
        let mut model = model_with("  ");
        model.select_attachment(Attachment::new("a.txt", "text/plain", b"a".to_vec()));
        let sent = submit(&mut model);
        assert_eq!(sent[0].content, "");
    }

    #[test]
    fn disabled_composers_do_not_send() {
        let mut model = model_with("hi");
        model.set_disabled(true);
        assert!(submit(&mut model).is_empty());
        assert_eq!(model.get_content_as_html(), "hi");
    }

    #[test]
    fn nothing_is_sent_while_the_link_modal_is_open() {
        let mut model = model_with("hello");
        select(&mut model, 0, 5);
        model.link();
        assert!(submit(&mut model).is_empty());
        assert_eq!(model.get_content_as_html(), "hello");
    }

    #[test]
    fn pending_formats_are_not_sent() {
        let mut model = model_with("hi");
        model.bold();
        let sent = submit(&mut model);
        assert_eq!(sent[0].content, "hi");
        assert!(!model.dom().has_markers());
    }

    #[test]
    fn stale_previews_are_ignored_after_sending() {
        let mut model = ComposerModel::new();
        let request = model
            .select_attachment(Attachment::new("cat.png", "image/png", png_bytes()))
            .preview_request
            .unwrap();
        submit(&mut model);
        model.complete_preview(request.ticket, Ok("data:late".to_owned()));
        assert!(model.attachment().is_none());
    }
}
