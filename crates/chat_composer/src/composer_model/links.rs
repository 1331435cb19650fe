// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Creating and removing links.
//!
//! Creating a link takes several round trips through the host: the
//! selection is captured, the link modal opens and takes focus, and the
//! model waits for the user to confirm or cancel before touching the
//! document. Links never grow when text is typed at their boundary.

use std::mem;

use tracing::{debug, warn};

use crate::dom::runs;
use crate::dom::LinkTarget;
use crate::link_action::link_attributes;
use crate::{
    normalize_link_url, ComposerModel, ComposerUpdate, LinkAction,
    LinkActionUpdate, LinkError, SelectionRange,
};

/// Progress through inserting a link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LinkFlowState {
    #[default]
    Idle,
    /// The selection to link has been captured; the modal is about to open.
    SelectionCaptured(SelectionRange),
    /// The modal is open and owns focus.
    ModalOpen(SelectionRange),
}

impl ComposerModel {
    pub fn link_flow_state(&self) -> &LinkFlowState {
        &self.link_flow
    }

    /// What the link button would do right now.
    pub fn link_action(&self) -> LinkAction {
        if !self.can_edit() {
            return LinkAction::Disabled;
        }
        let runs = self.state.dom.to_runs();
        let (start, end) = self.safe_selection();
        let linked_run = if start == end {
            runs::run_index_before(&runs, start).filter(|index| {
                start > 0
                    && runs::link_extent(&runs, *index)
                        .is_some_and(|(_, link_end)| link_end > start)
            })
        } else {
            runs::run_index_after(&runs, start)
                .filter(|_| self.format_state().link)
        };
        match linked_run.and_then(|index| runs[index].attributes.link.as_ref()) {
            Some(_) => LinkAction::Remove,
            None if start != end => LinkAction::Create,
            None => LinkAction::Disabled,
        }
    }

    pub(crate) fn toggle_link(&mut self) -> ComposerUpdate {
        if self.format_state().link {
            return self.remove_links();
        }
        let Some(range) = self.capture().filter(|range| !range.is_collapsed())
        else {
            debug!("Ignoring link request without selected text");
            return ComposerUpdate::keep();
        };
        self.purge_stale_markers();
        self.link_flow = LinkFlowState::SelectionCaptured(range);
        self.open_link_modal()
    }

    fn open_link_modal(&mut self) -> ComposerUpdate {
        let LinkFlowState::SelectionCaptured(range) = mem::take(&mut self.link_flow)
        else {
            return ComposerUpdate::keep();
        };
        let selected_text = range.selected_text().to_owned();
        self.link_flow = LinkFlowState::ModalOpen(range);
        self.focused = false;
        self.create_update_menu_state()
            .with_link_action(LinkActionUpdate::OpenModal { selected_text })
    }

    /// Wrap the captured selection in a link to `url`. Whatever the outcome,
    /// the modal is finished with and the composer gets focus back.
    pub fn confirm_link(
        &mut self,
        url: &str,
        open_in_new_window: bool,
    ) -> Result<ComposerUpdate, LinkError> {
        let LinkFlowState::ModalOpen(range) = mem::take(&mut self.link_flow)
        else {
            return Err(LinkError::NoPendingLink);
        };
        self.focused = self.mounted;

        let href = normalize_link_url(url).inspect_err(|err| {
            warn!(%err, "Rejected link URL");
        })?;
        if let Err(err) = self.restore(&range) {
            warn!(%err, "Link selection changed while the modal was open");
            return Err(LinkError::SelectionLost);
        }

        let attributes = link_attributes(open_in_new_window);
        let target = LinkTarget::new(href, attributes);
        let (start, end) = self.safe_selection();
        self.edit_runs(|runs| {
            runs::apply_attributes(runs, start, end, |attributes| {
                attributes.link = Some(target.clone())
            })
        });
        self.set_caret(end);
        debug!(start, end, open_in_new_window, "Inserted link");
        Ok(self
            .create_update_replace_all()
            .with_link_action(LinkActionUpdate::CloseModal))
    }

    /// Close the link modal without changing the document.
    pub fn cancel_link(&mut self) -> ComposerUpdate {
        let LinkFlowState::ModalOpen(range) = mem::take(&mut self.link_flow)
        else {
            return ComposerUpdate::keep();
        };
        self.focused = self.mounted;
        if self.restore(&range).is_err() {
            debug!("Captured link selection is gone; leaving the caret alone");
        }
        self.create_update_selection()
            .with_link_action(LinkActionUpdate::CloseModal)
    }

    /// Remove links from the selection, or the whole link around a
    /// collapsed caret.
    pub fn remove_links(&mut self) -> ComposerUpdate {
        if !self.can_edit() {
            return ComposerUpdate::keep();
        }
        let (start, end) = self.safe_selection();
        let range = if start == end {
            let runs = self.state.dom.to_runs();
            match runs::run_index_before(&runs, start)
                .and_then(|index| runs::link_extent(&runs, index))
                .filter(|(_, link_end)| start > 0 && *link_end > start)
            {
                Some(extent) => extent,
                None => return ComposerUpdate::keep(),
            }
        } else {
            (start, end)
        };
        self.purge_stale_markers();
        self.edit_runs(|runs| {
            runs::apply_attributes(runs, range.0, range.1, |attributes| {
                attributes.link = None
            })
        });
        self.create_update_replace_all()
    }
}
