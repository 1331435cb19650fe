// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;
use tracing::debug;

use crate::dom::runs;
use crate::dom::runs::InlineRun;
use crate::dom::MarkerId;
use crate::{ComposerModel, ComposerUpdate, LinkFlowState, Location};

/// A selection captured so it can be put back later, for example after the
/// link modal took focus away.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    anchor: Location,
    focus: Location,
    revision: u64,
    text: String,
}

impl SelectionRange {
    pub fn anchor(&self) -> Location {
        self.anchor
    }

    pub fn focus(&self) -> Location {
        self.focus
    }

    pub fn start(&self) -> Location {
        self.anchor.min(self.focus)
    }

    pub fn end(&self) -> Location {
        self.anchor.max(self.focus)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The text that was selected when the range was captured.
    pub fn selected_text(&self) -> &str {
        &self.text
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("The document changed since the selection was captured")]
    Stale,
    #[error("The selection lies outside the document")]
    OutOfBounds,
}

/// Refers to a zero-width marker placed at the caret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerHandle {
    id: MarkerId,
}

impl MarkerHandle {
    pub fn id(&self) -> MarkerId {
        self.id
    }
}

impl ComposerModel {
    /// Move the selection. The document is never touched here: a marker the
    /// caret moved away from stays until the next edit, and is ignored until
    /// then.
    pub fn select(&mut self, start: Location, end: Location) -> ComposerUpdate {
        if !self.mounted {
            debug!(%start, %end, "Ignoring selection change while unmounted");
            return ComposerUpdate::keep();
        }
        self.state.start = start;
        self.state.end = end;
        self.create_update_menu_state()
    }

    pub fn mount(&mut self) {
        self.mounted = true;
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.focused = false;
        self.purge_markers();
        if self.link_flow != LinkFlowState::Idle {
            debug!("Abandoning link insertion on unmount");
            self.link_flow = LinkFlowState::Idle;
        }
    }

    pub fn focus(&mut self) -> ComposerUpdate {
        self.focused = self.mounted;
        self.create_update_menu_state()
    }

    pub fn blur(&mut self) -> ComposerUpdate {
        self.focused = false;
        self.create_update_menu_state()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The current selection, if the surface has focus and the selection is
    /// inside the document.
    pub fn capture(&self) -> Option<SelectionRange> {
        if !self.mounted || !self.focused {
            return None;
        }
        let len = self.state.dom.text_len();
        let (anchor, focus) = self.get_selection();
        if usize::from(anchor) > len || usize::from(focus) > len {
            return None;
        }
        let (start, end) = self.safe_selection();
        Some(SelectionRange {
            anchor,
            focus,
            revision: self.revision,
            text: runs::text_in_range(&self.state.dom.to_runs(), start, end),
        })
    }

    /// Put a captured selection back. A range captured before an edit is
    /// still accepted if it covers exactly the same text.
    pub fn restore(&mut self, range: &SelectionRange) -> Result<(), SelectionError> {
        let start = usize::from(range.start());
        let end = usize::from(range.end());
        if end > self.state.dom.text_len() {
            return Err(SelectionError::OutOfBounds);
        }
        if range.revision != self.revision {
            let text = runs::text_in_range(&self.state.dom.to_runs(), start, end);
            if text != range.text {
                return Err(SelectionError::Stale);
            }
        }
        self.state.start = range.anchor;
        self.state.end = range.focus;
        Ok(())
    }

    /// Place a zero-width marker at a collapsed caret, or reuse the one
    /// already there.
    pub fn insert_marker_at_caret(&mut self) -> Option<MarkerHandle> {
        if !self.mounted || !self.focused || self.has_selection() {
            return None;
        }
        let runs = self.state.dom.to_runs();
        if let Some((id, _)) = self.live_marker(&runs) {
            return Some(MarkerHandle { id });
        }
        self.purge_markers();

        let (caret, _) = self.safe_selection();
        let id = self.next_marker_id();
        self.edit_markers(|runs| {
            let attributes = runs::insertion_attributes(runs, caret);
            runs::insert_runs(runs, caret, vec![InlineRun::marker(id, attributes)]);
        });
        self.active_marker = Some(id);
        debug!(marker = %id, caret, "Inserted formatting marker");
        Some(MarkerHandle { id })
    }

    /// Remove a marker. Removing one that is already gone does nothing.
    pub fn remove_marker(&mut self, handle: MarkerHandle) {
        if self.state.dom.remove_marker(handle.id) {
            self.state.dom.assert_invariants();
        }
        if self.active_marker == Some(handle.id) {
            self.active_marker = None;
        }
    }
}
