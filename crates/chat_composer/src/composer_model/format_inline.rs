// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Toggling bold, italic and strikethrough.
//!
//! On a range the format is set or cleared on every run in it, splitting
//! runs at the range ends. On a collapsed caret the format is recorded on a
//! marker, and text typed at the marker picks it up.

use tracing::debug;

use crate::dom::runs;
use crate::{ComposerAction, ComposerModel, ComposerUpdate, InlineFormatType};

impl ComposerModel {
    pub fn toggle(&mut self, action: ComposerAction) -> ComposerUpdate {
        if !self.can_edit() {
            debug!(action = action.as_ref(), "Ignoring toggle");
            return ComposerUpdate::keep();
        }
        match action.format_type() {
            Some(format) => self.toggle_inline_format(format),
            None => self.toggle_link(),
        }
    }

    pub fn bold(&mut self) -> ComposerUpdate {
        self.toggle(ComposerAction::Bold)
    }

    pub fn italic(&mut self) -> ComposerUpdate {
        self.toggle(ComposerAction::Italic)
    }

    pub fn strike_through(&mut self) -> ComposerUpdate {
        self.toggle(ComposerAction::StrikeThrough)
    }

    pub fn link(&mut self) -> ComposerUpdate {
        self.toggle(ComposerAction::Link)
    }

    fn toggle_inline_format(&mut self, format: InlineFormatType) -> ComposerUpdate {
        if self.has_selection() {
            self.purge_stale_markers();
            let (start, end) = self.safe_selection();
            let apply = !self.format_state().is_active(format.into());
            self.edit_runs(|runs| {
                runs::apply_attributes(runs, start, end, |attributes| {
                    attributes.set_format(format, apply)
                })
            });
            self.create_update_replace_all()
        } else {
            let Some(marker) = self.insert_marker_at_caret() else {
                return ComposerUpdate::keep();
            };
            self.edit_markers(|runs| {
                if let Some((index, _)) = runs::find_marker(runs, marker.id()) {
                    let attributes = &mut runs[index].attributes;
                    let apply = !attributes.has_format(format);
                    attributes.set_format(format, apply);
                }
            });
            self.create_update_menu_state()
        }
    }
}
