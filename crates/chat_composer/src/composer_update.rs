// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::HashMap;

use crate::{ActionState, ComposerAction, FormatState, Location, PreviewRequest};

/// What the host has to re-render after a call into the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposerUpdate {
    pub text_update: TextUpdate,
    pub menu_state: MenuState,
    pub link_action: LinkActionUpdate,
    /// Set when a newly staged image is waiting to be decoded.
    pub preview_request: Option<PreviewRequest>,
}

impl ComposerUpdate {
    pub fn keep() -> Self {
        Self {
            text_update: TextUpdate::Keep,
            menu_state: MenuState::Keep,
            link_action: LinkActionUpdate::Keep,
            preview_request: None,
        }
    }

    pub fn update_menu_state(menu_state: MenuState) -> Self {
        Self {
            menu_state,
            ..Self::keep()
        }
    }

    pub fn update_selection(
        start: Location,
        end: Location,
        menu_state: MenuState,
    ) -> Self {
        Self {
            text_update: TextUpdate::Select(Selection { start, end }),
            menu_state,
            ..Self::keep()
        }
    }

    pub fn replace_all(
        replacement_html: String,
        start: Location,
        end: Location,
        menu_state: MenuState,
    ) -> Self {
        Self {
            text_update: TextUpdate::ReplaceAll(ReplaceAll {
                replacement_html,
                start,
                end,
            }),
            menu_state,
            ..Self::keep()
        }
    }

    pub(crate) fn with_link_action(mut self, link_action: LinkActionUpdate) -> Self {
        self.link_action = link_action;
        self
    }

    pub(crate) fn with_preview_request(
        mut self,
        preview_request: Option<PreviewRequest>,
    ) -> Self {
        self.preview_request = preview_request;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextUpdate {
    Keep,
    ReplaceAll(ReplaceAll),
    Select(Selection),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaceAll {
    pub replacement_html: String,
    pub start: Location,
    pub end: Location,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub start: Location,
    pub end: Location,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuState {
    Keep,
    Update(MenuStateUpdate),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuStateUpdate {
    pub format_state: FormatState,
    pub action_states: HashMap<ComposerAction, ActionState>,
    pub send_enabled: bool,
    pub placeholder: Option<String>,
}

/// Opening and closing the link modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkActionUpdate {
    Keep,
    OpenModal { selected_text: String },
    CloseModal,
}
