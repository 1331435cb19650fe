// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

/// Settings the host passes in when it creates a composer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposerConfig {
    /// A disabled composer rejects edits, formatting and sending.
    pub disabled: bool,
    /// Shown while the composer is empty.
    pub placeholder_label: Option<String>,
}

impl ComposerConfig {
    pub fn for_chat(chat_name: &str) -> Self {
        Self {
            disabled: false,
            placeholder_label: Some(format!("Message #{chat_name}")),
        }
    }
}
