// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::unicode_string::UnicodeStrExt;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextNode {
    data: String,
}

impl TextNode {
    pub fn from(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn set_data(&mut self, data: String) {
        self.data = data;
    }

    pub fn push_str(&mut self, data: &str) {
        self.data.push_str(data);
    }

    pub fn text_len(&self) -> usize {
        self.data.utf16_len()
    }
}
