// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use strum_macros::{AsRefStr, EnumIter};

use crate::InlineFormatType;

/// A toolbar command.
#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, PartialEq, Eq, Hash)]
pub enum ComposerAction {
    Bold,
    Italic,
    StrikeThrough,
    Link,
}

impl ComposerAction {
    pub fn format_type(&self) -> Option<InlineFormatType> {
        match self {
            Self::Bold => Some(InlineFormatType::Bold),
            Self::Italic => Some(InlineFormatType::Italic),
            Self::StrikeThrough => Some(InlineFormatType::StrikeThrough),
            Self::Link => None,
        }
    }
}

impl From<InlineFormatType> for ComposerAction {
    fn from(format: InlineFormatType) -> Self {
        match format {
            InlineFormatType::Bold => Self::Bold,
            InlineFormatType::Italic => Self::Italic,
            InlineFormatType::StrikeThrough => Self::StrikeThrough,
        }
    }
}

/// How a toolbar button should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionState {
    Enabled,
    /// The format is active at the selection; pressing the button removes it.
    Reversed,
    Disabled,
}
