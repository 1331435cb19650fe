// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::AttributeSet;
use crate::ComposerAction;

/// Which formats apply at the current caret or selection.
///
/// This is a view derived from the document; it is recomputed whenever the
/// selection moves or the document changes and is never used to decide what
/// the document contains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FormatState {
    pub bold: bool,
    pub italic: bool,
    pub strike: bool,
    pub link: bool,
}

impl FormatState {
    pub fn is_active(&self, action: ComposerAction) -> bool {
        match action {
            ComposerAction::Bold => self.bold,
            ComposerAction::Italic => self.italic,
            ComposerAction::StrikeThrough => self.strike,
            ComposerAction::Link => self.link,
        }
    }

    /// The formats shared by every one of `attributes`. An empty iterator
    /// yields no formats.
    pub(crate) fn common_to<'a>(
        attributes: impl IntoIterator<Item = &'a AttributeSet>,
    ) -> Self {
        let mut attributes = attributes.into_iter();
        let Some(first) = attributes.next() else {
            return Self::default();
        };
        attributes.fold(Self::from(first), |state, next| Self {
            bold: state.bold && next.bold,
            italic: state.italic && next.italic,
            strike: state.strike && next.strike_through,
            link: state.link && next.link.is_some(),
        })
    }
}

impl From<&AttributeSet> for FormatState {
    fn from(attributes: &AttributeSet) -> Self {
        Self {
            bold: attributes.bold,
            italic: attributes.italic,
            strike: attributes.strike_through,
            link: attributes.link.is_some(),
        }
    }
}
