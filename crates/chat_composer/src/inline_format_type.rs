// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use strum_macros::{AsRefStr, EnumIter};

/// The inline formats a text run can carry. Links are handled separately
/// because they carry a target rather than a flag.
#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, PartialEq, Eq, Hash)]
pub enum InlineFormatType {
    Bold,
    Italic,
    StrikeThrough,
}

impl InlineFormatType {
    /// The tag written when serializing this format.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Bold => "b",
            Self::Italic => "i",
            Self::StrikeThrough => "del",
        }
    }

    /// Accepts every tag browsers emit for these formats.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "b" | "strong" => Some(Self::Bold),
            "i" | "em" => Some(Self::Italic),
            "del" | "s" | "strike" => Some(Self::StrikeThrough),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use super::InlineFormatType;

    #[test]
    fn every_format_parses_back_from_its_own_tag() {
        for format in InlineFormatType::iter() {
            assert_eq!(InlineFormatType::from_tag(format.tag()), Some(format));
        }
    }

    #[test]
    fn alternative_tags_are_recognised() {
        assert_eq!(
            InlineFormatType::from_tag("strong"),
            Some(InlineFormatType::Bold)
        );
        assert_eq!(
            InlineFormatType::from_tag("em"),
            Some(InlineFormatType::Italic)
        );
        assert_eq!(
            InlineFormatType::from_tag("strike"),
            Some(InlineFormatType::StrikeThrough)
        );
        assert_eq!(InlineFormatType::from_tag("u"), None);
    }
}
