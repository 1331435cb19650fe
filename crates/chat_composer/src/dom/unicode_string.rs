// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! UTF-16 measurements over Rust strings.
//!
//! Document positions are UTF-16 code units so that they line up with
//! platform text APIs, while text is stored as UTF-8.

pub trait UnicodeStrExt {
    /// Length in UTF-16 code units.
    fn utf16_len(&self) -> usize;

    /// Byte index of the character at UTF-16 offset `offset`. An offset that
    /// falls inside a surrogate pair is rounded down to the start of that
    /// character; an offset past the end yields the string length.
    fn byte_index_for_utf16(&self, offset: usize) -> usize;
}

impl UnicodeStrExt for str {
    fn utf16_len(&self) -> usize {
        self.encode_utf16().count()
    }

    fn byte_index_for_utf16(&self, offset: usize) -> usize {
        let mut units = 0;
        for (index, c) in self.char_indices() {
            if units + c.len_utf16() > offset {
                return index;
            }
            units += c.len_utf16();
        }
        self.len()
    }
}
