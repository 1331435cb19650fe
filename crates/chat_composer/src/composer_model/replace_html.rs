// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::parser::parse;
use crate::dom::runs;
use crate::{ComposerModel, ComposerUpdate, HtmlParseError};

// Clipboard HTML from browsers and office suites carries these around the
// fragment; html5ever reports them as errors inside a fragment.
static CLIPBOARD_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<meta[^>]*>|<!--\s*(?:Start|End)Fragment\s*-->")
        .expect("clipboard regex is valid")
});

impl ComposerModel {
    /// Replace the selection with pasted HTML, keeping the formatting the
    /// composer understands.
    pub fn replace_html(
        &mut self,
        new_html: &str,
    ) -> Result<ComposerUpdate, HtmlParseError> {
        if !self.can_edit() {
            return Ok(ComposerUpdate::keep());
        }
        let cleaned_html = CLIPBOARD_NOISE.replace_all(new_html, "");
        let pasted = parse(&cleaned_html)?.to_runs();
        let pasted_len = runs::total_len(&pasted);

        self.purge_markers();
        let (start, end) = self.safe_selection();
        self.edit_runs(|runs| {
            runs::delete_range(runs, start, end);
            runs::insert_runs(runs, start, pasted);
        });
        self.set_caret(start + pasted_len);
        Ok(self.create_update_replace_all())
    }
}
