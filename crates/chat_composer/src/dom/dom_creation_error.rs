// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Failed to parse HTML: {}", .parse_errors.join("; "))]
pub struct HtmlParseError {
    pub parse_errors: Vec<String>,
}

impl HtmlParseError {
    pub fn new(parse_errors: Vec<String>) -> Self {
        Self { parse_errors }
    }
}
