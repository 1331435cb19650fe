// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use email_address::EmailAddress;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

static SCHEME_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").expect("scheme regex is valid")
});

/// What the link button does at the current selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkAction {
    /// Text is selected outside any link.
    Create,
    /// The selection is inside a link; the button removes it.
    Remove,
    Disabled,
}

const NEW_WINDOW_TARGET: &str = "_blank";
const NEW_WINDOW_REL: &str = "noopener noreferrer";

/// The anchor attributes written after the href.
pub(crate) fn link_attributes(open_in_new_window: bool) -> Vec<(String, String)> {
    if open_in_new_window {
        vec![
            ("target".to_owned(), NEW_WINDOW_TARGET.to_owned()),
            ("rel".to_owned(), NEW_WINDOW_REL.to_owned()),
        ]
    } else {
        Vec::new()
    }
}

/// Whether a `target` attribute asks for a new window.
pub(crate) fn opens_in_new_window(target: Option<&str>) -> bool {
    target.is_some_and(|target| target.eq_ignore_ascii_case(NEW_WINDOW_TARGET))
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("The link URL is empty")]
    EmptyUrl,
    #[error("`{0}` is not a valid link")]
    InvalidUrl(String),
    #[error("The selected text changed while the link was being edited")]
    SelectionLost,
    #[error("No link is being inserted")]
    NoPendingLink,
}

/// Turn what the user typed into an href.
///
/// E-mail addresses become `mailto:` links and anything without a scheme is
/// assumed to be `https://`. Only web and mail links are accepted.
pub fn normalize_link_url(input: &str) -> Result<String, LinkError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LinkError::EmptyUrl);
    }
    let href = if EmailAddress::is_valid(trimmed) {
        format!("mailto:{trimmed}")
    } else if SCHEME_PREFIX.is_match(trimmed)
        || trimmed
            .get(..7)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("mailto:"))
    {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let invalid = || LinkError::InvalidUrl(trimmed.to_owned());
    let url = Url::parse(&href).map_err(|_| invalid())?;
    let acceptable = match url.scheme() {
        "http" | "https" => url.host_str().is_some_and(|host| !host.is_empty()),
        "mailto" => !url.path().is_empty(),
        _ => false,
    };
    if acceptable {
        Ok(href)
    } else {
        Err(invalid())
    }
}
