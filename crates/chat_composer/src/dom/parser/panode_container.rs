// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use html5ever::QualName;
use once_cell::sync::Lazy;
use regex::Regex;

use super::PaDomHandle;

static STYLE_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z-]+)\s*:\s*(.*?)\s*$")
        .expect("style declaration regex is valid")
});

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaNodeContainer {
    pub(crate) name: QualName,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<PaDomHandle>,
}

impl PaNodeContainer {
    pub(crate) fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _v)| n == name)
            .map(|(_n, v)| v.as_str())
    }

    /// Whether the inline `style` attribute declares `name: value`. Names and
    /// values are compared case-insensitively; the last declaration wins.
    pub(crate) fn contains_style(&self, name: &str, value: &str) -> bool {
        self.get_attr("style")
            .and_then(|style| {
                style
                    .split(';')
                    .filter_map(|declaration| {
                        STYLE_DECLARATION.captures(declaration)
                    })
                    .filter(|caps| caps[1].eq_ignore_ascii_case(name))
                    .last()
                    .map(|caps| caps[2].eq_ignore_ascii_case(value))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dom::parser::paqual_name;

    fn span(style: &str) -> PaNodeContainer {
        PaNodeContainer {
            name: paqual_name("span"),
            attrs: vec![("style".into(), style.into())],
            children: Vec::new(),
        }
    }

    #[test]
    fn test_contains_style() {
        let node = span("font-weight:bold;");
        assert!(node.contains_style("font-weight", "bold"));
        assert!(!node.contains_style("font-weight", "normal"));
    }

    #[test]
    fn styles_without_trailing_semicolon_are_found() {
        let node = span("color: red; FONT-STYLE: Italic");
        assert!(node.contains_style("font-style", "italic"));
        assert!(!node.contains_style("font-weight", "bold"));
    }

    #[test]
    fn later_declarations_override_earlier_ones() {
        let node = span("font-weight: bold; font-weight: normal;");
        assert!(!node.contains_style("font-weight", "bold"));
    }
}
