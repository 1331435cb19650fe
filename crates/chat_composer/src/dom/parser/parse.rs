// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::fmt;

use tracing::debug;

use super::{PaDom, PaDomCreationError, PaDomCreator, PaDomNode, PaNodeContainer};
use crate::dom::dom_creation_error::HtmlParseError;
use crate::dom::nodes::LinkTarget;
use crate::dom::runs::{AttributeSet, InlineRun};
use crate::dom::Dom;
use crate::link_action::{link_attributes, opens_in_new_window};
use crate::{normalize_link_url, InlineFormatType};

const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Parse composer markup into a [`Dom`] in canonical form.
///
/// Accepts `b`/`strong`, `i`/`em`, `del`/`s`/`strike`, `a` and `br`, plus
/// `span`s whose inline style sets one of the supported formats. Any other
/// element is an error. Link hrefs go through [`normalize_link_url`].
pub fn parse(html: &str) -> Result<Dom, HtmlParseError> {
    HtmlParser::default().parse(html)
}

#[derive(Default)]
struct HtmlParser {
    runs: Vec<InlineRun>,
}

impl HtmlParser {
    fn parse(mut self, html: &str) -> Result<Dom, HtmlParseError> {
        let padom = PaDomCreator::parse(html)
            .map_err(padom_creation_error_to_html_parse_error)?;

        self.padom_to_runs(&padom).map_err(|err| {
            debug!(%err, "Rejected HTML");
            HtmlParseError {
                parse_errors: vec![err.to_string()],
            }
        })?;
        Ok(Dom::from_runs(self.runs))
    }

    /// Flatten a [PaDom] into runs.
    ///
    /// [PaDom] is purely used within the parsing process: parents refer to
    /// their children by handles, and all the nodes are owned in a big list
    /// held by the PaDom itself. Nodes that html5ever detached stay in that
    /// list, but are never reached when walking down from the document.
    fn padom_to_runs(&mut self, padom: &PaDom) -> Result<(), Error> {
        if let PaDomNode::Document(padoc) = padom.get_document() {
            self.convert(padom, padoc, &AttributeSet::default())
        } else {
            Err(Error::NoDocument)
        }
    }

    fn convert(
        &mut self,
        padom: &PaDom,
        panode: &PaNodeContainer,
        attributes: &AttributeSet,
    ) -> Result<(), Error> {
        for child_handle in &panode.children {
            match padom.get_node(child_handle) {
                PaDomNode::Container(child) => {
                    self.convert_container(padom, child, attributes)?
                }
                PaDomNode::Document(_) => return Err(Error::NestedDocument),
                PaDomNode::Text(text) => {
                    let content: String = text
                        .content
                        .chars()
                        .filter(|c| *c != ZERO_WIDTH_SPACE)
                        .collect();
                    self.runs.push(InlineRun::text(content, attributes.clone()));
                }
            }
        }
        Ok(())
    }

    fn convert_container(
        &mut self,
        padom: &PaDom,
        child: &PaNodeContainer,
        attributes: &AttributeSet,
    ) -> Result<(), Error> {
        let tag = child.name.local.as_ref();
        let mut attributes = attributes.clone();
        match tag {
            "html" | "body" => {}
            "br" => {
                self.runs.push(InlineRun::line_break(attributes));
                return Ok(());
            }
            "a" => {
                if let Some(href) = child.get_attr("href") {
                    attributes.link = link_target(href, child.get_attr("target"));
                }
            }
            "span" => {
                if child.contains_style("font-weight", "bold")
                    || child.contains_style("font-weight", "700")
                {
                    attributes.bold = true;
                }
                if child.contains_style("font-style", "italic") {
                    attributes.italic = true;
                }
                if child.contains_style("text-decoration", "line-through") {
                    attributes.strike_through = true;
                }
            }
            _ => match InlineFormatType::from_tag(tag) {
                Some(format) => attributes.set_format(format, true),
                None => return Err(Error::UnknownNode(tag.to_owned())),
            },
        }
        self.convert(padom, child, &attributes)
    }
}

/// Validate a link found in markup. Links to anything but web or mail
/// addresses keep their text and lose the link; attributes other than a
/// new-window `target` are dropped.
fn link_target(href: &str, target: Option<&str>) -> Option<LinkTarget> {
    match normalize_link_url(href) {
        Ok(url) => Some(LinkTarget::new(
            url,
            link_attributes(opens_in_new_window(target)),
        )),
        Err(err) => {
            debug!(%err, "Dropping link from markup");
            None
        }
    }
}

fn padom_creation_error_to_html_parse_error(
    e: PaDomCreationError,
) -> HtmlParseError {
    HtmlParseError {
        parse_errors: e.parse_errors,
    }
}

enum Error {
    NoDocument,
    NestedDocument,
    UnknownNode(String),
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDocument => {
                write!(formatter, "The parsed tree has no document node")
            }
            Self::NestedDocument => {
                write!(formatter, "Found a document inside a document")
            }
            Self::UnknownNode(node_name) => {
                write!(formatter, "Node `{node_name}` is not supported")
            }
        }
    }
}
