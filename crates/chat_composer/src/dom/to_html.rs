// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::nodes::{ContainerNode, ContainerNodeKind, DomNode};
use crate::dom::Dom;

pub trait ToHtml {
    fn fmt_html(&self, buf: &mut String);

    fn to_html(&self) -> String {
        let mut buf = String::new();
        self.fmt_html(&mut buf);
        buf
    }
}

impl ToHtml for Dom {
    fn fmt_html(&self, buf: &mut String) {
        if self.has_markers() {
            self.without_markers().document().fmt_html(buf)
        } else {
            self.document().fmt_html(buf)
        }
    }
}

impl ToHtml for ContainerNode {
    fn fmt_html(&self, buf: &mut String) {
        // Wrappers holding nothing but markers would serialize as `<b></b>`
        if !self.has_visible_content() {
            return;
        }
        match self.kind() {
            ContainerNodeKind::Generic => fmt_children(self, buf),
            ContainerNodeKind::Formatting(format) => {
                let tag = format.tag();
                buf.push('<');
                buf.push_str(tag);
                buf.push('>');
                fmt_children(self, buf);
                buf.push_str("</");
                buf.push_str(tag);
                buf.push('>');
            }
            ContainerNodeKind::Link(target) => {
                buf.push_str("<a href=\"");
                buf.push_str(&html_escape::encode_double_quoted_attribute(
                    &target.url,
                ));
                buf.push('"');
                for (name, value) in &target.attributes {
                    buf.push(' ');
                    buf.push_str(name);
                    buf.push_str("=\"");
                    buf.push_str(&html_escape::encode_double_quoted_attribute(
                        value,
                    ));
                    buf.push('"');
                }
                buf.push('>');
                fmt_children(self, buf);
                buf.push_str("</a>");
            }
        }
    }
}

fn fmt_children(container: &ContainerNode, buf: &mut String) {
    for child in container.children() {
        child.fmt_html(buf);
    }
}

impl ToHtml for DomNode {
    fn fmt_html(&self, buf: &mut String) {
        match self {
            DomNode::Container(container) => container.fmt_html(buf),
            DomNode::Text(text) => {
                buf.push_str(&html_escape::encode_text(text.data()))
            }
            DomNode::LineBreak(_) => buf.push_str("<br />"),
            DomNode::Marker(_) => {}
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dom::nodes::{LinkTarget, MarkerId};
    use crate::dom::parser::parse;
    use crate::dom::runs::{AttributeSet, InlineRun};
    use crate::InlineFormatType;

    #[test]
    fn text_is_escaped() {
        let dom = Dom::new(vec![DomNode::new_text("a < b & c")]);
        assert_eq!(dom.to_html(), "a &lt; b &amp; c");
    }

    #[test]
    fn formats_use_short_tags() {
        let dom = Dom::new(vec![
            DomNode::new_formatting(
                InlineFormatType::Bold,
                vec![DomNode::new_text("b")],
            ),
            DomNode::new_formatting(
                InlineFormatType::StrikeThrough,
                vec![DomNode::new_text("s")],
            ),
        ]);
        assert_eq!(dom.to_html(), "<b>b</b><del>s</del>");
    }

    #[test]
    fn link_attributes_follow_the_href() {
        let target = LinkTarget::new(
            "https://example.com/?a=1&b=\"2\"",
            vec![("target".into(), "_blank".into())],
        );
        let dom = Dom::new(vec![DomNode::new_link(
            target,
            vec![DomNode::new_text("x")],
        )]);
        assert_eq!(
            dom.to_html(),
            "<a href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\" \
             target=\"_blank\">x</a>"
        );
    }

    #[test]
    fn markers_and_their_empty_wrappers_are_invisible() {
        let dom = Dom::new(vec![
            DomNode::new_text("a"),
            DomNode::new_formatting(
                InlineFormatType::Bold,
                vec![DomNode::new_marker(MarkerId(0))],
            ),
            DomNode::new_line_break(),
        ]);
        assert_eq!(dom.to_html(), "a<br />");
    }

    #[test]
    fn markers_do_not_split_the_wrappers_around_them() {
        let italic = AttributeSet {
            italic: true,
            ..AttributeSet::default()
        };
        let bold_italic = AttributeSet {
            bold: true,
            ..italic.clone()
        };
        let dom = Dom::from_runs(vec![
            InlineRun::text("ab", italic.clone()),
            InlineRun::marker(MarkerId(0), bold_italic),
            InlineRun::text("cd", italic),
        ]);
        assert_eq!(dom.to_html(), "<i>abcd</i>");
        assert_eq!(parse(&dom.to_html()).unwrap().to_html(), dom.to_html());
        assert!(dom.has_markers());
    }
}
