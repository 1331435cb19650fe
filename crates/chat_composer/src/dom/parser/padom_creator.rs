// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::{
    paqual_name, PaDom, PaDomCreationError, PaDomHandle, PaDomNode,
};
use html5ever::interface::NextParserState;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{parse_fragment, Attribute, QualName};
use std::cell::{Ref, RefCell};

pub(crate) type DomCreationResult = Result<PaDom, PaDomCreationError>;

/// Builds a [`PaDom`] from html5ever's tree-building callbacks.
pub(crate) struct PaDomCreator {
    state: RefCell<PaDomCreationError>,
}

impl PaDomCreator {
    pub fn parse(html: &str) -> DomCreationResult {
        parse_fragment(
            PaDomCreator::default(),
            Default::default(),
            paqual_name(""),
            vec![],
        )
        .from_utf8()
        .one(html.as_bytes())
    }

    /// Add `child` as the last child of `parent`, merging text into a
    /// trailing text node.
    fn append_to(dom: &mut PaDom, parent: &PaDomHandle, child: NodeOrText<PaDomHandle>) {
        let new_handle = match child {
            NodeOrText::AppendNode(child) => child,
            NodeOrText::AppendText(tendril) => {
                let last_text = dom
                    .get_node(parent)
                    .children()
                    .last()
                    .filter(|last| {
                        matches!(dom.get_node(last), PaDomNode::Text(_))
                    })
                    .cloned();
                if let Some(last_text) = last_text {
                    if let PaDomNode::Text(text) = dom.get_mut_node(&last_text)
                    {
                        text.content += tendril.as_ref();
                    }
                    return;
                }
                dom.add_text(tendril.as_ref())
            }
        };
        if let Some(children) = dom.get_mut_node(parent).children_mut() {
            children.push(new_handle);
        }
    }
}

impl Default for PaDomCreator {
    fn default() -> Self {
        Self {
            state: RefCell::new(PaDomCreationError::new()),
        }
    }
}

impl TreeSink for PaDomCreator {
    type Handle = PaDomHandle;
    type Output = DomCreationResult;
    type ElemName<'a> = Ref<'a, QualName>;

    fn finish(self) -> Self::Output {
        let state = self.state.into_inner();
        if state.parse_errors.is_empty() {
            Ok(state.dom)
        } else {
            Err(state)
        }
    }

    fn parse_error(&self, msg: std::borrow::Cow<'static, str>) {
        self.state.borrow_mut().parse_errors.push(String::from(msg));
    }

    fn get_document(&self) -> Self::Handle {
        self.state.borrow().dom.document_handle().clone()
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        Ref::map(self.state.borrow(), |map| map.dom.get_node(target).name())
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        flags: ElementFlags,
    ) -> Self::Handle {
        self.state
            .borrow_mut()
            .dom
            .create_element(name, attrs, flags)
    }

    // Comments and processing instructions carry no content, so they
    // become empty text that vanishes on conversion.
    fn create_comment(&self, _text: StrTendril) -> Self::Handle {
        self.state.borrow_mut().dom.add_text("")
    }

    fn create_pi(
        &self,
        _target: StrTendril,
        _data: StrTendril,
    ) -> Self::Handle {
        self.state.borrow_mut().dom.add_text("")
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let dom = &mut self.state.borrow_mut().dom;
        Self::append_to(dom, parent, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self.state.borrow().dom.parent_of(element).is_some();
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
    }

    fn mark_script_already_started(&self, _node: &Self::Handle) {}

    fn pop(&self, _node: &Self::Handle) {}

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        target.clone()
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(
        &self,
        sibling: &Self::Handle,
        new_node: NodeOrText<Self::Handle>,
    ) {
        let dom = &mut self.state.borrow_mut().dom;
        let Some(parent) = dom.parent_of(sibling) else {
            return;
        };
        let new_handle = match new_node {
            NodeOrText::AppendNode(node) => {
                dom.detach(&node);
                node
            }
            NodeOrText::AppendText(tendril) => dom.add_text(tendril.as_ref()),
        };
        if let Some(children) = dom.get_mut_node(&parent).children_mut() {
            let index = children
                .iter()
                .position(|child| child == sibling)
                .unwrap_or(children.len());
            children.insert(index, new_handle);
        }
    }

    fn add_attrs_if_missing(
        &self,
        target: &Self::Handle,
        attrs: Vec<Attribute>,
    ) {
        let dom = &mut self.state.borrow_mut().dom;
        if let PaDomNode::Container(node) = dom.get_mut_node(target) {
            for attr in attrs {
                let attr_name = attr.name.local.as_ref();
                if !node.attrs.iter().any(|(name, _)| name == attr_name) {
                    node.attrs.push((
                        attr_name.to_owned(),
                        attr.value.as_ref().to_owned(),
                    ));
                }
            }
        }
    }

    fn associate_with_form(
        &self,
        _target: &Self::Handle,
        _form: &Self::Handle,
        _nodes: (&Self::Handle, Option<&Self::Handle>),
    ) {
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.state.borrow_mut().dom.detach(target);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let dom = &mut self.state.borrow_mut().dom;
        let moved = dom
            .get_mut_node(node)
            .children_mut()
            .map(std::mem::take)
            .unwrap_or_default();
        if let Some(children) = dom.get_mut_node(new_parent).children_mut() {
            children.extend(moved);
        }
    }

    fn is_mathml_annotation_xml_integration_point(
        &self,
        _handle: &Self::Handle,
    ) -> bool {
        false
    }

    fn set_current_line(&self, _line_number: u64) {}

    fn complete_script(&self, _node: &Self::Handle) -> NextParserState {
        NextParserState::Continue
    }

    fn allow_declarative_shadow_roots(
        &self,
        _intended_parent: &Self::Handle,
    ) -> bool {
        false
    }

    fn attach_declarative_shadow(
        &self,
        _location: &Self::Handle,
        _template: &Self::Handle,
        _attrs: Vec<Attribute>,
    ) -> Result<(), String> {
        Err(String::from("Shadow roots are not supported"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Describe the tree reachable from the document, ignoring detached
    /// nodes, as `name[children]` with text in quotes.
    fn describe(dom: &PaDom) -> String {
        fn describe_node(dom: &PaDom, handle: &PaDomHandle, out: &mut String) {
            match dom.get_node(handle) {
                PaDomNode::Text(text) => {
                    out.push_str(&format!("{:?}", text.content))
                }
                node => {
                    if let PaDomNode::Container(container) = node {
                        out.push_str(container.name.local.as_ref());
                        for (name, value) in &container.attrs {
                            out.push_str(&format!(" {name}={value:?}"));
                        }
                    }
                    out.push('[');
                    for (i, child) in node.children().iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        describe_node(dom, child, out);
                    }
                    out.push(']');
                }
            }
        }
        let mut out = String::new();
        describe_node(dom, dom.document_handle(), &mut out);
        out
    }

    fn parse(input: &str) -> String {
        match PaDomCreator::parse(input) {
            Ok(dom) => describe(&dom),
            Err(err) => panic!("{input:?} failed to parse: {err:?}"),
        }
    }

    #[test]
    fn parsing_an_empty_string_creates_an_empty_dom() {
        assert_eq!(parse(""), "[html[]]");
    }

    #[test]
    fn parsing_a_text_snippet_creates_one_node() {
        assert_eq!(parse("foo"), r#"[html["foo"]]"#);
    }

    #[test]
    fn parsing_nested_structures_produces_them() {
        assert_eq!(
            parse("A<i>B<b>C</b>D</i>E"),
            r#"[html["A", i["B", b["C"], "D"], "E"]]"#
        );
    }

    #[test]
    fn parsing_tags_with_attributes_preserves_them() {
        assert_eq!(
            parse(r#"<a href="https://x.org" target="_blank">txt</a>"#),
            r#"[html[a href="https://x.org" target="_blank"["txt"]]]"#
        );
    }

    #[test]
    fn parsing_text_node_with_escaped_html_entities() {
        assert_eq!(
            parse("aaa&lt;strong&gt;bbb&lt;/strong&gt;ccc"),
            r#"[html["aaa<strong>bbb</strong>ccc"]]"#
        );
    }

    #[test]
    fn line_breaks_are_elements() {
        assert_eq!(parse("a<br />b"), r#"[html["a", br[], "b"]]"#);
    }

    #[test]
    fn misnested_tags_are_repaired() {
        // html5ever reports the misnesting but still builds a usable tree
        let described = match PaDomCreator::parse("<b>1<i>2</b>3</i>") {
            Ok(dom) => describe(&dom),
            Err(err) => describe(&err.dom),
        };
        assert_eq!(described, r#"[html[b["1", i["2"]], i["3"]]]"#);
    }

    #[test]
    fn comments_leave_no_content() {
        assert_eq!(parse("a<!-- note -->b"), r#"[html["a", "b"]]"#);
    }
}
