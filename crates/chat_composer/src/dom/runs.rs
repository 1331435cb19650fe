// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Flat projection of the document into runs.
//!
//! Nested `<b><i>` trees are flattened into one [`InlineRun`] per leaf, each
//! carrying the full [`AttributeSet`] of its ancestors. Edits split runs at
//! the range boundaries, change attributes or contents, and the tree is then
//! rebuilt with [`Dom::from_runs`], which always nests wrappers in the same
//! order:
//!
//! | Depth | Wrapper         |
//! |-------|-----------------|
//! | 0     | `<a>`           |
//! | 1     | `<b>`           |
//! | 2     | `<i>`           |
//! | 3     | `<del>`         |
//!
//! All offsets are UTF-16 code units.

use unicode_segmentation::UnicodeSegmentation;

use crate::dom::nodes::{
    ContainerNode, ContainerNodeKind, DomNode, LinkTarget, MarkerId,
};
use crate::dom::unicode_string::UnicodeStrExt;
use crate::dom::Dom;
use crate::InlineFormatType;

/// The formatting carried by a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeSet {
    pub bold: bool,
    pub italic: bool,
    pub strike_through: bool,
    /// Present when the run sits inside a link.
    pub link: Option<LinkTarget>,
}

impl AttributeSet {
    pub fn has_format(&self, format: InlineFormatType) -> bool {
        match format {
            InlineFormatType::Bold => self.bold,
            InlineFormatType::Italic => self.italic,
            InlineFormatType::StrikeThrough => self.strike_through,
        }
    }

    pub fn set_format(&mut self, format: InlineFormatType, on: bool) {
        match format {
            InlineFormatType::Bold => self.bold = on,
            InlineFormatType::Italic => self.italic = on,
            InlineFormatType::StrikeThrough => self.strike_through = on,
        }
    }

    /// The attributes newly typed text takes on. Links never grow by typing
    /// at their edge.
    pub fn for_insertion(&self) -> Self {
        Self {
            link: None,
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InlineRunKind {
    Text(String),
    LineBreak,
    Marker(MarkerId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineRun {
    pub kind: InlineRunKind,
    pub attributes: AttributeSet,
}

impl InlineRun {
    pub fn text(text: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            kind: InlineRunKind::Text(text.into()),
            attributes,
        }
    }

    pub fn line_break(attributes: AttributeSet) -> Self {
        Self {
            kind: InlineRunKind::LineBreak,
            attributes,
        }
    }

    pub fn marker(id: MarkerId, attributes: AttributeSet) -> Self {
        Self {
            kind: InlineRunKind::Marker(id),
            attributes,
        }
    }

    pub fn text_len(&self) -> usize {
        match &self.kind {
            InlineRunKind::Text(text) => text.utf16_len(),
            InlineRunKind::LineBreak => 1,
            InlineRunKind::Marker(_) => 0,
        }
    }

    pub fn is_marker(&self, id: MarkerId) -> bool {
        self.kind == InlineRunKind::Marker(id)
    }
}

impl Dom {
    /// Flatten the tree into runs, in document order.
    pub fn to_runs(&self) -> Vec<InlineRun> {
        let mut runs = Vec::new();
        collect_runs(self.document(), &AttributeSet::default(), &mut runs);
        runs
    }

    /// Build the canonical tree for `runs`: adjacent text with identical
    /// attributes is merged, empty text is dropped and wrappers nest in a
    /// fixed order.
    pub fn from_runs(runs: Vec<InlineRun>) -> Self {
        let runs = merge_runs(runs);
        Dom::new(build_nodes(&runs, 0))
    }

    /// Rebuild in canonical form.
    pub fn normalized(&self) -> Self {
        Self::from_runs(self.to_runs())
    }

    /// The document as it would be sent: markers carrying formats different
    /// from their neighbours split the wrappers around them, so they are
    /// taken out and the wrappers rejoined.
    pub fn without_markers(&self) -> Self {
        Self::from_runs(
            self.to_runs()
                .into_iter()
                .filter(|run| !matches!(run.kind, InlineRunKind::Marker(_)))
                .collect(),
        )
    }
}

fn collect_runs(
    container: &ContainerNode,
    attributes: &AttributeSet,
    runs: &mut Vec<InlineRun>,
) {
    for child in container.children() {
        match child {
            DomNode::Container(child) => {
                let mut attributes = attributes.clone();
                match child.kind() {
                    ContainerNodeKind::Generic => {}
                    ContainerNodeKind::Formatting(format) => {
                        attributes.set_format(*format, true)
                    }
                    ContainerNodeKind::Link(target) => {
                        attributes.link = Some(target.clone())
                    }
                }
                collect_runs(child, &attributes, runs);
            }
            DomNode::Text(text) => {
                runs.push(InlineRun::text(text.data(), attributes.clone()))
            }
            DomNode::LineBreak(_) => {
                runs.push(InlineRun::line_break(attributes.clone()))
            }
            DomNode::Marker(marker) => {
                runs.push(InlineRun::marker(marker.id(), attributes.clone()))
            }
        }
    }
}

fn merge_runs(runs: Vec<InlineRun>) -> Vec<InlineRun> {
    let mut merged: Vec<InlineRun> = Vec::with_capacity(runs.len());
    for run in runs {
        if let InlineRunKind::Text(text) = &run.kind {
            if text.is_empty() {
                continue;
            }
            if let Some(InlineRun {
                kind: InlineRunKind::Text(previous),
                attributes,
            }) = merged.last_mut()
            {
                if *attributes == run.attributes {
                    previous.push_str(text);
                    continue;
                }
            }
        }
        merged.push(run);
    }
    merged
}

/// What a run needs at one nesting depth.
#[derive(PartialEq)]
enum Wrapper<'a> {
    Nothing,
    Link(&'a LinkTarget),
    Format(InlineFormatType),
}

const NESTING_ORDER: [Option<InlineFormatType>; 4] = [
    None,
    Some(InlineFormatType::Bold),
    Some(InlineFormatType::Italic),
    Some(InlineFormatType::StrikeThrough),
];

fn wrapper_at(depth: usize, attributes: &AttributeSet) -> Wrapper<'_> {
    match NESTING_ORDER[depth] {
        None => attributes.link.as_ref().map_or(Wrapper::Nothing, Wrapper::Link),
        Some(format) if attributes.has_format(format) => Wrapper::Format(format),
        Some(_) => Wrapper::Nothing,
    }
}

fn build_nodes(runs: &[InlineRun], depth: usize) -> Vec<DomNode> {
    if depth == NESTING_ORDER.len() {
        return runs.iter().map(leaf_node).collect();
    }
    let mut nodes = Vec::new();
    let mut start = 0;
    while start < runs.len() {
        let wrapper = wrapper_at(depth, &runs[start].attributes);
        let mut end = start + 1;
        while end < runs.len()
            && wrapper_at(depth, &runs[end].attributes) == wrapper
        {
            end += 1;
        }
        let children = build_nodes(&runs[start..end], depth + 1);
        match wrapper {
            Wrapper::Nothing => nodes.extend(children),
            Wrapper::Link(target) => {
                nodes.push(DomNode::new_link(target.clone(), children))
            }
            Wrapper::Format(format) => {
                nodes.push(DomNode::new_formatting(format, children))
            }
        }
        start = end;
    }
    nodes
}

fn leaf_node(run: &InlineRun) -> DomNode {
    match &run.kind {
        InlineRunKind::Text(text) => DomNode::new_text(text.as_str()),
        InlineRunKind::LineBreak => DomNode::new_line_break(),
        InlineRunKind::Marker(id) => DomNode::new_marker(*id),
    }
}

pub fn total_len(runs: &[InlineRun]) -> usize {
    runs.iter().map(InlineRun::text_len).sum()
}

/// Split the run containing `pos` so that a run boundary falls on `pos`.
/// Returns the index of the first run at or after `pos`; zero-width runs
/// sitting exactly on `pos` count as after it.
pub fn split_at(runs: &mut Vec<InlineRun>, pos: usize) -> usize {
    let mut offset = 0;
    for index in 0..runs.len() {
        if offset >= pos {
            return index;
        }
        let len = runs[index].text_len();
        if offset + len > pos {
            let attributes = runs[index].attributes.clone();
            if let InlineRunKind::Text(text) = &mut runs[index].kind {
                let byte = text.byte_index_for_utf16(pos - offset);
                let tail = text.split_off(byte);
                runs.insert(index + 1, InlineRun::text(tail, attributes));
            }
            return index + 1;
        }
        offset += len;
    }
    runs.len()
}

/// Apply `change` to the attributes of every run in `[start, end)`.
pub fn apply_attributes(
    runs: &mut Vec<InlineRun>,
    start: usize,
    end: usize,
    mut change: impl FnMut(&mut AttributeSet),
) {
    let first = split_at(runs, start);
    let last = split_at(runs, end);
    for run in &mut runs[first..last] {
        change(&mut run.attributes);
    }
}

/// The attributes of every run with content overlapping `[start, end)`.
pub fn attributes_in_range(
    runs: &[InlineRun],
    start: usize,
    end: usize,
) -> Vec<&AttributeSet> {
    let mut offset = 0;
    let mut found = Vec::new();
    for run in runs {
        let len = run.text_len();
        if len > 0 && offset < end && offset + len > start {
            found.push(&run.attributes);
        }
        offset += len;
    }
    found
}

/// Index of the run with content just left of `pos`, or of the first run
/// with content when `pos` is the start of the document.
pub fn run_index_before(runs: &[InlineRun], pos: usize) -> Option<usize> {
    if pos == 0 {
        return runs.iter().position(|run| run.text_len() > 0);
    }
    let mut offset = 0;
    for (index, run) in runs.iter().enumerate() {
        let len = run.text_len();
        if len > 0 && offset < pos && pos <= offset + len {
            return Some(index);
        }
        offset += len;
    }
    None
}

/// Index of the run with content just right of `pos`.
pub fn run_index_after(runs: &[InlineRun], pos: usize) -> Option<usize> {
    let mut offset = 0;
    for (index, run) in runs.iter().enumerate() {
        let len = run.text_len();
        if len > 0 && offset <= pos && pos < offset + len {
            return Some(index);
        }
        offset += len;
    }
    None
}

/// The attributes newly typed text at `pos` takes on.
pub fn insertion_attributes(runs: &[InlineRun], pos: usize) -> AttributeSet {
    run_index_before(runs, pos)
        .map(|index| runs[index].attributes.for_insertion())
        .unwrap_or_default()
}

/// Insert `new_runs` at `pos`, before any zero-width runs already there.
pub fn insert_runs(
    runs: &mut Vec<InlineRun>,
    pos: usize,
    new_runs: Vec<InlineRun>,
) {
    let index = split_at(runs, pos);
    runs.splice(index..index, new_runs);
}

/// Remove everything in `[start, end)`, including markers inside the range.
pub fn delete_range(runs: &mut Vec<InlineRun>, start: usize, end: usize) {
    if start >= end {
        return;
    }
    let first = split_at(runs, start);
    let last = split_at(runs, end);
    runs.drain(first..last);
}

/// Plain text of `[start, end)`, with line breaks as `\n`.
pub fn text_in_range(runs: &[InlineRun], start: usize, end: usize) -> String {
    let mut text = String::new();
    let mut offset = 0;
    for run in runs {
        let len = run.text_len();
        if len > 0 && offset < end && offset + len > start {
            match &run.kind {
                InlineRunKind::Text(data) => {
                    let from = data.byte_index_for_utf16(start.saturating_sub(offset));
                    let to = data.byte_index_for_utf16(end - offset);
                    text.push_str(&data[from..to]);
                }
                InlineRunKind::LineBreak => text.push('\n'),
                InlineRunKind::Marker(_) => {}
            }
        }
        offset += len;
    }
    text
}

/// Where the marker with `id` sits, and the index of its run.
pub fn find_marker(runs: &[InlineRun], id: MarkerId) -> Option<(usize, usize)> {
    let mut offset = 0;
    for (index, run) in runs.iter().enumerate() {
        if run.is_marker(id) {
            return Some((index, offset));
        }
        offset += run.text_len();
    }
    None
}

/// Length of the grapheme cluster (or line break) ending at `pos`.
pub fn unit_len_before(runs: &[InlineRun], pos: usize) -> Option<usize> {
    if pos == 0 {
        return None;
    }
    let index = run_index_before(runs, pos)?;
    let offset: usize = runs[..index].iter().map(InlineRun::text_len).sum();
    match &runs[index].kind {
        InlineRunKind::Text(text) => {
            let local = pos - offset;
            let prefix = &text[..text.byte_index_for_utf16(local)];
            Some(
                prefix
                    .graphemes(true)
                    .next_back()
                    .map_or(local, |grapheme| grapheme.utf16_len()),
            )
        }
        _ => Some(1),
    }
}

/// Length of the grapheme cluster (or line break) starting at `pos`.
pub fn unit_len_after(runs: &[InlineRun], pos: usize) -> Option<usize> {
    let index = run_index_after(runs, pos)?;
    let offset: usize = runs[..index].iter().map(InlineRun::text_len).sum();
    match &runs[index].kind {
        InlineRunKind::Text(text) => {
            let local = pos - offset;
            let suffix = &text[text.byte_index_for_utf16(local)..];
            Some(
                suffix
                    .graphemes(true)
                    .next()
                    .map_or(1, |grapheme| grapheme.utf16_len()),
            )
        }
        _ => Some(1),
    }
}

/// The contiguous stretch of runs linked to the same target as the run at
/// `index`, as a `[start, end)` range of offsets.
pub fn link_extent(runs: &[InlineRun], index: usize) -> Option<(usize, usize)> {
    let target = runs.get(index)?.attributes.link.as_ref()?;
    let same_link = |run: &InlineRun| run.attributes.link.as_ref() == Some(target);
    let mut first = index;
    while first > 0 && same_link(&runs[first - 1]) {
        first -= 1;
    }
    let mut last = index + 1;
    while last < runs.len() && same_link(&runs[last]) {
        last += 1;
    }
    let start = total_len(&runs[..first]);
    let end = start + total_len(&runs[first..last]);
    Some((start, end))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ToHtml;

    fn plain(text: &str) -> InlineRun {
        InlineRun::text(text, AttributeSet::default())
    }

    fn bold(text: &str) -> InlineRun {
        InlineRun::text(
            text,
            AttributeSet {
                bold: true,
                ..Default::default()
            },
        )
    }

    fn linked(text: &str, url: &str) -> InlineRun {
        InlineRun::text(
            text,
            AttributeSet {
                link: Some(LinkTarget::new(url, Vec::new())),
                ..Default::default()
            },
        )
    }

    #[test]
    fn runs_round_trip_through_the_tree() {
        let runs = vec![plain("a"), bold("b"), plain("c")];
        assert_eq!(Dom::from_runs(runs.clone()).to_runs(), runs);
    }

    #[test]
    fn adjacent_runs_with_same_attributes_are_merged() {
        let dom = Dom::from_runs(vec![bold("foo"), bold("bar"), plain("")]);
        assert_eq!(dom.to_runs(), vec![bold("foobar")]);
        assert_eq!(dom.to_html(), "<b>foobar</b>");
    }

    #[test]
    fn wrappers_nest_in_a_fixed_order() {
        let attributes = AttributeSet {
            bold: true,
            italic: true,
            strike_through: true,
            link: Some(LinkTarget::new("https://example.com", Vec::new())),
        };
        let dom = Dom::from_runs(vec![InlineRun::text("x", attributes)]);
        assert_eq!(
            dom.to_html(),
            r#"<a href="https://example.com"><b><i><del>x</del></i></b></a>"#
        );
    }

    #[test]
    fn one_link_wraps_runs_with_different_formats() {
        let mut runs = vec![linked("ab", "https://x.org")];
        apply_attributes(&mut runs, 1, 2, |a| a.bold = true);
        assert_eq!(
            Dom::from_runs(runs).to_html(),
            r#"<a href="https://x.org">a<b>b</b></a>"#
        );
    }

    #[test]
    fn splitting_inside_a_run_creates_a_boundary() {
        let mut runs = vec![plain("hello")];
        assert_eq!(split_at(&mut runs, 2), 1);
        assert_eq!(runs, vec![plain("he"), plain("llo")]);
    }

    #[test]
    fn splitting_on_a_boundary_changes_nothing() {
        let mut runs = vec![plain("ab"), bold("cd")];
        assert_eq!(split_at(&mut runs, 2), 1);
        assert_eq!(split_at(&mut runs, 0), 0);
        assert_eq!(split_at(&mut runs, 4), 2);
        assert_eq!(runs.len(), 2);
    }

    #[test]
    fn zero_width_runs_count_as_after_the_split() {
        let mut runs = vec![
            plain("ab"),
            InlineRun::marker(MarkerId(1), AttributeSet::default()),
            plain("cd"),
        ];
        assert_eq!(split_at(&mut runs, 2), 1);
    }

    #[test]
    fn applying_attributes_only_touches_the_range() {
        let mut runs = vec![plain("aabbcc")];
        apply_attributes(&mut runs, 2, 4, |a| a.bold = true);
        assert_eq!(Dom::from_runs(runs).to_html(), "aa<b>bb</b>cc");
    }

    #[test]
    fn attributes_in_range_skips_runs_outside_it() {
        let runs = vec![plain("ab"), bold("cd"), plain("ef")];
        let found = attributes_in_range(&runs, 2, 4);
        assert_eq!(found.len(), 1);
        assert!(found[0].bold);
        assert_eq!(attributes_in_range(&runs, 1, 3).len(), 2);
    }

    #[test]
    fn typing_continues_the_formatting_to_the_left() {
        let runs = vec![bold("ab"), plain("cd")];
        assert!(insertion_attributes(&runs, 2).bold);
        assert!(!insertion_attributes(&runs, 3).bold);
        assert!(insertion_attributes(&runs, 0).bold);
    }

    #[test]
    fn typing_never_extends_a_link() {
        let runs = vec![linked("ab", "https://x.org")];
        assert_eq!(insertion_attributes(&runs, 2).link, None);
    }

    #[test]
    fn deleting_a_range_removes_markers_inside_it() {
        let mut runs = vec![
            plain("ab"),
            InlineRun::marker(MarkerId(1), AttributeSet::default()),
            plain("cd"),
        ];
        delete_range(&mut runs, 1, 3);
        assert_eq!(Dom::from_runs(runs).to_runs(), vec![plain("ad")]);
    }

    #[test]
    fn text_in_range_spans_runs_and_line_breaks() {
        let runs = vec![
            plain("ab"),
            InlineRun::line_break(AttributeSet::default()),
            bold("cd"),
        ];
        assert_eq!(text_in_range(&runs, 1, 4), "b\nc");
        assert_eq!(text_in_range(&runs, 0, 5), "ab\ncd");
    }

    #[test]
    fn grapheme_clusters_are_deleted_whole() {
        // Woman astronaut: 7 UTF-16 code units, one grapheme cluster
        let astronaut = "\u{1F469}\u{1F3FF}\u{200D}\u{1F680}";
        let runs = vec![plain(&format!("a{astronaut}b"))];
        assert_eq!(unit_len_before(&runs, 8), Some(7));
        assert_eq!(unit_len_after(&runs, 1), Some(7));
        assert_eq!(unit_len_before(&runs, 9), Some(1));
        assert_eq!(unit_len_before(&runs, 0), None);
        assert_eq!(unit_len_after(&runs, 9), None);
    }

    #[test]
    fn link_extent_covers_the_whole_link() {
        let mut runs = vec![plain("go "), linked("here now", "https://x.org")];
        apply_attributes(&mut runs, 3, 7, |a| a.bold = true);
        let index = run_index_before(&runs, 10).unwrap();
        assert_eq!(link_extent(&runs, index), Some((3, 11)));
        assert_eq!(link_extent(&runs, 0), None);
    }
}
