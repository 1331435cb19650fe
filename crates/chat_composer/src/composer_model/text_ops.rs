// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::dom::parser::parse;
use crate::dom::runs::{self, AttributeSet, InlineRun};
use crate::dom::Dom;
use crate::{
    ComposerModel, ComposerUpdate, HtmlParseError, LinkActionUpdate, LinkFlowState,
};

static LINE_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("line break regex is valid"));

const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Split typed or pasted text into text runs and line breaks, all carrying
/// `attributes`.
fn text_to_runs(text: &str, attributes: &AttributeSet) -> Vec<InlineRun> {
    let text: String = text.chars().filter(|c| *c != ZERO_WIDTH_SPACE).collect();
    let mut new_runs = Vec::new();
    for (i, line) in LINE_BREAKS.split(&text).enumerate() {
        if i > 0 {
            new_runs.push(InlineRun::line_break(attributes.clone()));
        }
        if !line.is_empty() {
            new_runs.push(InlineRun::text(line, attributes.clone()));
        }
    }
    new_runs
}

impl ComposerModel {
    /// Replace the selection with `text`. Line breaks in `text` become
    /// `<br />`s.
    pub fn replace_text(&mut self, text: &str) -> ComposerUpdate {
        if !self.can_edit() {
            debug!("Ignoring text input");
            return ComposerUpdate::keep();
        }
        self.purge_stale_markers();
        let (start, end) = self.safe_selection();
        let runs = self.state.dom.to_runs();
        let marker = self.live_marker(&runs).map(|(id, attributes)| {
            (id, attributes.clone())
        });
        let attributes = match &marker {
            Some((_, attributes)) => attributes.clone(),
            None if start == end => runs::insertion_attributes(&runs, start),
            None => runs::run_index_after(&runs, start)
                .map(|index| runs[index].attributes.for_insertion())
                .unwrap_or_default(),
        };
        let new_runs = text_to_runs(text, &attributes);
        if new_runs.is_empty() && start == end {
            return ComposerUpdate::keep();
        }
        let inserted_len = runs::total_len(&new_runs);

        self.edit_runs(|runs| {
            runs::delete_range(runs, start, end);
            if let Some((id, _)) = &marker {
                runs.retain(|run| !run.is_marker(*id));
            }
            runs::insert_runs(runs, start, new_runs);
        });
        if marker.is_some() {
            self.active_marker = None;
        }
        self.set_caret(start + inserted_len);
        self.create_update_replace_all()
    }

    /// Insert a line break at the caret.
    pub fn new_line(&mut self) -> ComposerUpdate {
        self.replace_text("\n")
    }

    /// Delete the selection, or the character before the caret.
    pub fn backspace(&mut self) -> ComposerUpdate {
        self.delete_in_direction(|runs, caret| {
            runs::unit_len_before(runs, caret).map(|len| (caret - len, caret))
        })
    }

    /// Delete the selection, or the character after the caret.
    pub fn delete(&mut self) -> ComposerUpdate {
        self.delete_in_direction(|runs, caret| {
            runs::unit_len_after(runs, caret).map(|len| (caret, caret + len))
        })
    }

    fn delete_in_direction(
        &mut self,
        range_at_caret: impl FnOnce(&[InlineRun], usize) -> Option<(usize, usize)>,
    ) -> ComposerUpdate {
        if !self.can_edit() {
            return ComposerUpdate::keep();
        }
        self.purge_stale_markers();
        let (start, end) = self.safe_selection();
        let (start, end) = if start == end {
            match range_at_caret(&self.state.dom.to_runs(), start) {
                Some(range) => range,
                None => return ComposerUpdate::keep(),
            }
        } else {
            (start, end)
        };
        self.edit_runs(|runs| runs::delete_range(runs, start, end));
        self.set_caret(start);
        self.create_update_replace_all()
    }

    /// Empty the composer, dropping any marker and closing the link modal.
    /// The staged attachment is kept.
    pub fn clear(&mut self) -> ComposerUpdate {
        let modal_was_open = self.link_flow != LinkFlowState::Idle;
        self.link_flow = LinkFlowState::Idle;
        if modal_was_open {
            self.focused = self.mounted;
        }
        self.replace_dom(Dom::default());
        let update = self.create_update_replace_all();
        if modal_was_open {
            update.with_link_action(LinkActionUpdate::CloseModal)
        } else {
            update
        }
    }

    /// Replace the whole document with `html`, leaving the caret at the end.
    ///
    /// This is how the host loads a draft, so unlike typing it works while
    /// the composer is disabled, unfocused or showing the link modal. A link
    /// modal left open will then fail to confirm with
    /// [`LinkError::SelectionLost`](crate::LinkError::SelectionLost).
    pub fn set_content_from_html(
        &mut self,
        html: &str,
    ) -> Result<ComposerUpdate, HtmlParseError> {
        let dom = parse(html)?;
        self.replace_dom(dom);
        Ok(self.create_update_replace_all())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::composer_model::base::test::{model_with, select};
    use crate::dom::unicode_string::UnicodeStrExt;
    use crate::{Location, TextUpdate};

    #[test]
    fn typing_appends_text() {
        let mut model = ComposerModel::new();
        model.replace_text("hello");
        model.replace_text(" world");
        assert_eq!(model.get_content_as_html(), "hello world");
        assert_eq!(model.safe_selection(), (11, 11));
    }

    #[test]
    fn typing_replaces_the_selection() {
        let mut model = model_with("hello world");
        select(&mut model, 0, 5);
        let update = model.replace_text("goodbye");
        assert_eq!(model.get_content_as_html(), "goodbye world");
        match update.text_update {
            TextUpdate::ReplaceAll(replace) => {
                assert_eq!(replace.replacement_html, "goodbye world");
                assert_eq!(replace.start, Location::from(7));
            }
            other => panic!("Expected ReplaceAll, got {other:?}"),
        }
    }

    #[test]
    fn typing_over_formatted_text_keeps_its_format() {
        let mut model = model_with("a<b>bc</b>d");
        select(&mut model, 1, 3);
        model.replace_text("X");
        assert_eq!(model.get_content_as_html(), "a<b>X</b>d");
    }

    #[test]
    fn typing_continues_the_format_to_the_left() {
        let mut model = model_with("<i>ab</i>cd");
        select(&mut model, 2, 2);
        model.replace_text("X");
        assert_eq!(model.get_content_as_html(), "<i>abX</i>cd");
    }

    #[test]
    fn newlines_become_line_breaks() {
        let mut model = ComposerModel::new();
        model.replace_text("a\r\nb\rc\nd");
        assert_eq!(model.get_content_as_html(), "a<br />b<br />c<br />d");
        assert_eq!(model.get_content_as_plain_text(), "a\nb\nc\nd");
    }

    #[test]
    fn zero_width_spaces_are_dropped() {
        let mut model = ComposerModel::new();
        model.replace_text("\u{200B}");
        assert!(model.is_empty());
        assert_eq!(model.get_content_as_html(), "");
    }

    #[test]
    fn new_line_inserts_a_break_at_the_caret() {
        let mut model = model_with("ab");
        select(&mut model, 1, 1);
        model.new_line();
        assert_eq!(model.get_content_as_html(), "a<br />b");
        assert_eq!(model.safe_selection(), (2, 2));
        assert!(!model.is_empty());
    }

    #[test]
    fn backspace_removes_one_character() {
        let mut model = model_with("abc");
        model.backspace();
        assert_eq!(model.get_content_as_html(), "ab");
        assert_eq!(model.safe_selection(), (2, 2));
    }

    #[test]
    fn backspace_removes_whole_grapheme_clusters() {
        let mut model = ComposerModel::new();
        model.replace_text("a\u{1F44D}\u{1F3FD}");
        model.backspace();
        assert_eq!(model.get_content_as_plain_text(), "a");
    }

    #[test]
    fn backspace_at_the_start_does_nothing() {
        let mut model = model_with("abc");
        select(&mut model, 0, 0);
        assert_eq!(model.backspace(), ComposerUpdate::keep());
        assert_eq!(model.get_content_as_html(), "abc");
    }

    #[test]
    fn backspace_deletes_the_selection() {
        let mut model = model_with("a<b>bcd</b>e");
        select(&mut model, 2, 5);
        model.backspace();
        assert_eq!(model.get_content_as_html(), "a<b>b</b>");
    }

    #[test]
    fn delete_removes_the_character_after_the_caret() {
        let mut model = model_with("a<br />b");
        select(&mut model, 1, 1);
        model.delete();
        assert_eq!(model.get_content_as_html(), "ab");
        assert_eq!(model.safe_selection(), (1, 1));
        select(&mut model, 2, 2);
        assert_eq!(model.delete(), ComposerUpdate::keep());
    }

    #[test]
    fn deleting_everything_leaves_no_wrappers() {
        let mut model = model_with("<b><i>x</i></b>");
        model.backspace();
        assert_eq!(model.get_content_as_html(), "");
        assert!(model.dom().children().is_empty());
        assert!(model.is_empty());
    }

    #[test]
    fn clear_resets_the_document() {
        let mut model = model_with("<b>abc</b>");
        model.bold();
        model.clear();
        assert!(model.is_empty());
        assert!(!model.dom().has_markers());
        assert_eq!(model.safe_selection(), (0, 0));
        assert!(!model.format_state().bold);
    }

    #[test]
    fn clear_closes_the_link_modal() {
        let mut model = model_with("abc");
        select(&mut model, 0, 3);
        model.link();
        let update = model.clear();
        assert_eq!(update.link_action, LinkActionUpdate::CloseModal);
        assert_eq!(model.link_flow_state(), &LinkFlowState::Idle);
        assert!(model.can_edit());
    }

    #[test]
    fn content_can_be_loaded_from_html() {
        let mut model = ComposerModel::new();
        let revision = model.revision();
        model.set_content_from_html("<strong>hi</strong>").unwrap();
        assert_eq!(model.get_content_as_html(), "<b>hi</b>");
        assert_eq!(model.safe_selection(), (2, 2));
        assert!(model.revision() > revision);
        assert!(model.set_content_from_html("<div>x</div>").is_err());
        assert_eq!(model.get_content_as_html(), "<b>hi</b>");
    }

    #[test]
    fn text_runs_split_on_every_kind_of_newline() {
        let attributes = AttributeSet::default();
        let runs = text_to_runs("a\r\n\nb", &attributes);
        assert_eq!(runs.len(), 4);
        assert_eq!(runs::total_len(&runs), 4);
        assert_eq!("a\r\n\nb".utf16_len(), 5);
    }

    #[test]
    fn drafts_load_even_when_typing_is_blocked() {
        let mut model = ComposerModel::new();
        model.set_disabled(true);
        model.blur();
        assert_eq!(model.replace_text("typed").text_update, TextUpdate::Keep);
        model.set_content_from_html("<b>draft</b>").unwrap();
        assert_eq!(model.get_content_as_html(), "<b>draft</b>");
        assert_eq!(model.get_selection(), (Location::from(5), Location::from(5)));
    }
}
