// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

/// Someone who can be mentioned, as supplied by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MentionCandidate {
    pub id: String,
    pub display_name: String,
}

impl MentionCandidate {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// The text inserted for this mention, including the trailing space.
    pub fn mention_text(&self) -> String {
        let name = self.display_name.split_whitespace().collect::<Vec<_>>();
        format!("@{} ", name.join(" "))
    }
}

/// The candidates whose name contains `query`, ignoring case, in the order
/// given. A blank query matches everyone.
pub fn filter_mention_candidates<'a>(
    candidates: &'a [MentionCandidate],
    query: &str,
) -> Vec<&'a MentionCandidate> {
    let query = query.trim().to_lowercase();
    candidates
        .iter()
        .filter(|candidate| {
            query.is_empty()
                || candidate.display_name.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn people() -> Vec<MentionCandidate> {
        vec![
            MentionCandidate::new("1", "Saurav Kumar"),
            MentionCandidate::new("2", "Gokul Nk"),
            MentionCandidate::new("3", "Priya Singh"),
        ]
    }

    fn names<'a>(candidates: &[&'a MentionCandidate]) -> Vec<&'a str> {
        candidates
            .iter()
            .map(|candidate| candidate.display_name.as_str())
            .collect()
    }

    #[test]
    fn blank_queries_match_everyone() {
        let people = people();
        assert_eq!(filter_mention_candidates(&people, "").len(), 3);
        assert_eq!(filter_mention_candidates(&people, "  ").len(), 3);
    }

    #[test]
    fn queries_match_anywhere_in_the_name_ignoring_case() {
        let people = people();
        assert_eq!(
            names(&filter_mention_candidates(&people, "KU")),
            vec!["Saurav Kumar", "Gokul Nk"]
        );
        assert_eq!(names(&filter_mention_candidates(&people, "sing")), vec!["Priya Singh"]);
        assert!(filter_mention_candidates(&people, "zed").is_empty());
    }

    #[test]
    fn mention_text_has_a_trailing_space() {
        assert_eq!(people()[0].mention_text(), "@Saurav Kumar ");
        let odd = MentionCandidate::new("4", " Line\nBreak ");
        assert_eq!(odd.mention_text(), "@Line Break ");
    }
}
