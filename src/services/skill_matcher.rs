//! Case-insensitive, whole-span keyword matching over a fixed skill list.

use std::collections::{BTreeSet, HashMap};

use aho_corasick::AhoCorasick;
use anyhow::{Context, Result};
use tracing::{debug, info};

/// Immutable index over the reference skill list.
///
/// Entries are lower-cased before indexing and the text is lower-cased before
/// scanning, so matching ignores case for any script `char::to_lowercase`
/// understands. A hit only counts when it is not glued to a neighbouring
/// word character.
#[derive(Debug)]
pub struct SkillMatcher {
    automaton: AhoCorasick,
    /// Reported name for each automaton pattern, indexed by pattern id.
    names: Vec<String>,
}

impl SkillMatcher {
    pub fn new<I, S>(skills: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = Vec::new();
        let mut patterns: Vec<String> = Vec::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();

        for skill in skills {
            let name = skill.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let key = name.to_lowercase();
            match by_key.get(&key) {
                // Later spellings of the same keyword replace earlier ones.
                Some(&id) => names[id] = name.to_string(),
                None => {
                    by_key.insert(key.clone(), names.len());
                    names.push(name.to_string());
                    patterns.push(key);
                }
            }
        }

        let automaton = AhoCorasick::builder()
            .build(&patterns)
            .context("Failed to build skill matcher index")?;

        info!(skills = names.len(), "Skill matcher index built");

        Ok(Self { automaton, names })
    }

    /// Reference entries occurring in `text`. Each entry is reported at most
    /// once; overlapping hits resolve leftmost-longest.
    pub fn find_skills(&self, text: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        if text.is_empty() || self.names.is_empty() {
            return found;
        }

        let haystack = text.to_lowercase();

        let mut hits: Vec<(usize, usize, usize)> = self
            .automaton
            .find_overlapping_iter(haystack.as_str())
            .filter(|m| is_whole_span(&haystack, m.start(), m.end()))
            .map(|m| (m.start(), m.end(), m.pattern().as_usize()))
            .collect();

        hits.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut cursor = 0;
        for (start, end, id) in hits {
            if start < cursor {
                continue;
            }
            found.insert(self.names[id].clone());
            cursor = end;
        }

        debug!(
            text_length = text.len(),
            matched = found.len(),
            "Skill scan completed"
        );

        found
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

// Offsets come from matching complete UTF-8 patterns, so both are char
// boundaries.
fn is_whole_span(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.map_or(false, is_word_char) && !after.map_or(false, is_word_char)
}
