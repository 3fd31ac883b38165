//! Journal entry records and tokenization.
//!
//! This module contains the immutable `JournalEntry` value persisted in the
//! archive, the `EntryDraft` shape the presentation layer hands in when
//! creating or editing an entry, and the tokenization that derives an entry's
//! searchable vocabulary.

mod timestamp;

pub use timestamp::Timestamp;

use serde::{Deserialize, Serialize};

/// One journal entry, keyed by its timestamp.
///
/// All fields other than `date` are free-form and may be empty. The UI
/// convention that `mood` is at most one grapheme is enforced by the caller,
/// not here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Creation/edit timestamp; unique identifier and primary sort key.
    pub date: Timestamp,
    /// Mood emoji (or empty).
    pub mood: String,
    /// Entry title.
    pub title: String,
    /// The writing prompt the entry was written against, if any.
    pub prompt: String,
    /// Free-form entry body.
    pub text: String,
    /// Ordered tags; duplicates are kept as entered.
    pub tags: Vec<String>,
}

impl JournalEntry {
    /// Derives the entry's searchable vocabulary.
    ///
    /// Concatenates mood, title, prompt, text and the tags joined by spaces,
    /// splits on whitespace, strips leading/trailing punctuation from each
    /// piece, drops empty pieces and lowercases the rest. Order is not
    /// significant for indexing.
    pub fn tokens(&self) -> Vec<String> {
        let joined = format!(
            "{} {} {} {} {}",
            self.mood,
            self.title,
            self.prompt,
            self.text,
            self.tags.join(" ")
        );
        tokenize(&joined)
    }
}

/// The editable field set handed in by the presentation layer.
///
/// A draft becomes a [`JournalEntry`] via [`EntryDraft::into_record`], which
/// applies whitespace trimming to every string field.
#[derive(Clone, Debug, Default)]
pub struct EntryDraft {
    /// Target timestamp for the entry.
    pub date: Timestamp,
    /// Mood emoji (or empty).
    pub mood: String,
    /// Entry title.
    pub title: String,
    /// The writing prompt shown in the editor, if any.
    pub prompt: String,
    /// Free-form entry body.
    pub text: String,
    /// Ordered tags.
    pub tags: Vec<String>,
}

impl EntryDraft {
    /// A blank draft dated `date`.
    pub fn new(date: Timestamp) -> Self {
        EntryDraft {
            date,
            ..EntryDraft::default()
        }
    }

    /// There's no point in saving a journal entry that neither records a
    /// mood nor has any text.
    pub fn is_meaningful(&self) -> bool {
        !self.mood.trim().is_empty() || !self.text.trim().is_empty()
    }

    /// Builds the record that will be persisted under `date`, trimming
    /// whitespace from every string field.
    pub fn into_record(self, date: Timestamp) -> JournalEntry {
        JournalEntry {
            date,
            mood: self.mood.trim().to_string(),
            title: self.title.trim().to_string(),
            prompt: self.prompt.trim().to_string(),
            text: self.text.trim().to_string(),
            tags: self
                .tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .collect(),
        }
    }
}

/// Punctuation beyond the ASCII range that commonly brackets words.
const EXTRA_PUNCTUATION: &[char] = &[
    '…', '—', '–', '“', '”', '‘', '’', '«', '»', '¿', '¡', '。', '、', '，',
];

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || EXTRA_PUNCTUATION.contains(&c)
}

/// Splits free text into lowercased word tokens.
///
/// Queries are tokenized with the same rules as entry content so that a
/// query term always compares against vocabulary derived identically.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|piece| piece.trim_matches(is_punctuation))
        .filter(|piece| !piece.is_empty())
        .map(str::to_lowercase)
        .collect()
}
