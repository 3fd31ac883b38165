//! Writing prompts shown in the entry editor.
//!
//! Prompts come from a plain text file with one prompt per line; the loaded
//! list is shuffled so the editor can walk through it in a fresh order each
//! session. A missing or unreadable file falls back to a small built-in set.

use rand::seq::SliceRandom;
use rand::thread_rng;
use std::fs;
use std::path::Path;
use tracing::debug;

const FALLBACK_PROMPTS: &[&str] = &[
    "How has the day gone so far?",
    "What do you plan to do with your day?",
    "What are you grateful for today?",
];

/// A shuffled list of writing prompts.
#[derive(Clone, Debug)]
pub struct WritingPrompts {
    prompts: Vec<String>,
}

impl WritingPrompts {
    /// Loads prompts from `path`, one per line, dropping blank lines.
    ///
    /// Falls back to the built-in prompts when the file is missing or
    /// unreadable; the result is never empty.
    pub fn load(path: &Path) -> Self {
        let mut prompts: Vec<String> = match fs::read_to_string(path) {
            Ok(text) => text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) => {
                debug!("no prompts file at {}: {}", path.display(), e);
                Vec::new()
            }
        };

        if prompts.is_empty() {
            prompts = FALLBACK_PROMPTS.iter().map(|p| p.to_string()).collect();
        }

        prompts.shuffle(&mut thread_rng());
        WritingPrompts { prompts }
    }

    /// All prompts in their shuffled order.
    pub fn all(&self) -> &[String] {
        &self.prompts
    }

    /// One prompt picked at random.
    pub fn random(&self) -> &str {
        self.prompts
            .choose(&mut thread_rng())
            .map(String::as_str)
            .unwrap_or(FALLBACK_PROMPTS[0])
    }
}
