//! # Response Table
//!
//! File: cli/src/responses/table.rs
//!
//! ## Overview
//!
//! Maps intent labels to pre-authored replies and picks one at random. The
//! reserved `"default"` bucket answers any label that is missing from the
//! table or whose reply list is empty. A table with neither is malformed and
//! selection fails with `ChatbotError::MalformedResponseTable`.
//!
use crate::core::error::{ChatbotError, Result};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of the fallback reply bucket.
pub const DEFAULT_KEY: &str = "default";

/// Intent label -> candidate replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl ResponseTable {
    pub fn new(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    /// The replies the chatbot ships with.
    pub fn builtin() -> Self {
        let table = [
            (
                "greet",
                &[
                    "Hey there, boss! What’s up—ready to have some fun?",
                    "Hi! How’s my favorite user doing today?",
                    "Hello! What can I do for you, rey?",
                    "Arey, good to see you! What’s cooking, bro?",
                ][..],
            ),
            (
                "ask_weather",
                &[
                    "Arey, it’s sunny in Florida—perfect for a picnic, bro!",
                    "Let me check... Hmm, I think it’s sunny somewhere!",
                    "Weather’s looking good—maybe go for a walk?",
                    "I’m not a weather app, but I’d say it’s probably nice out there!",
                ][..],
            ),
            (
                "tell_joke",
                &[
                    "Haha, here’s a good one: Why did the chicken join a band? Because it had the drumsticks!",
                    "Why did the scarecrow become a motivational speaker? Because he was outstanding in his field!",
                    "What do you call fake spaghetti? An impasta!",
                    "Why don’t skeletons fight in school? They don’t have the guts for it!",
                ][..],
            ),
            (
                DEFAULT_KEY,
                &[
                    "I’m not sure what you mean, rey! Can you say that again?",
                    "Hmm, I didn’t catch that. Try something else!",
                    "Arey, you’re confusing me—let’s try again!",
                    "Boss, I’m a bit lost here—can you help me out?",
                ][..],
            ),
        ];
        Self::new(
            table
                .iter()
                .map(|(label, replies)| {
                    (
                        label.to_string(),
                        replies.iter().map(|r| r.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    /// Replies for `label`, if the label is present with at least one reply.
    pub fn replies(&self, label: &str) -> Option<&[String]> {
        self.entries
            .get(label)
            .map(Vec::as_slice)
            .filter(|replies| !replies.is_empty())
    }

    /// Picks a reply for `label` uniformly at random, falling back to the
    /// `"default"` bucket.
    pub fn select<'a, R: Rng + ?Sized>(&'a self, label: &str, rng: &mut R) -> Result<&'a str> {
        let replies = self
            .replies(label)
            .or_else(|| self.replies(DEFAULT_KEY))
            .ok_or_else(|| ChatbotError::MalformedResponseTable {
                label: label.to_string(),
            })?;
        replies
            .choose(rng)
            .map(String::as_str)
            .ok_or_else(|| {
                ChatbotError::MalformedResponseTable {
                    label: label.to_string(),
                }
                .into()
            })
    }

    /// Labels from `labels` that have no replies of their own.
    pub fn missing_labels<'a>(&self, labels: &'a [String]) -> Vec<&'a str> {
        labels
            .iter()
            .filter(|label| self.replies(label).is_none())
            .map(String::as_str)
            .collect()
    }

    /// True when the `"default"` bucket has at least one reply.
    pub fn has_default(&self) -> bool {
        self.replies(DEFAULT_KEY).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
