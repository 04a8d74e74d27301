//! # Built-in Training Data
//!
//! File: cli/src/nlp/dataset.rs
//!
//! The labelled examples the intent classifier is trained on, plus the probe
//! messages shown in the warm-up demo. Both are fixed at build time.
//!

/// A raw message paired with the intent it expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingExample {
    pub text: &'static str,
    pub intent: &'static str,
}

const fn example(text: &'static str, intent: &'static str) -> TrainingExample {
    TrainingExample { text, intent }
}

/// The training set: four examples for each of the three intents.
pub const TRAINING_EXAMPLES: &[TrainingExample] = &[
    example("hi", "greet"),
    example("hello", "greet"),
    example("hey there", "greet"),
    example("good morning", "greet"),
    example("what's the weather like", "ask_weather"),
    example("how's the weather today", "ask_weather"),
    example("is it sunny in Florida", "ask_weather"),
    example("tell me the weather in New York", "ask_weather"),
    example("tell me a joke", "tell_joke"),
    example("make me laugh", "tell_joke"),
    example("say something funny", "tell_joke"),
    example("got any jokes", "tell_joke"),
];

/// Messages classified before the interactive session starts.
pub const DEMO_MESSAGES: &[&str] = &[
    "hello there",
    "what's the weather in Texas",
    "tell me a joke",
    "hi boss",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_training_set_is_balanced() {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for ex in TRAINING_EXAMPLES {
            *counts.entry(ex.intent).or_default() += 1;
        }
        assert_eq!(TRAINING_EXAMPLES.len(), 12);
        assert_eq!(
            counts.into_iter().collect::<Vec<_>>(),
            vec![("ask_weather", 4), ("greet", 4), ("tell_joke", 4)]
        );
    }
}
