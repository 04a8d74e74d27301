//! # Text Normalizer
//!
//! File: cli/src/nlp/normalize.rs
//!
//! ## Overview
//!
//! Turns raw user input into the cleaned form the classifier is trained on:
//!
//! 1. lowercase the whole message and fold `’` to `'`,
//! 2. split it into words on Unicode word boundaries (UAX #29), keeping
//!    hyphen-joined words such as `good-morning` together as one token,
//! 3. split clitics off the end of a word: `n't` (`couldn't` → `could`,
//!    `can't` → `ca`) and `'s`, `'m`, `'d`, `'ll`, `'re`, `'ve`
//!    (`what's` → `what`); a few fused forms are split too (`cannot`,
//!    `gonna`, `wanna`, ...),
//! 4. keep only purely alphabetic tokens, so clitics, hyphenated compounds
//!    and words with other inner apostrophes (`o'clock`) are dropped,
//! 5. drop English stop words,
//! 6. join the survivors with single spaces.
//!
//! The result is a pure function of the input, and normalizing an already
//! normalized string returns it unchanged. A message made only of stop words
//! or punctuation normalizes to `""`, which the classifier still accepts.
//!
//! ```rust,ignore
//! assert_eq!(normalize("Hello there!"), "hello");
//! assert_eq!(normalize("I couldn't find it"), "could find");
//! assert_eq!(normalize("good-morning"), "");
//! ```
//!
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

/// English stop words removed before classification.
///
/// This is the standard NLTK English list, including the stems left behind
/// by negative contractions (`don`, `isn`, `wasn`, ...).
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Returns true if `word` (already lowercased) is an English stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Suffixes split off a word and emitted as separate tokens.
const CLITICS: &[&str] = &["n't", "'s", "'m", "'d", "'ll", "'re", "'ve"];

/// Fused forms split into two tokens.
const FUSED_FORMS: &[(&str, [&str; 2])] = &[
    ("cannot", ["can", "not"]),
    ("d'ye", ["d", "'ye"]),
    ("gimme", ["gim", "me"]),
    ("gonna", ["gon", "na"]),
    ("gotta", ["got", "ta"]),
    ("lemme", ["lem", "me"]),
    ("more'n", ["more", "'n"]),
    ("wanna", ["wan", "na"]),
];

/// Normalizes a raw message into its cleaned, space-separated form.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase().replace('\u{2019}', "'");
    tokenize(&lowered)
        .into_iter()
        .flat_map(split_contraction)
        .filter(|token| !token.is_empty() && token.chars().all(char::is_alphabetic))
        .filter(|token| !is_stop_word(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_word_segment(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

/// Splits `text` into word tokens, gluing words joined by a single `-`.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut segments = text.split_word_bound_indices().peekable();

    while let Some((idx, segment)) = segments.next() {
        let joins_hyphen = segment == "-"
            && start.is_some()
            && segments
                .peek()
                .is_some_and(|(_, next)| is_word_segment(next));
        if is_word_segment(segment) || joins_hyphen {
            start.get_or_insert(idx);
            end = idx + segment.len();
        } else if let Some(s) = start.take() {
            tokens.push(&text[s..end]);
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..end]);
    }
    tokens
}

/// Splits a trailing clitic or a fused form off `token`.
fn split_contraction(token: &str) -> Vec<&str> {
    if let Some((_, parts)) = FUSED_FORMS.iter().find(|(form, _)| *form == token) {
        return parts.to_vec();
    }
    for clitic in CLITICS {
        if let Some(stem) = token.strip_suffix(clitic) {
            if !stem.is_empty() && !stem.ends_with('\'') {
                return vec![stem, &token[stem.len()..]];
            }
        }
    }
    vec![token]
}
