//! Offline extractive summarizer.
//!
//! Used when the remote service is unavailable. Picks the sentence whose
//! content words are most frequent across the whole note. Pure and
//! deterministic: no I/O, no randomness, no shared state.

use std::collections::HashMap;

use tracing::{debug, trace};

use mnemo_core::defaults::{EMPTY_NOTE_SUMMARY, NOTE_TITLE, TITLE_MAX_CHARS};
use mnemo_core::ContentRecord;

/// English stop-words excluded from the frequency table.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Characters that end a sentence.
const TERMINALS: [char; 3] = ['.', '!', '?'];

/// Frequency-based extractive summarizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSummarizer;

impl TextSummarizer {
    pub fn new() -> Self {
        Self
    }

    /// Summarize `text` into a record. Never fails.
    ///
    /// `extracted_text` is always the input verbatim; tags and highlights
    /// are always empty.
    pub fn summarize(&self, text: &str) -> ContentRecord {
        if text.trim().is_empty() {
            return ContentRecord {
                title: NOTE_TITLE.to_string(),
                summary: EMPTY_NOTE_SUMMARY.to_string(),
                extracted_text: text.to_string(),
                tags: Vec::new(),
                highlights: Vec::new(),
            };
        }

        let sentences = split_sentences(text);
        let frequencies = word_frequencies(text);

        let mut best = sentences.first().copied().unwrap_or(text);
        let mut best_score = 0usize;
        for &sentence in &sentences {
            let score = score_sentence(sentence, &frequencies);
            trace!(score, sentence = %sentence, "Scored sentence");
            if score > best_score {
                best_score = score;
                best = sentence;
            }
        }

        debug!(
            sentences = sentences.len(),
            vocabulary = frequencies.len(),
            best_score,
            "Offline summary selected"
        );

        ContentRecord {
            title: title_from_first_line(text),
            summary: best.trim().to_string(),
            extracted_text: text.to_string(),
            tags: Vec::new(),
            highlights: Vec::new(),
        }
    }
}

/// Split text into sentence candidates ending in `.`, `!` or `?`.
///
/// Runs of terminal punctuation stay attached to their sentence. A trailing
/// fragment with no terminal punctuation is dropped unless it is the only
/// candidate, in which case the whole text is returned.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if TERMINALS.contains(&ch) {
            let Some(begin) = start.take() else {
                continue;
            };
            let mut end = idx + ch.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !TERMINALS.contains(&next) {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }
            sentences.push(&text[begin..end]);
        } else if start.is_none() {
            start = Some(idx);
        }
    }

    if sentences.is_empty() {
        sentences.push(text);
    }
    sentences
}

/// Lowercased, punctuation-stripped words with stop-words removed.
pub fn content_words(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Count of each content word across `text`.
pub fn word_frequencies(text: &str) -> HashMap<String, usize> {
    let mut frequencies = HashMap::new();
    for word in content_words(text) {
        *frequencies.entry(word).or_insert(0) += 1;
    }
    frequencies
}

/// Sum of the frequencies of a sentence's content words.
pub fn score_sentence(sentence: &str, frequencies: &HashMap<String, usize>) -> usize {
    content_words(sentence)
        .iter()
        .map(|word| frequencies.get(word).copied().unwrap_or(0))
        .sum()
}

fn title_from_first_line(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return NOTE_TITLE.to_string();
    }
    first_line.chars().take(TITLE_MAX_CHARS).collect()
}
