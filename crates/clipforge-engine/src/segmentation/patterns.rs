//! Locale-specific lexical pattern tables for feature extraction.
//!
//! All linguistic heuristics (hook detection, filler words, stop words,
//! payoff phrases, profanity) are data held in a [`LexiconTables`] value
//! rather than branches in the feature code, so locales can be added and
//! tuned without touching control flow.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Chapter-title keywords that identify an intro chapter, across the locales
/// the upstream catalog serves.
const INTRO_TITLE_KEYWORDS: &[&str] = &[
    // en
    "intro", "introduction", "welcome", "opening",
    // de
    "einführung", "einleitung", "begrüßung",
    // es
    "introducción", "bienvenida",
    // fr
    "bienvenue",
    // it
    "introduzione",
    // pt
    "introdução", "abertura",
    // nl
    "inleiding",
    // pl
    "wstęp",
    // tr
    "giriş",
    // ru
    "вступление", "введение",
    // ja
    "イントロ", "はじめに",
    // ko
    "인트로", "소개",
    // zh
    "介绍", "开场",
];

/// Returns true when a chapter title reads like an intro.
pub fn is_intro_title(title: &str) -> bool {
    let lowered = title.to_lowercase();
    INTRO_TITLE_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Compiled lexical pattern tables for one locale.
#[derive(Debug)]
pub struct LexiconTables {
    /// Question-style hook openers ("what if", "why does", ...)
    pub question_openers: Regex,
    /// Bold-claim openers ("nobody", "the secret", ...)
    pub claim_openers: Regex,
    /// Comparative phrasing ("faster than", "the most ...")
    pub comparatives: Regex,
    /// Any digit
    pub digits: Regex,
    /// Single-word fillers, normalized lowercase
    pub filler_words: HashSet<&'static str>,
    /// Two-word filler phrases, normalized lowercase
    pub filler_phrases: &'static [(&'static str, &'static str)],
    /// Function words excluded from content-density measures
    pub stop_words: HashSet<&'static str>,
    /// Phrases that signal a payoff or resolution
    pub payoff_phrases: &'static [&'static str],
    /// Phrases that close a thought at the end of a span
    pub closing_phrases: &'static [&'static str],
    /// Words that fail the safety feature
    pub profanity: HashSet<&'static str>,
}

impl LexiconTables {
    /// English tables, compiled once per process.
    pub fn english() -> &'static LexiconTables {
        static TABLES: OnceLock<LexiconTables> = OnceLock::new();
        TABLES.get_or_init(|| LexiconTables {
            question_openers: Regex::new(
                r"(?i)^(what|why|how|when|where|who|which|did you know|have you ever|do you|can you|is it|are you|what if|ever wonder)\b",
            )
            .expect("static regex"),
            claim_openers: Regex::new(
                r"(?i)\b(nobody|no one|everyone|everybody|never|always|the truth|the secret|the biggest|the best|the worst|the only|most people|you won't believe|here's the thing|the real reason)\b",
            )
            .expect("static regex"),
            comparatives: Regex::new(r"(?i)\b(\w+er than|more \w+ than|less \w+ than|the most \w+)\b")
                .expect("static regex"),
            digits: Regex::new(r"\d").expect("static regex"),
            filler_words: ["um", "uh", "uhm", "er", "hmm", "like"].into_iter().collect(),
            filler_phrases: &[
                ("you", "know"),
                ("sort", "of"),
                ("kind", "of"),
                ("i", "mean"),
            ],
            stop_words: [
                "a", "an", "the", "and", "or", "but", "if", "then", "so", "of", "to", "in", "on",
                "at", "by", "for", "with", "from", "up", "down", "out", "is", "am", "are", "was",
                "were", "be", "been", "being", "it", "its", "this", "that", "these", "those", "i",
                "you", "he", "she", "we", "they", "me", "him", "her", "us", "them", "my", "your",
                "his", "their", "our", "do", "does", "did", "have", "has", "had", "will", "would",
                "can", "could", "should", "just", "not", "no", "yes", "as", "there", "here",
                "what", "when", "who", "how", "why", "all", "some", "any",
            ]
            .into_iter()
            .collect(),
            payoff_phrases: &[
                "turns out",
                "it turns out",
                "that's why",
                "the answer",
                "which means",
                "the lesson",
                "the point is",
                "in the end",
                "bottom line",
                "because",
            ],
            closing_phrases: &[
                "that's it",
                "that's why",
                "and that's",
                "so that's",
                "in the end",
                "the takeaway",
                "that's the",
                "it's that simple",
            ],
            profanity: [
                "fuck", "fucking", "shit", "bitch", "asshole", "bastard", "cunt", "dick", "piss",
                "slut", "whore",
            ]
            .into_iter()
            .collect(),
        })
    }

    /// Tables for a locale code. Only English is populated today; unknown
    /// locales fall back to English rather than failing.
    pub fn for_locale(locale: &str) -> &'static LexiconTables {
        match locale {
            "en" | "en-US" | "en-GB" => Self::english(),
            _ => Self::english(),
        }
    }

    /// Whether a normalized word is a single-word filler.
    pub fn is_filler_word(&self, normalized: &str) -> bool {
        self.filler_words.contains(normalized)
    }

    /// Count filler occurrences across a normalized word sequence,
    /// including two-word phrases ("you know", "sort of").
    pub fn count_fillers(&self, normalized_words: &[String]) -> usize {
        let mut count = 0;
        let mut i = 0;
        while i < normalized_words.len() {
            if i + 1 < normalized_words.len() {
                let pair = (normalized_words[i].as_str(), normalized_words[i + 1].as_str());
                if self.filler_phrases.iter().any(|p| *p == pair) {
                    count += 1;
                    i += 2;
                    continue;
                }
            }
            if self.is_filler_word(&normalized_words[i]) {
                count += 1;
            }
            i += 1;
        }
        count
    }

    /// Count profanity hits across a normalized word sequence.
    pub fn count_profanity(&self, normalized_words: &[String]) -> usize {
        normalized_words
            .iter()
            .filter(|w| self.profanity.contains(w.as_str()))
            .count()
    }

    /// Whether a lowercase text contains any payoff phrase.
    pub fn has_payoff(&self, lowered: &str) -> bool {
        self.payoff_phrases.iter().any(|p| lowered.contains(p))
    }

    /// Whether a lowercase text contains any closing phrase.
    pub fn has_closing(&self, lowered: &str) -> bool {
        self.closing_phrases.iter().any(|p| lowered.contains(p))
    }
}
