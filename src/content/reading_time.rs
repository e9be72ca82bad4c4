use std::fmt;
use std::fmt::{Display, Formatter};

use serde::Serialize;

pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingTime {
    /// Human readable estimate, e.g. `3 min read`
    pub text: String,
    pub minutes: f64,
    pub time_ms: u64,
    pub words: usize,
}

impl Display for ReadingTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl ReadingTime {
    pub fn estimate(text: &str, words_per_minute: u32) -> Self {
        let words_per_minute = if words_per_minute == 0 { DEFAULT_WORDS_PER_MINUTE } else { words_per_minute };
        let words = count_words(text);
        let minutes = words as f64 / words_per_minute as f64;
        let time_ms = (minutes * 60.0 * 1000.0).round() as u64;
        // Rounded to two decimals before ceiling, so 2.001 minutes reads as 2
        let displayed = ((minutes * 100.0).round() / 100.0).ceil() as u64;

        ReadingTime {
            text: format!("{} min read", displayed),
            minutes,
            time_ms,
            words,
        }
    }
}

fn is_word_bound(c: char) -> bool {
    c == ' ' || c == '\n' || c == '\r' || c == '\t'
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x3040..=0x30FF     // hiragana, katakana
        | 0x3400..=0x4DBF   // CJK extension A
        | 0x4E00..=0x9FFF   // CJK unified ideographs
        | 0xAC00..=0xD7AF   // hangul syllables
        | 0xF900..=0xFAFF)  // CJK compatibility ideographs
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || matches!(c, '\u{2010}'..='\u{2027}' | '\u{3000}'..='\u{303F}' | '\u{FF01}'..='\u{FF0F}')
}

/// Counts a word at every character that ends a run: CJK characters count
/// one each, anything else counts when followed by a word bound or
/// punctuation.
fn count_words(text: &str) -> usize {
    let chars: Vec<char> = text.trim_matches(is_word_bound).chars().collect();
    let mut words = 0;

    for (i, &c) in chars.iter().enumerate() {
        let next = chars.get(i + 1).copied().unwrap_or('\n');
        if is_cjk(c) {
            words += 1;
        } else if !is_word_bound(c) && (is_word_bound(next) || is_punctuation(next) || is_cjk(next)) {
            words += 1;
        }
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t "), 0);
        assert_eq!(count_words("one"), 1);
        assert_eq!(count_words("  one two\nthree\r\n four  "), 4);
        assert_eq!(count_words("漢字"), 2);
    }

    #[test]
    fn test_short_text() {
        let rt = ReadingTime::estimate("A handful of words here.", 200);
        assert_eq!(rt.text, "1 min read");
        assert_eq!(rt.to_string(), "1 min read");
    }

    #[test]
    fn test_empty_text() {
        let rt = ReadingTime::estimate("", 200);
        assert_eq!(rt.words, 0);
        assert_eq!(rt.time_ms, 0);
        assert_eq!(rt.text, "0 min read");
    }

    #[test]
    fn test_long_text() {
        let text = "word ".repeat(450);
        let rt = ReadingTime::estimate(&text, 200);
        assert_eq!(rt.words, 450);
        assert_eq!(rt.minutes, 2.25);
        assert_eq!(rt.time_ms, 135_000);
        assert_eq!(rt.text, "3 min read");
    }

    #[test]
    fn test_exact_minutes() {
        let text = "word ".repeat(400);
        let rt = ReadingTime::estimate(&text, 200);
        assert_eq!(rt.text, "2 min read");
    }

    #[test]
    fn test_zero_words_per_minute_falls_back() {
        let text = "word ".repeat(200);
        let rt = ReadingTime::estimate(&text, 0);
        assert_eq!(rt.text, "1 min read");
    }
}
