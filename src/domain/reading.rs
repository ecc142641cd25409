//! Reading-time estimate derived from a document body.

use serde::Serialize;

/// Average adult reading speed used when nothing is configured
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Estimated time to read a body of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadTime {
    /// Whitespace-separated word count
    pub words: usize,

    /// Whole minutes, rounded up, never below 1
    pub minutes: u32,
}

impl ReadTime {
    /// Estimate reading time for `body` at `words_per_minute`
    pub fn estimate(body: &str, words_per_minute: u32) -> Self {
        let words = body.split_whitespace().count();
        let rate = words_per_minute.max(1) as usize;
        let minutes = words.div_ceil(rate).max(1);

        Self {
            words,
            minutes: u32::try_from(minutes).unwrap_or(u32::MAX),
        }
    }
}

impl std::fmt::Display for ReadTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} min read", self.minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_body_rounds_up_to_one_minute() {
        let rt = ReadTime::estimate("just a few words", DEFAULT_WORDS_PER_MINUTE);
        assert_eq!(rt.words, 4);
        assert_eq!(rt.minutes, 1);
        assert_eq!(rt.to_string(), "1 min read");
    }

    #[test]
    fn test_empty_body_still_one_minute() {
        let rt = ReadTime::estimate("", DEFAULT_WORDS_PER_MINUTE);
        assert_eq!(rt.words, 0);
        assert_eq!(rt.minutes, 1);
    }

    #[test]
    fn test_minutes_round_up() {
        let body = "word ".repeat(201);
        assert_eq!(ReadTime::estimate(&body, 200).minutes, 2);

        let body = "word ".repeat(400);
        assert_eq!(ReadTime::estimate(&body, 200).minutes, 2);
    }

    #[test]
    fn test_longer_body_never_reads_faster() {
        let mut previous = 0;
        for n in [0, 10, 199, 200, 201, 999, 1000, 5000] {
            let minutes = ReadTime::estimate(&"w ".repeat(n), 200).minutes;
            assert!(minutes >= previous, "{} words gave {} < {}", n, minutes, previous);
            previous = minutes;
        }
    }

    #[test]
    fn test_zero_rate_does_not_divide_by_zero() {
        let rt = ReadTime::estimate("one two three", 0);
        assert_eq!(rt.minutes, 3);
    }
}
