use once_cell::sync::Lazy;
use regex::Regex;

/// Characters per expected exclamation mark.
const EXCLAMATION_UNIT: f64 = 80.0;
const QUESTION_UNIT: f64 = 120.0;
const ELLIPSIS_UNIT: f64 = 150.0;
/// Trimmed messages shorter than this are flagged as short.
pub const SHORT_MESSAGE_CHARS: usize = 60;

static ELLIPSIS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());

static GREETING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(hi|hello|hey|hiya|dear|greetings|good\s+(morning|afternoon|evening)|to whom it may concern)\b",
    )
    .unwrap()
});

// A closing word, optional punctuation, then at most one short line (a name).
static SIGN_OFF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(regards|sincerely|best|cheers|thanks|thank you|respectfully|yours truly|take care|talk soon|all the best|warmly)[\s,.!-]*(\n[^\n]{1,40})?\s*$",
    )
    .unwrap()
});

static FORWARDED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(-{2,}\s*forwarded message\s*-{2,}|begin forwarded message:|fwd?:)")
        .unwrap()
});

/// Punctuation and formatting ratios derived once per message.
/// Every field except `avg_sentence_len` lies in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Signals {
    pub exclamation_density: f64,
    pub question_density: f64,
    pub ellipsis_density: f64,
    pub caps_ratio: f64,
    pub avg_sentence_len: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StructureFlags {
    pub has_greeting: bool,
    pub has_sign_off: bool,
    pub has_forwarded: bool,
    pub is_short: bool,
}

fn density(count: usize, len: f64, unit: f64) -> f64 {
    (count as f64 / (len / unit)).min(1.0)
}

pub fn extract_signals(text: &str, sentence_count: usize) -> Signals {
    let char_len = text.chars().count();
    let len = char_len.max(1) as f64;

    let exclamations = text.matches('!').count();
    let questions = text.matches('?').count();
    let ellipses = ELLIPSIS_RE.find_iter(text).count();

    Signals {
        exclamation_density: density(exclamations, len, EXCLAMATION_UNIT),
        question_density: density(questions, len, QUESTION_UNIT),
        ellipsis_density: density(ellipses, len, ELLIPSIS_UNIT),
        caps_ratio: caps_ratio(text),
        avg_sentence_len: char_len as f64 / sentence_count.max(1) as f64,
    }
}

/// Share of words longer than two characters written entirely in capitals.
fn caps_ratio(text: &str) -> f64 {
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .collect();
    if words.is_empty() {
        return 0.0;
    }
    let shouted = words
        .iter()
        .filter(|w| w.chars().any(char::is_uppercase) && !w.chars().any(char::is_lowercase))
        .count();
    (shouted as f64 / words.len() as f64).clamp(0.0, 1.0)
}

pub fn detect_structure(text: &str) -> StructureFlags {
    let trimmed = text.trim();
    StructureFlags {
        has_greeting: GREETING_RE.is_match(trimmed),
        has_sign_off: SIGN_OFF_RE.is_match(trimmed),
        has_forwarded: FORWARDED_RE.is_match(trimmed),
        is_short: trimmed.chars().count() < SHORT_MESSAGE_CHARS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn densities_are_relative_to_length_and_capped() {
        let signals = extract_signals("Stop!", 1);
        assert_eq!(signals.exclamation_density, 1.0);

        let long = format!("{}!", "a".repeat(159));
        let signals = extract_signals(&long, 1);
        assert!((signals.exclamation_density - 0.5).abs() < 1e-9);
        assert_eq!(signals.question_density, 0.0);
    }

    #[test]
    fn ellipsis_runs_count_once() {
        let text = format!("{}... and then.....", "x".repeat(283));
        let signals = extract_signals(&text, 1);
        // Two runs over 300 chars: 2 / (300 / 150).
        assert!((signals.ellipsis_density - 1.0).abs() < 1e-9);
        let signals = extract_signals(&format!("{}...", "x".repeat(297)), 1);
        assert!((signals.ellipsis_density - 0.5).abs() < 1e-9);
    }

    #[test]
    fn caps_ratio_ignores_short_words_and_symbols() {
        let signals = extract_signals("This is URGENT and I need it NOW ok", 1);
        // Words over two chars: This URGENT and need NOW -> 2 of 5.
        assert!((signals.caps_ratio - 0.4).abs() < 1e-9);
        assert_eq!(extract_signals("--- 123 ---", 1).caps_ratio, 0.0);
    }

    #[test]
    fn average_sentence_length_guards_zero_count() {
        assert_eq!(extract_signals("abcdef", 0).avg_sentence_len, 6.0);
        assert_eq!(extract_signals("abcdef", 2).avg_sentence_len, 3.0);
    }

    #[test]
    fn detects_greeting_and_sign_off() {
        let flags = detect_structure("Dear John, the report is attached.\n\nBest regards,\nMary");
        assert!(flags.has_greeting);
        assert!(flags.has_sign_off);
        assert!(!flags.has_forwarded);
        assert!(flags.is_short);

        let flags = detect_structure("Good morning team, please see below. Thanks!");
        assert!(flags.has_greeting);
        assert!(flags.has_sign_off);
    }

    #[test]
    fn greeting_must_open_the_message() {
        let flags = detect_structure("I said hello to them yesterday and it went fine overall.");
        assert!(!flags.has_greeting);
        assert!(!flags.has_sign_off);
        assert!(flags.is_short);
        assert!(!detect_structure("Hiring update for the quarter").has_greeting);
    }

    #[test]
    fn detects_forwarded_marker_on_any_line() {
        let text = "See below.\n---------- Forwarded message ---------\nFrom: ops";
        assert!(detect_structure(text).has_forwarded);
        assert!(detect_structure("Fwd: quarterly numbers").has_forwarded);
    }

    #[test]
    fn long_messages_are_not_short() {
        let text = "This message is comfortably longer than sixty characters in total.";
        assert!(!detect_structure(text).is_short);
    }
}
