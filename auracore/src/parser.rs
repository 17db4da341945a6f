use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{grapheme::Segmenter, presets::PresetTable};

/// Structured aura update extracted from a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    pub emoji: String,
    pub points: i64,
    pub note: Option<String>,
}

/// Why a message did not produce an update. Only logged, callers see `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
enum ParseFailure {
    #[error("no rule matched")]
    NoMatch,
    #[error("emoji `{0}` has no preset and no explicit points")]
    UnknownPreset(String),
    #[error("number `{0}` does not fit into points")]
    MalformedNumber(String),
}

struct RuleMatch<'a> {
    // bytes of the trimmed message covered by the rule, the rest is the note
    consumed: usize,
    emoji: &'a str,
    points: i64,
}

enum RuleOutcome<'a> {
    Matched(RuleMatch<'a>),
    // rule does not apply, try the next one
    Skipped,
    // rule applies but the message must not be accepted by any rule
    Rejected(ParseFailure),
}

type Rule = for<'p, 't, 'a> fn(&'p MessageParser<'t>, &'a str) -> RuleOutcome<'a>;

/// Grammar rules in priority order, first match wins
const RULES: &[(&str, Rule)] = &[
    ("number-then-emoji", number_then_emoji as Rule),
    ("emoji-then-number", emoji_then_number as Rule),
    ("emoji-only", emoji_only as Rule),
];

/// Parser for messages like "🔥 +10", "-5 💩", "🎉" or "🔥 +10 Great job dad!"
#[derive(Debug, Clone, Copy)]
pub struct MessageParser<'t> {
    presets: &'t PresetTable,
    segmenter: Segmenter,
}

impl<'t> MessageParser<'t> {
    pub fn new(presets: &'t PresetTable) -> Self {
        Self::with_strategy(presets, Segmenter::detect())
    }

    /// Parser with a segmentation strategy picked once by the caller
    pub fn with_strategy(presets: &'t PresetTable, segmenter: Segmenter) -> Self {
        Self { presets, segmenter }
    }

    /// Parse a message into an aura update.
    /// Returns `None` when the message is not an aura update, the caller
    /// should answer with a hint instead of dropping the message.
    pub fn parse(&self, message: &str) -> Option<ParsedMessage> {
        match self.try_parse(message) {
            Ok(parsed) => Some(parsed),
            Err(failure) => {
                log::debug!("Could not parse {:?}: {}", message, failure);
                None
            }
        }
    }

    fn try_parse(&self, message: &str) -> Result<ParsedMessage, ParseFailure> {
        let text = message.trim();
        if text.is_empty() {
            return Err(ParseFailure::NoMatch);
        }

        for (name, rule) in RULES {
            match rule(self, text) {
                RuleOutcome::Matched(found) => {
                    log::debug!("Message {:?} matched rule {}", text, name);
                    let note = text[found.consumed..].trim();
                    return Ok(ParsedMessage {
                        emoji: found.emoji.to_string(),
                        points: found.points,
                        note: (!note.is_empty()).then(|| note.to_string()),
                    });
                }
                RuleOutcome::Skipped => continue,
                RuleOutcome::Rejected(failure) => return Err(failure),
            }
        }
        Err(ParseFailure::NoMatch)
    }
}

/// Format points with an explicit sign for positive values: "+10", "0", "-5"
pub fn format_points(points: i64) -> String {
    if points > 0 {
        format!("+{}", points)
    } else {
        points.to_string()
    }
}

fn is_sign(c: char) -> bool {
    c == '+' || c == '-'
}

fn is_run_char(c: char) -> bool {
    !c.is_ascii_digit() && !c.is_whitespace()
}

/// End of the whitespace starting at `start`
fn skip_whitespace(text: &str, start: usize) -> usize {
    text[start..]
        .find(|c: char| !c.is_whitespace())
        .map_or(text.len(), |pos| start + pos)
}

/// End of the non-digit, non-whitespace run starting at `start`
fn scan_run(text: &str, start: usize) -> usize {
    text[start..]
        .find(|c: char| !is_run_char(c))
        .map_or(text.len(), |pos| start + pos)
}

/// End of `[+-]?digits` starting at `start`, if there is one
fn scan_number(text: &str, start: usize) -> Option<usize> {
    let rest = &text[start..];
    let sign_len = usize::from(rest.starts_with(is_sign));
    let digits = rest[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len() - sign_len);
    (digits > 0).then_some(start + sign_len + digits)
}

fn parse_points(token: &str) -> Result<i64, ParseFailure> {
    token
        .parse::<i64>()
        .map_err(|_| ParseFailure::MalformedNumber(token.to_string()))
}

/// "+10 🔥 note", "-5💩"
fn number_then_emoji<'a>(parser: &MessageParser<'_>, text: &'a str) -> RuleOutcome<'a> {
    let Some(number_end) = scan_number(text, 0) else {
        return RuleOutcome::Skipped;
    };
    let run_start = skip_whitespace(text, number_end);
    let run_end = scan_run(text, run_start);
    if run_end == run_start {
        return RuleOutcome::Skipped;
    }
    match parse_points(&text[..number_end]) {
        Ok(points) => RuleOutcome::Matched(RuleMatch {
            consumed: run_end,
            emoji: parser.segmenter.first_grapheme(&text[run_start..run_end]),
            points,
        }),
        Err(failure) => RuleOutcome::Rejected(failure),
    }
}

/// "🔥 +10 note", "💩 -5".
/// The run is greedy, a sign glued to it stays in the run: "💩-5" is +5.
fn emoji_then_number<'a>(parser: &MessageParser<'_>, text: &'a str) -> RuleOutcome<'a> {
    let run_end = scan_run(text, 0);
    if run_end == 0 {
        return RuleOutcome::Skipped;
    }
    let number_start = skip_whitespace(text, run_end);
    let Some(number_end) = scan_number(text, number_start) else {
        return RuleOutcome::Skipped;
    };
    match parse_points(&text[number_start..number_end]) {
        Ok(points) => RuleOutcome::Matched(RuleMatch {
            consumed: number_end,
            emoji: parser.segmenter.first_grapheme(&text[..run_end]),
            points,
        }),
        Err(failure) => RuleOutcome::Rejected(failure),
    }
}

/// "🎉" or "🎉 note", points come from the preset table
fn emoji_only<'a>(parser: &MessageParser<'_>, text: &'a str) -> RuleOutcome<'a> {
    let run_end = scan_run(text, 0);
    if run_end == 0 {
        return RuleOutcome::Skipped;
    }
    let emoji = parser.segmenter.first_grapheme(&text[..run_end]);
    match parser.presets.points(emoji) {
        Some(points) => RuleOutcome::Matched(RuleMatch {
            consumed: run_end,
            emoji,
            points,
        }),
        None => RuleOutcome::Rejected(ParseFailure::UnknownPreset(emoji.to_string())),
    }
}
