use unicode_normalization::UnicodeNormalization;

const TEXT_PRESENTATION_SELECTOR: char = '\u{FE0E}';
const EMOJI_PRESENTATION_SELECTOR: char = '\u{FE0F}';

/// Canonical form of an emoji used for preset lookups.
/// Applies NFC composition and drops text/emoji presentation selectors, so that
/// "❤" and "❤️" sent by different gateways end up as the same key.
pub fn normalize_emoji(emoji: &str) -> String {
    emoji
        .nfc()
        .filter(|c| *c != TEXT_PRESENTATION_SELECTOR && *c != EMOJI_PRESENTATION_SELECTOR)
        .collect()
}
