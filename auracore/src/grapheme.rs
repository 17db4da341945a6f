#[cfg(feature = "segmenter")]
use unicode_segmentation::UnicodeSegmentation;

const ZWJ: char = '\u{200D}';

/// Strategy used to cut the first user-perceived character off a string.
/// Picked once with [`Segmenter::detect`] and then passed around by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segmenter {
    /// Extended grapheme clusters as defined by UAX #29
    #[cfg(feature = "segmenter")]
    Unicode,
    /// Greedy scalar walk that only knows about emoji continuation scalars
    Fallback,
}

impl Segmenter {
    /// Best strategy available in this build
    pub fn detect() -> Self {
        #[cfg(feature = "segmenter")]
        {
            Segmenter::Unicode
        }
        #[cfg(not(feature = "segmenter"))]
        {
            Segmenter::Fallback
        }
    }

    /// Return the first grapheme of `text` after trimming surrounding whitespace.
    /// Blank input yields an empty string.
    pub fn first_grapheme<'a>(&self, text: &'a str) -> &'a str {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return "";
        }
        match self {
            #[cfg(feature = "segmenter")]
            Segmenter::Unicode => trimmed.graphemes(true).next().unwrap_or(""),
            Segmenter::Fallback => &trimmed[..fallback_grapheme_len(trimmed)],
        }
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::detect()
    }
}

fn is_variation_selector(c: char) -> bool {
    matches!(c, '\u{FE00}'..='\u{FE0F}' | '\u{E0100}'..='\u{E01EF}')
}

fn is_skin_tone_modifier(c: char) -> bool {
    matches!(c, '\u{1F3FB}'..='\u{1F3FF}')
}

// Combining enclosing marks (Me), U+20E3 is the keycap
fn is_enclosing_mark(c: char) -> bool {
    matches!(c, '\u{20DD}'..='\u{20E0}' | '\u{20E2}'..='\u{20E4}')
}

fn is_regional_indicator(c: char) -> bool {
    matches!(c, '\u{1F1E6}'..='\u{1F1FF}')
}

/// Byte length of the first grapheme of a non-empty string, scalar walk version
fn fallback_grapheme_len(text: &str) -> usize {
    let mut chars = text.char_indices().peekable();
    let Some((_, seed)) = chars.next() else {
        return 0;
    };
    let mut end = seed.len_utf8();
    // flags are always pairs, so only one extra regional indicator may follow
    let mut awaiting_flag_pair = is_regional_indicator(seed);

    while let Some(&(idx, c)) = chars.peek() {
        if c == ZWJ {
            chars.next();
            end = idx + c.len_utf8();
            if let Some((joined_idx, joined)) = chars.next() {
                end = joined_idx + joined.len_utf8();
            }
            awaiting_flag_pair = false;
        } else if is_variation_selector(c) || is_skin_tone_modifier(c) || is_enclosing_mark(c) {
            chars.next();
            end = idx + c.len_utf8();
            awaiting_flag_pair = false;
        } else if awaiting_flag_pair && is_regional_indicator(c) {
            chars.next();
            end = idx + c.len_utf8();
            awaiting_flag_pair = false;
        } else {
            break;
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategies() -> Vec<Segmenter> {
        vec![Segmenter::detect(), Segmenter::Fallback]
    }

    #[test]
    fn test_blank_input_yields_empty() {
        for segmenter in strategies() {
            assert_eq!(segmenter.first_grapheme(""), "");
            assert_eq!(segmenter.first_grapheme("   \t\n"), "");
        }
    }

    #[test]
    fn test_single_scalar_emoji() {
        for segmenter in strategies() {
            assert_eq!(segmenter.first_grapheme("🔥🔥"), "🔥");
            assert_eq!(segmenter.first_grapheme("  💩 poop"), "💩");
            assert_eq!(segmenter.first_grapheme("abc"), "a");
        }
    }

    #[test]
    fn test_variation_selector_is_kept() {
        for segmenter in strategies() {
            assert_eq!(segmenter.first_grapheme("❤️ love"), "❤️");
            assert_eq!(segmenter.first_grapheme("⭐\u{FE0F}\u{FE0F}!"), "⭐\u{FE0F}\u{FE0F}");
        }
    }

    #[test]
    fn test_skin_tone_modifier_is_kept() {
        for segmenter in strategies() {
            assert_eq!(segmenter.first_grapheme("👍🏽👍"), "👍🏽");
        }
    }

    #[test]
    fn test_zwj_family_is_kept_whole() {
        let family = "👨\u{200D}👩\u{200D}👧";
        for segmenter in strategies() {
            assert_eq!(segmenter.first_grapheme(&format!("{family}🔥")), family);
        }
    }

    #[test]
    fn test_zwj_with_skin_tone_and_selector() {
        // woman technologist, medium skin tone; man facepalming with selector
        let technologist = "👩🏽\u{200D}💻";
        let facepalm = "🤦\u{200D}♂\u{FE0F}";
        for segmenter in strategies() {
            assert_eq!(segmenter.first_grapheme(technologist), technologist);
            assert_eq!(segmenter.first_grapheme(&format!("{facepalm} ok")), facepalm);
        }
    }

    #[test]
    fn test_flag_takes_exactly_one_pair() {
        for segmenter in strategies() {
            assert_eq!(segmenter.first_grapheme("🇺🇸🇫🇷"), "🇺🇸");
            assert_eq!(segmenter.first_grapheme("🇺🇸 +5"), "🇺🇸");
        }
    }

    #[test]
    fn test_keycap_sequence() {
        let keycap = "#\u{FE0F}\u{20E3}";
        for segmenter in strategies() {
            assert_eq!(segmenter.first_grapheme(&format!("{keycap}x")), keycap);
        }
    }

    #[test]
    fn test_fallback_stops_at_plain_scalar() {
        assert_eq!(Segmenter::Fallback.first_grapheme("🔥-5"), "🔥");
        assert_eq!(Segmenter::Fallback.first_grapheme("🇺x"), "🇺");
    }

    #[test]
    fn test_default_is_detected_strategy() {
        assert_eq!(Segmenter::default(), Segmenter::detect());
        assert_eq!(Segmenter::default().first_grapheme(" 🎉 party"), "🎉");
    }
}
