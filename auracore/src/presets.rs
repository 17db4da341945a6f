use std::{
    collections::{HashMap, HashSet},
    ops::RangeInclusive,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{grapheme::Segmenter, normalize::normalize_emoji};

/// Allowed default points for a preset
pub const PRESET_POINTS_RANGE: RangeInclusive<i64> = -15..=25;

/// Built-in presets as (emoji, points, label), ordered from best to worst
pub const BUILTIN_PRESETS: &[(&str, i64, &str)] = &[
    // legendary
    ("💯", 25, "Perfect!"),
    ("⚡", 25, "Legendary move"),
    ("🏆", 20, "Trophy dad"),
    ("👑", 20, "King dad"),
    ("🥇", 20, "Gold medal"),
    ("🎯", 20, "Bullseye"),
    // awesome
    ("🎉", 15, "Epic celebration"),
    ("🙌", 15, "Praise!"),
    ("🤩", 12, "Star-struck"),
    ("🌈", 12, "Rainbow vibes"),
    ("🎂", 12, "Special day"),
    ("🔥", 10, "Fire!"),
    ("⭐", 10, "Star"),
    ("🥳", 10, "Party!"),
    // good
    ("🎁", 8, "Gift"),
    ("🌟", 8, "Shining"),
    ("😍", 8, "Heart eyes"),
    ("🥰", 8, "Love"),
    ("💖", 7, "Sparkling heart"),
    ("💪", 7, "Strong"),
    ("🤗", 6, "Hugs"),
    ("😄", 6, "Grinning"),
    ("👏", 6, "Clapping"),
    ("💕", 6, "Hearts"),
    ("❤️", 5, "Love you"),
    ("😊", 5, "Smiling"),
    ("🙏", 5, "Thank you"),
    ("🎮", 5, "Gaming"),
    ("🎵", 4, "Music"),
    ("🍦", 4, "Ice cream"),
    ("☕", 4, "Coffee time"),
    // okay
    ("👍", 3, "Good job"),
    ("🍕", 3, "Pizza!"),
    ("😎", 3, "Cool"),
    ("🤝", 3, "Deal"),
    ("😀", 2, "Basic smile"),
    ("🙂", 1, "Slight smile"),
    // neutral
    ("🤷", 0, "Meh"),
    ("😐", 0, "Neutral"),
    ("🤔", 0, "Thinking"),
    // mild negative
    ("🥺", -2, "Puppy eyes"),
    ("👎", -3, "Not cool"),
    ("😒", -4, "Unamused"),
    ("🙄", -4, "Eye roll"),
    ("😔", -4, "Sad"),
    ("😞", -5, "Disappointed"),
    ("💩", -5, "Poop"),
    ("😢", -5, "Crying"),
    // negative
    ("😫", -6, "Tired of this"),
    ("😩", -6, "Weary"),
    ("😭", -7, "Sobbing"),
    ("😤", -8, "Frustrated"),
    ("💢", -8, "Angry"),
    ("😡", -10, "Mad"),
    // severe
    ("💔", -12, "Heartbroken"),
    ("🤬", -15, "Furious"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiPreset {
    pub emoji: String,
    pub points: i64,
    pub label: String,
}

#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Failed to read preset file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse preset YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Preset table is empty")]
    Empty,
    #[error("Emoji `{0}` is listed more than once")]
    Duplicate(String),
    #[error("Preset key `{0}` is not a single emoji")]
    NotSingleGrapheme(String),
    #[error("Preset `{emoji}` has {points} points, allowed range is -15..=25")]
    OutOfRange { emoji: String, points: i64 },
}

/// Serializable shape of a preset file
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PresetFile {
    pub presets: Vec<EmojiPreset>,
}

/// Immutable emoji -> default points table.
/// Every key is indexed twice: as written and in normalized form, so lookups
/// survive gateways adding or dropping variation selectors.
#[derive(Debug, Clone)]
pub struct PresetTable {
    presets: Vec<EmojiPreset>,
    exact: HashMap<String, usize>,
    normalized: HashMap<String, usize>,
}

impl PresetTable {
    /// Table with the built-in presets
    pub fn builtin() -> Self {
        Self::index(
            BUILTIN_PRESETS
                .iter()
                .map(|(emoji, points, label)| EmojiPreset {
                    emoji: emoji.to_string(),
                    points: *points,
                    label: label.to_string(),
                })
                .collect(),
        )
    }

    /// Validate and index a list of presets
    pub fn from_presets(presets: Vec<EmojiPreset>) -> Result<Self, PresetError> {
        if presets.is_empty() {
            return Err(PresetError::Empty);
        }
        let segmenter = Segmenter::detect();
        for preset in &presets {
            if preset.emoji.is_empty() || segmenter.first_grapheme(&preset.emoji) != preset.emoji {
                return Err(PresetError::NotSingleGrapheme(preset.emoji.clone()));
            }
            if !PRESET_POINTS_RANGE.contains(&preset.points) {
                return Err(PresetError::OutOfRange {
                    emoji: preset.emoji.clone(),
                    points: preset.points,
                });
            }
        }
        let table = Self::index(presets);
        // two keys collapsing to the same normalized form are duplicates too
        if table.normalized.len() != table.presets.len() {
            let mut seen = HashSet::new();
            for preset in &table.presets {
                if !seen.insert(normalize_emoji(&preset.emoji)) {
                    return Err(PresetError::Duplicate(preset.emoji.clone()));
                }
            }
        }
        Ok(table)
    }

    /// Parse a preset table from YAML in the form `presets: [{emoji, points, label}]`
    pub fn from_yaml(content: &str) -> Result<Self, PresetError> {
        let file: PresetFile = serde_yaml::from_str(content)?;
        Self::from_presets(file.presets)
    }

    /// Load a preset table from a YAML file
    pub fn load(path: &Path) -> Result<Self, PresetError> {
        let content = std::fs::read_to_string(path).map_err(|source| PresetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    fn index(presets: Vec<EmojiPreset>) -> Self {
        let mut exact = HashMap::new();
        let mut normalized = HashMap::new();
        for (pos, preset) in presets.iter().enumerate() {
            exact.entry(preset.emoji.clone()).or_insert(pos);
            normalized.entry(normalize_emoji(&preset.emoji)).or_insert(pos);
        }
        Self {
            presets,
            exact,
            normalized,
        }
    }

    /// Find the preset for an emoji, exact match first, then by normalized form
    pub fn get(&self, emoji: &str) -> Option<&EmojiPreset> {
        let pos = match self.exact.get(emoji) {
            Some(pos) => *pos,
            None => *self.normalized.get(&normalize_emoji(emoji))?,
        };
        self.presets.get(pos)
    }

    /// Default points for an emoji
    pub fn points(&self, emoji: &str) -> Option<i64> {
        self.get(emoji).map(|preset| preset.points)
    }

    pub fn is_preset(&self, emoji: &str) -> bool {
        self.get(emoji).is_some()
    }

    /// Presets in table order
    pub fn iter(&self) -> impl Iterator<Item = &EmojiPreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(emoji: &str, points: i64) -> EmojiPreset {
        EmojiPreset {
            emoji: emoji.to_string(),
            points,
            label: "test".to_string(),
        }
    }

    #[test]
    fn test_builtin_table_is_valid() {
        let builtin = PresetTable::builtin();
        assert_eq!(builtin.len(), BUILTIN_PRESETS.len());
        let validated = PresetTable::from_presets(builtin.iter().cloned().collect())
            .expect("built-in presets must validate");
        assert_eq!(validated.len(), 56);
    }

    #[test]
    fn test_exact_lookup() {
        let table = PresetTable::builtin();
        assert_eq!(table.points("🔥"), Some(10));
        assert_eq!(table.points("💯"), Some(25));
        assert_eq!(table.points("🤬"), Some(-15));
        assert_eq!(table.points("🤷"), Some(0));
        assert_eq!(table.points("🧩"), None);
    }

    #[test]
    fn test_lookup_tolerates_variation_selectors() {
        let table = PresetTable::builtin();
        // stored with a selector, looked up without
        assert_eq!(table.points("❤"), Some(5));
        // stored without a selector, looked up with one
        assert_eq!(table.points("⭐\u{FE0F}"), Some(10));
        assert_eq!(table.points("☕\u{FE0E}"), Some(4));
        assert_eq!(table.get("❤").map(|p| p.label.as_str()), Some("Love you"));
    }

    #[test]
    fn test_is_preset() {
        let table = PresetTable::builtin();
        assert!(table.is_preset("🔥"));
        assert!(table.is_preset("❤"));
        assert!(table.is_preset("🤷"));
        assert!(!table.is_preset("🧩"));
        assert!(!table.is_preset(""));
    }

    #[test]
    fn test_iter_keeps_table_order() {
        let table = PresetTable::builtin();
        let first: Vec<&str> = table.iter().take(3).map(|p| p.emoji.as_str()).collect();
        assert_eq!(first, vec!["💯", "⚡", "🏆"]);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "presets:\n  - emoji: \"🧩\"\n    points: 7\n    label: Puzzle\n  - emoji: \"❤️\"\n    points: -1\n    label: Meh love\n";
        let table = PresetTable::from_yaml(yaml).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.points("🧩"), Some(7));
        assert_eq!(table.points("❤"), Some(-1));
        assert_eq!(table.points("🔥"), None);
    }

    #[test]
    fn test_from_yaml_rejects_garbage() {
        assert!(matches!(
            PresetTable::from_yaml("presets: 5"),
            Err(PresetError::Yaml(_))
        ));
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(matches!(
            PresetTable::from_presets(Vec::new()),
            Err(PresetError::Empty)
        ));
    }

    #[test]
    fn test_rejects_multi_grapheme_keys() {
        for key in ["🔥🔥", "", " 🔥", "ab"] {
            assert!(matches!(
                PresetTable::from_presets(vec![preset(key, 1)]),
                Err(PresetError::NotSingleGrapheme(_))
            ));
        }
    }

    #[test]
    fn test_rejects_out_of_range_points() {
        assert!(matches!(
            PresetTable::from_presets(vec![preset("🔥", 26)]),
            Err(PresetError::OutOfRange { points: 26, .. })
        ));
        assert!(matches!(
            PresetTable::from_presets(vec![preset("💩", -16)]),
            Err(PresetError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicates_after_normalization() {
        let result = PresetTable::from_presets(vec![preset("❤️", 5), preset("❤", 3)]);
        assert!(matches!(result, Err(PresetError::Duplicate(emoji)) if emoji == "❤"));

        let result = PresetTable::from_presets(vec![preset("🔥", 5), preset("🔥", 5)]);
        assert!(matches!(result, Err(PresetError::Duplicate(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("auracore-no-such-presets.yaml");
        assert!(matches!(
            PresetTable::load(&path),
            Err(PresetError::Io { .. })
        ));
    }
}
