//! Auracore - parsing of short aura update messages like "🔥 +10" or "-5 💩"

mod grapheme;
mod normalize;
mod parser;
mod presets;

// Grapheme extraction with a segmentation strategy chosen once
pub mod text {
    pub use crate::grapheme::Segmenter;
    pub use crate::normalize::normalize_emoji;
}

// Preset table with default points per emoji
pub mod preset {
    pub use crate::presets::{
        BUILTIN_PRESETS, EmojiPreset, PRESET_POINTS_RANGE, PresetError, PresetFile, PresetTable,
    };
}

pub use parser::{MessageParser, ParsedMessage, format_points};
