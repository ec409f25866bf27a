use serde::{Deserialize, Serialize};

/// VRM 1.0 expression presets the retargeter drives.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpressionPreset {
    BlinkLeft,
    BlinkRight,
    /// Mouth open.
    Oh,
    Happy,
    Angry,
    Sad,
    Surprised,
    Relaxed,
    Neutral,
}

impl ExpressionPreset {
    /// Emotion channels, reset every frame before the dominant one is set.
    pub const EMOTIONS: [ExpressionPreset; 6] = [
        ExpressionPreset::Happy,
        ExpressionPreset::Angry,
        ExpressionPreset::Sad,
        ExpressionPreset::Surprised,
        ExpressionPreset::Relaxed,
        ExpressionPreset::Neutral,
    ];

    /// Maps a detector emotion label onto its channel. Unrecognized labels
    /// fall back to neutral.
    pub fn from_emotion_label(label: &str) -> Self {
        match label {
            "happy" => ExpressionPreset::Happy,
            "angry" => ExpressionPreset::Angry,
            "sad" => ExpressionPreset::Sad,
            "surprise" | "surprised" => ExpressionPreset::Surprised,
            _ => ExpressionPreset::Neutral,
        }
    }
}
