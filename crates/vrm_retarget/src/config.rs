use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("max_wrist_distance must be a finite, non-negative number (got {0})")]
    InvalidWristDistance(f32),
}

/// How a detected hand is matched to a tracked wrist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WristDistance {
    /// `|dx| + dy²`, what existing avatar demos were tuned against.
    #[default]
    Legacy,
    /// `dx² + dy²`.
    Squared,
}

impl WristDistance {
    pub fn measure(self, dx: f32, dy: f32) -> f32 {
        match self {
            WristDistance::Legacy => dx.abs() + dy * dy,
            WristDistance::Squared => dx * dx + dy * dy,
        }
    }
}

/// Which emotion wins when several share the top score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TieBreak {
    #[default]
    First,
    Last,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetargetConfig {
    pub body: bool,
    pub face: bool,
    pub hands: bool,
    pub wrist_distance: WristDistance,
    /// Hands farther than this from both wrists are ignored.
    pub max_wrist_distance: f32,
    pub emotion_tie_break: TieBreak,
    /// Face meshes with this many landmarks or fewer skip blink and mouth.
    pub sparse_mesh_threshold: usize,
}

impl Default for RetargetConfig {
    fn default() -> Self {
        Self {
            body: true,
            face: true,
            hands: true,
            wrist_distance: WristDistance::Legacy,
            max_wrist_distance: 1.0,
            emotion_tie_break: TieBreak::First,
            sparse_mesh_threshold: 300,
        }
    }
}

impl RetargetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_wrist_distance.is_finite() || self.max_wrist_distance < 0. {
            return Err(ConfigError::InvalidWristDistance(self.max_wrist_distance));
        }
        Ok(())
    }
}
