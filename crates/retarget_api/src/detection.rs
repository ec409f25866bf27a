//! Detection snapshots as produced by a browser-side pose/face/hand detector.
//!
//! Field names follow the detector's camelCase JSON so results can be posted
//! verbatim. Every collection defaults to empty, so partial results decode.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One frame worth of tracking results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectionResult {
    pub body: Vec<Body>,
    pub face: Vec<Face>,
    pub hand: Vec<Hand>,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.face.is_empty() && self.hand.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyPart {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keypoint {
    pub part: BodyPart,
    /// Position in input pixels.
    #[serde(default)]
    pub position: Vec<f32>,
    /// Position normalized to the input frame, `[0, 1]` on each axis.
    #[serde(default)]
    pub position_raw: Vec<f32>,
    #[serde(default)]
    pub score: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Body {
    pub score: f32,
    pub keypoints: Vec<Keypoint>,
}

impl Body {
    /// Normalized position of the first keypoint labelled `part`.
    pub fn part(&self, part: BodyPart) -> Option<&[f32]> {
        self.keypoints.iter()
            .find(|k| k.part == part)
            .map(|k| k.position_raw.as_slice())
    }
}

/// Head orientation in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceAngle {
    pub roll: f32,
    pub yaw: f32,
    pub pitch: f32,
}

/// Eye gaze direction: `bearing` in radians, `strength` roughly in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gaze {
    pub bearing: f32,
    pub strength: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceRotation {
    pub angle: Option<FaceAngle>,
    pub gaze: Option<Gaze>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub emotion: String,
    pub score: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Face {
    pub rotation: Option<FaceRotation>,
    /// Face mesh landmarks, indexed by the 468-point face-mesh topology.
    pub mesh: Vec<Vec3>,
    pub emotion: Vec<EmotionScore>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FingerCurl {
    Half,
    Full,
    #[default]
    #[serde(other)]
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerPose {
    pub curl: FingerCurl,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandLandmarks {
    pub thumb: FingerPose,
    pub index: FingerPose,
    pub middle: FingerPose,
    pub ring: FingerPose,
    pub pinky: FingerPose,
}

/// Hand landmarks grouped by anatomical region, root first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandAnnotations {
    pub palm: Vec<Vec3>,
    pub thumb: Vec<Vec3>,
    pub index: Vec<Vec3>,
    pub middle: Vec<Vec3>,
    pub ring: Vec<Vec3>,
    pub pinky: Vec<Vec3>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hand {
    pub score: f32,
    /// `[x, y, width, height]` in input pixels.
    #[serde(rename = "box")]
    pub bounds: [f32; 4],
    /// `[x, y, width, height]` normalized to the input frame.
    #[serde(rename = "boxRaw")]
    pub bounds_raw: [f32; 4],
    pub landmarks: HandLandmarks,
    pub annotations: HandAnnotations,
}
