//! Retargeting of webcam pose, face and hand tracking onto a VRM humanoid.
//!
//! [`apply_detection_to_rig`] is called once per rendered frame with the most
//! recent [`DetectionResult`](retarget_api::DetectionResult) and writes bone
//! rotations and expression weights through the [`HumanoidRig`] capability
//! interface.

pub use config::{ConfigError, RetargetConfig, TieBreak, WristDistance};
pub use expression::ExpressionPreset;
pub use humanoid::{Axis, Finger, HumanoidBone, REQUIRED_BONES, Side};
pub use intro::{intro_pose, INTRO_DURATION};
pub use mapper::{angle, apply_detection_to_rig, gaze_target, BodyFrame};
pub use rig::{HumanoidRig, PoseBuffer};

mod config;
mod expression;
mod humanoid;
mod intro;
mod mapper;
mod rig;
