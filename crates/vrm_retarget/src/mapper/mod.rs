//! Per-frame retargeting of detection results onto a humanoid rig.
//!
//! Body runs first and yields a [`BodyFrame`] that the face (shoulder lean)
//! and hand (wrist positions) steps consume. Nothing is carried between
//! frames.

use glam::Vec2;
use retarget_api::DetectionResult;

use crate::config::RetargetConfig;
use crate::humanoid::{Axis, HumanoidBone};
use crate::rig::HumanoidRig;

mod body;
mod face;
mod hand;

pub use face::gaze_target;

/// Values the body step hands to the face and hand steps of the same frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyFrame {
    /// Shoulder-line tilt in radians.
    pub lean: f32,
    /// Normalized wrist positions.
    pub left_wrist: Option<Vec2>,
    pub right_wrist: Option<Vec2>,
}

/// Angle of the line from `p1` to `p2` in radians, in `(-π, π]`.
///
/// Returns `0` if either point is missing or has fewer than two coordinates.
pub fn angle<P: AsRef<[f32]>>(p1: Option<P>, p2: Option<P>) -> f32 {
    let (Some(p1), Some(p2)) = (p1, p2) else {
        return 0.;
    };
    match (p1.as_ref(), p2.as_ref()) {
        ([x1, y1, ..], [x2, y2, ..]) => (y2 - y1).atan2(x2 - x1),
        _ => 0.,
    }
}

/// Poses `rig` from one frame of detections.
///
/// A rig without humanoid bones, or a missing result, is left untouched.
pub fn apply_detection_to_rig<R: HumanoidRig + ?Sized>(
    rig: &mut R,
    result: Option<&DetectionResult>,
    config: &RetargetConfig,
) {
    if !rig.has_humanoid() {
        return;
    }
    let Some(result) = result else {
        return;
    };

    let frame = match result.body.first() {
        Some(body) if config.body => body::apply_body(rig, body),
        _ => BodyFrame::default(),
    };

    if config.face {
        if let Some(face) = result.face.first() {
            face::apply_face(rig, face, &frame, config);
        }
    }

    if config.hands {
        for hand in &result.hand {
            hand::apply_hand(rig, hand, &frame, config);
        }
    }
}

fn write<R: HumanoidRig + ?Sized>(rig: &mut R, bone: HumanoidBone, axis: Axis, radians: f32) {
    if !rig.set_bone_rotation(bone, axis, radians) {
        tracing::trace!(?bone, ?axis, "rig has no such bone, skipping");
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    use retarget_api::{Body, BodyPart, Face, FaceAngle, FaceRotation, Keypoint};

    use crate::rig::PoseBuffer;

    use super::*;

    fn point(p: &[f32]) -> Option<&[f32]> {
        Some(p)
    }

    #[test]
    fn angle_of_missing_or_short_points_is_zero() {
        assert_eq!(angle(None, point(&[1., 1.])), 0.);
        assert_eq!(angle(point(&[1., 1.]), None), 0.);
        assert_eq!(angle(point(&[1.]), point(&[1., 1.])), 0.);
        assert_eq!(angle(point(&[0., 0.]), point(&[])), 0.);
    }

    #[test]
    fn angle_follows_atan2_of_delta() {
        assert!((angle(point(&[0., 0.]), point(&[1., 1.])) - FRAC_PI_4).abs() < 1e-6);
        assert!((angle(point(&[0., 0.]), point(&[0., -1.])) + FRAC_PI_2).abs() < 1e-6);
        assert!((angle(point(&[1., 1., 5.]), point(&[0., 1., -3.])) - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(angle(Some([0f32, 0., 0.]), Some([2f32, 0., 9.])), 0.);
    }

    #[test]
    fn rig_without_humanoid_is_untouched() {
        let mut rig = PoseBuffer::default();
        let result = DetectionResult {
            face: vec![Face::default()],
            ..Default::default()
        };
        apply_detection_to_rig(&mut rig, Some(&result), &RetargetConfig::default());
        assert!(rig.bones.is_empty());
        assert!(rig.expressions.is_empty());
    }

    #[test]
    fn missing_result_is_a_no_op() {
        let mut rig = PoseBuffer::full();
        apply_detection_to_rig(&mut rig, None, &RetargetConfig::default());
        assert_eq!(rig, PoseBuffer::full());
    }

    #[test]
    fn disabled_steps_are_skipped() {
        let mut rig = PoseBuffer::full();
        let result = DetectionResult {
            body: vec![Body {
                keypoints: vec![Keypoint {
                    part: BodyPart::LeftShoulder,
                    position: vec![],
                    position_raw: vec![0.5, 0.5],
                    score: 1.,
                }],
                ..Default::default()
            }],
            face: vec![Face {
                rotation: Some(FaceRotation {
                    angle: Some(FaceAngle { roll: 0., yaw: 0.4, pitch: 0. }),
                    gaze: None,
                }),
                ..Default::default()
            }],
            hand: vec![],
        };
        let config = RetargetConfig { body: false, ..Default::default() };
        apply_detection_to_rig(&mut rig, Some(&result), &config);
        assert_eq!(rig.rotation(HumanoidBone::LeftUpperArm), None);
        assert_eq!(rig.rotation(HumanoidBone::Head).map(|r| r.y), Some(-0.2));
    }
}
