use glam::Vec3;
use retarget_api::{EmotionScore, Face, Gaze};

use crate::config::{RetargetConfig, TieBreak};
use crate::expression::ExpressionPreset;
use crate::humanoid::{Axis, HumanoidBone};
use crate::rig::HumanoidRig;

use super::{write, BodyFrame};

/// Face-mesh landmark indices bounding one eye.
struct EyeLandmarks {
    lid_top: usize,
    lid_bottom: usize,
    brow_top: usize,
    brow_bottom: usize,
}

const LEFT_EYE: EyeLandmarks = EyeLandmarks {
    lid_top: 386,
    lid_bottom: 374,
    brow_top: 443,
    brow_bottom: 450,
};

const RIGHT_EYE: EyeLandmarks = EyeLandmarks {
    lid_top: 159,
    lid_bottom: 145,
    brow_top: 223,
    brow_bottom: 230,
};

const UPPER_LIP: usize = 13;
const LOWER_LIP: usize = 14;
const NOSE_TOP: usize = 10;
const CHIN: usize = 152;

/// Vertical distance between two mesh landmarks.
fn span(mesh: &[Vec3], a: usize, b: usize) -> Option<f32> {
    Some((mesh.get(a)?.y - mesh.get(b)?.y).abs())
}

/// Lid opening relative to the eye socket, scaled so a closed eye is near 0.
fn eye_openness(mesh: &[Vec3], eye: &EyeLandmarks) -> Option<f32> {
    let lid = span(mesh, eye.lid_bottom, eye.lid_top)?;
    let socket = span(mesh, eye.brow_top, eye.brow_bottom)?;
    let openness = 3. * (lid / socket - 0.15);
    openness.is_finite().then_some(openness)
}

fn mouth_openness(mesh: &[Vec3]) -> Option<f32> {
    let lips = span(mesh, UPPER_LIP, LOWER_LIP)?;
    let face = span(mesh, NOSE_TOP, CHIN)?;
    let ratio = 5. * lips / face;
    ratio.is_finite().then(|| ratio.min(1.))
}

fn dominant_emotion(scores: &[EmotionScore], tie_break: TieBreak) -> Option<&EmotionScore> {
    scores.iter().reduce(|best, next| {
        let replace = match tie_break {
            TieBreak::First => next.score > best.score,
            TieBreak::Last => next.score >= best.score,
        };
        if replace { next } else { best }
    })
}

/// Look-at target for a gaze estimate. A direction proxy, not a world position.
pub fn gaze_target(gaze: Gaze) -> Vec3 {
    Vec3::new(
        10. * gaze.strength * gaze.bearing.sin(),
        10. * gaze.strength * gaze.bearing.cos(),
        0.,
    )
}

pub(super) fn apply_face<R: HumanoidRig + ?Sized>(
    rig: &mut R,
    face: &Face,
    frame: &BodyFrame,
    config: &RetargetConfig,
) {
    let rotation = face.rotation.unwrap_or_default();
    let angle = rotation.angle.unwrap_or_default();

    // Split the head turn between neck and head; roll is relative to the body.
    let tilt = angle.roll / 2. - frame.lean;
    write(rig, HumanoidBone::Head, Axis::X, -angle.pitch / 2.);
    write(rig, HumanoidBone::Head, Axis::Y, -angle.yaw / 2.);
    write(rig, HumanoidBone::Head, Axis::Z, tilt);
    write(rig, HumanoidBone::Neck, Axis::X, -angle.pitch / 2.);
    write(rig, HumanoidBone::Neck, Axis::Y, -angle.yaw / 2.);
    write(rig, HumanoidBone::Neck, Axis::Z, tilt / 2.);

    if let Some(gaze) = rotation.gaze {
        rig.set_look_at_target(gaze_target(gaze));
    }

    if !rig.has_expressions() {
        return;
    }

    let dense = face.mesh.len() > config.sparse_mesh_threshold;
    if dense {
        for (eye, preset) in [
            (&LEFT_EYE, ExpressionPreset::BlinkLeft),
            (&RIGHT_EYE, ExpressionPreset::BlinkRight),
        ] {
            if let Some(openness) = eye_openness(&face.mesh, eye) {
                rig.set_expression(preset, 1. - openness);
            }
        }
    }

    for preset in ExpressionPreset::EMOTIONS {
        rig.set_expression(preset, 0.);
    }
    let emotion = dominant_emotion(&face.emotion, config.emotion_tie_break)
        .map(|e| ExpressionPreset::from_emotion_label(&e.emotion))
        .unwrap_or(ExpressionPreset::Neutral);
    rig.set_expression(emotion, 1.);

    if dense {
        if let Some(mouth) = mouth_openness(&face.mesh) {
            rig.set_expression(ExpressionPreset::Oh, mouth);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use retarget_api::{FaceAngle, FaceRotation};

    use crate::rig::PoseBuffer;

    use super::*;

    fn mesh(len: usize, points: &[(usize, f32)]) -> Vec<Vec3> {
        let mut mesh = vec![Vec3::ZERO; len];
        for (i, y) in points {
            mesh[*i].y = *y;
        }
        mesh
    }

    fn expressive_mesh(len: usize) -> Vec<Vec3> {
        mesh(len, &[
            // Left eye: lids 0.1 apart, socket 0.5.
            (386, 0.4), (374, 0.5), (443, 0.2), (450, 0.7),
            // Right eye: lids 0.05 apart, socket 0.5.
            (159, 0.45), (145, 0.5), (223, 0.2), (230, 0.7),
            // Lips 0.02 apart, face 0.5.
            (13, 0.6), (14, 0.62), (10, 0.1), (152, 0.6),
        ])
    }

    fn scores(scores: &[(&str, f32)]) -> Vec<EmotionScore> {
        scores.iter()
            .map(|(emotion, score)| EmotionScore { emotion: emotion.to_string(), score: *score })
            .collect()
    }

    fn expression(rig: &PoseBuffer, preset: ExpressionPreset) -> f32 {
        rig.expression(preset).unwrap_or_else(|| panic!("{preset:?} not written"))
    }

    #[test]
    fn head_rotation_is_relative_to_lean() {
        let mut rig = PoseBuffer::full();
        let face = Face {
            rotation: Some(FaceRotation {
                angle: Some(FaceAngle { roll: 0.6, yaw: 0., pitch: 0. }),
                gaze: None,
            }),
            ..Default::default()
        };
        let frame = BodyFrame { lean: 0.1, ..Default::default() };
        apply_face(&mut rig, &face, &frame, &RetargetConfig::default());

        let head = rig.rotation(HumanoidBone::Head).unwrap();
        let neck = rig.rotation(HumanoidBone::Neck).unwrap();
        assert!((head.z - 0.2).abs() < 1e-6);
        assert!((neck.z - 0.1).abs() < 1e-6);
    }

    #[test]
    fn missing_rotation_defaults_to_zero() {
        let mut rig = PoseBuffer::full();
        apply_face(&mut rig, &Face::default(), &BodyFrame::default(), &RetargetConfig::default());
        assert_eq!(rig.rotation(HumanoidBone::Head), Some(Vec3::ZERO));
        assert_eq!(rig.rotation(HumanoidBone::Neck), Some(Vec3::ZERO));
        assert_eq!(rig.look_at, None);
    }

    #[test]
    fn blink_and_mouth_from_dense_mesh() {
        let mut rig = PoseBuffer::full();
        let face = Face { mesh: expressive_mesh(468), ..Default::default() };
        apply_face(&mut rig, &face, &BodyFrame::default(), &RetargetConfig::default());

        // 3 * (0.1 / 0.5 - 0.15) = 0.15
        assert!((expression(&rig, ExpressionPreset::BlinkLeft) - 0.85).abs() < 1e-5);
        // 3 * (0.05 / 0.5 - 0.15) = -0.15
        assert!((expression(&rig, ExpressionPreset::BlinkRight) - 1.).abs() < 1e-5);
        // 5 * 0.02 / 0.5 = 0.2
        assert!((expression(&rig, ExpressionPreset::Oh) - 0.2).abs() < 1e-5);
    }

    #[test]
    fn wide_mouth_saturates() {
        let mut rig = PoseBuffer::full();
        let face = Face {
            mesh: mesh(468, &[(13, 0.3), (14, 0.6), (10, 0.1), (152, 0.6)]),
            ..Default::default()
        };
        apply_face(&mut rig, &face, &BodyFrame::default(), &RetargetConfig::default());
        assert_eq!(expression(&rig, ExpressionPreset::Oh), 1.);
    }

    #[test]
    fn sparse_mesh_skips_blink_and_mouth() {
        let mut rig = PoseBuffer::full();
        let face = Face { mesh: expressive_mesh(468).into_iter().take(300).collect(), ..Default::default() };
        apply_face(&mut rig, &face, &BodyFrame::default(), &RetargetConfig::default());
        assert_eq!(rig.expression(ExpressionPreset::BlinkLeft), None);
        assert_eq!(rig.expression(ExpressionPreset::BlinkRight), None);
        assert_eq!(rig.expression(ExpressionPreset::Oh), None);
    }

    #[test]
    fn short_dense_mesh_skips_out_of_range_landmarks() {
        let mut rig = PoseBuffer::full();
        // Long enough to pass the sparse check, too short for the left eye.
        let face = Face { mesh: expressive_mesh(468).into_iter().take(301).collect(), ..Default::default() };
        apply_face(&mut rig, &face, &BodyFrame::default(), &RetargetConfig::default());
        assert_eq!(rig.expression(ExpressionPreset::BlinkLeft), None);
        assert_eq!(expression(&rig, ExpressionPreset::BlinkRight), 1.);
        assert!((expression(&rig, ExpressionPreset::Oh) - 0.2).abs() < 1e-5);
    }

    #[test]
    fn strongest_emotion_wins() {
        let mut rig = PoseBuffer::full();
        let face = Face {
            emotion: scores(&[("happy", 0.4), ("sad", 0.9), ("angry", 0.2)]),
            ..Default::default()
        };
        apply_face(&mut rig, &face, &BodyFrame::default(), &RetargetConfig::default());
        for preset in ExpressionPreset::EMOTIONS {
            let expected = if preset == ExpressionPreset::Sad { 1. } else { 0. };
            assert_eq!(expression(&rig, preset), expected, "{preset:?}");
        }
    }

    #[test]
    fn unknown_or_missing_emotion_is_neutral() {
        for emotion in [scores(&[("fear", 0.8), ("happy", 0.1)]), vec![]] {
            let mut rig = PoseBuffer::full();
            let face = Face { emotion, ..Default::default() };
            apply_face(&mut rig, &face, &BodyFrame::default(), &RetargetConfig::default());
            assert_eq!(expression(&rig, ExpressionPreset::Neutral), 1.);
            assert_eq!(expression(&rig, ExpressionPreset::Happy), 0.);
        }
    }

    #[test]
    fn emotion_ties_follow_config() {
        let tied = scores(&[("happy", 0.5), ("angry", 0.5)]);
        assert_eq!(dominant_emotion(&tied, TieBreak::First).unwrap().emotion, "happy");
        assert_eq!(dominant_emotion(&tied, TieBreak::Last).unwrap().emotion, "angry");
        assert!(dominant_emotion(&[], TieBreak::First).is_none());
    }

    #[test]
    fn gaze_sets_look_at_target() {
        let mut rig = PoseBuffer::full();
        let face = Face {
            rotation: Some(FaceRotation {
                angle: None,
                gaze: Some(Gaze { bearing: FRAC_PI_2, strength: 0.5 }),
            }),
            ..Default::default()
        };
        apply_face(&mut rig, &face, &BodyFrame::default(), &RetargetConfig::default());
        let target = rig.look_at.unwrap();
        assert!((target.x - 5.).abs() < 1e-5);
        assert!(target.y.abs() < 1e-5);
        assert_eq!(target.z, 0.);
    }

    #[test]
    fn rig_without_expressions_still_turns_head() {
        let mut rig = PoseBuffer::full().without_expressions();
        let face = Face {
            mesh: expressive_mesh(468),
            emotion: scores(&[("happy", 1.)]),
            ..Default::default()
        };
        apply_face(&mut rig, &face, &BodyFrame::default(), &RetargetConfig::default());
        assert!(rig.expressions.is_empty());
        assert!(rig.rotation(HumanoidBone::Head).is_some());
    }
}
