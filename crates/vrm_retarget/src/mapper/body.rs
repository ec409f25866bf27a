use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use retarget_api::{Body, BodyPart};

use crate::humanoid::{Axis, HumanoidBone};
use crate::rig::HumanoidRig;

use super::{angle, write, BodyFrame};

type Point<'a> = Option<&'a [f32]>;

/// Tracked points carry at least an x and a y, as `angle` needs.
fn present(point: Point) -> bool {
    point.is_some_and(|p| p.len() >= 2)
}

/// `value` if every point was tracked, otherwise rest pose.
fn tracked(points: &[Point], value: impl FnOnce() -> f32) -> f32 {
    if points.iter().copied().all(present) {
        value()
    } else {
        0.
    }
}

fn wrist(point: Point) -> Option<Vec2> {
    match point? {
        [x, y, ..] => Some(Vec2::new(*x, *y)),
        _ => None,
    }
}

pub(super) fn apply_body<R: HumanoidRig + ?Sized>(rig: &mut R, body: &Body) -> BodyFrame {
    let left_shoulder = body.part(BodyPart::LeftShoulder);
    let right_shoulder = body.part(BodyPart::RightShoulder);
    let left_elbow = body.part(BodyPart::LeftElbow);
    let right_elbow = body.part(BodyPart::RightElbow);
    let left_wrist = body.part(BodyPart::LeftWrist);
    let right_wrist = body.part(BodyPart::RightWrist);
    let left_hip = body.part(BodyPart::LeftHip);
    let right_hip = body.part(BodyPart::RightHip);
    let left_knee = body.part(BodyPart::LeftKnee);
    let right_knee = body.part(BodyPart::RightKnee);
    let left_ankle = body.part(BodyPart::LeftAnkle);
    let right_ankle = body.part(BodyPart::RightAnkle);

    let lean = angle(right_shoulder, left_shoulder);
    if present(left_shoulder) && present(right_shoulder) {
        write(rig, HumanoidBone::Chest, Axis::Z, lean);
    }

    // Arms swing about Y.
    let right_upper_arm = || angle(right_elbow, right_shoulder);
    let left_upper_arm = || angle(left_shoulder, left_elbow);
    write(rig, HumanoidBone::RightUpperArm, Axis::Y,
          tracked(&[right_shoulder, right_elbow], right_upper_arm));
    write(rig, HumanoidBone::LeftUpperArm, Axis::Y,
          tracked(&[left_shoulder, left_elbow], left_upper_arm));
    write(rig, HumanoidBone::RightLowerArm, Axis::Y,
          tracked(&[right_shoulder, right_elbow, right_wrist],
                  || angle(right_wrist, right_elbow) - right_upper_arm()));
    write(rig, HumanoidBone::LeftLowerArm, Axis::Y,
          tracked(&[left_shoulder, left_elbow, left_wrist],
                  || angle(left_elbow, left_wrist) - left_upper_arm()));

    // The detector measures legs from straight down, the rig from its rest pose.
    let right_upper_leg = || angle(right_hip, right_knee);
    let left_upper_leg = || angle(left_hip, left_knee);
    write(rig, HumanoidBone::RightUpperLeg, Axis::Z,
          tracked(&[right_hip, right_knee], || right_upper_leg() - FRAC_PI_2));
    write(rig, HumanoidBone::LeftUpperLeg, Axis::Z,
          tracked(&[left_hip, left_knee], || left_upper_leg() - FRAC_PI_2));
    write(rig, HumanoidBone::RightLowerLeg, Axis::Z,
          tracked(&[right_hip, right_knee, right_ankle],
                  || angle(right_knee, right_ankle) - right_upper_leg()));
    write(rig, HumanoidBone::LeftLowerLeg, Axis::Z,
          tracked(&[left_hip, left_knee, left_ankle],
                  || angle(left_knee, left_ankle) - left_upper_leg()));

    BodyFrame {
        lean,
        left_wrist: wrist(left_wrist),
        right_wrist: wrist(right_wrist),
    }
}
