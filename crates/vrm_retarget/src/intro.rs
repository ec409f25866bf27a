//! Start-up greeting: turn the avatar to face the camera and open its eyes.

use std::f32::consts::PI;

use crate::expression::ExpressionPreset;
use crate::humanoid::{Axis, HumanoidBone};
use crate::rig::HumanoidRig;

/// Seconds the intro runs for.
pub const INTRO_DURATION: f32 = PI;

/// Poses `rig` for `elapsed` seconds into the intro. Returns `false` once the
/// intro has finished, leaving the last pose in place.
pub fn intro_pose<R: HumanoidRig + ?Sized>(rig: &mut R, elapsed: f32) -> bool {
    if elapsed >= INTRO_DURATION || !rig.has_humanoid() {
        return false;
    }

    let t = elapsed.max(0.);
    rig.set_bone_rotation(HumanoidBone::Hips, Axis::Y, t);
    // Palms towards the camera, arms lowered.
    rig.set_bone_rotation(HumanoidBone::LeftUpperArm, Axis::X, t / 2.);
    rig.set_bone_rotation(HumanoidBone::RightUpperArm, Axis::X, t / 2.);
    rig.set_bone_rotation(HumanoidBone::LeftUpperArm, Axis::Y, t / 3.);
    rig.set_bone_rotation(HumanoidBone::RightUpperArm, Axis::Y, -t / 3.);
    if rig.has_expressions() {
        rig.set_expression(ExpressionPreset::BlinkLeft, INTRO_DURATION - t);
        rig.set_expression(ExpressionPreset::BlinkRight, INTRO_DURATION - t);
    }
    true
}
