use std::collections::{BTreeMap, BTreeSet};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::expression::ExpressionPreset;
use crate::humanoid::{Axis, HumanoidBone};

/// Capabilities the retargeter needs from an avatar runtime.
///
/// Writes to bones or expressions the avatar does not have return `false`
/// and leave the rig untouched.
pub trait HumanoidRig {
    /// Whether the avatar has a humanoid bone set at all.
    fn has_humanoid(&self) -> bool;

    /// Sets one axis of `bone`'s local Euler rotation, leaving the others.
    fn set_bone_rotation(&mut self, bone: HumanoidBone, axis: Axis, radians: f32) -> bool;

    fn has_expressions(&self) -> bool;

    /// Sets an expression weight, clamped to `[0, 1]`.
    fn set_expression(&mut self, preset: ExpressionPreset, weight: f32) -> bool;

    fn set_look_at_target(&mut self, target: Vec3);
}

/// An in-memory rig: Euler rotations per bone and weights per expression.
///
/// Doubles as a serializable pose snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseBuffer {
    #[serde(skip)]
    present: BTreeSet<HumanoidBone>,
    #[serde(skip)]
    expressions_enabled: bool,
    pub bones: BTreeMap<HumanoidBone, Vec3>,
    pub expressions: BTreeMap<ExpressionPreset, f32>,
    pub look_at: Option<Vec3>,
}

impl PoseBuffer {
    /// A rig with every humanoid bone and expression support.
    pub fn full() -> Self {
        Self::with_bones(HumanoidBone::ALL)
    }

    pub fn with_bones(bones: impl IntoIterator<Item = HumanoidBone>) -> Self {
        Self {
            present: bones.into_iter().collect(),
            expressions_enabled: true,
            ..Default::default()
        }
    }

    pub fn without_expressions(mut self) -> Self {
        self.expressions_enabled = false;
        self
    }

    pub fn rotation(&self, bone: HumanoidBone) -> Option<Vec3> {
        self.bones.get(&bone).copied()
    }

    pub fn expression(&self, preset: ExpressionPreset) -> Option<f32> {
        self.expressions.get(&preset).copied()
    }
}

impl HumanoidRig for PoseBuffer {
    fn has_humanoid(&self) -> bool {
        !self.present.is_empty()
    }

    fn set_bone_rotation(&mut self, bone: HumanoidBone, axis: Axis, radians: f32) -> bool {
        if !self.present.contains(&bone) {
            return false;
        }
        axis.set(self.bones.entry(bone).or_default(), radians);
        true
    }

    fn has_expressions(&self) -> bool {
        self.expressions_enabled
    }

    fn set_expression(&mut self, preset: ExpressionPreset, weight: f32) -> bool {
        if !self.expressions_enabled {
            return false;
        }
        self.expressions.insert(preset, weight.clamp(0., 1.));
        true
    }

    fn set_look_at_target(&mut self, target: Vec3) {
        self.look_at = Some(target);
    }
}
