//! A procedural humanoid in rest pose, standing in for a loaded VRM avatar.

use std::collections::BTreeMap;

use bevy::core::Name;
use bevy::hierarchy::BuildWorldChildren;
use bevy::math::Vec3;
use bevy::prelude::{Component, Deref, DerefMut, Entity, Transform, TransformBundle, World};
use bevy::utils::HashMap;

use vrm_retarget::{ExpressionPreset, Finger, HumanoidBone, PoseBuffer, Side};

use crate::retarget::AvatarPose;

#[derive(Debug, Clone, Default, Component)]
pub struct Humanoid {
    pub bones: HashMap<HumanoidBone, Entity>,
    /// Entity moved to the avatar's gaze target.
    pub look_at: Option<Entity>,
}

/// Expression weights for the avatar's face, in `[0, 1]`.
#[derive(Debug, Clone, Default, Component, Deref, DerefMut)]
pub struct Expressions(pub BTreeMap<ExpressionPreset, f32>);

#[derive(Debug, Clone, Copy, Default, Component)]
pub struct LookAtTarget;

/// Offset of `bone` from its parent in rest pose, in metres. The avatar faces
/// +Z, so its left is +X.
pub fn rest_offset(bone: HumanoidBone) -> Vec3 {
    use HumanoidBone::*;

    let sign = match bone.side() {
        Some(Side::Right) => -1.,
        _ => 1.,
    };
    if let Some((_, finger, joint)) = bone.finger() {
        let spread = match finger {
            Finger::Thumb => 0.03,
            Finger::Index => 0.02,
            Finger::Middle => 0.,
            Finger::Ring => -0.02,
            Finger::Little => -0.04,
        };
        return match joint {
            0 => Vec3::new(sign * 0.08, 0., spread),
            _ => Vec3::new(sign * 0.03, 0., 0.),
        };
    }

    let offset = match bone {
        Hips => Vec3::new(0., 0.95, 0.),
        Spine => Vec3::new(0., 0.1, 0.),
        Chest => Vec3::new(0., 0.12, 0.),
        UpperChest => Vec3::new(0., 0.12, 0.),
        Neck => Vec3::new(0., 0.12, 0.),
        Head => Vec3::new(0., 0.1, 0.),
        LeftEye | RightEye => Vec3::new(0.03, 0.07, 0.08),
        Jaw => Vec3::new(0., -0.03, 0.05),
        LeftUpperLeg | RightUpperLeg => Vec3::new(0.09, -0.05, 0.),
        LeftLowerLeg | RightLowerLeg => Vec3::new(0., -0.42, 0.),
        LeftFoot | RightFoot => Vec3::new(0., -0.42, 0.),
        LeftToes | RightToes => Vec3::new(0., -0.05, 0.12),
        LeftShoulder | RightShoulder => Vec3::new(0.03, 0.08, 0.),
        LeftUpperArm | RightUpperArm => Vec3::new(0.1, 0., 0.),
        LeftLowerArm | RightLowerArm => Vec3::new(0.27, 0., 0.),
        LeftHand | RightHand => Vec3::new(0.25, 0., 0.),
        _ => Vec3::ZERO,
    };
    offset * Vec3::new(sign, 1., 1.)
}

/// Spawns a full humanoid rig and returns the avatar root.
pub fn spawn_humanoid(world: &mut World) -> Entity {
    let root = world.spawn((TransformBundle::default(), Name::new("Avatar"))).id();

    let mut bones = HashMap::default();
    // Parents precede their children in `ALL`.
    for bone in HumanoidBone::ALL {
        let parent = bone.parent()
            .and_then(|p| bones.get(&p).copied())
            .unwrap_or(root);
        let id = world.spawn((
            TransformBundle::from_transform(Transform::from_translation(rest_offset(bone))),
            Name::new(format!("{bone:?}")),
        )).id();
        world.entity_mut(parent).add_child(id);
        bones.insert(bone, id);
    }

    let look_at = world.spawn((TransformBundle::default(), Name::new("LookAt"), LookAtTarget)).id();
    world.entity_mut(root).add_child(look_at);

    let pose = PoseBuffer::with_bones(bones.keys().copied());
    world.entity_mut(root).insert((
        Humanoid {
            bones,
            look_at: Some(look_at),
        },
        AvatarPose(pose),
        Expressions::default(),
    ));
    tracing::info!(bones = HumanoidBone::ALL.len(), "spawned humanoid avatar");
    root
}

pub fn spawn_avatar(world: &mut World) {
    spawn_humanoid(world);
}
