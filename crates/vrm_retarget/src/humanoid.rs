use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Bones a VRM humanoid must provide.
pub static REQUIRED_BONES: &[HumanoidBone] = &[
    HumanoidBone::Hips,
    HumanoidBone::Spine,
    HumanoidBone::Head,
    HumanoidBone::LeftUpperLeg,
    HumanoidBone::LeftLowerLeg,
    HumanoidBone::LeftFoot,
    HumanoidBone::RightUpperLeg,
    HumanoidBone::RightLowerLeg,
    HumanoidBone::RightFoot,
    HumanoidBone::LeftUpperArm,
    HumanoidBone::LeftLowerArm,
    HumanoidBone::LeftHand,
    HumanoidBone::RightUpperArm,
    HumanoidBone::RightLowerArm,
    HumanoidBone::RightHand,
];

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HumanoidBone {
    Hips,
    Spine,
    Chest,
    UpperChest,
    Neck,
    Head,
    LeftEye,
    RightEye,
    Jaw,
    LeftUpperLeg,
    LeftLowerLeg,
    LeftFoot,
    LeftToes,
    RightUpperLeg,
    RightLowerLeg,
    RightFoot,
    RightToes,
    LeftShoulder,
    LeftUpperArm,
    LeftLowerArm,
    LeftHand,
    RightShoulder,
    RightUpperArm,
    RightLowerArm,
    RightHand,
    LeftThumbMetacarpal,
    LeftThumbProximal,
    LeftThumbDistal,
    LeftIndexProximal,
    LeftIndexIntermediate,
    LeftIndexDistal,
    LeftMiddleProximal,
    LeftMiddleIntermediate,
    LeftMiddleDistal,
    LeftRingProximal,
    LeftRingIntermediate,
    LeftRingDistal,
    LeftLittleProximal,
    LeftLittleIntermediate,
    LeftLittleDistal,
    RightThumbMetacarpal,
    RightThumbProximal,
    RightThumbDistal,
    RightIndexProximal,
    RightIndexIntermediate,
    RightIndexDistal,
    RightMiddleProximal,
    RightMiddleIntermediate,
    RightMiddleDistal,
    RightRingProximal,
    RightRingIntermediate,
    RightRingDistal,
    RightLittleProximal,
    RightLittleIntermediate,
    RightLittleDistal,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Little,
    ];
}

impl HumanoidBone {
    pub fn hand(side: Side) -> Self {
        match side {
            Side::Left => HumanoidBone::LeftHand,
            Side::Right => HumanoidBone::RightHand,
        }
    }

    /// The three joints of a finger, root first.
    pub fn finger_chain(side: Side, finger: Finger) -> [HumanoidBone; 3] {
        use HumanoidBone::*;
        match (side, finger) {
            (Side::Left, Finger::Thumb) => [LeftThumbMetacarpal, LeftThumbProximal, LeftThumbDistal],
            (Side::Left, Finger::Index) => [LeftIndexProximal, LeftIndexIntermediate, LeftIndexDistal],
            (Side::Left, Finger::Middle) => [LeftMiddleProximal, LeftMiddleIntermediate, LeftMiddleDistal],
            (Side::Left, Finger::Ring) => [LeftRingProximal, LeftRingIntermediate, LeftRingDistal],
            (Side::Left, Finger::Little) => [LeftLittleProximal, LeftLittleIntermediate, LeftLittleDistal],
            (Side::Right, Finger::Thumb) => [RightThumbMetacarpal, RightThumbProximal, RightThumbDistal],
            (Side::Right, Finger::Index) => [RightIndexProximal, RightIndexIntermediate, RightIndexDistal],
            (Side::Right, Finger::Middle) => [RightMiddleProximal, RightMiddleIntermediate, RightMiddleDistal],
            (Side::Right, Finger::Ring) => [RightRingProximal, RightRingIntermediate, RightRingDistal],
            (Side::Right, Finger::Little) => [RightLittleProximal, RightLittleIntermediate, RightLittleDistal],
        }
    }

    pub fn side(self) -> Option<Side> {
        use HumanoidBone::*;
        match self {
            Hips | Spine | Chest | UpperChest | Neck | Head | Jaw => None,
            LeftEye | LeftUpperLeg | LeftLowerLeg | LeftFoot | LeftToes
            | LeftShoulder | LeftUpperArm | LeftLowerArm | LeftHand => Some(Side::Left),
            RightEye | RightUpperLeg | RightLowerLeg | RightFoot | RightToes
            | RightShoulder | RightUpperArm | RightLowerArm | RightHand => Some(Side::Right),
            _ => self.finger().map(|(side, _, _)| side),
        }
    }

    /// Side, finger and joint index (root is 0) of a finger bone.
    pub fn finger(self) -> Option<(Side, Finger, usize)> {
        [Side::Left, Side::Right].into_iter().find_map(|side| {
            Finger::ALL.into_iter().find_map(|finger| {
                HumanoidBone::finger_chain(side, finger)
                    .iter()
                    .position(|b| *b == self)
                    .map(|joint| (side, finger, joint))
            })
        })
    }

    /// Parent bone in the VRM humanoid hierarchy, `None` for the hips.
    pub fn parent(self) -> Option<HumanoidBone> {
        use HumanoidBone::*;
        Some(match self {
            Hips => return None,
            Spine => Hips,
            Chest => Spine,
            UpperChest => Chest,
            Neck => UpperChest,
            Head => Neck,
            LeftEye | RightEye | Jaw => Head,
            LeftUpperLeg | RightUpperLeg => Hips,
            LeftLowerLeg => LeftUpperLeg,
            LeftFoot => LeftLowerLeg,
            LeftToes => LeftFoot,
            RightLowerLeg => RightUpperLeg,
            RightFoot => RightLowerLeg,
            RightToes => RightFoot,
            LeftShoulder | RightShoulder => UpperChest,
            LeftUpperArm => LeftShoulder,
            LeftLowerArm => LeftUpperArm,
            LeftHand => LeftLowerArm,
            RightUpperArm => RightShoulder,
            RightLowerArm => RightUpperArm,
            RightHand => RightLowerArm,
            LeftThumbMetacarpal | LeftIndexProximal | LeftMiddleProximal
            | LeftRingProximal | LeftLittleProximal => LeftHand,
            RightThumbMetacarpal | RightIndexProximal | RightMiddleProximal
            | RightRingProximal | RightLittleProximal => RightHand,
            LeftThumbProximal => LeftThumbMetacarpal,
            LeftThumbDistal => LeftThumbProximal,
            LeftIndexIntermediate => LeftIndexProximal,
            LeftIndexDistal => LeftIndexIntermediate,
            LeftMiddleIntermediate => LeftMiddleProximal,
            LeftMiddleDistal => LeftMiddleIntermediate,
            LeftRingIntermediate => LeftRingProximal,
            LeftRingDistal => LeftRingIntermediate,
            LeftLittleIntermediate => LeftLittleProximal,
            LeftLittleDistal => LeftLittleIntermediate,
            RightThumbProximal => RightThumbMetacarpal,
            RightThumbDistal => RightThumbProximal,
            RightIndexIntermediate => RightIndexProximal,
            RightIndexDistal => RightIndexIntermediate,
            RightMiddleIntermediate => RightMiddleProximal,
            RightMiddleDistal => RightMiddleIntermediate,
            RightRingIntermediate => RightRingProximal,
            RightRingDistal => RightRingIntermediate,
            RightLittleIntermediate => RightLittleProximal,
            RightLittleDistal => RightLittleIntermediate,
        })
    }

    pub const ALL: [HumanoidBone; 55] = {
        use HumanoidBone::*;
        [
            Hips, Spine, Chest, UpperChest, Neck, Head, LeftEye, RightEye, Jaw,
            LeftUpperLeg, LeftLowerLeg, LeftFoot, LeftToes,
            RightUpperLeg, RightLowerLeg, RightFoot, RightToes,
            LeftShoulder, LeftUpperArm, LeftLowerArm, LeftHand,
            RightShoulder, RightUpperArm, RightLowerArm, RightHand,
            LeftThumbMetacarpal, LeftThumbProximal, LeftThumbDistal,
            LeftIndexProximal, LeftIndexIntermediate, LeftIndexDistal,
            LeftMiddleProximal, LeftMiddleIntermediate, LeftMiddleDistal,
            LeftRingProximal, LeftRingIntermediate, LeftRingDistal,
            LeftLittleProximal, LeftLittleIntermediate, LeftLittleDistal,
            RightThumbMetacarpal, RightThumbProximal, RightThumbDistal,
            RightIndexProximal, RightIndexIntermediate, RightIndexDistal,
            RightMiddleProximal, RightMiddleIntermediate, RightMiddleDistal,
            RightRingProximal, RightRingIntermediate, RightRingDistal,
            RightLittleProximal, RightLittleIntermediate, RightLittleDistal,
        ]
    };
}

/// Axis of a bone's local Euler rotation (XYZ order).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn set(self, euler: &mut Vec3, radians: f32) {
        match self {
            Axis::X => euler.x = radians,
            Axis::Y => euler.y = radians,
            Axis::Z => euler.z = radians,
        }
    }

    pub fn get(self, euler: Vec3) -> f32 {
        match self {
            Axis::X => euler.x,
            Axis::Y => euler.y,
            Axis::Z => euler.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bone_reaches_hips() {
        for bone in HumanoidBone::ALL {
            let mut current = bone;
            let mut depth = 0;
            while let Some(parent) = current.parent() {
                current = parent;
                depth += 1;
                assert!(depth < 16, "{bone:?} has a cyclic parent chain");
            }
            assert_eq!(current, HumanoidBone::Hips);
        }
    }

    #[test]
    fn finger_chains_are_parented_in_order() {
        for side in [Side::Left, Side::Right] {
            for finger in Finger::ALL {
                let [root, mid, tip] = HumanoidBone::finger_chain(side, finger);
                assert_eq!(root.parent(), Some(HumanoidBone::hand(side)));
                assert_eq!(mid.parent(), Some(root));
                assert_eq!(tip.parent(), Some(mid));
            }
        }
    }

    #[test]
    fn sides_and_fingers() {
        assert_eq!(HumanoidBone::Head.side(), None);
        assert_eq!(HumanoidBone::LeftEye.side(), Some(Side::Left));
        assert_eq!(HumanoidBone::RightRingIntermediate.side(), Some(Side::Right));
        assert_eq!(
            HumanoidBone::RightLittleDistal.finger(),
            Some((Side::Right, Finger::Little, 2)),
        );
        assert_eq!(
            HumanoidBone::LeftThumbMetacarpal.finger(),
            Some((Side::Left, Finger::Thumb, 0)),
        );
        assert_eq!(HumanoidBone::LeftHand.finger(), None);
        for bone in HumanoidBone::ALL {
            if bone.finger().is_some() {
                assert!(bone.side().is_some(), "{bone:?}");
            }
        }
    }

    #[test]
    fn bone_names_match_vrm() {
        let json = serde_json::to_string(&HumanoidBone::LeftThumbMetacarpal).unwrap();
        assert_eq!(json, "\"leftThumbMetacarpal\"");
        let bone: HumanoidBone = serde_json::from_str("\"upperChest\"").unwrap();
        assert_eq!(bone, HumanoidBone::UpperChest);
    }

    #[test]
    fn axis_writes_single_component() {
        let mut euler = Vec3::new(1.0, 2.0, 3.0);
        Axis::Y.set(&mut euler, -0.5);
        assert_eq!(euler, Vec3::new(1.0, -0.5, 3.0));
        assert_eq!(Axis::Z.get(euler), 3.0);
    }
}
