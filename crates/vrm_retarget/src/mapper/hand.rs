use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, PI};

use glam::Vec2;
use retarget_api::{FingerCurl, Hand};

use crate::config::RetargetConfig;
use crate::humanoid::{Axis, Finger, HumanoidBone, Side};
use crate::rig::HumanoidRig;

use super::{angle, write, BodyFrame};

fn curl_angle(curl: FingerCurl) -> f32 {
    match curl {
        FingerCurl::None => 0.,
        FingerCurl::Half => FRAC_PI_8,
        FingerCurl::Full => FRAC_PI_4,
    }
}

fn finger_curl(hand: &Hand, finger: Finger) -> FingerCurl {
    let landmarks = &hand.landmarks;
    match finger {
        Finger::Thumb => landmarks.thumb.curl,
        Finger::Index => landmarks.index.curl,
        Finger::Middle => landmarks.middle.curl,
        Finger::Ring => landmarks.ring.curl,
        Finger::Little => landmarks.pinky.curl,
    }
}

/// Which tracked wrist a hand belongs to, if either is close enough.
fn associate(hand: &Hand, frame: &BodyFrame, config: &RetargetConfig) -> Option<Side> {
    let origin = Vec2::new(hand.bounds_raw[0], hand.bounds_raw[1]);
    let distance = |wrist: Option<Vec2>| wrist
        .map(|w| config.wrist_distance.measure(origin.x - w.x, origin.y - w.y))
        .unwrap_or(f32::MAX);
    let left = distance(frame.left_wrist);
    let right = distance(frame.right_wrist);
    if left > config.max_wrist_distance && right > config.max_wrist_distance {
        return None;
    }
    Some(if left < right { Side::Left } else { Side::Right })
}

/// Bounding-box diagonal scaled down to a per-hand unit.
fn hand_size(hand: &Hand) -> f32 {
    let extent = |v: f32| if v == 0. || v.is_nan() { 1. } else { v };
    let (width, height) = (extent(hand.bounds[2]), extent(hand.bounds[3]));
    (width * width + height * height).sqrt() / PI
}

pub(super) fn apply_hand<R: HumanoidRig + ?Sized>(
    rig: &mut R,
    hand: &Hand,
    frame: &BodyFrame,
    config: &RetargetConfig,
) {
    let Some(side) = associate(hand, frame, config) else {
        tracing::debug!(bounds = ?hand.bounds_raw, "hand is not near a tracked wrist, skipping");
        return;
    };
    let hand_bone = HumanoidBone::hand(side);
    let annotations = &hand.annotations;

    // Depth difference across the knuckles turns the palm towards the camera.
    if let (Some(pinky), Some(thumb)) = (annotations.pinky.first(), annotations.thumb.first()) {
        let roll = (pinky.z - thumb.z) / hand_size(hand);
        write(rig, hand_bone, Axis::Z, -roll * FRAC_PI_2);
    }

    for finger in Finger::ALL {
        let curl = curl_angle(finger_curl(hand, finger));
        // The thumb folds across the palm rather than into it.
        let (axis, radians) = match finger {
            Finger::Thumb => (Axis::X, -2. * curl),
            _ => (Axis::Z, curl),
        };
        for bone in HumanoidBone::finger_chain(side, finger) {
            write(rig, bone, axis, radians);
        }
    }

    let knuckle = annotations.index.get(3).map(|p| p.to_array());
    let palm = annotations.palm.first().map(|p| p.to_array());
    write(rig, hand_bone, Axis::Y, angle(knuckle, palm) - FRAC_PI_2);
}
