use std::time::{Duration, Instant};

use bevy::app::{App, Plugin, Startup, Update};
use bevy::math::{EulerRot, Quat};
use bevy::prelude::{
    Changed, Component, Deref, DerefMut, Entity, IntoSystemConfigs, Local, Query, Res, ResMut,
    Resource, Time, Transform,
};

use vrm_retarget::{apply_detection_to_rig, intro_pose, PoseBuffer, RetargetConfig};

use crate::api::update_api;
use crate::skeleton::{spawn_avatar, Expressions, Humanoid};
use crate::tracking::LatestDetection;

/// Seconds between pose dumps at debug level.
const POSE_LOG_INTERVAL: f32 = 5.;

/// The pose the retargeter writes for one avatar, synced onto its bones
/// every frame.
#[derive(Debug, Clone, Default, Component, Deref, DerefMut)]
pub struct AvatarPose(pub PoseBuffer);

#[derive(Debug, Clone, Resource)]
pub struct Settings {
    pub config: RetargetConfig,
    /// Detections older than this are no longer applied.
    pub stale_after: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config: RetargetConfig::default(),
            stale_after: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Default, Resource)]
pub struct IntroState {
    pub running: bool,
    started: Option<f32>,
}

impl IntroState {
    pub fn new(enabled: bool) -> Self {
        Self {
            running: enabled,
            started: None,
        }
    }
}

pub struct RetargetPlugin {
    pub settings: Settings,
    pub intro: bool,
}

impl Plugin for RetargetPlugin {
    fn name(&self) -> &str {
        "Retarget"
    }

    fn build(&self, app: &mut App) {
        app
            .insert_resource(self.settings.clone())
            .insert_resource(IntroState::new(self.intro))
            .init_resource::<LatestDetection>()
            .add_systems(Startup, spawn_avatar)
            .add_systems(Update, (
                update_api,
                play_intro,
                retarget,
                apply_pose,
                log_pose,
            ).chain());
    }
}

pub fn play_intro(
    time: Res<Time>,
    mut intro: ResMut<IntroState>,
    mut avatars: Query<&mut AvatarPose>,
) {
    if !intro.running {
        return;
    }
    let now = time.elapsed_seconds();
    let elapsed = now - *intro.started.get_or_insert(now);

    let mut running = false;
    for mut pose in &mut avatars {
        running |= intro_pose(&mut pose.0, elapsed);
    }
    if !running {
        intro.running = false;
        tracing::info!("intro finished, following detections");
    }
}

pub fn retarget(
    settings: Res<Settings>,
    intro: Res<IntroState>,
    latest: Res<LatestDetection>,
    mut avatars: Query<&mut AvatarPose>,
) {
    if intro.running {
        return;
    }
    let Some(result) = latest.fresh(Instant::now(), settings.stale_after) else {
        return;
    };
    for mut pose in &mut avatars {
        apply_detection_to_rig(&mut pose.0, Some(result), &settings.config);
    }
}

pub fn apply_pose(
    mut avatars: Query<(&Humanoid, &AvatarPose, &mut Expressions), Changed<AvatarPose>>,
    mut transforms: Query<&mut Transform>,
) {
    for (humanoid, pose, mut expressions) in &mut avatars {
        for (bone, euler) in pose.bones.iter() {
            let Some(mut transform) = humanoid.bones
                .get(bone)
                .and_then(|b| transforms.get_mut(*b).ok()) else {
                continue;
            };
            transform.rotation = Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z);
        }

        if let Some((target, entity)) = pose.look_at.zip(humanoid.look_at) {
            if let Ok(mut transform) = transforms.get_mut(entity) {
                transform.translation = target;
            }
        }

        expressions.extend(pose.expressions.iter().map(|(preset, weight)| (*preset, *weight)));
    }
}

pub fn log_pose(
    time: Res<Time>,
    mut last: Local<Option<f32>>,
    avatars: Query<(Entity, &AvatarPose)>,
) {
    let now = time.elapsed_seconds();
    if last.is_some_and(|t| now - t < POSE_LOG_INTERVAL) {
        return;
    }
    *last = Some(now);

    for (entity, pose) in &avatars {
        match serde_json::to_string(&pose.0) {
            Ok(json) => tracing::debug!(?entity, pose = %json, "avatar pose"),
            Err(err) => tracing::warn!(?entity, "failed to serialize pose: {}", err),
        }
    }
}
