use std::time::{Duration, Instant};

use bevy::prelude::Resource;

use retarget_api::DetectionResult;

/// The most recent detection posted by the detector. Newer results replace
/// older ones whether or not they were ever applied.
#[derive(Debug, Default, Resource)]
pub struct LatestDetection {
    result: Option<DetectionResult>,
    received: Option<Instant>,
}

impl LatestDetection {
    pub fn set(&mut self, result: DetectionResult, now: Instant) {
        self.result = Some(result);
        self.received = Some(now);
    }

    pub fn clear(&mut self) {
        self.result = None;
        self.received = None;
    }

    /// The latest result, unless it has not been refreshed for `stale_after`.
    pub fn fresh(&self, now: Instant, stale_after: Duration) -> Option<&DetectionResult> {
        let received = self.received?;
        if now.saturating_duration_since(received) > stale_after {
            return None;
        }
        self.result.as_ref()
    }
}
