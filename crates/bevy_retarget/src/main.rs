use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use bevy::app::ScheduleRunnerPlugin;
use bevy::hierarchy::HierarchyPlugin;
use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use clap::Parser;

use vrm_retarget::RetargetConfig;

use crate::retarget::{RetargetPlugin, Settings};

mod api;
mod retarget;
mod skeleton;
mod tracking;

#[derive(Parser, Debug)]
struct Options {
    #[arg(long, default_value = "127.0.0.1:8888")]
    pub api_bind: String,
    /// JSON file with retargeting options.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Stop applying a detection once it is this old.
    #[arg(long, default_value = "1000")]
    pub stale_after_ms: u64,
    #[arg(long, short = 'f', default_value = "60")]
    pub fps: u32,
    /// Skip the turn-to-camera greeting.
    #[arg(long)]
    pub no_intro: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<RetargetConfig> {
    let Some(path) = path else {
        return Ok(RetargetConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: RetargetConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.validate()?;
    tracing::info!("loaded config from {}", path.display());
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let options = Options::parse();
    let config = load_config(options.config.as_deref())?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let api_addr: std::net::SocketAddr = options.api_bind.parse()?;
    let (api_state, api_resource) = api::ApiState::new();
    runtime.spawn(async move {
        let listener = match tokio::net::TcpListener::bind(api_addr).await {
            Ok(listener) => listener,
            Err(err) => {
                tracing::error!("failed to bind API to {}: {}", api_addr, err);
                return;
            }
        };
        tracing::info!("accepting detections on http://{}/v1/detection", api_addr);
        if let Err(err) = axum::serve(listener, api::new_api().with_state(api_state)).await {
            tracing::error!("failed to serve API: {}", err);
        }
    });

    let frame_time = Duration::from_secs_f64(1. / options.fps.max(1) as f64);
    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame_time)),
            HierarchyPlugin,
            TransformPlugin,
            RetargetPlugin {
                settings: Settings {
                    config,
                    stale_after: Duration::from_millis(options.stale_after_ms),
                },
                intro: !options.no_intro,
            },
        ))
        .insert_resource(api_resource)
        .run();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), RetargetConfig::default());
    }

    #[test]
    fn config_file_is_read_and_validated() {
        let dir = std::env::temp_dir();
        let good = dir.join(format!("bevy_retarget_good_{}.json", std::process::id()));
        std::fs::write(&good, r#"{ "wristDistance": "squared", "hands": false }"#).unwrap();
        let config = load_config(Some(&good)).unwrap();
        assert!(!config.hands);

        let bad = dir.join(format!("bevy_retarget_bad_{}.json", std::process::id()));
        std::fs::write(&bad, r#"{ "maxWristDistance": -2 }"#).unwrap();
        assert!(load_config(Some(&bad)).is_err());

        std::fs::remove_file(good).ok();
        std::fs::remove_file(bad).ok();
    }

    #[test]
    fn options_parse() {
        let options = Options::parse_from(["bevy_retarget", "--no-intro", "-f", "30"]);
        assert!(options.no_intro);
        assert_eq!(options.fps, 30);
        assert_eq!(options.api_bind, "127.0.0.1:8888");
    }
}
