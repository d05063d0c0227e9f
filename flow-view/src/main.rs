//! Application entry point for the flow field viewer.
//!
//! This binary parses the command line, loads an optional TOML preset,
//! sets up logging, and delegates all interactive logic and rendering to
//! [`Viewer`] from the `viewer` module.

mod viewer;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use flow_core::config::FieldConfig;
use flow_core::noise::Seed;
use flow_core::waves::WaveConfig;
use serde::Deserialize;
use viewer::Viewer;

#[derive(Parser, Debug)]
#[command(name = "flow-view", about = "Noise-driven particle field viewer")]
struct Args {
    /// TOML preset file with optional [field] and [waves] sections.
    /// Missing fields fall back to their documented defaults.
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Noise seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

/// On-disk preset shape. Both sections are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Preset {
    field: FieldConfig,
    waves: WaveConfig,
}

fn load_preset(path: &Path) -> anyhow::Result<Preset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading preset {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing preset {}", path.display()))
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the preset cannot be loaded or eframe fails to create the
///   native window or event loop.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let preset = match &args.preset {
        Some(path) => load_preset(path)?,
        None => Preset::default(),
    };
    let field_cfg = preset.field.sanitized();
    let wave_cfg = preset.waves.sanitized();
    let seed = args.seed.map(Seed::new).unwrap_or_default();

    tracing::info!(?seed, particles = field_cfg.count, "starting viewer");

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Flow Field",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(field_cfg, wave_cfg, seed)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_preset_parses_to_defaults() {
        let preset: Preset = toml::from_str("").unwrap();
        assert_eq!(preset.field, FieldConfig::default());
        assert_eq!(preset.waves, WaveConfig::default());
    }

    #[test]
    fn partial_preset_overrides_only_named_fields() {
        let preset: Preset = toml::from_str(
            r#"
            [field]
            count = 200
            base_hue = 10.0

            [waves]
            speed = "slow"
            "#,
        )
        .unwrap();
        assert_eq!(preset.field.count, 200);
        assert_eq!(preset.field.base_hue, 10.0);
        assert_eq!(preset.field.range_y, FieldConfig::default().range_y);
        assert_eq!(preset.waves.speed, flow_core::waves::WaveSpeed::Slow);
        assert_eq!(preset.waves.blur, WaveConfig::default().blur);
    }

    #[test]
    fn background_deserializes_from_an_array() {
        let preset: Preset = toml::from_str(
            r#"
            [field]
            background = [0.1, 0.2, 0.3, 1.0]
            "#,
        )
        .unwrap();
        assert_eq!(
            preset.field.background,
            flow_core::color::Rgba::new(0.1, 0.2, 0.3, 1.0)
        );
    }

    #[test]
    fn missing_preset_file_is_an_error() {
        assert!(load_preset(Path::new("/nonexistent/preset.toml")).is_err());
    }
}
