use scenery::cli::{Args, Command};
use scenery::config::{self, PathConfig, Settings};
use scenery::core::{AnimationState, SceneCompositionManager};
use scenery::entities::{
    Animation, AnimationCurve, CompositionMode, Keyframe, PieceKey, SceneRegistry, piecewise_bezier,
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{debug, info, warn};
use std::path::Path;
use std::rc::Rc;

fn main() -> Result<()> {
    let args = Args::parse();

    let path_config = PathConfig::from_env_and_cli(args.config_dir.clone());
    init_logging(&args, &path_config)?;
    debug!("Command-line args: {:?}", args);

    let settings_path = config::config_file(config::SETTINGS_FILE, &path_config);
    info!("Settings path: {}", settings_path.display());
    let settings = Settings::load(&settings_path).unwrap_or_else(|e| {
        warn!("{:#}, using defaults", e);
        Settings::default()
    });

    match args.command {
        Command::Order { file, registry, hit_test } => cmd_order(&file, registry.as_deref(), hit_test),
        Command::New { name, mode } => cmd_new(&name, mode.unwrap_or(settings.default_mode)),
        Command::Sample { keys, step } => cmd_sample(keys, step),
        Command::Piecewise { keys, samples } => {
            cmd_piecewise(&keys, samples);
            Ok(())
        }
        Command::Play { keys, fps } => cmd_play(keys, fps.unwrap_or(settings.frame_rate)),
    }
}

/// 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
fn init_logging(args: &Args, path_config: &PathConfig) -> Result<()> {
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = match log_path_opt {
            Some(path) => path.clone(),
            None => {
                config::ensure_dirs(path_config)?;
                config::data_file(config::LOG_FILE, path_config)
            }
        };
        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        // Console logging (respects RUST_LOG if set)
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format_timestamp_millis()
            .init();
    }
    Ok(())
}

fn cmd_order(file: &Path, registry: Option<&Path>, hit_test: bool) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Read composition error: {}", file.display()))?;

    let mut manager = SceneCompositionManager::new();
    let id = manager.import_composition(&json)?;

    let registry = match registry {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Read registry error: {}", path.display()))?;
            serde_json::from_str::<SceneRegistry>(&raw)
                .with_context(|| format!("Parse registry error: {}", path.display()))?
        }
        None => SceneRegistry::new(),
    };

    let order = if hit_test {
        manager.interactive_order(id)
    } else {
        manager.get_render_order(id)
    };
    for scene_id in &order {
        println!("{}", registry.display_name(scene_id));
    }
    Ok(())
}

fn cmd_new(name: &str, mode: CompositionMode) -> Result<()> {
    let mut manager = SceneCompositionManager::new();
    let id = manager.create_composition_project(name, mode);
    println!("{}", manager.export_composition(id)?);
    Ok(())
}

/// Upper bound on rows printed by `sample` and `play`.
const MAX_SAMPLES: usize = 100_000;

/// Rows needed to cover `span` at `step` spacing, both ends included.
fn sample_count(span: f32, step: f32) -> Result<usize> {
    let count = (f64::from(span) / f64::from(step) + 0.5).floor() + 1.0;
    if !(count <= MAX_SAMPLES as f64) {
        return Err(anyhow!(
            "{} samples over {}s at step {} exceeds limit of {}",
            count, span, step, MAX_SAMPLES
        ));
    }
    Ok(count as usize)
}

fn cmd_sample(keys: Vec<Keyframe>, step: f32) -> Result<()> {
    if !(step.is_finite() && step > 0.0) {
        return Err(anyhow!("step must be positive, got {}", step));
    }
    let curve = AnimationCurve::from_keys("value", keys);
    let duration = curve.duration();
    let first = curve.keyframes().first().map(|k| k.time).unwrap_or(0.0);
    let count = sample_count(duration - first, step)?;
    debug!("Sampling {} points from {} to {}", count, first, duration);

    for i in 0..count {
        let t = (first + step * i as f32).min(duration);
        println!("{:.4}\t{:.4}", t, curve.evaluate(t));
    }
    Ok(())
}

fn cmd_piecewise(keys: &[PieceKey], samples: usize) {
    let samples = samples.max(2);
    for i in 0..samples {
        let t = i as f32 / (samples - 1) as f32;
        println!("{:.4}\t{:.4}", t, piecewise_bezier(keys, t));
    }
}

fn cmd_play(keys: Vec<Keyframe>, fps: f32) -> Result<()> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(anyhow!("fps must be positive, got {}", fps));
    }
    let animation = Animation::new("cli").with_curve(AnimationCurve::from_keys("value", keys));
    let mut state = AnimationState::new(Rc::new(animation));
    let dt = 1.0 / fps;
    sample_count(state.duration(), dt)?;

    state.play();
    let mut frame = 0usize;
    println!("{}\t{:.4}\t{:.4}", frame, state.current_time(), state.current_value()[0]);
    while state.is_playing() {
        state.update(dt);
        frame += 1;
        println!("{}\t{:.4}\t{:.4}", frame, state.current_time(), state.current_value()[0]);
    }
    info!("Playback finished after {} frames", frame);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count() {
        assert_eq!(sample_count(2.0, 0.5).unwrap(), 5);
        assert_eq!(sample_count(0.0, 0.1).unwrap(), 1);
        // Partial last step rounds to the nearest row
        assert_eq!(sample_count(1.0, 0.3).unwrap(), 4);
    }

    #[test]
    fn test_sample_count_limit() {
        assert!(sample_count(1.0, 1e-3).is_ok());
        assert!(sample_count(10.0, 1e-9).is_err());
        assert!(sample_count(f32::MAX, 1e-3).is_err());
    }

    #[test]
    fn test_sample_rejects_tiny_step() {
        let keys = vec![Keyframe::new(0.0, 0.0), Keyframe::new(1000.0, 1.0)];
        assert!(cmd_sample(keys, 1e-9).is_err());
    }
}
