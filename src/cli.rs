use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::entities::{CompositionMode, Easing, Keyframe, PieceKey};

/// Keyframe animation and scene composition inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable logging to file (default: scenery.log in the data directory)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE", global = true)]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the render order of an exported composition
    Order {
        /// Exported composition JSON
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Scene registry JSON used to print display names
        #[arg(short = 'r', long = "registry", value_name = "FILE")]
        registry: Option<PathBuf>,

        /// Print hit-test order (front to back) instead
        #[arg(long = "hit-test")]
        hit_test: bool,
    },

    /// Create an empty composition and print its JSON
    New {
        /// Composition name
        name: String,

        /// LAYERED, SWITCH or HYBRID (default from settings)
        #[arg(short = 'm', long = "mode", value_parser = parse_mode)]
        mode: Option<CompositionMode>,
    },

    /// Sample a keyframed curve at a fixed step
    Sample {
        /// Keyframe as TIME:VALUE (repeatable)
        #[arg(short = 'k', long = "key", value_name = "T:V", value_parser = parse_keyframe, required = true)]
        keys: Vec<Keyframe>,

        /// Sampling step in seconds
        #[arg(short = 's', long = "step", default_value_t = 0.1)]
        step: f32,
    },

    /// Sample evenly spaced eased keys over [0, 1]
    Piecewise {
        /// Key as VALUE[:EASING] (linear, easeIn, easeOut, easeInOut; repeatable)
        #[arg(short = 'k', long = "key", value_name = "V[:E]", value_parser = parse_piece_key, required = true)]
        keys: Vec<PieceKey>,

        /// Number of samples
        #[arg(short = 'n', long = "samples", default_value_t = 11)]
        samples: usize,
    },

    /// Play a curve through a playback cursor, one line per tick
    Play {
        /// Keyframe as TIME:VALUE (repeatable)
        #[arg(short = 'k', long = "key", value_name = "T:V", value_parser = parse_keyframe, required = true)]
        keys: Vec<Keyframe>,

        /// Ticks per second (default from settings)
        #[arg(long = "fps")]
        fps: Option<f32>,
    },
}

pub fn parse_mode(s: &str) -> Result<CompositionMode, String> {
    CompositionMode::parse(s).ok_or_else(|| format!("unknown mode '{}' (LAYERED, SWITCH, HYBRID)", s))
}

pub fn parse_keyframe(s: &str) -> Result<Keyframe, String> {
    let (t, v) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TIME:VALUE, got '{}'", s))?;
    let time = t.trim().parse::<f32>().map_err(|e| format!("bad time '{}': {}", t, e))?;
    let value = v.trim().parse::<f32>().map_err(|e| format!("bad value '{}': {}", v, e))?;
    if !(time.is_finite() && value.is_finite()) {
        return Err(format!("keyframe must be finite, got '{}'", s));
    }
    Ok(Keyframe::new(time, value))
}

pub fn parse_piece_key(s: &str) -> Result<PieceKey, String> {
    let (v, e) = s.split_once(':').unwrap_or((s, "linear"));
    let value = v.trim().parse::<f32>().map_err(|err| format!("bad value '{}': {}", v, err))?;
    let easing = match e.trim() {
        "linear" => Easing::Linear,
        "easeIn" => Easing::EaseIn,
        "easeOut" => Easing::EaseOut,
        "easeInOut" => Easing::EaseInOut,
        other => return Err(format!("unknown easing '{}'", other)),
    };
    Ok(PieceKey::new(value, easing))
}
