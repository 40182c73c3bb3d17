use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pinhole")]
#[command(about = "Render a scene with the pinhole ray tracer", long_about = None)]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: usize,

    /// Image height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: usize,

    /// Number of column chunks rendered in parallel (default: one per hardware thread)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// TOML scene description (default: built-in demo scene)
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Print the scene description as TOML and exit
    #[arg(long)]
    pub dump_scene: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["pinhole"]);
        assert_eq!(args.width, 1280);
        assert_eq!(args.height, 720);
        assert_eq!(args.threads, None);
        assert_eq!(args.scene, None);
        assert_eq!(args.output, PathBuf::from("render.png"));
        assert_eq!(args.log_level, LogLevel::Info);
        assert!(!args.dump_scene);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "pinhole",
            "--width",
            "320",
            "--height",
            "200",
            "-t",
            "4",
            "--scene",
            "room.toml",
            "--log-level",
            "debug",
        ]);
        assert_eq!((args.width, args.height), (320, 200));
        assert_eq!(args.threads, Some(4));
        assert_eq!(args.scene, Some(PathBuf::from("room.toml")));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_bad_level() {
        assert!(Args::try_parse_from(["pinhole", "--log-level", "loud"]).is_err());
    }
}
