use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line.
#[derive(Debug, Clone, ValueEnum)]
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

/// Command line surface of the renderer.
#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "A band-parallel recursive ray tracer")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "780")]
    pub height: u32,

    /// Number of horizontal bands rendered concurrently
    #[arg(long, short = 'r', default_value = "8")]
    pub regions: u32,

    /// Worker thread count (defaults to the machine's parallelism)
    #[arg(long, short = 't')]
    pub threads: Option<usize>,

    /// Maximum recursive bounce depth
    #[arg(long, default_value = "4")]
    pub max_depth: u32,

    /// Stochastic reflection samples per bounce
    #[arg(long, default_value = "3")]
    pub branch_factor: u32,

    /// Number of animation frames to render
    #[arg(long, short = 'f', default_value = "1")]
    pub frames: u32,

    /// Output file path (.png)
    #[arg(short, long, default_value = "render.png")]
    pub output: String,

    /// Logging level
    #[arg(long, default_value = "info")]
    pub debug_level: LogLevel,
}
