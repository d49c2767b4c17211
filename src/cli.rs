use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input video file (mp4, avi, mov, mkv)
    pub input: PathBuf,

    /// Path for the annotated output video
    pub output: PathBuf,

    /// Path to the RT-DETR model file
    #[arg(long, env = "ROLLING_BOXES_MODEL")]
    pub model: String,

    /// Discard detections below this confidence
    #[arg(long, default_value_t = 0.25)]
    pub min_confidence: f32,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
