mod cli;

use anyhow::{Context, Result};
use cli::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rolling_boxes::detect::rtdetr::RtdetrDetector;
use rolling_boxes::pipeline::process_video;
use rolling_boxes::staging::StagedRun;
use rolling_boxes::video::reader::VideoFile;
use rolling_boxes::video::writer::Mp4Writer;
use rolling_boxes::video::FrameSource;

fn main() -> Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = Args::parse_args();

    let staging = StagedRun::create()?;
    let staged_input = staging.stage_input(&args.input)?;

    let mut source = VideoFile::open(&staged_input)?;
    let mut sink = Mp4Writer::create(&staging.output_path(), source.width(), source.height())?;

    let mut detector = RtdetrDetector::new(&args.model, args.min_confidence)
        .with_context(|| format!("Failed to load model: {}", args.model))?;
    let names = detector.class_names();

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}%")?
            .progress_chars("#>-"),
    );

    let stats = process_video(
        &mut source,
        &mut sink,
        &mut detector,
        &names,
        &mut |pct| pb.set_position(pct as u64),
    )?;
    pb.finish_with_message("Done");

    sink.release()?;
    staging
        .persist(&args.output)
        .context("Failed to persist output video")?;

    tracing::info!(
        "Processed {} frames in {:.2?} -> {}",
        stats.frames,
        stats.elapsed,
        args.output.display()
    );

    Ok(())
}
