// Frame processing loop: read, detect, draw, write, report progress.

pub mod draw;

use crate::detect::{ClassNames, Detector};
use crate::error::Error;
use crate::video::{FrameSink, FrameSource};
use std::time::{Duration, Instant};

pub struct RunStats {
    pub frames: usize,
    pub elapsed: Duration,
}

/// Percent complete as a floored integer. `total` comes from container
/// metadata and may under-report, so the result is clamped to 100; a zero
/// total reports 0 rather than dividing.
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (done * 100 / total).min(100) as u8
}

/// Drives the source to exhaustion: each frame is detected on, annotated in
/// place, written to the sink, and acknowledged through `progress` with a
/// non-decreasing value in [0, 100]. At most one progress call per frame;
/// none at all for an empty input.
///
/// A detector failure aborts the run with `Error::Inference`; frames written
/// before the failure remain in the output file. Source and sink handles are
/// released by their owners on every exit path.
pub fn process_video(
    source: &mut dyn FrameSource,
    sink: &mut dyn FrameSink,
    detector: &mut dyn Detector,
    names: &ClassNames,
    progress: &mut dyn FnMut(u8),
) -> Result<RunStats, Error> {
    let start = Instant::now();
    let total = source.frame_count();
    tracing::info!(
        "process_video: {} frames reported, {}x{}",
        total,
        source.width(),
        source.height()
    );

    let mut processed = 0usize;
    while let Some(mut frame) = source.next_frame()? {
        let detections = detector
            .detect(&frame)
            .map_err(|source| Error::Inference {
                frame: processed,
                source,
            })?;

        draw::draw_detections(&mut frame, &detections, names)?;
        sink.write_frame(&frame)?;

        processed += 1;
        progress(percent(processed, total));
    }

    if processed != total {
        tracing::warn!(
            "process_video: container reported {} frames, decoded {}",
            total,
            processed
        );
    }

    Ok(RunStats {
        frames: processed,
        elapsed: start.elapsed(),
    })
}
