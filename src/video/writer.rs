use super::FrameSink;
use crate::error::Error;
use opencv::{
    core::{Mat, Size},
    prelude::*,
    videoio::VideoWriter,
};
use std::path::Path;

/// The output frame rate is fixed regardless of the input's rate. Inherited
/// behavior: inputs recorded at another rate play back with a shifted
/// duration. Do not change without also resampling frames.
pub const OUTPUT_FPS: f64 = 30.0;

/// An mp4 file opened for sequential encoding with the `mp4v` codec tag.
pub struct Mp4Writer {
    writer: VideoWriter,
    frames_written: usize,
}

impl Mp4Writer {
    /// Opens the output file. Dimensions must match the frames that will be
    /// written; OpenCV silently drops mismatched frames otherwise.
    pub fn create(path: &Path, width: i32, height: i32) -> Result<Self, Error> {
        let path_str = path.to_string_lossy();
        let unwritable = || Error::UnwritableSink {
            path: path_str.to_string(),
        };

        let fourcc = VideoWriter::fourcc('m', 'p', '4', 'v')?;
        let writer = VideoWriter::new(
            path_str.as_ref(),
            fourcc,
            OUTPUT_FPS,
            Size::new(width, height),
            true,
        )
        .map_err(|_| unwritable())?;
        if !writer.is_opened()? {
            return Err(unwritable());
        }

        tracing::info!(
            "Mp4Writer: opened {}, {}x{} @ {:.1} fps",
            path_str,
            width,
            height,
            OUTPUT_FPS
        );

        Ok(Self {
            writer,
            frames_written: 0,
        })
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Flushes and closes the encoder. Dropping the writer releases it too;
    /// call this before reading the file back.
    pub fn release(&mut self) -> Result<(), Error> {
        self.writer.release()?;
        Ok(())
    }
}

impl FrameSink for Mp4Writer {
    fn write_frame(&mut self, frame: &Mat) -> Result<(), Error> {
        self.writer.write(frame)?;
        self.frames_written += 1;
        Ok(())
    }
}
