// Sequential frame decode/encode abstraction over OpenCV's videoio.

pub mod reader;
pub mod writer;

use crate::error::Error;
use opencv::core::Mat;

/// A sequential source of decoded frames. Finite and not restartable; a new
/// open is required to read the stream again.
pub trait FrameSource {
    /// Best-effort total frame count from container metadata. Some containers
    /// misreport this; callers must tolerate drift.
    fn frame_count(&self) -> usize;
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    /// The next decoded frame, or `None` at end of stream.
    fn next_frame(&mut self) -> Result<Option<Mat>, Error>;
}

/// A sink that encodes frames one at a time in read order.
pub trait FrameSink {
    fn write_frame(&mut self, frame: &Mat) -> Result<(), Error>;
}
