// Video annotation pipeline: decode a video, run object detection on every
// frame, draw boxes and labels, encode the result, report progress.

pub mod detect;
pub mod error;
pub mod pipeline;
pub mod staging;
pub mod video;

pub use error::Error;
