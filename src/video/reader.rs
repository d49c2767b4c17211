use super::FrameSource;
use crate::error::Error;
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{
        VideoCapture, CAP_ANY, CAP_PROP_FPS, CAP_PROP_FRAME_COUNT, CAP_PROP_FRAME_HEIGHT,
        CAP_PROP_FRAME_WIDTH,
    },
};
use std::path::Path;

/// A video file opened for sequential decoding.
pub struct VideoFile {
    capture: VideoCapture,
    frame_count: usize,
    width: i32,
    height: i32,
}

impl VideoFile {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let path_str = path.to_string_lossy();
        let unreadable = || Error::UnreadableSource {
            path: path_str.to_string(),
        };

        let capture = VideoCapture::from_file(path_str.as_ref(), CAP_ANY).map_err(|_| unreadable())?;
        if !capture.is_opened()? {
            return Err(unreadable());
        }

        let fps = capture.get(CAP_PROP_FPS)?;
        let raw_count = capture.get(CAP_PROP_FRAME_COUNT)?;
        // Streams and some containers report a non-positive count
        let frame_count = if raw_count > 0.0 { raw_count as usize } else { 0 };
        let width = capture.get(CAP_PROP_FRAME_WIDTH)? as i32;
        let height = capture.get(CAP_PROP_FRAME_HEIGHT)? as i32;

        tracing::info!(
            "VideoFile: opened {}, {}x{}, fps={:.2}, stream_frames={}",
            path_str,
            width,
            height,
            fps,
            frame_count
        );

        Ok(Self {
            capture,
            frame_count,
            width,
            height,
        })
    }
}

impl FrameSource for VideoFile {
    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn next_frame(&mut self) -> Result<Option<Mat>, Error> {
        let mut frame = Mat::default();
        let success = self.capture.read(&mut frame)?;
        if !success || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }
}
