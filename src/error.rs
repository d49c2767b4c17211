//! Error types for the annotation pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not exist or the container cannot be decoded.
    #[error("Cannot open video source: {path}")]
    UnreadableSource { path: String },

    /// The output path cannot be opened for the fixed codec/container.
    #[error("Cannot open video sink: {path}")]
    UnwritableSink { path: String },

    /// The detection capability failed on a frame. Aborts the run;
    /// frames written before this one remain in the output file.
    #[error("Detection failed on frame {frame}: {source}")]
    Inference {
        frame: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("OpenCV error: {0}")]
    OpenCv(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<opencv::Error> for Error {
    fn from(err: opencv::Error) -> Self {
        Error::OpenCv(err.message)
    }
}
