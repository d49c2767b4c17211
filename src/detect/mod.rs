// Detection capability boundary: the pipeline sees a trait, not a model.

pub mod rtdetr;

use opencv::core::Mat;

/// Axis-aligned box in pixel coordinates, `x1 < x2`, `y1 < y2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// One model observation on one frame. Never persisted; consumed by drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub bbox: BBox,
    pub class_id: usize,
    pub confidence: f32,
}

/// Read-only class-id to name table, supplied once at startup.
#[derive(Debug, Clone, Default)]
pub struct ClassNames {
    names: Vec<String>,
}

impl ClassNames {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn from_slice(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Human-readable name for a class id. A detector/table mismatch degrades
    /// the label rather than the run.
    pub fn label(&self, class_id: usize) -> String {
        self.names
            .get(class_id)
            .cloned()
            .unwrap_or_else(|| format!("class {class_id}"))
    }
}

/// The black-box object-detection capability: one frame in, boxes out.
/// Implementations are stateless per call; the loaded model instance is
/// reused read-only across all frames of a run.
pub trait Detector {
    fn detect(&mut self, frame: &Mat) -> anyhow::Result<Vec<Detection>>;
}
