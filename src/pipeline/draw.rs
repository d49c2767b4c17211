// Annotation drawing: fixed green rectangle plus "<name> <conf>" label.

use crate::detect::{ClassNames, Detection};
use crate::error::Error;
use opencv::core::{Mat, Point, Rect, Scalar};
use opencv::imgproc::{put_text, rectangle, FONT_HERSHEY_SIMPLEX, LINE_8};

const BOX_THICKNESS: i32 = 2;
const LABEL_SCALE: f64 = 0.5;
// Baseline offset so the label sits just above the box's top-left corner
const LABEL_OFFSET_Y: i32 = 10;

fn box_color() -> Scalar {
    Scalar::new(0.0, 255.0, 0.0, 0.0) // Green (BGR)
}

/// Draws every detection onto the frame in place. An empty slice leaves the
/// pixels untouched.
pub fn draw_detections(
    frame: &mut Mat,
    detections: &[Detection],
    names: &ClassNames,
) -> Result<(), Error> {
    for det in detections {
        let x1 = det.bbox.x1 as i32;
        let y1 = det.bbox.y1 as i32;
        let x2 = det.bbox.x2 as i32;
        let y2 = det.bbox.y2 as i32;

        let rect = Rect::new(x1, y1, x2 - x1, y2 - y1);
        rectangle(frame, rect, box_color(), BOX_THICKNESS, LINE_8, 0)?;

        let label = format!("{} {:.2}", names.label(det.class_id), det.confidence);
        put_text(
            frame,
            &label,
            Point::new(x1, y1 - LABEL_OFFSET_Y),
            FONT_HERSHEY_SIMPLEX,
            LABEL_SCALE,
            box_color(),
            BOX_THICKNESS,
            LINE_8,
            false,
        )?;
    }

    Ok(())
}
