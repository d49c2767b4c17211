use super::{BBox, ClassNames, Detection, Detector};
use anyhow::{anyhow, Result};
use image::{DynamicImage, ImageBuffer, Rgb};
use opencv::core::Mat;
use opencv::prelude::*;
use usls::models::RTDETR;
use usls::{Config, Image};

/// USLS RT-DETR adapter. Handles the BGR-to-RGB conversion and corrects for
/// aspect-ratio padding bugs in the underlying model library, and filters
/// detections below a confidence floor.
pub struct RtdetrDetector {
    model: RTDETR,
    min_confidence: f32,
}

impl RtdetrDetector {
    /// Loads the model once; the instance is reused across every frame.
    pub fn new(model_path: &str, min_confidence: f32) -> Result<Self> {
        let config = Config::default()
            .with_model_file(model_path)
            .with_class_names(&usls::NAMES_COCO_80);

        #[cfg(target_os = "macos")]
        let config = config.with_model_device(usls::Device::CoreMl);

        let config = config.commit()?;
        let model = RTDETR::new(config)?;
        Ok(Self {
            model,
            min_confidence,
        })
    }

    /// The class table this model was configured with.
    pub fn class_names(&self) -> ClassNames {
        ClassNames::from_slice(&usls::NAMES_COCO_80)
    }
}

impl Detector for RtdetrDetector {
    fn detect(&mut self, frame: &Mat) -> Result<Vec<Detection>> {
        let dynamic_image = mat_to_dynamic_image(frame)?;

        // Correction factors (USLS RT-DETR padding bug workaround)
        let size = frame.size()?;
        let img_w = size.width as f32;
        let img_h = size.height as f32;
        let (x_corr, y_corr) = if img_w > img_h {
            (img_w / img_h, 1.0)
        } else if img_h > img_w {
            (1.0, img_h / img_w)
        } else {
            (1.0, 1.0)
        };

        let results = self.model.forward(&[Image::from(dynamic_image)])?;

        let mut detections = Vec::new();
        if let Some(y) = results.into_iter().next() {
            for hbb in y.hbbs {
                let confidence = hbb.confidence().unwrap_or(0.0);
                if confidence < self.min_confidence {
                    continue;
                }

                let x1 = hbb.xmin() * x_corr;
                let y1 = hbb.ymin() * y_corr;
                let x2 = x1 + hbb.width() * x_corr;
                let y2 = y1 + hbb.height() * y_corr;

                detections.push(Detection {
                    bbox: BBox { x1, y1, x2, y2 },
                    class_id: hbb.id().unwrap_or_default() as usize,
                    confidence,
                });
            }
        }

        Ok(detections)
    }
}

/// Convert an OpenCV Mat (BGR) to an image::DynamicImage (RGB)
fn mat_to_dynamic_image(mat: &Mat) -> Result<DynamicImage> {
    let mut rgb_mat = Mat::default();
    opencv::imgproc::cvt_color_def(mat, &mut rgb_mat, opencv::imgproc::COLOR_BGR2RGB)?;

    let size = rgb_mat.size()?;
    let width = size.width as u32;
    let height = size.height as u32;

    if !rgb_mat.is_continuous() {
        return Err(anyhow!("Mat is not continuous"));
    }

    let data_bytes = rgb_mat.data_bytes()?;
    let buffer = data_bytes.to_vec();

    let img_buffer = ImageBuffer::<Rgb<u8>, _>::from_vec(width, height, buffer)
        .ok_or_else(|| anyhow!("Failed to create ImageBuffer from Mat data"))?;

    Ok(DynamicImage::ImageRgb8(img_buffer))
}
