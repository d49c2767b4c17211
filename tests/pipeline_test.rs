// End-to-end loop behavior with in-memory source/sink/detector fakes.

use anyhow::anyhow;
use opencv::core::{Mat, Scalar, Vec3b, CV_8UC3};
use opencv::prelude::*;
use rolling_boxes::detect::{BBox, ClassNames, Detection, Detector};
use rolling_boxes::pipeline::process_video;
use rolling_boxes::video::{FrameSink, FrameSource};
use rolling_boxes::Error;

fn solid_frame(width: i32, height: i32, value: f64) -> Mat {
    Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(value)).unwrap()
}

struct FakeSource {
    frames: Vec<Mat>,
    next: usize,
    reported_count: usize,
    width: i32,
    height: i32,
}

impl FakeSource {
    fn new(count: usize, width: i32, height: i32) -> Self {
        Self {
            frames: (0..count).map(|_| solid_frame(width, height, 0.0)).collect(),
            next: 0,
            reported_count: count,
            width,
            height,
        }
    }

    /// A source whose container metadata under-reports the frame count.
    fn with_reported_count(mut self, reported: usize) -> Self {
        self.reported_count = reported;
        self
    }
}

impl FrameSource for FakeSource {
    fn frame_count(&self) -> usize {
        self.reported_count
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn next_frame(&mut self) -> Result<Option<Mat>, Error> {
        if self.next >= self.frames.len() {
            return Ok(None);
        }
        let frame = self.frames[self.next].clone();
        self.next += 1;
        Ok(Some(frame))
    }
}

#[derive(Default)]
struct SinkSpy {
    written: Vec<Mat>,
}

impl FrameSink for SinkSpy {
    fn write_frame(&mut self, frame: &Mat) -> Result<(), Error> {
        self.written.push(frame.clone());
        Ok(())
    }
}

struct FixedDetector(Detection);

impl Detector for FixedDetector {
    fn detect(&mut self, _frame: &Mat) -> anyhow::Result<Vec<Detection>> {
        Ok(vec![self.0.clone()])
    }
}

struct EmptyDetector;

impl Detector for EmptyDetector {
    fn detect(&mut self, _frame: &Mat) -> anyhow::Result<Vec<Detection>> {
        Ok(Vec::new())
    }
}

struct FailingDetector {
    fail_on_call: usize,
    calls: usize,
}

impl Detector for FailingDetector {
    fn detect(&mut self, _frame: &Mat) -> anyhow::Result<Vec<Detection>> {
        self.calls += 1;
        if self.calls == self.fail_on_call {
            return Err(anyhow!("malformed frame data"));
        }
        Ok(Vec::new())
    }
}

fn person_at_10_10_50_50() -> Detection {
    Detection {
        bbox: BBox {
            x1: 10.0,
            y1: 10.0,
            x2: 50.0,
            y2: 50.0,
        },
        class_id: 0,
        confidence: 0.93,
    }
}

#[test]
fn test_ten_frames_annotated_with_stepwise_progress() {
    let mut source = FakeSource::new(10, 100, 100);
    let mut sink = SinkSpy::default();
    let mut detector = FixedDetector(person_at_10_10_50_50());
    let names = ClassNames::from_slice(&["person"]);
    let mut reported = Vec::new();

    let stats = process_video(
        &mut source,
        &mut sink,
        &mut detector,
        &names,
        &mut |pct| reported.push(pct),
    )
    .unwrap();

    assert_eq!(stats.frames, 10);
    assert_eq!(sink.written.len(), 10);
    assert_eq!(reported, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);

    // Every written frame carries the green box border at (10,10)-(50,50)
    for frame in &sink.written {
        let px = frame.at_2d::<Vec3b>(25, 10).unwrap();
        assert_eq!(*px, Vec3b::from([0, 255, 0]));
        let corner = frame.at_2d::<Vec3b>(10, 10).unwrap();
        assert_eq!(corner[1], 255);
    }
}

#[test]
fn test_empty_input_terminates_without_progress() {
    let mut source = FakeSource::new(0, 64, 48);
    let mut sink = SinkSpy::default();
    let mut detector = EmptyDetector;
    let names = ClassNames::default();
    let mut reported = Vec::new();

    let stats = process_video(
        &mut source,
        &mut sink,
        &mut detector,
        &names,
        &mut |pct| reported.push(pct),
    )
    .unwrap();

    assert_eq!(stats.frames, 0);
    assert!(sink.written.is_empty());
    assert!(reported.is_empty());
}

#[test]
fn test_detector_failure_aborts_after_written_frames() {
    let mut source = FakeSource::new(10, 64, 48);
    let mut sink = SinkSpy::default();
    let mut detector = FailingDetector {
        fail_on_call: 5,
        calls: 0,
    };
    let names = ClassNames::default();
    let mut reported = Vec::new();

    let err = process_video(
        &mut source,
        &mut sink,
        &mut detector,
        &names,
        &mut |pct| reported.push(pct),
    )
    .unwrap_err();

    match err {
        Error::Inference { frame, .. } => assert_eq!(frame, 4),
        other => panic!("Expected Inference error, got {other}"),
    }
    // Frames 1..=4 were already written before the failing frame
    assert_eq!(sink.written.len(), 4);
    assert_eq!(reported, vec![10, 20, 30, 40]);
}

#[test]
fn test_zero_detections_round_trips_pixels() {
    let mut source = FakeSource::new(3, 64, 48);
    // Pattern the frames so an accidental draw would show up
    for frame in &mut source.frames {
        *frame = solid_frame(64, 48, 37.0);
    }
    let reference = solid_frame(64, 48, 37.0);

    let mut sink = SinkSpy::default();
    let mut detector = EmptyDetector;
    let names = ClassNames::default();

    process_video(&mut source, &mut sink, &mut detector, &names, &mut |_| {}).unwrap();

    assert_eq!(sink.written.len(), 3);
    for frame in &sink.written {
        assert_eq!(
            frame.data_bytes().unwrap(),
            reference.data_bytes().unwrap()
        );
    }
}

#[test]
fn test_output_frame_count_matches_decoded_frames() {
    let mut source = FakeSource::new(7, 32, 32);
    let mut sink = SinkSpy::default();
    let mut detector = EmptyDetector;
    let names = ClassNames::default();

    let stats =
        process_video(&mut source, &mut sink, &mut detector, &names, &mut |_| {}).unwrap();

    assert_eq!(stats.frames, 7);
    assert_eq!(sink.written.len(), 7);
}

#[test]
fn test_progress_stays_clamped_when_container_under_reports() {
    // 5 decodable frames, container claims 3
    let mut source = FakeSource::new(5, 32, 32).with_reported_count(3);
    let mut sink = SinkSpy::default();
    let mut detector = EmptyDetector;
    let names = ClassNames::default();
    let mut reported = Vec::new();

    process_video(
        &mut source,
        &mut sink,
        &mut detector,
        &names,
        &mut |pct| reported.push(pct),
    )
    .unwrap();

    assert_eq!(reported.len(), 5);
    assert!(reported.iter().all(|&p| p <= 100));
    assert!(reported.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*reported.last().unwrap(), 100);
}

#[test]
fn test_deterministic_detector_gives_identical_annotations() {
    let names = ClassNames::from_slice(&["person"]);

    let mut first_run = SinkSpy::default();
    let mut source = FakeSource::new(4, 100, 100);
    let mut detector = FixedDetector(person_at_10_10_50_50());
    process_video(&mut source, &mut first_run, &mut detector, &names, &mut |_| {}).unwrap();

    let mut second_run = SinkSpy::default();
    let mut source = FakeSource::new(4, 100, 100);
    let mut detector = FixedDetector(person_at_10_10_50_50());
    process_video(&mut source, &mut second_run, &mut detector, &names, &mut |_| {}).unwrap();

    for (a, b) in first_run.written.iter().zip(&second_run.written) {
        assert_eq!(a.data_bytes().unwrap(), b.data_bytes().unwrap());
    }
}
