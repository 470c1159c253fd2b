// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the detection pipeline. Runs the full
// per-frame path (preprocess, extraction, tracking) on a small synthetic
// frame with a clear document rectangle.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{GrayImage, Luma};

use scanwerk_core::config::DetectionConfig;
use scanwerk_core::types::{FrameView, Point, Quad};
use scanwerk_detect::{crop_document, ScanSession};

/// Dark frame with a bright centred rectangle, the best case for the
/// contour strategy — which is also the hot path on real scans.
fn synthetic_frame(width: u32, height: u32) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([25u8]));
    let (x0, y0) = (width / 5, height / 6);
    let (x1, y1) = (width - x0, height - y0);
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, Luma([235u8]));
        }
    }
    img
}

fn bench_process_frame(c: &mut Criterion) {
    let img = synthetic_frame(320, 240);
    let session = ScanSession::new(DetectionConfig::default());

    c.bench_function("process_frame (320x240)", |b| {
        b.iter(|| {
            let frame = FrameView::from_gray(black_box(&img));
            let result = session.process_frame(&frame);
            black_box(result.expect("frame processed"));
        });
    });
}

fn bench_crop_document(c: &mut Criterion) {
    let img = synthetic_frame(320, 240);
    let quad = Quad::new([
        Point::new(64.0, 40.0),
        Point::new(256.0, 40.0),
        Point::new(256.0, 200.0),
        Point::new(64.0, 200.0),
    ]);

    c.bench_function("crop_document (320x240)", |b| {
        b.iter(|| {
            let frame = FrameView::from_gray(black_box(&img));
            let crop = crop_document(&frame, black_box(&quad));
            black_box(crop.expect("rectified"));
        });
    });
}

criterion_group!(benches, bench_process_frame, bench_crop_document);
criterion_main!(benches);
