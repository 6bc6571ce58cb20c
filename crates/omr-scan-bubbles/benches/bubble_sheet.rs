use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use omr_scan_bubbles::{BubbleSheetDetector, BubbleSheetParams};
use omr_scan_core::{CircleCandidate, GrayImage};

/// Synthetic A4-ish page with `rows` YES/NO rows, every third row marked YES.
fn synthetic_sheet(rows: usize) -> (GrayImage, Vec<CircleCandidate>) {
    let mut img = GrayImage::filled(1240, 1754, 245);
    let mut circles = Vec::with_capacity(rows * 2 + 8);
    for k in 0..rows {
        let y = 500 + 45 * k as i32;
        for (x, filled) in [(900, k % 3 == 0), (980, false)] {
            let c = CircleCandidate::new(x, y, 14);
            img.fill_disc(c.center, c.radius, 15);
            if !filled {
                img.fill_disc(c.center, c.radius - 2, 245);
            }
            circles.push(c);
        }
    }
    // text glyph noise on the left half
    for k in 0..8 {
        circles.push(CircleCandidate::new(100 + 40 * k, 600, 9));
    }
    (img, circles)
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("bubble_sheet_detect");
    let detector = BubbleSheetDetector::new(BubbleSheetParams::default());
    for rows in [10usize, 25] {
        let (img, circles) = synthetic_sheet(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter(|| {
                let det = detector.detect(&img.view(), black_box(&circles), rows);
                black_box(det)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
