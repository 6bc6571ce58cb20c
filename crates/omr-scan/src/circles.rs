//! Circle candidates for the bubble reader.
//!
//! [`HoughCircleDetector`] is a gradient Hough transform: Canny edges vote
//! along their Sobel gradient direction into a down-scaled accumulator, local
//! maxima become centres, and each centre takes the radius with the most edge
//! support around it. Any other source of circles can be plugged in through
//! [`CircleDetector`].

use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use omr_scan_core::CircleCandidate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Source of circle candidates for a grayscale page.
pub trait CircleDetector {
    fn detect_circles(&self, img: &GrayImage) -> Vec<CircleCandidate>;
}

impl<T: CircleDetector + ?Sized> CircleDetector for &T {
    fn detect_circles(&self, img: &GrayImage) -> Vec<CircleCandidate> {
        (**self).detect_circles(img)
    }
}

/// Parameters of the gradient Hough transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughCircleParams {
    /// Gaussian pre-blur sigma; `0` disables it.
    pub blur_sigma: f32,
    /// Inverse accumulator resolution: `2.0` means half the image resolution.
    pub dp: f32,
    /// Minimum distance between detected centres, in pixels.
    pub min_dist: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    /// Votes an accumulator cell needs to become a centre.
    pub accumulator_threshold: u32,
    pub min_radius: u32,
    pub max_radius: u32,
}

impl Default for HoughCircleParams {
    fn default() -> Self {
        Self {
            blur_sigma: 1.1,
            dp: 1.2,
            min_dist: 20.0,
            canny_low: 25.0,
            canny_high: 50.0,
            accumulator_threshold: 25,
            min_radius: 8,
            max_radius: 30,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct HoughCircleDetector {
    pub params: HoughCircleParams,
}

impl HoughCircleDetector {
    pub fn new(params: HoughCircleParams) -> Self {
        Self { params }
    }
}

impl CircleDetector for HoughCircleDetector {
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, img), fields(width = img.width(), height = img.height()))
    )]
    fn detect_circles(&self, img: &GrayImage) -> Vec<CircleCandidate> {
        let circles = hough_circles(img, &self.params);
        log::debug!("hough: {} circle(s)", circles.len());
        circles
    }
}

struct Accumulator {
    width: usize,
    height: usize,
    dp: f32,
    votes: Vec<u32>,
}

impl Accumulator {
    fn new(img_width: u32, img_height: u32, dp: f32) -> Self {
        let width = (img_width as f32 / dp).ceil() as usize;
        let height = (img_height as f32 / dp).ceil() as usize;
        Self {
            width,
            height,
            dp,
            votes: vec![0; width * height],
        }
    }

    fn vote(&mut self, x: f32, y: f32) {
        let ax = (x / self.dp).floor();
        let ay = (y / self.dp).floor();
        if ax < 0.0 || ay < 0.0 {
            return;
        }
        let (ax, ay) = (ax as usize, ay as usize);
        if ax < self.width && ay < self.height {
            self.votes[ay * self.width + ax] += 1;
        }
    }

    /// Cells above `threshold` that beat their 4-neighbourhood, strongest first.
    fn peaks(&self, threshold: u32) -> Vec<(usize, usize, u32)> {
        let w = self.width;
        let at = |x: usize, y: usize| self.votes[y * w + x];
        let mut peaks = Vec::new();
        for y in 1..self.height.saturating_sub(1) {
            for x in 1..w.saturating_sub(1) {
                let v = at(x, y);
                if v > threshold
                    && v > at(x - 1, y)
                    && v >= at(x + 1, y)
                    && v > at(x, y - 1)
                    && v >= at(x, y + 1)
                {
                    peaks.push((x, y, v));
                }
            }
        }
        // raster order breaks ties
        peaks.sort_by(|a, b| b.2.cmp(&a.2).then((a.1, a.0).cmp(&(b.1, b.0))));
        peaks
    }

    fn cell_center(&self, ax: usize, ay: usize) -> (f32, f32) {
        ((ax as f32 + 0.5) * self.dp, (ay as f32 + 0.5) * self.dp)
    }
}

/// Run the gradient Hough transform over `img`.
pub fn hough_circles(img: &GrayImage, params: &HoughCircleParams) -> Vec<CircleCandidate> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || params.max_radius < params.min_radius || params.dp <= 0.0 {
        return Vec::new();
    }

    let smoothed = if params.blur_sigma > 0.0 {
        gaussian_blur_f32(img, params.blur_sigma)
    } else {
        img.clone()
    };
    let edges = canny(&smoothed, params.canny_low, params.canny_high);
    let gx = horizontal_sobel(&smoothed);
    let gy = vertical_sobel(&smoothed);

    let min_r = params.min_radius.max(1);
    let max_r = params.max_radius;
    let mut acc = Accumulator::new(w, h, params.dp);
    let mut edge_count = 0usize;
    for (x, y, px) in edges.enumerate_pixels() {
        if px.0[0] == 0 {
            continue;
        }
        let dx = gx.get_pixel(x, y).0[0] as f32;
        let dy = gy.get_pixel(x, y).0[0] as f32;
        let mag = dx.hypot(dy);
        if mag < 1.0 {
            continue;
        }
        edge_count += 1;
        let (ux, uy) = (dx / mag, dy / mag);
        for r in min_r..=max_r {
            let r = r as f32;
            for sign in [-1.0f32, 1.0] {
                acc.vote(x as f32 + sign * ux * r, y as f32 + sign * uy * r);
            }
        }
    }
    if edge_count == 0 {
        return Vec::new();
    }

    let min_dist2 = params.min_dist * params.min_dist;
    let mut accepted: Vec<(f32, f32)> = Vec::new();
    let mut circles = Vec::new();
    for (ax, ay, _) in acc.peaks(params.accumulator_threshold) {
        let (cx, cy) = acc.cell_center(ax, ay);
        let crowded = accepted.iter().any(|&(px, py)| {
            let (ddx, ddy) = (px - cx, py - cy);
            ddx * ddx + ddy * ddy < min_dist2
        });
        if crowded {
            continue;
        }
        let Some(radius) = best_radius(&edges, cx, cy, min_r, max_r) else {
            continue;
        };
        accepted.push((cx, cy));
        circles.push(CircleCandidate::new(
            cx.round() as i32,
            cy.round() as i32,
            radius as i32,
        ));
    }
    circles
}

/// Radius in `[min_r, max_r]` with the most edge pixels at that distance.
///
/// Counts are divided by the radius so larger rings do not win on length alone.
fn best_radius(edges: &GrayImage, cx: f32, cy: f32, min_r: u32, max_r: u32) -> Option<u32> {
    let (w, h) = edges.dimensions();
    let reach = max_r as f32 + 1.0;
    let x0 = (cx - reach).floor().max(0.0) as u32;
    let y0 = (cy - reach).floor().max(0.0) as u32;
    let x1 = ((cx + reach).ceil() as u32).min(w - 1);
    let y1 = ((cy + reach).ceil() as u32).min(h - 1);

    let mut hist = vec![0u32; (max_r - min_r + 1) as usize];
    for y in y0..=y1 {
        for x in x0..=x1 {
            if edges.get_pixel(x, y).0[0] == 0 {
                continue;
            }
            let d = (x as f32 - cx).hypot(y as f32 - cy).round() as u32;
            if (min_r..=max_r).contains(&d) {
                hist[(d - min_r) as usize] += 1;
            }
        }
    }

    let mut best: Option<(u32, f32)> = None;
    for (i, &count) in hist.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let r = min_r + i as u32;
        let score = count as f32 / r as f32;
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((r, score));
        }
    }
    best.map(|(r, _)| r)
}
