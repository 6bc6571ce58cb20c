use nalgebra::Point2;

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Uniform image filled with `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Paint a solid disc, clipped to the image bounds.
    pub fn fill_disc(&mut self, center: Point2<i32>, radius: i32, value: u8) {
        for_each_in_disc(self.width, self.height, center, radius, |x, y| {
            self.data[y * self.width + x] = value;
        });
    }
}

impl GrayImageView<'_> {
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.data[y as usize * self.width + x as usize])
    }
}

/// Mean intensity over the pixels with `dx² + dy² <= radius²`.
///
/// Pixels outside the image are skipped. Returns `None` when the disc does not
/// overlap the image at all.
pub fn mean_in_disc(img: &GrayImageView<'_>, center: Point2<i32>, radius: i32) -> Option<f32> {
    let mut sum = 0u64;
    let mut count = 0u64;
    for_each_in_disc(img.width, img.height, center, radius, |x, y| {
        sum += img.data[y * img.width + x] as u64;
        count += 1;
    });
    if count == 0 {
        return None;
    }
    Some(sum as f32 / count as f32)
}

fn for_each_in_disc(
    width: usize,
    height: usize,
    center: Point2<i32>,
    radius: i32,
    mut f: impl FnMut(usize, usize),
) {
    if radius < 0 {
        return;
    }
    let r2 = radius * radius;
    let y0 = (center.y - radius).max(0);
    let y1 = (center.y + radius).min(height as i32 - 1);
    let x0 = (center.x - radius).max(0);
    let x1 = (center.x + radius).min(width as i32 - 1);
    for y in y0..=y1 {
        let dy = y - center.y;
        for x in x0..=x1 {
            let dx = x - center.x;
            if dx * dx + dy * dy <= r2 {
                f(x as usize, y as usize);
            }
        }
    }
}
