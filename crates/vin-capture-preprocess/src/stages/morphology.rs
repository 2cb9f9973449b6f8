use crate::KernelSize;
use vin_capture_core::GrayImage;

#[derive(Clone, Copy)]
enum Rank {
    Max,
    Min,
}

/// Square-window max/min filter, run as a horizontal then a vertical pass.
///
/// A square structuring element is separable for rank-extreme filters, so
/// the two 1D passes equal the full 2D window (clipped at the borders).
fn rank_filter(img: &GrayImage, radius: usize, rank: Rank) -> GrayImage {
    let (w, h) = (img.width, img.height);
    if radius == 0 || w == 0 || h == 0 {
        return img.clone();
    }
    let pick = |a: u8, b: u8| match rank {
        Rank::Max => a.max(b),
        Rank::Min => a.min(b),
    };

    let mut horiz = GrayImage::new(w, h);
    for y in 0..h {
        let row = &img.data[y * w..(y + 1) * w];
        for x in 0..w {
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius).min(w - 1);
            let v = row[x0..=x1].iter().copied().reduce(pick).unwrap_or(row[x]);
            horiz.data[y * w + x] = v;
        }
    }

    let mut out = GrayImage::new(w, h);
    for y in 0..h {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius).min(h - 1);
        for x in 0..w {
            let mut v = horiz.data[y0 * w + x];
            for yy in y0 + 1..=y1 {
                v = pick(v, horiz.data[yy * w + x]);
            }
            out.data[y * w + x] = v;
        }
    }
    out
}

/// Local-maximum filter.
pub fn dilate(img: &GrayImage, kernel: KernelSize) -> GrayImage {
    rank_filter(img, kernel.radius(), Rank::Max)
}

/// Local-minimum filter.
pub fn erode(img: &GrayImage, kernel: KernelSize) -> GrayImage {
    rank_filter(img, kernel.radius(), Rank::Min)
}

/// Stage 6: dilate twice, erode once.
///
/// The net effect is a closing biased toward thicker strokes: gaps inside
/// characters stay filled while the second dilation's growth is mostly
/// taken back.
pub fn thicken_strokes(img: &GrayImage, kernel: KernelSize) -> GrayImage {
    let once = dilate(img, kernel);
    let twice = dilate(&once, kernel);
    erode(&twice, kernel)
}

/// 3x3 median with clamped borders.
pub fn median3(img: &GrayImage) -> GrayImage {
    let view = img.view();
    let mut out = GrayImage::new(img.width, img.height);
    let mut window = [0u8; 9];
    for y in 0..img.height {
        for x in 0..img.width {
            let mut n = 0;
            for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    window[n] = view.get_clamped(x as isize + dx, y as isize + dy);
                    n += 1;
                }
            }
            window.sort_unstable();
            out.set(x, y, window[4]);
        }
    }
    out
}
