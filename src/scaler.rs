use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed mapping from dest pixels to the nearest src pixel
pub struct ScaleLut {
    xs: Vec<usize>,
    ys: Vec<usize>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            xs: Vec::new(),
            ys: Vec::new(),
        }
    }
}

fn nearest(dst_len: usize, src_len: usize) -> Vec<usize> {
    let s = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| (((d as f64 + 0.5) * s) as usize).min(src_len.saturating_sub(1)))
        .collect()
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    ScaleLut {
        xs: nearest(dst_w, src_w),
        ys: nearest(dst_h, src_h),
    }
}

/// Parallel nearest-neighbor stretch, keeps the blocky look of the canvas.
/// Rows are processed in parallel for cache friendly writes
pub fn blit_nearest_stretch(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &ScaleLut) {
    if dw == 0 {
        return;
    }
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let Some(&sy) = lut.ys.get(y) else {
            return;
        };
        let row = &src[sy * sw..(sy + 1) * sw];
        for (d, &sx) in dst_row.iter_mut().zip(&lut.xs) {
            *d = row[sx];
        }
    });
}
