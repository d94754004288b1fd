// ============================================================================
// FRAME INVERTER — backend selection for 8-bit frames
// ============================================================================
//
// GPU when requested and available, CPU (rayon) otherwise. A GPU failure on a
// single frame falls back to the CPU for that frame, so callers always get a
// complete frame.
// ============================================================================

use image::RgbaImage;

use crate::filter::ColorInversionFilter;
use crate::gpu::GpuInverter;
use crate::{log_info, log_warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Cpu,
    /// `preferred` is the adapter preference ("integrated", "discrete", ...).
    Gpu { preferred: String },
}

#[derive(Debug)]
pub struct FrameInverter {
    filter: ColorInversionFilter,
    gpu: Option<GpuInverter>,
}

impl FrameInverter {
    pub fn new(filter: ColorInversionFilter, backend: Backend) -> Self {
        let gpu = match backend {
            Backend::Cpu => None,
            Backend::Gpu { preferred } => match GpuInverter::try_new(&preferred) {
                Ok(gpu) => {
                    log_info!("GPU backend ready on '{}'", gpu.adapter_name());
                    Some(gpu)
                }
                Err(e) => {
                    log_warn!("GPU backend unavailable ({}), using CPU", e);
                    None
                }
            },
        };
        Self { filter, gpu }
    }

    pub fn cpu(filter: ColorInversionFilter) -> Self {
        Self::new(filter, Backend::Cpu)
    }

    pub fn filter(&self) -> &ColorInversionFilter {
        &self.filter
    }

    pub fn uses_gpu(&self) -> bool {
        self.gpu.is_some()
    }

    /// Invert every pixel of `img`. Alpha bytes are preserved exactly.
    pub fn invert(&self, img: &RgbaImage) -> RgbaImage {
        let (w, h) = img.dimensions();
        if w == 0 || h == 0 {
            return img.clone();
        }

        if let Some(gpu) = &self.gpu {
            match gpu.invert_rgba(img.as_raw(), w, h, self.filter.white_bias()) {
                Ok(mut data) => {
                    for (dst, src) in data.chunks_exact_mut(4).zip(img.as_raw().chunks_exact(4)) {
                        dst[3] = src[3];
                    }
                    if let Some(out) = RgbaImage::from_raw(w, h, data) {
                        return out;
                    }
                    log_warn!("GPU returned a short buffer for {}x{}, using CPU", w, h);
                }
                Err(e) => log_warn!("GPU invert failed ({}), using CPU", e),
            }
        }

        self.filter.apply_to_rgba_image(img, true)
    }

    /// `invert` when `enabled`, otherwise an untouched copy.
    pub fn process(&self, img: &RgbaImage, enabled: bool) -> RgbaImage {
        if enabled { self.invert(img) } else { img.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn cpu_backend_matches_filter() {
        let inv = FrameInverter::cpu(ColorInversionFilter::default());
        assert!(!inv.uses_gpu());
        let img = RgbaImage::from_fn(9, 4, |x, y| Rgba([(x * 28) as u8, (y * 60) as u8, 33, 250]));
        assert_eq!(inv.invert(&img), inv.filter().apply_to_rgba_image(&img, true));
    }

    #[test]
    fn process_disabled_is_identity() {
        let inv = FrameInverter::cpu(ColorInversionFilter::default());
        let img = RgbaImage::from_pixel(5, 5, Rgba([12, 34, 56, 78]));
        assert_eq!(inv.process(&img, false), img);
        assert_ne!(inv.process(&img, true), img);
    }

    #[test]
    fn gpu_matches_cpu_when_adapter_present() {
        let filter = ColorInversionFilter::new(0.08).unwrap();
        let gpu = FrameInverter::new(filter, Backend::Gpu { preferred: "discrete".to_string() });
        if !gpu.uses_gpu() {
            return;
        }
        // Odd size so the last workgroup and the row padding are both exercised.
        let img = RgbaImage::from_fn(67, 19, |x, y| {
            Rgba([(x * 3) as u8, (y * 13) as u8, ((x * y) % 256) as u8, (255 - x) as u8])
        });
        let expected = filter.apply_to_rgba_image(&img, true);
        assert_eq!(gpu.invert(&img), expected);

        let corners = RgbaImage::from_fn(2, 2, |x, y| match (x, y) {
            (0, 0) => Rgba([0, 0, 0, 255]),
            (1, 0) => Rgba([255, 255, 255, 255]),
            (0, 1) => Rgba([128, 128, 128, 255]),
            _ => Rgba([255, 0, 0, 0]),
        });
        assert_eq!(gpu.invert(&corners), filter.apply_to_rgba_image(&corners, true));
    }

    #[test]
    fn empty_image_passes_through() {
        let inv = FrameInverter::cpu(ColorInversionFilter::default());
        let img = RgbaImage::new(0, 0);
        assert_eq!(inv.invert(&img).dimensions(), (0, 0));
    }
}
