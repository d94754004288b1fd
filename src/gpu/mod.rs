// ============================================================================
// GPU MODULE — hardware-accelerated shift invert
// ============================================================================
//
// Architecture:
//   context.rs — wgpu Device, Queue, adapter init
//   shaders.rs — WGSL shader source (inline strings)
//   compute.rs — compute pipeline, upload and readback
// ============================================================================

pub mod compute;
pub mod context;
pub mod shaders;

use std::fmt;

pub use compute::GpuInvertPipeline;
pub use context::GpuContext;

#[derive(Debug, Clone, PartialEq)]
pub enum GpuError {
    /// No hardware or software adapter could be created.
    Unavailable,
    /// Input buffer does not hold `width * height * 4` bytes.
    BufferSize { expected: usize, actual: usize },
    /// Frame exceeds the device's maximum texture dimension.
    TooLarge { width: u32, height: u32 },
    Readback(String),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::Unavailable => write!(f, "no GPU adapter available"),
            GpuError::BufferSize { expected, actual } => {
                write!(f, "GPU input holds {} bytes, expected {}", actual, expected)
            }
            GpuError::TooLarge { width, height } => {
                write!(f, "{}x{} exceeds the device texture limit", width, height)
            }
            GpuError::Readback(e) => write!(f, "GPU readback failed: {}", e),
        }
    }
}

impl std::error::Error for GpuError {}

/// Context plus compiled pipeline, created once and reused for every frame.
pub struct GpuInverter {
    pub ctx: GpuContext,
    pipeline: GpuInvertPipeline,
}

impl fmt::Debug for GpuInverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpuInverter").field("ctx", &self.ctx).finish()
    }
}

impl GpuInverter {
    pub fn try_new(preferred_gpu: &str) -> Result<Self, GpuError> {
        let ctx = GpuContext::new(preferred_gpu).ok_or(GpuError::Unavailable)?;
        let pipeline = GpuInvertPipeline::new(&ctx.device);
        Ok(Self { ctx, pipeline })
    }

    pub fn adapter_name(&self) -> &str {
        &self.ctx.adapter_name
    }

    pub fn invert_rgba(&self, data: &[u8], w: u32, h: u32, white_bias: f32) -> Result<Vec<u8>, GpuError> {
        self.pipeline.apply(&self.ctx, data, w, h, white_bias)
    }
}
