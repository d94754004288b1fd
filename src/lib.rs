//! Contrast-preserving colour inversion for rendered frames.
//!
//! The core is [`ColorInversionFilter`], a pure per-pixel transform that
//! inverts colour around mid-gray with a small "white bias" so that pure
//! white lands on a dark gray instead of black. Alpha is never modified.
//!
//! ```
//! use shiftinvert::{ColorInversionFilter, Frame, Pixel};
//!
//! let filter = ColorInversionFilter::default();
//! let frame = Frame::filled(2, 2, Pixel::gray(0.0));
//! let inverted = filter.apply_to_frame(&frame, true);
//! assert!((inverted.pixels()[0].r - 1.0).abs() < 1e-6);
//! assert_eq!(filter.apply_to_frame(&frame, false), frame);
//! ```
//!
//! Hosts that render several surfaces keep per-surface state in an
//! [`InversionRegistry`]; batch and GPU processing of 8-bit images goes
//! through [`FrameInverter`].

pub mod logger;

pub mod cli;
pub mod filter;
pub mod frame;
pub mod gpu;
pub mod inverter;
pub mod io;
pub mod settings;
pub mod target;

pub use filter::{ColorInversionFilter, DEFAULT_WHITE_BIAS, FilterError, Pixel};
pub use frame::{Frame, FrameError};
pub use inverter::{Backend, FrameInverter};
pub use settings::InvertSettings;
pub use target::{FilterState, InversionRegistry, RenderTarget, TargetId};
