//! docangle-transform - Geometric transformations for skew estimation
//!
//! This crate provides the raster transformations around the skew engine:
//!
//! - Exact 90-degree transpose used for the landscape search pass
//! - Isotropic downscaling behind the [`Resizer`] seam
//! - Arbitrary-angle rotation (bilinear or nearest-neighbour) used to
//!   straighten a page once its skew is known

mod error;
pub mod rotate;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use rotate::{
    RotateFill, RotateMethod, RotateOptions, rotate, rotate_90, rotate_rgb, rotated_canvas,
};
pub use scale::{Resizer, ScaleMethod, downscale, downscale_factor, scale_to_size};
