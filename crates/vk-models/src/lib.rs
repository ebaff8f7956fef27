//! # vk-models
//!
//! One-factor affine short-rate models with closed-form zero-coupon bond
//! options.
//!
//! ```text
//! AffineModel
//! ├── Vasicek    (constant parameters)
//! └── HullWhite  (fitted to a yield curve)
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `AffineModel` trait and shared Gaussian helpers.
pub mod affine_model;

/// Hull-White model.
pub mod hull_white_model;

/// Vasicek model.
pub mod vasicek;

pub use affine_model::AffineModel;
pub use hull_white_model::HullWhite;
pub use vasicek::Vasicek;
