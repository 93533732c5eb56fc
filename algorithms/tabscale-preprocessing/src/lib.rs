//! # Preprocessing
//! ## The Big Picture
//!
//! `tabscale-preprocessing` is a crate in the [`tabscale`](https://crates.io/crates/tabscale) workspace
//! that rescales the columns of numeric tables before they are handed to downstream numeric code.
//!
//! ## Current state
//! `tabscale-preprocessing` provides two column scalers:
//! * [Min-max scaling](MinMaxScaler): maps every column into `[0, 1]` (or a configured interval)
//! * [Standard scaling](StandardScaler): centers every column on zero with unit population variance
//!
//! Both are built on the [linear scaling](linear_scaling) module, which learns per-column
//! offsets and spreads and applies the resulting affine map. Every scaler can also map scaled
//! data back into the original units.
//!
//! ## Lifecycle
//!
//! Scalers are created unfitted. [`fit`](MinMaxScaler::fit) or
//! [`fit_transform`](MinMaxScaler::fit_transform) learns the statistics; any transform before
//! that fails with [`PreprocessingError::NotFitted`]. Columns without spread are rejected by
//! default, see [`ConstantColumns`].
//!
//! ```rust
//! use tabscale_preprocessing::{MinMaxScaler, PreprocessingError};
//! use ndarray::array;
//!
//! let mut scaler = MinMaxScaler::new();
//! assert!(matches!(
//!     scaler.transform(&array![[1., 2.]]),
//!     Err(PreprocessingError::NotFitted)
//! ));
//!
//! let scaled = scaler.fit_transform(&array![[0., 10.], [5., 20.], [10., 30.]]).unwrap();
//! assert_eq!(scaled, array![[0., 0.], [0.5, 0.5], [1., 1.]]);
//! ```

pub mod error;
pub mod linear_scaling;
mod scaler;

pub use error::{PreprocessingError, Result};
pub use linear_scaling::{ConstantColumns, FittedLinearScaler, LinearScaler, ScalingMethod};
pub use scaler::{ColumnScaler, MinMaxScaler, StandardScaler};
