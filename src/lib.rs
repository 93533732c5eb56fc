//! `tabscale` provides the shared vocabulary for column-wise preprocessing of numeric tables.
//!
//! A table is a two-dimensional `ndarray` array whose rows are observations and whose columns
//! are features. Algorithms built on this crate (see `tabscale-preprocessing`) learn a handful
//! of per-column statistics from a reference table and then apply an affine map to other
//! tables with the same number of columns.
//!
//! This crate contains no algorithm of its own. It defines:
//!
//! * [`Float`], the floating point bound shared by every algorithm crate,
//! * [`Records`](dataset::Records), the minimal view of a table as observations and features,
//! * the [`Fit`](traits::Fit), [`Transformer`](traits::Transformer) and
//!   [`InverseTransformer`](traits::InverseTransformer) traits,
//! * [`ParamGuard`], the checked/unchecked split for hyperparameters,
//! * the common [`Error`](error::Error) type.
//!
//! ```
//! use tabscale::dataset::Records;
//! use ndarray::array;
//!
//! let table = array![[0., 10.], [5., 20.], [10., 30.]];
//! assert_eq!(table.nsamples(), 3);
//! assert_eq!(table.nfeatures(), 2);
//! ```

pub mod benchmarks;
pub mod dataset;
pub mod error;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::Float;
pub use error::Error;
pub use param_guard::ParamGuard;
