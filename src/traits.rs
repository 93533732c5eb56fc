//! Provide traits for different classes of algorithms
//!

use crate::dataset::Records;
use std::convert::From;

/// Transformation algorithms
///
/// A transformer takes a table and produces a new table of the same shape. Fitted scalers are
/// transformers; the output type is usually a `Result` because the input is checked against
/// the fitted state.
pub trait Transformer<R: Records, T> {
    fn transform(&self, x: R) -> T;
}

/// Inverse of a transformation
///
/// Maps a table from the transformed space back into the units of the table the parameters
/// were learned from.
pub trait InverseTransformer<R: Records, T> {
    fn inverse_transform(&self, x: R) -> T;
}

/// Fittable algorithms
///
/// A fittable algorithm takes a table and creates a concept of some kind about it. For
/// scalers this is the set of per-column statistics, returned as a fitted object which then
/// implements [`Transformer`].
pub trait Fit<R: Records, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, records: &R) -> Result<Self::Object, E>;
}
