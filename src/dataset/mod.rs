//! Tables
//!
//! Numeric bounds and the minimal record abstraction shared by the scaling algorithms. A table
//! is any two-dimensional `ndarray` array with rows as observations and columns as features.
use ndarray::ScalarOperand;

use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, Signed};

use std::fmt;
use std::iter::Sum;

mod impl_records;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. Tables handed to the scalers are made of
/// them, and so are the fitted per-column statistics.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + AsPrimitive<usize>
    + ScalarOperand
    + approx::AbsDiffEq<Epsilon = Self>
{
}

impl Float for f32 {}

impl Float for f64 {}

/// Record trait
///
/// Anything that can be read as a table of observations (rows) and features (columns).
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}
