//! Linear scaling methods

use crate::error::{PreprocessingError, Result};
use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2, Zip};
use tabscale::dataset::Records;
use tabscale::traits::{Fit, InverseTransformer, Transformer};
use tabscale::{Float, ParamGuard};

/// Policy for columns whose spread (range or standard deviation) is zero
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstantColumns {
    /// Fitting fails with [`PreprocessingError::ConstantColumn`]
    Reject,
    /// The column is only shifted by its offset, its spread is treated as one
    Passthrough,
}

impl Default for ConstantColumns {
    fn default() -> Self {
        ConstantColumns::Reject
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Possible scaling methods for [LinearScaler]
///
/// * Standard (with mean, with std): subtracts the mean to each feature and scales it by the
///   inverse of its population standard deviation
/// * MinMax (min, max): scales each feature to fit in the range `min..=max`, default values are
///   `0..=1`
pub enum ScalingMethod<F: Float> {
    Standard { with_mean: bool, with_std: bool },
    MinMax { min: F, max: F },
}

impl<F: Float> ScalingMethod<F> {
    /// Interval the scaled columns are mapped into
    pub(crate) fn output_interval(&self) -> (F, F) {
        match *self {
            ScalingMethod::MinMax { min, max } => (min, max),
            ScalingMethod::Standard { .. } => (F::zero(), F::one()),
        }
    }

    /// Whether the offsets are learned from the data
    fn centers(&self) -> bool {
        match *self {
            ScalingMethod::Standard { with_mean, .. } => with_mean,
            ScalingMethod::MinMax { .. } => true,
        }
    }

    /// Per-column offsets and spreads of `records`, reducing over the observations
    fn column_params<D: Data<Elem = F>>(
        &self,
        records: &ArrayBase<D, Ix2>,
    ) -> Result<(Array1<F>, Array1<F>)> {
        let nfeatures = records.nfeatures();
        match *self {
            ScalingMethod::Standard {
                with_mean,
                with_std,
            } => {
                let means = if with_mean {
                    records
                        .mean_axis(Axis(0))
                        .ok_or(tabscale::Error::NotEnoughSamples)?
                } else {
                    Array1::zeros(nfeatures)
                };
                let std_devs = if with_std {
                    records.std_axis(Axis(0), F::zero())
                } else {
                    Array1::ones(nfeatures)
                };
                Ok((means, std_devs))
            }
            ScalingMethod::MinMax { .. } => {
                let mins = records.fold_axis(
                    Axis(0),
                    F::infinity(),
                    |&prev, &x| if x < prev { x } else { prev },
                );
                let maxes = records.fold_axis(
                    Axis(0),
                    F::neg_infinity(),
                    |&prev, &x| if x > prev { x } else { prev },
                );
                let ranges = maxes - &mins;
                Ok((mins, ranges))
            }
        }
    }
}

impl<F: Float> std::fmt::Display for ScalingMethod<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalingMethod::Standard {
                with_mean,
                with_std,
            } => write!(
                f,
                "Standard scaler (with_mean = {}, with_std = {})",
                with_mean, with_std
            ),
            ScalingMethod::MinMax { min, max } => {
                write!(f, "Min-Max scaler (min = {}, max = {})", min, max)
            }
        }
    }
}

/// Checked hyperparameters of a [LinearScaler]
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScalerValidParams<F: Float> {
    method: ScalingMethod<F>,
    constant_columns: ConstantColumns,
}

impl<F: Float> LinearScalerValidParams<F> {
    pub fn method(&self) -> &ScalingMethod<F> {
        &self.method
    }

    pub fn constant_columns(&self) -> ConstantColumns {
        self.constant_columns
    }
}

/// Linear Scaler: learns scaling parameters, according to the specified [method](ScalingMethod), from a table,
/// producing a [fitted linear scaler](FittedLinearScaler) that can be used to scale different tables
/// with the same number of features.
///
/// ### Example
///
/// ```rust
/// use tabscale::traits::{Fit, Transformer};
/// use tabscale_preprocessing::linear_scaling::{FittedLinearScaler, LinearScaler};
/// use tabscale_preprocessing::PreprocessingError;
/// use ndarray::array;
///
/// let records = array![[0., 10.], [5., 20.], [10., 30.]];
///
/// // Learn min-max parameters from the table
/// let scaler: Result<FittedLinearScaler<f64>, PreprocessingError> =
///     LinearScaler::min_max().fit(&records);
/// let scaler = scaler.unwrap();
///
/// // Scale the table according to the learned parameters
/// let scaled = scaler.transform(&records).unwrap();
/// assert_eq!(scaled, array![[0., 0.], [0.5, 0.5], [1., 1.]]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScaler<F: Float>(LinearScalerValidParams<F>);

impl<F: Float> LinearScaler<F> {
    /// Initializes a scaler with the specified method.
    pub fn new(method: ScalingMethod<F>) -> Self {
        Self(LinearScalerValidParams {
            method,
            constant_columns: ConstantColumns::default(),
        })
    }

    /// Changes the method used by the current scaler.
    pub fn method(mut self, method: ScalingMethod<F>) -> Self {
        self.0.method = method;
        self
    }

    /// Changes how columns with zero spread are handled.
    pub fn constant_columns(mut self, policy: ConstantColumns) -> Self {
        self.0.constant_columns = policy;
        self
    }

    /// Initializes a Standard scaler
    pub fn standard() -> Self {
        Self::new(ScalingMethod::Standard {
            with_mean: true,
            with_std: true,
        })
    }

    /// Initializes a Standard scaler that does not subtract the mean to the features
    pub fn standard_no_mean() -> Self {
        Self::new(ScalingMethod::Standard {
            with_mean: false,
            with_std: true,
        })
    }

    /// Initializes a Standard scaler that does not scale the features by the inverse of the standard deviation
    pub fn standard_no_std() -> Self {
        Self::new(ScalingMethod::Standard {
            with_mean: true,
            with_std: false,
        })
    }

    /// Initializes a MinMax scaler with range `0..=1`
    pub fn min_max() -> Self {
        Self::new(ScalingMethod::MinMax {
            min: F::zero(),
            max: F::one(),
        })
    }

    /// Initializes a MinMax scaler with the specified minimum and maximum values for the range.
    ///
    /// If `min` is bigger than `max` then fitting will return an error on any input.
    pub fn min_max_range(min: F, max: F) -> Self {
        Self::new(ScalingMethod::MinMax { min, max })
    }

    pub(crate) fn params(&self) -> &LinearScalerValidParams<F> {
        &self.0
    }
}

impl<F: Float> ParamGuard for LinearScaler<F> {
    type Checked = LinearScalerValidParams<F>;
    type Error = PreprocessingError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if let ScalingMethod::MinMax { min, max } = self.0.method {
            if !min.is_finite() || !max.is_finite() {
                return Err(PreprocessingError::InvalidFeatureRange);
            }
            if min >= max {
                return Err(PreprocessingError::FlippedFeatureRange);
            }
            if !(max - min).is_finite() {
                return Err(PreprocessingError::InvalidFeatureRange);
            }
        }
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, D: Data<Elem = F>> Fit<ArrayBase<D, Ix2>, PreprocessingError>
    for LinearScalerValidParams<F>
{
    type Object = FittedLinearScaler<F>;

    /// Fits the input table according to the scaler method. Will return an error
    /// if the table does not contain any samples or, unless constant columns are
    /// passed through, if one of its columns has zero spread.
    fn fit(&self, records: &ArrayBase<D, Ix2>) -> Result<Self::Object> {
        if records.nsamples() == 0 {
            return Err(PreprocessingError::NotEnoughSamples);
        }
        let (mut offsets, spreads) = self.method.column_params(records)?;

        if let Some(column) = spreads.iter().position(|s| !s.is_finite()) {
            return Err(PreprocessingError::NonFiniteSpread { column });
        }

        // both the range and the population std of a constant column are exactly zero
        let constant: Vec<usize> = spreads
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == F::zero())
            .map(|(column, _)| column)
            .collect();
        let divisors = spreads.mapv(|s| if s == F::zero() { F::one() } else { s });
        if self.method.centers() {
            for &column in &constant {
                offsets[column] = records[[0, column]];
            }
        }
        if let Some(&column) = constant.first() {
            match self.constant_columns {
                ConstantColumns::Reject => {
                    return Err(PreprocessingError::ConstantColumn { column })
                }
                ConstantColumns::Passthrough => {
                    warn!("constant columns {:?} are shifted but not scaled", constant)
                }
            }
        }

        debug!(
            "{} fitted on {} samples with {} features",
            self.method,
            records.nsamples(),
            records.nfeatures()
        );

        Ok(FittedLinearScaler {
            offsets,
            spreads,
            divisors,
            method: self.method.clone(),
        })
    }
}

/// The result of fitting a [linear scaler](LinearScaler).
/// Scales tables according to the specified scaling method.
///
/// Every column `j` is mapped to `(x - offset[j]) / spread[j]`, then stretched into the output
/// interval of the method (`0..=1` for the standard method, where it is the identity).
#[derive(Clone, Debug, PartialEq)]
pub struct FittedLinearScaler<F: Float> {
    offsets: Array1<F>,
    spreads: Array1<F>,
    divisors: Array1<F>,
    method: ScalingMethod<F>,
}

impl<F: Float> FittedLinearScaler<F> {
    /// Array of size `n_features` that contains the offset that will be subtracted to each field
    pub fn offsets(&self) -> &Array1<F> {
        &self.offsets
    }

    /// Array of size `n_features` with the observed spread (range or standard deviation) of each
    /// field. Constant columns report zero.
    pub fn spreads(&self) -> &Array1<F> {
        &self.spreads
    }

    /// Array of size `n_features` that contains the divisor applied to each field. Equal to the
    /// spreads except for passed-through constant columns, which are divided by one.
    pub fn divisors(&self) -> &Array1<F> {
        &self.divisors
    }

    /// Returns the method used for fitting. Useful for printing, since [ScalingMethod] implements `Display`
    pub fn method(&self) -> &ScalingMethod<F> {
        &self.method
    }

    /// Number of features seen during fitting
    pub fn nfeatures(&self) -> usize {
        self.offsets.len()
    }

    fn check_features<R: Records>(&self, x: &R) -> Result<()> {
        if x.nfeatures() != self.nfeatures() {
            return Err(PreprocessingError::ShapeMismatch {
                expected: self.nfeatures(),
                found: x.nfeatures(),
            });
        }
        Ok(())
    }

    fn scale_in_place(&self, x: &mut Array2<F>) {
        let (lo, hi) = self.method.output_interval();
        let width = hi - lo;
        Zip::from(x.columns_mut())
            .and(&self.offsets)
            .and(&self.divisors)
            .for_each(|mut col, &offset, &divisor| {
                col.mapv_inplace(|el| (el - offset) / divisor * width + lo);
            });
    }

    fn unscale_in_place(&self, x: &mut Array2<F>) {
        let (lo, hi) = self.method.output_interval();
        let width = hi - lo;
        Zip::from(x.columns_mut())
            .and(&self.offsets)
            .and(&self.divisors)
            .for_each(|mut col, &offset, &divisor| {
                col.mapv_inplace(|el| (el - lo) / width * divisor + offset);
            });
    }
}

impl<F: Float> Transformer<Array2<F>, Result<Array2<F>>> for FittedLinearScaler<F> {
    /// Scales an array of size (nsamples, nfeatures) according to the scaler's `offsets` and `divisors`.
    /// Fails with [`PreprocessingError::ShapeMismatch`] if the number of columns differs from the
    /// one seen during fitting.
    fn transform(&self, x: Array2<F>) -> Result<Array2<F>> {
        self.check_features(&x)?;
        let mut x = x;
        self.scale_in_place(&mut x);
        Ok(x)
    }
}

impl<'a, F: Float, D: Data<Elem = F>> Transformer<&'a ArrayBase<D, Ix2>, Result<Array2<F>>>
    for FittedLinearScaler<F>
{
    fn transform(&self, x: &'a ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.check_features(x)?;
        self.transform(x.to_owned())
    }
}

impl<F: Float> InverseTransformer<Array2<F>, Result<Array2<F>>> for FittedLinearScaler<F> {
    /// Maps a scaled array back into the units of the fitted table.
    fn inverse_transform(&self, x: Array2<F>) -> Result<Array2<F>> {
        self.check_features(&x)?;
        let mut x = x;
        self.unscale_in_place(&mut x);
        Ok(x)
    }
}

impl<'a, F: Float, D: Data<Elem = F>> InverseTransformer<&'a ArrayBase<D, Ix2>, Result<Array2<F>>>
    for FittedLinearScaler<F>
{
    fn inverse_transform(&self, x: &'a ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.check_features(x)?;
        self.inverse_transform(x.to_owned())
    }
}
