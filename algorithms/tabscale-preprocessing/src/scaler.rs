//! Stateful column scalers
//!
//! [`MinMaxScaler`] and [`StandardScaler`] are created unfitted, learn their per-column
//! statistics through [`fit`](MinMaxScaler::fit) or [`fit_transform`](MinMaxScaler::fit_transform)
//! and keep them for any number of later transforms. Both are thin wrappers around
//! [`FittedLinearScaler`], so they share one affine map and differ only in which statistics are
//! learned.
//!
//! The [`ColumnScaler`] trait exposes the lifecycle behind a trait object, so callers can pick the
//! scaler kind at runtime:
//!
//! ```rust
//! use tabscale_preprocessing::{ColumnScaler, MinMaxScaler, StandardScaler};
//! use ndarray::array;
//!
//! let records = array![[0., 10.], [5., 20.], [10., 30.]];
//! let mut scalers: Vec<Box<dyn ColumnScaler<f64>>> =
//!     vec![Box::new(MinMaxScaler::<f64>::new()), Box::new(StandardScaler::<f64>::new())];
//!
//! for scaler in scalers.iter_mut() {
//!     let scaled = scaler.fit_transform(records.view()).unwrap();
//!     let restored = scaler.inverse_transform(scaled.view()).unwrap();
//!     approx::assert_abs_diff_eq!(restored, records, epsilon = 1e-12);
//! }
//! ```

use crate::error::{PreprocessingError, Result};
use crate::linear_scaling::{ConstantColumns, FittedLinearScaler, LinearScaler, ScalingMethod};
use log::debug;
use ndarray::{Array1, Array2, ArrayBase, ArrayView2, Data, Ix2};
use tabscale::traits::{Fit, InverseTransformer, Transformer};
use tabscale::Float;

/// Common lifecycle of the column scalers: fit once, transform and invert many times.
pub trait ColumnScaler<F: Float> {
    /// Learns the per-column statistics of `x`, replacing earlier ones.
    fn fit(&mut self, x: ArrayView2<'_, F>) -> Result<()>;

    /// Scales `x` with the learned statistics.
    fn transform(&self, x: ArrayView2<'_, F>) -> Result<Array2<F>>;

    /// Learns the statistics of `x` and returns `x` scaled with them.
    fn fit_transform(&mut self, x: ArrayView2<'_, F>) -> Result<Array2<F>> {
        self.fit(x.view())?;
        self.transform(x)
    }

    /// Maps scaled data back into the original units.
    fn inverse_transform(&self, x: ArrayView2<'_, F>) -> Result<Array2<F>>;

    fn is_fitted(&self) -> bool;

    /// Number of columns seen during fitting, `None` before fitting
    fn n_features(&self) -> Option<usize>;
}

/// Hyperparameters plus, once fitted, the learned affine map
#[derive(Clone, Debug, PartialEq)]
struct AffineScaler<F: Float> {
    params: LinearScaler<F>,
    fitted: Option<FittedLinearScaler<F>>,
}

impl<F: Float> AffineScaler<F> {
    fn new(params: LinearScaler<F>) -> Self {
        Self {
            params,
            fitted: None,
        }
    }

    fn fit<D: Data<Elem = F>>(&mut self, x: &ArrayBase<D, Ix2>) -> Result<&FittedLinearScaler<F>> {
        let fitted: Result<FittedLinearScaler<F>> = self.params.fit(x);
        let fitted = fitted?;
        if self.fitted.is_some() {
            debug!("replacing fitted parameters of {}", fitted.method());
        }
        Ok(self.fitted.insert(fitted))
    }

    fn fitted(&self) -> Result<&FittedLinearScaler<F>> {
        self.fitted.as_ref().ok_or(PreprocessingError::NotFitted)
    }

    fn transform<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.fitted()?.transform(x)
    }

    fn fit_transform<D: Data<Elem = F>>(&mut self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.fit(x)?.transform(x)
    }

    fn inverse_transform<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.fitted()?.inverse_transform(x)
    }
}

/// Scales every column into a fixed interval, `[0, 1]` unless configured otherwise.
///
/// Each element becomes `(x - min) / (max - min)` with the column minimum and maximum observed
/// during fitting, and the inverse maps `x * (max - min) + min` back.
///
/// ```rust
/// use tabscale_preprocessing::MinMaxScaler;
/// use ndarray::array;
///
/// let records = array![[0., 10.], [5., 20.], [10., 30.]];
/// let mut scaler = MinMaxScaler::new();
/// let scaled = scaler.fit_transform(&records).unwrap();
///
/// assert_eq!(scaled, array![[0., 0.], [0.5, 0.5], [1., 1.]]);
/// assert_eq!(scaler.data_range().unwrap(), &array![10., 20.]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MinMaxScaler<F: Float> {
    inner: AffineScaler<F>,
}

impl<F: Float> MinMaxScaler<F> {
    /// Unfitted scaler mapping into `[0, 1]`
    pub fn new() -> Self {
        Self {
            inner: AffineScaler::new(LinearScaler::min_max()),
        }
    }

    /// Sets the interval `[min, max]` the columns are mapped into. Fitting fails unless
    /// `min < max` and both are finite. Already fitted parameters keep their interval until the
    /// next fit.
    pub fn feature_range(mut self, min: F, max: F) -> Self {
        self.inner.params = self
            .inner
            .params
            .method(ScalingMethod::MinMax { min, max });
        self
    }

    /// Sets how columns with identical values are handled on the next fit.
    pub fn constant_columns(mut self, policy: ConstantColumns) -> Self {
        self.inner.params = self.inner.params.constant_columns(policy);
        self
    }

    /// Learns column minima and maxima from `x`. Fails on an empty table, and on a constant
    /// column unless constant columns are passed through.
    pub fn fit<D: Data<Elem = F>>(&mut self, x: &ArrayBase<D, Ix2>) -> Result<&mut Self> {
        self.inner.fit(x)?;
        Ok(self)
    }

    pub fn transform<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.inner.transform(x)
    }

    pub fn fit_transform<D: Data<Elem = F>>(&mut self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.inner.fit_transform(x)
    }

    pub fn inverse_transform<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.inner.inverse_transform(x)
    }

    /// Configured output interval
    pub fn feature_range_bounds(&self) -> (F, F) {
        self.inner.params.params().method().output_interval()
    }

    /// Column minima seen during fitting
    pub fn data_min(&self) -> Result<&Array1<F>> {
        Ok(self.inner.fitted()?.offsets())
    }

    /// Column maxima seen during fitting
    pub fn data_max(&self) -> Result<Array1<F>> {
        let fitted = self.inner.fitted()?;
        Ok(fitted.offsets() + fitted.spreads())
    }

    /// Column ranges (`max - min`) seen during fitting, zero for constant columns
    pub fn data_range(&self) -> Result<&Array1<F>> {
        Ok(self.inner.fitted()?.spreads())
    }

    /// The learned affine map
    pub fn fitted(&self) -> Result<&FittedLinearScaler<F>> {
        self.inner.fitted()
    }

    pub fn is_fitted(&self) -> bool {
        self.inner.fitted.is_some()
    }

    pub fn n_features(&self) -> Option<usize> {
        self.inner.fitted.as_ref().map(|f| f.nfeatures())
    }
}

impl<F: Float> Default for MinMaxScaler<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Centers every column on zero and scales it to unit population variance.
///
/// Each element becomes `(x - mean) / std`, where `std` divides by the number of observations.
/// The inverse maps `x * std + mean` back.
///
/// ```rust
/// use tabscale_preprocessing::StandardScaler;
/// use approx::assert_abs_diff_eq;
/// use ndarray::array;
///
/// let records = array![[0., 10.], [5., 20.], [10., 30.]];
/// let mut scaler = StandardScaler::new();
/// let scaled = scaler.fit_transform(&records).unwrap();
///
/// assert_abs_diff_eq!(*scaler.mean().unwrap(), array![5., 20.]);
/// assert_abs_diff_eq!(scaled.column(0), array![-1.2247, 0., 1.2247], epsilon = 1e-4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StandardScaler<F: Float> {
    inner: AffineScaler<F>,
}

impl<F: Float> StandardScaler<F> {
    /// Unfitted scaler that both centers and scales
    pub fn new() -> Self {
        Self {
            inner: AffineScaler::new(LinearScaler::standard()),
        }
    }

    fn standard_flags(&self) -> (bool, bool) {
        match *self.inner.params.params().method() {
            ScalingMethod::Standard {
                with_mean,
                with_std,
            } => (with_mean, with_std),
            ScalingMethod::MinMax { .. } => (true, true),
        }
    }

    /// Whether the mean is subtracted. When disabled the learned mean is reported as zero.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        let (_, with_std) = self.standard_flags();
        self.inner.params = self.inner.params.method(ScalingMethod::Standard {
            with_mean,
            with_std,
        });
        self
    }

    /// Whether columns are divided by their standard deviation. When disabled the learned
    /// standard deviation is reported as one.
    pub fn with_std(mut self, with_std: bool) -> Self {
        let (with_mean, _) = self.standard_flags();
        self.inner.params = self.inner.params.method(ScalingMethod::Standard {
            with_mean,
            with_std,
        });
        self
    }

    /// Sets how columns with identical values are handled on the next fit.
    pub fn constant_columns(mut self, policy: ConstantColumns) -> Self {
        self.inner.params = self.inner.params.constant_columns(policy);
        self
    }

    /// Learns column means and population standard deviations from `x`. Fails on an empty
    /// table, and on a constant column unless constant columns are passed through.
    pub fn fit<D: Data<Elem = F>>(&mut self, x: &ArrayBase<D, Ix2>) -> Result<&mut Self> {
        self.inner.fit(x)?;
        Ok(self)
    }

    pub fn transform<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.inner.transform(x)
    }

    pub fn fit_transform<D: Data<Elem = F>>(&mut self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.inner.fit_transform(x)
    }

    pub fn inverse_transform<D: Data<Elem = F>>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>> {
        self.inner.inverse_transform(x)
    }

    /// Column means seen during fitting
    pub fn mean(&self) -> Result<&Array1<F>> {
        Ok(self.inner.fitted()?.offsets())
    }

    /// Column population standard deviations seen during fitting, zero for constant columns
    pub fn std(&self) -> Result<&Array1<F>> {
        Ok(self.inner.fitted()?.spreads())
    }

    /// The learned affine map
    pub fn fitted(&self) -> Result<&FittedLinearScaler<F>> {
        self.inner.fitted()
    }

    pub fn is_fitted(&self) -> bool {
        self.inner.fitted.is_some()
    }

    pub fn n_features(&self) -> Option<usize> {
        self.inner.fitted.as_ref().map(|f| f.nfeatures())
    }
}

impl<F: Float> Default for StandardScaler<F> {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! impl_column_scaler {
    ($scaler:ident) => {
        impl<F: Float> ColumnScaler<F> for $scaler<F> {
            fn fit(&mut self, x: ArrayView2<'_, F>) -> Result<()> {
                $scaler::fit(self, &x).map(|_| ())
            }

            fn transform(&self, x: ArrayView2<'_, F>) -> Result<Array2<F>> {
                $scaler::transform(self, &x)
            }

            fn fit_transform(&mut self, x: ArrayView2<'_, F>) -> Result<Array2<F>> {
                $scaler::fit_transform(self, &x)
            }

            fn inverse_transform(&self, x: ArrayView2<'_, F>) -> Result<Array2<F>> {
                $scaler::inverse_transform(self, &x)
            }

            fn is_fitted(&self) -> bool {
                $scaler::is_fitted(self)
            }

            fn n_features(&self) -> Option<usize> {
                $scaler::n_features(self)
            }
        }

        impl<'a, F: Float, D: Data<Elem = F>> Transformer<&'a ArrayBase<D, Ix2>, Result<Array2<F>>>
            for $scaler<F>
        {
            fn transform(&self, x: &'a ArrayBase<D, Ix2>) -> Result<Array2<F>> {
                $scaler::transform(self, x)
            }
        }

        impl<'a, F: Float, D: Data<Elem = F>>
            InverseTransformer<&'a ArrayBase<D, Ix2>, Result<Array2<F>>> for $scaler<F>
        {
            fn inverse_transform(&self, x: &'a ArrayBase<D, Ix2>) -> Result<Array2<F>> {
                $scaler::inverse_transform(self, x)
            }
        }
    };
}

impl_column_scaler!(MinMaxScaler);
impl_column_scaler!(StandardScaler);

#[cfg(test)]
mod tests {
    use super::{ColumnScaler, MinMaxScaler, StandardScaler};
    use crate::error::PreprocessingError;
    use crate::linear_scaling::ConstantColumns;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2, Axis};

    fn records() -> Array2<f64> {
        array![[0., 10.], [5., 20.], [10., 30.]]
    }

    #[test]
    fn min_max_known_values() {
        let mut scaler = MinMaxScaler::new();
        let scaled = scaler.fit_transform(&records()).unwrap();
        assert_abs_diff_eq!(scaled, array![[0., 0.], [0.5, 0.5], [1., 1.]]);
        assert_abs_diff_eq!(*scaler.data_min().unwrap(), array![0., 10.]);
        assert_abs_diff_eq!(scaler.data_max().unwrap(), array![10., 30.]);
        assert_abs_diff_eq!(*scaler.data_range().unwrap(), array![10., 20.]);
        assert_eq!(scaler.n_features(), Some(2));
    }

    #[test]
    fn standard_known_values() {
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&records()).unwrap();
        let expected = 5. / (50f64 / 3.).sqrt();
        assert_abs_diff_eq!(
            scaled,
            array![[-expected, -expected], [0., 0.], [expected, expected]],
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(scaled[[0, 0]], -1.2247, epsilon = 1e-4);
        assert_abs_diff_eq!(*scaler.mean().unwrap(), array![5., 20.]);
        assert_abs_diff_eq!(
            *scaler.std().unwrap(),
            array![4.0825, 8.165],
            epsilon = 1e-3
        );
    }

    #[test]
    fn transform_before_fit() {
        let scaler = MinMaxScaler::<f64>::new();
        assert!(!scaler.is_fitted());
        assert_eq!(scaler.n_features(), None);
        assert!(matches!(
            scaler.transform(&records()),
            Err(PreprocessingError::NotFitted)
        ));
        assert!(matches!(
            scaler.inverse_transform(&records()),
            Err(PreprocessingError::NotFitted)
        ));
        assert!(matches!(scaler.data_min(), Err(PreprocessingError::NotFitted)));

        let scaler = StandardScaler::<f64>::new();
        assert!(matches!(
            scaler.transform(&records()),
            Err(PreprocessingError::NotFitted)
        ));
        assert!(matches!(scaler.mean(), Err(PreprocessingError::NotFitted)));
        assert_eq!(
            scaler.std().unwrap_err().to_string(),
            "scaler has not been fitted"
        );
    }

    #[test]
    fn fit_is_chainable() {
        let mut scaler = MinMaxScaler::new();
        let scaled = scaler.fit(&records()).unwrap().transform(&records()).unwrap();
        assert_abs_diff_eq!(scaled.column(1), array![0., 0.5, 1.]);
    }

    #[test]
    fn refit_overwrites_parameters() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&records()).unwrap();
        scaler.fit(&array![[1., 1., 1.], [3., 5., 7.]]).unwrap();
        assert_eq!(scaler.n_features(), Some(3));
        assert_abs_diff_eq!(*scaler.mean().unwrap(), array![2., 3., 4.]);
    }

    #[test]
    fn failed_fit_keeps_previous_parameters() {
        let mut scaler = MinMaxScaler::new();
        scaler.fit(&records()).unwrap();
        let err = scaler.fit(&array![[1., 1.], [1., 2.], [1., 3.]]).unwrap_err();
        assert!(matches!(err, PreprocessingError::ConstantColumn { column: 0 }));
        let err = scaler.fit(&Array2::<f64>::zeros((0, 2))).unwrap_err();
        assert!(matches!(err, PreprocessingError::NotEnoughSamples));
        assert_abs_diff_eq!(*scaler.data_min().unwrap(), array![0., 10.]);
    }

    #[test]
    fn constant_column_passthrough() {
        let constant = array![[1., 1.], [1., 2.], [1., 3.]];
        let mut scaler = MinMaxScaler::new().constant_columns(ConstantColumns::Passthrough);
        let scaled = scaler.fit_transform(&constant).unwrap();
        assert_abs_diff_eq!(scaled, array![[0., 0.], [0., 0.5], [0., 1.]]);
        assert_abs_diff_eq!(*scaler.data_range().unwrap(), array![0., 2.]);
        let restored = scaler.inverse_transform(&scaled).unwrap();
        assert_abs_diff_eq!(restored, constant);

        let mut scaler = StandardScaler::new().constant_columns(ConstantColumns::Passthrough);
        let scaled = scaler.fit_transform(&constant).unwrap();
        assert_abs_diff_eq!(scaled.column(0), array![0., 0., 0.]);
        assert_abs_diff_eq!(scaler.std().unwrap()[0], 0.);
    }

    #[test]
    fn custom_feature_range() {
        let mut scaler = MinMaxScaler::new().feature_range(-1., 1.);
        assert_eq!(scaler.feature_range_bounds(), (-1., 1.));
        let scaled = scaler.fit_transform(&records()).unwrap();
        assert_abs_diff_eq!(scaled, array![[-1., -1.], [0., 0.], [1., 1.]]);
        let restored = scaler.inverse_transform(&scaled).unwrap();
        assert_abs_diff_eq!(restored, records(), epsilon = 1e-12);

        let mut flipped = MinMaxScaler::new().feature_range(1., -1.);
        assert!(matches!(
            flipped.fit(&records()),
            Err(PreprocessingError::FlippedFeatureRange)
        ));
        assert!(!flipped.is_fitted());
    }

    #[test]
    fn standard_flags() {
        let x = array![[1., -1., 2.], [2., 0., 0.], [0., 1., -1.]];

        let mut scaler = StandardScaler::new().with_mean(false);
        let scaled = scaler.fit_transform(&x).unwrap();
        assert_abs_diff_eq!(*scaler.mean().unwrap(), array![0., 0., 0.]);
        assert_abs_diff_eq!(
            scaled.std_axis(Axis(0), 0.),
            array![1., 1., 1.],
            epsilon = 1e-12
        );

        let mut scaler = StandardScaler::new().with_std(false);
        let scaled = scaler.fit_transform(&x).unwrap();
        assert_abs_diff_eq!(*scaler.std().unwrap(), array![1., 1., 1.]);
        assert_abs_diff_eq!(
            scaled.mean_axis(Axis(0)).unwrap(),
            array![0., 0., 0.],
            epsilon = 1e-12
        );

        // the second flag keeps the first
        let mut scaler = StandardScaler::new().with_mean(false).with_std(false);
        let scaled = scaler.fit_transform(&x).unwrap();
        assert_abs_diff_eq!(scaled, x);
    }

    #[test]
    fn shape_mismatch() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&records()).unwrap();
        let err = scaler.transform(&array![[1., 2., 3.]]).unwrap_err();
        assert_eq!(err.to_string(), "expected 2 columns, found 3");
        let err = scaler.inverse_transform(&array![[1.]]).unwrap_err();
        assert!(matches!(
            err,
            PreprocessingError::ShapeMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn single_row_input() {
        let mut scaler = MinMaxScaler::new();
        scaler.fit(&records()).unwrap();
        let row = array![2.5, 15.].insert_axis(Axis(0));
        let scaled = scaler.transform(&row).unwrap();
        assert_abs_diff_eq!(scaled, array![[0.25, 0.25]]);
    }

    #[test]
    fn trait_objects_share_the_lifecycle() {
        let x = records();
        let mut scalers: Vec<Box<dyn ColumnScaler<f64>>> = vec![
            Box::new(MinMaxScaler::<f64>::new()),
            Box::new(StandardScaler::<f64>::new()),
        ];
        for scaler in scalers.iter_mut() {
            assert!(!scaler.is_fitted());
            assert!(matches!(
                scaler.transform(x.view()),
                Err(PreprocessingError::NotFitted)
            ));
            let scaled = scaler.fit_transform(x.view()).unwrap();
            assert_eq!(scaler.n_features(), Some(2));
            let again = scaler.transform(x.view()).unwrap();
            assert_abs_diff_eq!(scaled, again);
            let restored = scaler.inverse_transform(scaled.view()).unwrap();
            assert_abs_diff_eq!(restored, x, epsilon = 1e-12);
        }
    }
}
