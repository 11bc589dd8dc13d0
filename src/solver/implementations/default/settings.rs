use crate::algebra::*;
use crate::solver::core::{indicator::IndicatorMethod, secant::SecantOptions, SettingsError};
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Settings for the [`DefaultSolver`](super::DefaultSolver)

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefaultSettings<T: FloatT> {
    ///maximum number of secant updates
    #[builder(default = "100")]
    pub max_iter: u32,

    ///relative tolerance on the eigenvalue update
    #[builder(default = "(1e-6).as_T()")]
    pub tol: T,

    ///relative perturbation deriving the second starting guess from the first
    #[builder(default = "(1e-3).as_T()")]
    pub initial_perturbation: T,

    ///relative change in the indicator below which the iteration has stagnated
    #[builder(default = "T::epsilon()")]
    pub stagnation_tol: T,

    ///verbose printing
    #[builder(default = "true")]
    pub verbose: bool,

    ///number of assembly worker threads.
    ///choosing 0 uses the shared process wide pool
    #[builder(default = "0")]
    pub max_threads: u32,

    ///scalar indicator whose root is searched for
    #[builder(default = "IndicatorMethod::ScaledDeterminant")]
    pub indicator: IndicatorMethod,

    ///extract the null space and approximate eigenmode at termination
    #[builder(default = "true")]
    pub compute_eigenvector: bool,

    ///singular value threshold for the null space, relative to the largest
    #[builder(default = "(1e-6).as_T()")]
    pub nullspace_tol: T,
}

impl<T> Default for DefaultSettings<T>
where
    T: FloatT,
{
    fn default() -> DefaultSettings<T> {
        DefaultSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> DefaultSettings<T>
where
    T: FloatT,
{
    /// Checks that all tolerances are finite and positive (the
    /// stagnation tolerance may be zero) and that the initial
    /// perturbation is finite and nonzero.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_positive(self.tol, "tol")?;
        validate_positive(self.nullspace_tol, "nullspace_tol")?;
        validate_nonnegative(self.stagnation_tol, "stagnation_tol")?;
        validate_nonzero(self.initial_perturbation, "initial_perturbation")?;
        Ok(())
    }

    /// options for the secant loop
    pub fn secant_options(&self) -> SecantOptions<T> {
        SecantOptions {
            max_iter: self.max_iter,
            tol: self.tol,
            stagnation_tol: self.stagnation_tol,
            initial_perturbation: self.initial_perturbation,
        }
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for DefaultSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        DefaultSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> DefaultSettingsBuilder<T>
where
    T: FloatT,
{
    /// check any numerical fields that have been set explicitly
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(tol) = self.tol {
            validate_positive(tol, "tol")?;
        }
        if let Some(tol) = self.nullspace_tol {
            validate_positive(tol, "nullspace_tol")?;
        }
        if let Some(tol) = self.stagnation_tol {
            validate_nonnegative(tol, "stagnation_tol")?;
        }
        if let Some(p) = self.initial_perturbation {
            validate_nonzero(p, "initial_perturbation")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_positive<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if v.is_finite() && v > T::zero() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(field))
    }
}

fn validate_nonnegative<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if v.is_finite() && v >= T::zero() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(field))
    }
}

fn validate_nonzero<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if v.is_finite() && v != T::zero() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(field))
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings
    DefaultSettingsBuilder::<f64>::default().build().unwrap();

    assert!(DefaultSettingsBuilder::<f64>::default()
        .tol(0.0)
        .build()
        .is_err());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .initial_perturbation(0.0)
        .build()
        .is_err());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .nullspace_tol(f64::NAN)
        .build()
        .is_err());

    // a zero stagnation tolerance is allowed
    let settings = DefaultSettingsBuilder::<f64>::default()
        .stagnation_tol(0.0)
        .build()
        .unwrap();
    assert!(settings.validate().is_ok());

    // fields modified after building are caught by validate()
    let mut settings = DefaultSettings::<f64>::default();
    settings.tol = -1.0;
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadFieldValue("tol"))
    );
}
