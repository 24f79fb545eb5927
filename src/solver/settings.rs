use crate::algebra::*;
use derive_builder::Builder;

/// Form in which the Hessian is supplied to the solver.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum HessianType {
    /// The lower triangle holds the Hessian itself; the solver factors it.
    #[default]
    LowerTriangular,
    /// The lower triangle already holds a Cholesky factor of the Hessian.
    CholeskyFactor,
}

/// Solver settings.
///
/// Can be instantiated via `Settings::default()` or through the
/// [builder](SettingsBuilder):
///
/// ```
/// use qpdas::SettingsBuilder;
/// let settings = SettingsBuilder::<f64>::default()
///     .max_iter(100)
///     .verbose(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Settings<T: FloatT> {
    ///form of the supplied Hessian
    #[builder(default)]
    pub hessian_type: HessianType,

    ///maximum number of active-set iterations; negative means unbounded
    #[builder(default = "-1")]
    pub max_iter: i32,

    ///comparison tolerance for violations and factorization pivots
    #[builder(default = "(1e-12).as_T()")]
    pub tolerance: T,

    ///per-iteration diagnostic printing
    #[builder(default = "false")]
    pub verbose: bool,
}

impl<T> Default for Settings<T>
where
    T: FloatT,
{
    fn default() -> Settings<T> {
        SettingsBuilder::<T>::default().build().unwrap()
    }
}

/// Automatic pre-build settings validation
impl<T> SettingsBuilder<T>
where
    T: FloatT,
{
    fn validate(&self) -> Result<(), String> {
        if let Some(tolerance) = self.tolerance {
            validate_tolerance(tolerance)?;
        }
        Ok(())
    }
}

/// Manual post-build settings validation
impl<T> Settings<T>
where
    T: FloatT,
{
    /// Checks that the settings are valid.  The solver re-checks on every
    /// `solve` call since the fields are publicly writable.
    pub fn validate(&self) -> Result<(), String> {
        validate_tolerance(self.tolerance)
    }
}

fn validate_tolerance<T: FloatT>(tolerance: T) -> Result<(), String> {
    if tolerance > T::zero() && tolerance.is_finite() {
        Ok(())
    } else {
        Err(format!("tolerance must be positive, got {}", tolerance))
    }
}

#[test]
fn test_settings_validate() {
    //all standard settings
    let settings = SettingsBuilder::<f64>::default().build().unwrap();
    assert_eq!(settings.max_iter, -1);
    assert_eq!(settings.hessian_type, HessianType::LowerTriangular);

    //fail on a non-positive tolerance
    assert!(SettingsBuilder::<f64>::default()
        .tolerance(0.0)
        .build()
        .is_err());
    assert!(SettingsBuilder::<f64>::default()
        .tolerance(-1e-9)
        .build()
        .is_err());
    assert!(SettingsBuilder::<f64>::default()
        .tolerance(f64::NAN)
        .build()
        .is_err());
}
