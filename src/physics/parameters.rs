use crate::algebra::*;
use crate::solver::core::{grid::Grid, traits::FieldLayout, SolverError};
use crate::solver::implementations::default::DefaultSettings;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Magnetic geometry of the equilibrium.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub enum Geometry<T> {
    #[default]
    Tokamak,
    /// helical stellarator with an `(lh, mh)` harmonic of the field strength
    Stellarator {
        eta_k: T,
        lh: i32,
        mh: i32,
        epsilon_h_t: T,
        alpha_0: T,
        r_over_r: T,
    },
}

/// Physical parameters of a dispersion relation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: FloatT"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModelParameters<T> {
    /// safety factor
    pub q: T,
    /// magnetic shear
    pub shat: T,
    /// temperature ratio T_e / T_i
    pub tau: T,
    /// density gradient scale length ratio L_n / R
    pub epsilon_n: T,
    /// ion temperature to density gradient ratio
    pub eta_i: T,
    /// electron temperature to density gradient ratio
    pub eta_e: T,
    /// poloidal wave number parameter k_θ ρ_i
    pub b_theta: T,
    /// electron beta
    pub beta_e: T,
    /// major radius
    pub major_radius: T,
    /// thermal velocity
    pub vt: T,
    /// extent of the grid along the field line
    pub length: T,
    /// ballooning angle
    pub theta: T,
    /// number of grid points
    pub npoints: usize,
    /// maximum number of secant updates
    pub iteration_step_limit: u32,
    pub field_layout: FieldLayout,
    pub geometry: Geometry<T>,
}

impl<T> Default for ModelParameters<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self {
            q: (1.4).as_T(),
            shat: (0.8).as_T(),
            tau: T::one(),
            epsilon_n: (0.9).as_T(),
            eta_i: (2.5).as_T(),
            eta_e: (2.5).as_T(),
            b_theta: (0.1).as_T(),
            beta_e: (0.01).as_T(),
            major_radius: T::one(),
            vt: T::one(),
            length: (10.0).as_T(),
            theta: T::zero(),
            npoints: 32,
            iteration_step_limit: 100,
            field_layout: FieldLayout::Electrostatic,
            geometry: Geometry::Tokamak,
        }
    }
}

impl<T> ModelParameters<T>
where
    T: FloatT,
{
    /// Check that the parameters describe a usable problem.
    pub fn validate(&self) -> Result<(), SolverError> {
        let finite = [
            ("q", self.q),
            ("shat", self.shat),
            ("epsilon_n", self.epsilon_n),
            ("eta_i", self.eta_i),
            ("eta_e", self.eta_e),
            ("b_theta", self.b_theta),
            ("major_radius", self.major_radius),
            ("vt", self.vt),
            ("theta", self.theta),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SolverError::InvalidArgument(format!(
                "parameter {name} must be finite"
            )));
        }

        if !self.tau.is_finite() || self.tau <= T::zero() {
            return Err(SolverError::InvalidArgument(
                "tau must be positive and finite".to_string(),
            ));
        }
        if self.field_layout == FieldLayout::Electromagnetic
            && (!self.beta_e.is_finite() || self.beta_e <= T::zero())
        {
            return Err(SolverError::InvalidArgument(
                "beta_e must be positive for an electromagnetic model".to_string(),
            ));
        }

        if let Geometry::Stellarator {
            eta_k,
            epsilon_h_t,
            alpha_0,
            r_over_r,
            ..
        } = self.geometry
        {
            if [eta_k, epsilon_h_t, alpha_0, r_over_r]
                .iter()
                .any(|v| !v.is_finite())
            {
                return Err(SolverError::InvalidArgument(
                    "stellarator parameters must be finite".to_string(),
                ));
            }
        }

        // grid length and point count
        self.grid().map(|_| ())
    }

    /// grid of `npoints` points over `[0, length)`
    pub fn grid(&self) -> Result<Grid<T>, SolverError> {
        Grid::new(self.length, self.npoints)
    }

    /// matrix dimension implied by the field layout and grid size
    pub fn dim(&self) -> usize {
        self.field_layout.dim(self.npoints)
    }

    /// Copy the solver related entries into `settings`.
    pub fn apply_to(&self, settings: &mut DefaultSettings<T>) {
        settings.max_iter = self.iteration_step_limit;
    }
}
