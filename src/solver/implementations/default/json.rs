use crate::{
    algebra::*,
    physics::ModelParameters,
    solver::{DefaultSettings, DefaultSolution, SolverStatus},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

/// Reading and writing of JSON files
pub trait JSONReadWrite: Sized {
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error>;
    fn read_from_file(file: &mut File) -> Result<Self, io::Error>;
}

/// A run configuration: physical parameters plus solver settings.
///
/// ```text
/// { "parameters": { "q": 1.4, ... }, "settings": { "tol": 1e-6, ... } }
/// ```
/// Missing entries take their default values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
pub struct RunConfig<T: FloatT> {
    #[serde(default)]
    pub parameters: ModelParameters<T>,
    #[serde(default)]
    pub settings: DefaultSettings<T>,
}

impl<T> RunConfig<T>
where
    T: FloatT,
{
    /// Validated parameters and the settings they imply.  The iteration
    /// limit of the parameters takes precedence over `settings.max_iter`.
    pub fn resolve(&self) -> Result<(ModelParameters<T>, DefaultSettings<T>), crate::solver::SolverError> {
        self.parameters.validate()?;
        let mut settings = self.settings.clone();
        self.parameters.apply_to(&mut settings);
        settings.validate()?;
        Ok((self.parameters.clone(), settings))
    }
}

/// The user facing part of a [`DefaultSolution`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
pub struct SolutionRecord<T> {
    pub eigenvalue: Complex<T>,
    pub status: SolverStatus,
    pub iterations: u32,
    pub indicator: Complex<T>,
    pub eigenvector: Vec<Complex<T>>,
    pub solve_time: f64,
}

impl<T> From<&DefaultSolution<T>> for SolutionRecord<T>
where
    T: FloatT,
{
    fn from(solution: &DefaultSolution<T>) -> Self {
        Self {
            eigenvalue: solution.eigenvalue,
            status: solution.status,
            iterations: solution.iterations,
            indicator: solution.indicator,
            eigenvector: solution.eigenvector.clone(),
            solve_time: solution.solve_time,
        }
    }
}

impl<T> JSONReadWrite for RunConfig<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string_pretty(self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let config = serde_json::from_str(&buffer)?;
        Ok(config)
    }
}

impl<T> JSONReadWrite for SolutionRecord<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    // non-finite values are written as null and
    // can not be read back
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string_pretty(self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let record = serde_json::from_str(&buffer)?;
        Ok(record)
    }
}

#[test]
fn test_run_config_io() {
    use crate::solver::core::traits::FieldLayout;
    use std::io::{Seek, SeekFrom};

    let mut config = RunConfig::<f64>::default();
    config.parameters.npoints = 8;
    config.parameters.field_layout = FieldLayout::Electromagnetic;
    config.settings.tol = 1e-8;

    let mut file = tempfile::tempfile().unwrap();
    config.write_to_file(&mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let config2 = RunConfig::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(config, config2);
}

#[test]
fn test_run_config_partial() {
    let json = r#"{ "parameters": { "tau": 2.0, "npoints": 4, "iteration_step_limit": 12 } }"#;
    let config: RunConfig<f64> = serde_json::from_str(json).unwrap();
    assert_eq!(config.parameters.tau, 2.0);
    assert_eq!(config.settings, DefaultSettings::default());

    let (params, settings) = config.resolve().unwrap();
    assert_eq!(params.npoints, 4);
    assert_eq!(settings.max_iter, 12);
}
