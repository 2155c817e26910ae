use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use statlib::ProductDomain;
use std::{collections::HashSet, fs, path::Path};

/// Paired statistic a job computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    Correlation,
    Covariance,
    SumProduct,
}

/// Named numeric series.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Series {
    /// Name jobs refer to.
    pub name: String,
    /// Values of the series (integers are accepted).
    pub values: Vec<f64>,
}

/// Statistic to compute over two declared series.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    /// Label used when reporting the result.
    pub title: String,
    pub statistic: Statistic,
    /// Name of the first series.
    pub x: String,
    /// Name of the second series.
    pub y: String,
    /// Reject a negative sum of products (only valid for `sum_product`).
    #[serde(default)]
    pub non_negative: bool,
}

impl Job {
    pub fn domain(&self) -> ProductDomain {
        if self.non_negative {
            ProductDomain::NonNegative
        } else {
            ProductDomain::Any
        }
    }
}

/// Job file configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Declared series (`[[series]]` tables).
    #[serde(default)]
    pub series: Vec<Series>,

    /// Jobs to evaluate (`[[job]]` tables).
    #[serde(default, rename = "job")]
    pub jobs: Vec<Job>,
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration is invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents = fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a [`Config`] from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    /// Values of the series called `name`.
    pub fn values(&self, name: &str) -> Result<&[f64]> {
        self.series
            .iter()
            .find(|series| series.name == name)
            .map(|series| series.values.as_slice())
            .with_context(|| format!("series {name:?} is not declared"))
    }

    fn validate(&self) -> Result<()> {
        if self.series.is_empty() {
            bail!("at least one series must be declared");
        }

        let mut names = HashSet::new();
        for (i_series, series) in self.series.iter().enumerate() {
            check_name(&series.name, &mut names)
                .with_context(|| format!("invalid name of series {i_series}"))?;
            check_vals(&series.values)
                .with_context(|| format!("invalid values of series {:?}", series.name))?;
        }

        let mut titles = HashSet::new();
        for (i_job, job) in self.jobs.iter().enumerate() {
            self.check_job(job, &mut titles)
                .with_context(|| format!("invalid job {i_job}"))?;
        }

        Ok(())
    }

    fn check_job<'a>(&self, job: &'a Job, titles: &mut HashSet<&'a str>) -> Result<()> {
        check_name(&job.title, titles).context("invalid title")?;
        self.values(&job.x).context("invalid x series")?;
        self.values(&job.y).context("invalid y series")?;
        if job.non_negative && job.statistic != Statistic::SumProduct {
            bail!("non_negative only applies to sum_product, not {:?}", job.statistic);
        }
        Ok(())
    }
}

fn check_vals(vals: &[f64]) -> Result<()> {
    for (i_val, &val) in vals.iter().enumerate() {
        if !val.is_finite() {
            bail!("value {i_val} must be finite, but is {val}");
        }
    }
    Ok(())
}

fn check_name<'a>(name: &'a str, seen: &mut HashSet<&'a str>) -> Result<()> {
    if name.trim().is_empty() {
        bail!("name must not be empty");
    }
    if !seen.insert(name) {
        bail!("name {name:?} is used more than once");
    }
    Ok(())
}
