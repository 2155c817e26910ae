use crate::config::{Config, Job, Statistic};
use anyhow::{Context, Result};
use serde::Serialize;
use statlib::HighPrecisionFloat;
use std::{fs, path::Path};

/// Outcome of a single job.
#[derive(Debug, PartialEq, Serialize)]
pub struct JobReport {
    pub title: String,
    pub statistic: Statistic,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<HighPrecisionFloat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Descriptive statistics of a single series.
#[derive(Debug, PartialEq, Serialize)]
pub struct SeriesReport {
    pub name: String,
    pub len: usize,
    pub sum: HighPrecisionFloat,
    pub sum_squared: HighPrecisionFloat,
    pub product: HighPrecisionFloat,
    pub average: HighPrecisionFloat,
    pub geometric_mean: HighPrecisionFloat,
}

#[derive(Serialize)]
struct JobResults<'a> {
    result: &'a [JobReport],
}

#[derive(Serialize)]
struct SeriesResults<'a> {
    series: &'a [SeriesReport],
}

pub struct Analyzer<'a> {
    cfg: &'a Config,
}

impl<'a> Analyzer<'a> {
    pub fn new(cfg: &'a Config) -> Self {
        Self { cfg }
    }

    /// Evaluate every job, reporting failed statistics without stopping.
    pub fn evaluate(&self) -> Result<Vec<JobReport>> {
        let mut reports = Vec::with_capacity(self.cfg.jobs.len());
        for job in &self.cfg.jobs {
            let report = self
                .evaluate_job(job)
                .with_context(|| format!("failed to evaluate {:?}", job.title))?;
            reports.push(report);
        }
        Ok(reports)
    }

    fn evaluate_job(&self, job: &Job) -> Result<JobReport> {
        let x = self.cfg.values(&job.x)?;
        let y = self.cfg.values(&job.y)?;

        let outcome = match job.statistic {
            Statistic::Correlation => statlib::coefficient_correlation(x, y),
            Statistic::Covariance => statlib::covariance(x, y),
            Statistic::SumProduct => statlib::sum_product_in(x, y, job.domain()),
        };

        let (value, error) = match outcome {
            Ok(value) => {
                log::info!("{}={value}", job.title);
                (Some(value), None)
            }
            Err(error) => {
                log::warn!("{} error: {error}", job.title);
                (None, Some(error.to_string()))
            }
        };

        Ok(JobReport {
            title: job.title.clone(),
            statistic: job.statistic,
            value,
            error,
        })
    }

    /// Compute the descriptive statistics of every series.
    pub fn describe(&self) -> Vec<SeriesReport> {
        self.cfg
            .series
            .iter()
            .map(|series| {
                let vals = series.values.as_slice();
                let report = SeriesReport {
                    name: series.name.clone(),
                    len: vals.len(),
                    sum: statlib::sum(vals),
                    sum_squared: statlib::sum_squared(vals),
                    product: statlib::product(vals),
                    average: statlib::average(vals),
                    geometric_mean: statlib::geometric_mean(vals),
                };
                log::info!("{report:?}");
                report
            })
            .collect()
    }
}

pub fn save_job_reports<P: AsRef<Path>>(reports: &[JobReport], file: P) -> Result<()> {
    save_toml(&JobResults { result: reports }, file.as_ref())
}

pub fn save_series_reports<P: AsRef<Path>>(reports: &[SeriesReport], file: P) -> Result<()> {
    save_toml(&SeriesResults { series: reports }, file.as_ref())
}

fn save_toml<T: Serialize>(results: &T, file: &Path) -> Result<()> {
    let contents = toml::to_string_pretty(results).context("failed to serialize results")?;
    fs::write(file, contents).with_context(|| format!("failed to write {file:?}"))?;
    log::info!("saved {file:?}");
    Ok(())
}
