use super::sweep::{SweepSummary, solve_angle_sweep};
use crate::core::adapter::AeroEngine;
use crate::core::result::{OperatingPointResult, PolarRow};
use crate::engine::error::SolveError;
use crate::engine::progress::ProgressReporter;
use crate::engine::session::Session;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum PolarError {
    #[error("Invalid polar range: {0}")]
    InvalidRange(String),

    #[error("Polar sweep failed: {0}")]
    Solve(#[from] SolveError),

    #[error("Failed to write polar as CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Inclusive, evenly spaced angle-of-attack range in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarRange {
    pub start_deg: f64,
    pub end_deg: f64,
    /// Number of angles, both ends included.
    pub steps: usize,
}

impl PolarRange {
    pub fn new(start_deg: f64, end_deg: f64, steps: usize) -> Result<Self, PolarError> {
        let range = Self {
            start_deg,
            end_deg,
            steps,
        };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), PolarError> {
        if !self.start_deg.is_finite() || !self.end_deg.is_finite() {
            return Err(PolarError::InvalidRange(format!(
                "bounds must be finite, got {} to {}",
                self.start_deg, self.end_deg
            )));
        }
        if self.steps < 2 {
            return Err(PolarError::InvalidRange(format!(
                "at least 2 steps are required, got {}",
                self.steps
            )));
        }
        Ok(())
    }

    pub fn angles_deg(&self) -> Vec<f64> {
        let increment = (self.end_deg - self.start_deg) / (self.steps - 1) as f64;
        (0..self.steps)
            .map(|i| {
                if i + 1 == self.steps {
                    self.end_deg
                } else {
                    self.start_deg + i as f64 * increment
                }
            })
            .collect()
    }
}

/// Every requested point of a polar, converged or not, in angle order of the request.
#[derive(Debug, Clone, PartialEq)]
pub struct Polar {
    pub reynolds: f64,
    pub mach: f64,
    pub critical_amplification: f64,
    pub points: Vec<OperatingPointResult>,
}

impl Polar {
    pub fn rows(&self) -> Vec<PolarRow> {
        self.points.iter().map(OperatingPointResult::to_row).collect()
    }

    /// Rows of converged points only.
    pub fn converged(&self) -> Vec<PolarRow> {
        self.points
            .iter()
            .filter(|p| p.converged())
            .map(OperatingPointResult::to_row)
            .collect()
    }

    pub fn summary(&self) -> SweepSummary {
        SweepSummary::from_results(&self.points)
    }

    /// Writes one CSV record per point; unavailable fields are left empty.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), PolarError> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in self.rows() {
            writer.serialize(row)?;
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn write_csv_file(&self, path: &Path) -> Result<(), PolarError> {
        let file = std::fs::File::create(path).map_err(csv::Error::from)?;
        self.write_csv(io::BufWriter::new(file))
    }
}

/// Runs an angle-of-attack polar on `session`.
#[instrument(
    skip_all,
    name = "polar_workflow",
    fields(start = range.start_deg, end = range.end_deg, steps = range.steps)
)]
pub fn run<E: AeroEngine>(
    session: &mut Session<E>,
    range: &PolarRange,
    reporter: &ProgressReporter,
) -> Result<Polar, PolarError> {
    range.validate()?;

    let angles: Vec<f64> = range.angles_deg().into_iter().map(f64::to_radians).collect();
    let points = solve_angle_sweep(session, &angles, reporter)?;

    let config = session.config();
    let polar = Polar {
        reynolds: config.reynolds,
        mach: config.mach,
        critical_amplification: config.critical_amplification,
        points,
    };

    let summary = polar.summary();
    info!(
        converged = summary.converged,
        total = summary.total,
        "Polar complete."
    );
    Ok(polar)
}
