use super::config::ConfigError;
use super::solver::OperatingPointSpec;
use crate::core::geometry::GeometryError;
use thiserror::Error;

/// Errors that make an analysis session unusable.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Engine rejected the airfoil geometry ({num_points} points)")]
    GeometryRejected { num_points: usize },

    #[error("Engine rejected the analysis parameters: {reason}")]
    AnalysisRejected { reason: String },

    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Why a well-posed operating point did not converge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// The step loop reached `max_iterations` without convergence.
    CapExceeded,
    /// A boundary-layer step failed outright.
    StepFailed,
    /// Post-iteration bookkeeping reported divergence.
    FinalizeFailed,
    /// The engine refused to open a viscous pass on every attempt.
    PassRejected,
}

impl std::fmt::Display for FailureCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FailureCause::CapExceeded => "iteration cap exceeded",
            FailureCause::StepFailed => "boundary-layer step failed",
            FailureCause::FinalizeFailed => "boundary layer diverged",
            FailureCause::PassRejected => "viscous pass rejected",
        };
        f.write_str(text)
    }
}

/// Errors of a single operating-point solve.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolveError {
    #[error("Operating point {spec} did not converge after {iterations} iterations: {cause}")]
    Unconverged {
        spec: OperatingPointSpec,
        iterations: usize,
        cause: FailureCause,
    },

    #[error("Operating point value {value} is not finite")]
    InvalidInput { value: f64 },
}
