use super::error::{FailureCause, SolveError};
use super::solver::OperatingPointSpec;
use crate::core::result::OperatingPointResult;

/// Result of one Converge call.
///
/// Non-convergence is data, not an exception: callers choose whether a failed point aborts
/// (single solve) or degrades to a partial result (sweep).
#[derive(Debug, Clone, PartialEq)]
pub enum ConvergenceOutcome {
    Converged(OperatingPointResult),
    CapExceeded { iterations: usize },
    StepFailed { iterations: usize },
    FinalizeFailed { iterations: usize },
    PassRejected { attempts: usize },
    /// The inviscid stage rejected the specification; the boundary layer was never touched.
    InvalidSpecification,
}

impl ConvergenceOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, ConvergenceOutcome::Converged(_))
    }

    /// Cause and iteration count of a fatal outcome; `None` for converged or invalid points.
    pub fn failure(&self) -> Option<(FailureCause, usize)> {
        match *self {
            ConvergenceOutcome::CapExceeded { iterations } => {
                Some((FailureCause::CapExceeded, iterations))
            }
            ConvergenceOutcome::StepFailed { iterations } => {
                Some((FailureCause::StepFailed, iterations))
            }
            ConvergenceOutcome::FinalizeFailed { iterations } => {
                Some((FailureCause::FinalizeFailed, iterations))
            }
            ConvergenceOutcome::PassRejected { .. } => Some((FailureCause::PassRejected, 0)),
            ConvergenceOutcome::Converged(_) | ConvergenceOutcome::InvalidSpecification => None,
        }
    }

    /// Single-point mapping: an invalid specification yields a partial result at the angle
    /// pushed to the engine, any other failure is an error.
    pub fn into_result(self, spec: OperatingPointSpec) -> Result<OperatingPointResult, SolveError> {
        if let Some((cause, iterations)) = self.failure() {
            return Err(SolveError::Unconverged {
                spec,
                iterations,
                cause,
            });
        }
        Ok(self.into_partial(spec))
    }

    /// Sweep mapping: every failure degrades to a partial result.
    pub fn into_partial(self, spec: OperatingPointSpec) -> OperatingPointResult {
        match self {
            ConvergenceOutcome::Converged(result) => result,
            _ => OperatingPointResult::unconverged(spec.initial_alpha_rad().to_degrees()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_outcomes_map_to_unconverged_errors() {
        let spec = OperatingPointSpec::Angle(0.1);
        let err = ConvergenceOutcome::CapExceeded { iterations: 200 }
            .into_result(spec)
            .unwrap_err();
        assert_eq!(
            err,
            SolveError::Unconverged {
                spec,
                iterations: 200,
                cause: FailureCause::CapExceeded
            }
        );
        assert!(matches!(
            ConvergenceOutcome::PassRejected { attempts: 3 }.into_result(spec),
            Err(SolveError::Unconverged {
                cause: FailureCause::PassRejected,
                ..
            })
        ));
    }

    #[test]
    fn invalid_specification_maps_to_partial_result_in_both_modes() {
        let angle = ConvergenceOutcome::InvalidSpecification
            .into_result(OperatingPointSpec::Angle(5f64.to_radians()))
            .unwrap();
        assert!(!angle.converged());
        assert!((angle.alpha_deg - 5.0).abs() < 1e-12);

        let lift = ConvergenceOutcome::InvalidSpecification
            .into_result(OperatingPointSpec::LiftCoefficient(1.2))
            .unwrap();
        assert!(!lift.converged());
        assert_eq!(lift.alpha_deg, 0.0);
    }

    #[test]
    fn into_partial_never_fails() {
        let spec = OperatingPointSpec::Angle(0.2);
        let partial = ConvergenceOutcome::FinalizeFailed { iterations: 7 }.into_partial(spec);
        assert!(!partial.converged());
        assert!((partial.alpha_deg - 0.2f64.to_degrees()).abs() < 1e-12);
    }
}
