use crate::core::adapter::AeroEngine;
use crate::core::result::OperatingPointResult;
use crate::engine::error::SolveError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::session::Session;
use crate::engine::solver::{self, OperatingPointSpec};
use tracing::{info, instrument, warn};

/// Converged and failed point counts of a finished sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepSummary {
    pub total: usize,
    pub converged: usize,
    pub failed: usize,
}

impl SweepSummary {
    pub fn from_results(results: &[OperatingPointResult]) -> Self {
        let converged = results.iter().filter(|r| r.converged()).count();
        Self {
            total: results.len(),
            converged,
            failed: results.len() - converged,
        }
    }

    pub fn all_converged(&self) -> bool {
        self.failed == 0
    }
}

/// Solves `specs` in order on one session.
///
/// The boundary layer is re-initialized once before the first point; later points start from
/// the previous point's solution. Unconverged points become partial results. Only a
/// non-finite specification aborts the sweep, and it does so before any engine call.
#[instrument(skip_all, name = "sweep_workflow", fields(points = specs.len()))]
pub fn solve_many<E: AeroEngine>(
    session: &mut Session<E>,
    specs: &[OperatingPointSpec],
    reporter: &ProgressReporter,
) -> Result<Vec<OperatingPointResult>, SolveError> {
    for spec in specs {
        spec.check_finite()?;
    }

    reporter.report(Progress::SweepStart {
        total_points: specs.len() as u64,
    });
    info!("Starting sweep of {} operating points.", specs.len());

    let (engine, config) = session.parts_mut();
    engine.set_boundary_layer_initialized(false);

    let mut results = Vec::with_capacity(specs.len());
    for (index, &spec) in specs.iter().enumerate() {
        reporter.report(Progress::PointStart { index, spec });

        solver::prepare(engine, spec, false);
        let result = solver::converge(engine, config, spec, reporter).into_partial(spec);

        reporter.report(Progress::PointFinish {
            index,
            converged: result.converged(),
        });
        results.push(result);
    }

    let summary = SweepSummary::from_results(&results);
    if summary.all_converged() {
        info!(converged = summary.converged, "Sweep finished.");
    } else {
        warn!(
            converged = summary.converged,
            failed = summary.failed,
            "Sweep finished with unconverged points."
        );
    }
    reporter.report(Progress::SweepFinish);

    Ok(results)
}

/// Angle-of-attack sweep; angles in radians.
pub fn solve_angle_sweep<E: AeroEngine>(
    session: &mut Session<E>,
    angles_rad: &[f64],
    reporter: &ProgressReporter,
) -> Result<Vec<OperatingPointResult>, SolveError> {
    let specs: Vec<_> = angles_rad
        .iter()
        .map(|&alpha| OperatingPointSpec::Angle(alpha))
        .collect();
    solve_many(session, &specs, reporter)
}

pub fn solve_lift_sweep<E: AeroEngine>(
    session: &mut Session<E>,
    lift_coefficients: &[f64],
    reporter: &ProgressReporter,
) -> Result<Vec<OperatingPointResult>, SolveError> {
    let specs: Vec<_> = lift_coefficients
        .iter()
        .map(|&cl| OperatingPointSpec::LiftCoefficient(cl))
        .collect();
    solve_many(session, &specs, reporter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::naca::naca_four_digit;
    use crate::core::thin_airfoil::ThinAirfoilEngine;
    use crate::engine::config::AnalysisConfig;
    use crate::engine::test_support::{Call, ScriptedEngine};
    use std::sync::Mutex;

    fn scripted_session(engine: ScriptedEngine) -> Session<ScriptedEngine> {
        let mut session = Session::open(
            engine,
            naca_four_digit(12, 20).unwrap(),
            AnalysisConfig::default(),
        )
        .unwrap();
        session.engine_mut().clear_calls();
        session
    }

    fn reference_session(code: u32, config: AnalysisConfig) -> Session<ThinAirfoilEngine> {
        Session::open(
            ThinAirfoilEngine::new(),
            naca_four_digit(code, 80).unwrap(),
            config,
        )
        .unwrap()
    }

    #[test]
    fn boundary_layer_is_reset_once_per_sweep() {
        let mut session = scripted_session(ScriptedEngine::new());
        let results =
            solve_angle_sweep(&mut session, &[0.0, 0.05, 0.1], &ProgressReporter::new()).unwrap();
        assert!(results.iter().all(|r| r.converged()));

        let engine = session.engine();
        assert_eq!(engine.count(&Call::SetBoundaryLayerInitialized(false)), 1);
        assert_eq!(engine.calls()[0], Call::SetBoundaryLayerInitialized(false));
        assert_eq!(engine.count(&Call::SolveForAngle), 3);
    }

    #[test]
    fn failed_point_degrades_to_partial_result_and_sweep_continues() {
        let mut engine = ScriptedEngine::new();
        engine.converge_after = |alpha| if alpha > 0.15 { None } else { Some(2) };
        let mut session = scripted_session(engine);

        let angles = [0.0, 0.2, 0.1];
        let results = solve_angle_sweep(&mut session, &angles, &ProgressReporter::new()).unwrap();

        assert_eq!(results.len(), 3);
        for (result, alpha) in results.iter().zip(angles) {
            assert!((result.alpha_deg - alpha.to_degrees()).abs() < 1e-12);
        }
        assert!(results[0].converged());
        assert!(!results[1].converged());
        assert_eq!(results[1].cl(), None);
        assert!(results[2].converged());
        // Cap exhaustion with auto re-initialization resets the boundary layer for the next point.
        assert_eq!(
            session
                .engine()
                .count(&Call::SetBoundaryLayerInitialized(false)),
            2
        );
    }

    #[test]
    fn next_point_starts_from_fresh_boundary_layer_after_failure() {
        let mut engine = ScriptedEngine::new();
        engine.converge_after = |alpha| if alpha > 0.15 { None } else { Some(2) };
        let mut session = scripted_session(engine);

        solve_angle_sweep(&mut session, &[0.2, 0.1], &ProgressReporter::new()).unwrap();

        let calls = session.engine().calls();
        let inviscid: Vec<usize> = calls
            .iter()
            .enumerate()
            .filter(|(_, call)| **call == Call::SolveForAngle)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(inviscid.len(), 2);
        assert!(
            calls[inviscid[0]..inviscid[1]].contains(&Call::SetBoundaryLayerInitialized(false))
        );
        // The successful point keeps its boundary layer.
        assert!(
            !calls[inviscid[1]..].contains(&Call::SetBoundaryLayerInitialized(false))
        );
    }

    #[test]
    fn invalid_specification_in_sweep_is_partial() {
        let mut engine = ScriptedEngine::new();
        engine.accept_inviscid = |_, cl| cl < 1.0;
        let mut session = scripted_session(engine);

        let results =
            solve_lift_sweep(&mut session, &[0.5, 1.5, 0.8], &ProgressReporter::new()).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results[0].converged());
        assert!(!results[1].converged());
        assert_eq!(results[1].alpha_deg, 0.0);
        assert!(results[2].converged());
    }

    #[test]
    fn non_finite_spec_aborts_before_any_engine_call() {
        let mut session = scripted_session(ScriptedEngine::new());
        let err = solve_angle_sweep(&mut session, &[0.0, f64::NAN], &ProgressReporter::new())
            .unwrap_err();
        assert!(matches!(err, SolveError::InvalidInput { .. }));
        assert!(session.engine().calls().is_empty());
    }

    #[test]
    fn empty_sweep_returns_no_results() {
        let mut session = scripted_session(ScriptedEngine::new());
        let results = solve_many(&mut session, &[], &ProgressReporter::new()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn sweep_reports_point_progress() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::SweepStart { total_points } => {
                events.lock().unwrap().push(format!("start:{total_points}"))
            }
            Progress::PointFinish { index, converged } => {
                events.lock().unwrap().push(format!("point:{index}:{converged}"))
            }
            Progress::SweepFinish => events.lock().unwrap().push("finish".to_string()),
            _ => {}
        }));

        let mut engine = ScriptedEngine::new();
        engine.converge_after = |alpha| if alpha > 0.15 { None } else { Some(1) };
        let mut session = scripted_session(engine);
        solve_angle_sweep(&mut session, &[0.0, 0.2], &reporter).unwrap();
        drop(reporter);

        assert_eq!(
            events.into_inner().unwrap(),
            vec!["start:2", "point:0:true", "point:1:false", "finish"]
        );
    }

    #[test]
    fn inviscid_sweep_has_increasing_lift() {
        let config = AnalysisConfig {
            viscous: false,
            ..AnalysisConfig::default()
        };
        let mut session = reference_session(12, config);
        let angles: Vec<f64> = [0.0f64, 5.0, 10.0].iter().map(|a| a.to_radians()).collect();
        let results = solve_angle_sweep(&mut session, &angles, &ProgressReporter::new()).unwrap();

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.converged()));
        let cl: Vec<f64> = results.iter().map(|r| r.cl().unwrap()).collect();
        assert!(cl[0] < cl[1] && cl[1] < cl[2]);
        assert_eq!(session.engine().steps_taken(), 0);
    }

    #[test]
    fn warm_start_needs_fewer_steps_than_cold_start() {
        let angles: Vec<f64> = [2.0f64, 2.5].iter().map(|a| a.to_radians()).collect();

        let mut swept = reference_session(12, AnalysisConfig::default());
        solve_angle_sweep(&mut swept, &angles, &ProgressReporter::new()).unwrap();

        let mut cold = reference_session(12, AnalysisConfig::default());
        for &alpha in &angles {
            solver::solve_angle(&mut cold, alpha, &ProgressReporter::new()).unwrap();
        }

        assert!(swept.engine().steps_taken() < cold.engine().steps_taken());
    }

    #[test]
    fn post_stall_point_in_sweep_is_partial() {
        // A cold start at zero angle needs six steps; beyond stall the residual keeps growing.
        let config = AnalysisConfig {
            max_iterations: 8,
            ..AnalysisConfig::default()
        };
        let mut session = reference_session(12, config);
        let angles: Vec<f64> = [0.0f64, 25.0].iter().map(|a| a.to_radians()).collect();
        let results = solve_angle_sweep(&mut session, &angles, &ProgressReporter::new()).unwrap();

        assert!(results[0].converged());
        assert!(!results[1].converged());
        assert!((results[1].alpha_deg - 25.0).abs() < 1e-9);
        assert_eq!(SweepSummary::from_results(&results).failed, 1);
    }

    #[test]
    fn summary_counts_results() {
        let results = [
            OperatingPointResult::unconverged(1.0),
            OperatingPointResult::unconverged(2.0),
        ];
        let summary = SweepSummary::from_results(&results);
        assert_eq!(
            summary,
            SweepSummary {
                total: 2,
                converged: 0,
                failed: 2
            }
        );
        assert!(!summary.all_converged());
    }
}
