use crate::core::adapter::AeroEngine;
use crate::core::result::{AeroCoefficients, OperatingPointResult, Transition};

/// Reads a converged engine state into a result record.
///
/// Must only be called after the solver observed convergence. Transition locations are
/// reported only for a converged viscous state; an inviscid result carries none.
pub fn extract_result<E: AeroEngine + ?Sized>(engine: &E) -> OperatingPointResult {
    let state = engine.read_state();
    let transition = (state.viscous && state.converged).then_some(Transition {
        top: state.transition_top,
        bottom: state.transition_bottom,
    });

    OperatingPointResult::converged_with(
        state.alpha_rad.to_degrees(),
        AeroCoefficients {
            cl: state.cl,
            cd: state.cd,
            cdp: state.cdp,
            cm: state.cm,
            reynolds: state.reynolds,
            transition,
        },
    )
}
