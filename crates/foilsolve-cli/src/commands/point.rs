use super::open_session;
use crate::cli::PointArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use crate::utils::table::format_results;
use foilsolve::engine::progress::ProgressReporter;
use foilsolve::engine::solver::{self, OperatingPointSpec};
use tracing::{info, warn};

pub fn run(args: PointArgs) -> Result<()> {
    let mut session = open_session(&args.airfoil, &args.analysis)?;

    let spec = match (args.target.alpha, args.target.cl) {
        (Some(alpha_deg), _) => OperatingPointSpec::angle_deg(alpha_deg),
        (None, Some(cl)) => OperatingPointSpec::LiftCoefficient(cl),
        (None, None) => {
            return Err(CliError::Argument(
                "a point needs either --alpha DEG or --cl CL".to_string(),
            ));
        }
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Solving operating point {}.", spec);
    let result = solver::solve_one(&mut session, spec, &reporter)?;

    print!("{}", format_results(&[result]));
    if !result.converged() {
        warn!("Inviscid solution rejected {}; no coefficients available.", spec);
        println!("Warning: {} could not be solved; only the angle is reported.", spec);
    }
    Ok(())
}
