use super::open_session;
use crate::cli::SweepArgs;
use crate::config::defaults::DefaultsConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use crate::utils::table::format_results;
use foilsolve::engine::progress::ProgressReporter;
use foilsolve::workflows::polar::{self, Polar, PolarRange};
use foilsolve::workflows::sweep;
use tracing::info;

/// Explicit angles or an evenly spaced range, in degrees.
#[derive(Debug, Clone, PartialEq)]
enum SweepAngles {
    List(Vec<f64>),
    Range(PolarRange),
}

fn resolve_angles(args: &SweepArgs) -> Result<SweepAngles> {
    if !args.alpha.is_empty() {
        return Ok(SweepAngles::List(args.alpha.clone()));
    }
    match (args.from, args.to) {
        (Some(from), Some(to)) => {
            let steps = args.steps.unwrap_or(DefaultsConfig::default().sweep_steps);
            Ok(SweepAngles::Range(PolarRange::new(from, to, steps)?))
        }
        _ => Err(CliError::Argument(
            "a sweep needs either --alpha DEG... or --from DEG --to DEG".to_string(),
        )),
    }
}

pub fn run(args: SweepArgs) -> Result<()> {
    let angles = resolve_angles(&args)?;
    let mut session = open_session(&args.airfoil, &args.analysis)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let polar = match angles {
        SweepAngles::Range(range) => polar::run(&mut session, &range, &reporter)?,
        SweepAngles::List(angles_deg) => {
            let angles_rad: Vec<f64> = angles_deg.iter().map(|a| a.to_radians()).collect();
            let points = sweep::solve_angle_sweep(&mut session, &angles_rad, &reporter)?;
            let config = session.config();
            Polar {
                reynolds: config.reynolds,
                mach: config.mach,
                critical_amplification: config.critical_amplification,
                points,
            }
        }
    };

    print!("{}", format_results(&polar.points));
    let summary = polar.summary();
    println!(
        "{} of {} points converged.",
        summary.converged, summary.total
    );

    if let Some(path) = &args.output {
        info!("Writing sweep to {:?}", path);
        polar.write_csv_file(path)?;
        println!("✓ Sweep written to: {}", path.display());
    }
    Ok(())
}
