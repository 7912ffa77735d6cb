use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "foilsolve - operating-point solves, sweeps and polars for two-dimensional airfoil sections.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a single operating point at a fixed angle of attack or lift coefficient.
    Point(PointArgs),
    /// Solve an ordered sweep of angles of attack, reusing the boundary layer between points.
    Sweep(SweepArgs),
}

/// Airfoil section selection shared by all subcommands.
#[derive(Args, Debug, Clone)]
pub struct AirfoilArgs {
    #[command(flatten)]
    pub section: SectionArgs,

    /// Number of points per surface of the generated section.
    #[arg(long, value_name = "INT")]
    pub points: Option<usize>,
}

/// Exactly one section generator.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SectionArgs {
    /// Four-digit NACA designation (e.g., '0012', '2412', 'NACA 4415').
    #[arg(long, value_name = "CODE")]
    pub naca: Option<String>,

    /// Joukowsky section from its circle midpoint (e.g., '--joukowsky -0.1 0.1').
    #[arg(
        long,
        num_args = 2,
        value_names = ["RE", "IM"],
        allow_negative_numbers = true
    )]
    pub joukowsky: Option<Vec<f64>>,

    /// Kármán–Trefftz section from its circle midpoint and trailing-edge angle in radians.
    #[arg(
        long,
        num_args = 3,
        value_names = ["RE", "IM", "TAU"],
        allow_negative_numbers = true
    )]
    pub trefftz: Option<Vec<f64>>,

    /// Van de Vooren section from its trailing-edge angle in radians and thickness parameter.
    #[arg(long, num_args = 2, value_names = ["TAU", "EPSILON"])]
    pub vandevooren: Option<Vec<f64>>,
}

/// Analysis configuration sources and overrides shared by all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// Path to an analysis configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the Reynolds number.
    #[arg(long, value_name = "FLOAT")]
    pub reynolds: Option<f64>,

    /// Override the freestream Mach number.
    #[arg(long, value_name = "FLOAT")]
    pub mach: Option<f64>,

    /// Override the critical amplification factor of the transition criterion.
    #[arg(long, value_name = "FLOAT")]
    pub ncrit: Option<f64>,

    /// Run an inviscid analysis, ignoring the boundary layer.
    #[arg(long)]
    pub inviscid: bool,

    /// Override the maximum number of boundary-layer iterations per point.
    #[arg(long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// Keep the boundary layer after a point exhausts its iterations.
    #[arg(long)]
    pub no_auto_reinit: bool,

    /// Set a specific configuration value, overriding the config file and flags.
    /// Can be used multiple times. Example: -S analysis.transition.top=0.1
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Exactly one of `--alpha` or `--cl`.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct PointTarget {
    /// Angle of attack in degrees.
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    pub alpha: Option<f64>,

    /// Target lift coefficient.
    #[arg(long, value_name = "CL", allow_negative_numbers = true)]
    pub cl: Option<f64>,
}

/// Arguments for the `point` subcommand.
#[derive(Args, Debug)]
pub struct PointArgs {
    #[command(flatten)]
    pub airfoil: AirfoilArgs,

    #[command(flatten)]
    pub target: PointTarget,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Arguments for the `sweep` subcommand.
#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub airfoil: AirfoilArgs,

    /// Explicit angles of attack in degrees, solved in the given order.
    #[arg(
        long,
        value_name = "DEG",
        num_args = 1..,
        allow_negative_numbers = true,
        conflicts_with_all = ["from", "to", "steps"]
    )]
    pub alpha: Vec<f64>,

    /// First angle of an evenly spaced range, in degrees.
    #[arg(long, value_name = "DEG", allow_negative_numbers = true, requires = "to")]
    pub from: Option<f64>,

    /// Last angle of an evenly spaced range, in degrees (inclusive).
    #[arg(long, value_name = "DEG", allow_negative_numbers = true, requires = "from")]
    pub to: Option<f64>,

    /// Number of angles in the range, both ends included.
    #[arg(long, value_name = "INT")]
    pub steps: Option<usize>,

    /// Write the sweep as CSV to this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}
