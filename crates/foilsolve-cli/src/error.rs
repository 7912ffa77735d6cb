use foilsolve::core::geometry::GeometryError;
use foilsolve::engine::error::{EngineError, SolveError};
use foilsolve::workflows::polar::PolarError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Polar(#[from] PolarError),

    #[error("Invalid airfoil: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
