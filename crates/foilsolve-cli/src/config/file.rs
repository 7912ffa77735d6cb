use crate::error::{CliError, Result};
use foilsolve::engine::config::{MachMode, ReynoldsMode};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileTransitionConfig {
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileAnalysisConfig {
    pub viscous: Option<bool>,
    pub reynolds: Option<f64>,
    pub mach: Option<f64>,
    pub ncrit: Option<f64>,
    #[serde(rename = "reynolds-mode")]
    pub reynolds_mode: Option<ReynoldsMode>,
    #[serde(rename = "mach-mode")]
    pub mach_mode: Option<MachMode>,
    pub transition: Option<FileTransitionConfig>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileIterationConfig {
    #[serde(rename = "max-iterations")]
    pub max_iterations: Option<usize>,
    #[serde(rename = "auto-reinitialize")]
    pub auto_reinitialize: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub analysis: Option<FileAnalysisConfig>,
    pub iteration: Option<FileIterationConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            CliError::FileParsing { source, .. } => CliError::FileParsing {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::FileParsing {
            path: "<inline>".into(),
            source: e.into(),
        })
    }

    pub fn analysis_mut(&mut self) -> &mut FileAnalysisConfig {
        self.analysis.get_or_insert_with(Default::default)
    }

    pub fn transition_mut(&mut self) -> &mut FileTransitionConfig {
        self.analysis_mut()
            .transition
            .get_or_insert_with(Default::default)
    }

    pub fn iteration_mut(&mut self) -> &mut FileIterationConfig {
        self.iteration.get_or_insert_with(Default::default)
    }
}
