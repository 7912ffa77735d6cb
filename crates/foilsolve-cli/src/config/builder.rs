use super::file::FileConfig;
use crate::cli::AnalysisArgs;
use crate::error::{CliError, Result};
use foilsolve::engine::config::{AnalysisConfig, AnalysisConfigBuilder};
use serde::de::{DeserializeOwned, IntoDeserializer, value};
use std::str::FromStr;
use tracing::debug;

/// Resolves the final analysis configuration for one CLI invocation.
pub fn build_config(args: &AnalysisArgs) -> Result<AnalysisConfig> {
    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    let file_config = apply_cli_flags(file_config, args);
    let file_config = apply_set_values(file_config, &args.set_values)?;
    debug!("Merged configuration layers: {:?}", file_config);

    into_analysis_config(file_config)
}

fn apply_cli_flags(mut config: FileConfig, args: &AnalysisArgs) -> FileConfig {
    if let Some(reynolds) = args.reynolds {
        config.analysis_mut().reynolds = Some(reynolds);
    }
    if let Some(mach) = args.mach {
        config.analysis_mut().mach = Some(mach);
    }
    if let Some(ncrit) = args.ncrit {
        config.analysis_mut().ncrit = Some(ncrit);
    }
    if args.inviscid {
        config.analysis_mut().viscous = Some(false);
    }
    if let Some(max_iterations) = args.max_iterations {
        config.iteration_mut().max_iterations = Some(max_iterations);
    }
    if args.no_auto_reinit {
        config.iteration_mut().auto_reinitialize = Some(false);
    }
    config
}

pub fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
            CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            ))
        })?;
        let (key, value_str) = (key.trim(), value_str.trim());

        match key {
            "analysis.viscous" => config.analysis_mut().viscous = Some(parse(key, value_str)?),
            "analysis.reynolds" => config.analysis_mut().reynolds = Some(parse(key, value_str)?),
            "analysis.mach" => config.analysis_mut().mach = Some(parse(key, value_str)?),
            "analysis.ncrit" => config.analysis_mut().ncrit = Some(parse(key, value_str)?),
            "analysis.reynolds-mode" => {
                config.analysis_mut().reynolds_mode = Some(parse_variant(key, value_str)?)
            }
            "analysis.mach-mode" => {
                config.analysis_mut().mach_mode = Some(parse_variant(key, value_str)?)
            }
            "analysis.transition.top" => {
                config.transition_mut().top = Some(parse(key, value_str)?)
            }
            "analysis.transition.bottom" => {
                config.transition_mut().bottom = Some(parse(key, value_str)?)
            }
            "iteration.max-iterations" => {
                config.iteration_mut().max_iterations = Some(parse(key, value_str)?)
            }
            "iteration.auto-reinitialize" => {
                config.iteration_mut().auto_reinitialize = Some(parse(key, value_str)?)
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

fn parse<T: FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str.parse().map_err(|_| {
        CliError::Config(format!(
            "Invalid {} value for {}: {}",
            std::any::type_name::<T>(),
            key,
            value_str
        ))
    })
}

fn parse_variant<T: DeserializeOwned>(key: &str, value_str: &str) -> Result<T> {
    T::deserialize(value_str.into_deserializer())
        .map_err(|e: value::Error| CliError::Config(format!("Invalid value for {}: {}", key, e)))
}

fn into_analysis_config(config: FileConfig) -> Result<AnalysisConfig> {
    let analysis = config.analysis.unwrap_or_default();
    let transition = analysis.transition.unwrap_or_default();
    let iteration = config.iteration.unwrap_or_default();

    let mut builder = AnalysisConfigBuilder::new();
    if let Some(viscous) = analysis.viscous {
        builder = builder.viscous(viscous);
    }
    if let Some(reynolds) = analysis.reynolds {
        builder = builder.reynolds(reynolds);
    }
    if let Some(mach) = analysis.mach {
        builder = builder.mach(mach);
    }
    if let Some(ncrit) = analysis.ncrit {
        builder = builder.critical_amplification(ncrit);
    }
    if let Some(mode) = analysis.reynolds_mode {
        builder = builder.reynolds_mode(mode);
    }
    if let Some(mode) = analysis.mach_mode {
        builder = builder.mach_mode(mode);
    }
    if let Some(top) = transition.top {
        builder = builder.forced_transition_top(top);
    }
    if let Some(bottom) = transition.bottom {
        builder = builder.forced_transition_bottom(bottom);
    }
    if let Some(max_iterations) = iteration.max_iterations {
        builder = builder.max_iterations(max_iterations);
    }
    if let Some(auto_reinitialize) = iteration.auto_reinitialize {
        builder = builder.auto_reinitialize_boundary_layer(auto_reinitialize);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}
