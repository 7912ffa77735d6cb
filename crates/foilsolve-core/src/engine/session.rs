use super::config::AnalysisConfig;
use super::error::EngineError;
use crate::core::adapter::AeroEngine;
use crate::core::geometry::Geometry;
use tracing::{debug, info, instrument};

/// An analysis session: one engine handle with a loaded geometry and an initialized analysis.
///
/// Every solve takes `&mut Session`, so a session serves one operating point at a time.
#[derive(Debug)]
pub struct Session<E: AeroEngine> {
    engine: E,
    geometry: Geometry,
    config: AnalysisConfig,
}

impl<E: AeroEngine> Session<E> {
    /// Clears the engine's abort flag, loads the geometry and initializes the analysis.
    #[instrument(skip_all, name = "session_open", fields(num_points = geometry.num_points()))]
    pub fn open(
        mut engine: E,
        geometry: Geometry,
        config: AnalysisConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        engine.set_cancel(false);
        if !engine.load_geometry(&geometry) {
            return Err(EngineError::GeometryRejected {
                num_points: geometry.num_points(),
            });
        }
        debug!("Geometry loaded.");

        initialize(&mut engine, &config)?;
        info!(
            viscous = config.viscous,
            reynolds = config.reynolds,
            mach = config.mach,
            "Analysis session ready."
        );

        Ok(Self {
            engine,
            geometry,
            config,
        })
    }

    /// Re-initializes the analysis with new flow settings on the already loaded geometry.
    pub fn reconfigure(&mut self, config: AnalysisConfig) -> Result<(), EngineError> {
        config.validate()?;
        initialize(&mut self.engine, &config)?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut E, &AnalysisConfig) {
        (&mut self.engine, &self.config)
    }
}

fn initialize<E: AeroEngine>(engine: &mut E, config: &AnalysisConfig) -> Result<(), EngineError> {
    let parameters = config.analysis_parameters();
    if engine.initialize_analysis(&parameters) {
        Ok(())
    } else {
        Err(EngineError::AnalysisRejected {
            reason: format!("{parameters:?}"),
        })
    }
}
