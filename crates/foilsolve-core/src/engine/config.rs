use crate::core::adapter::AnalysisParameters;
use thiserror::Error;

pub use crate::core::adapter::{MachMode, ReynoldsMode};

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub viscous: bool,
    /// Forced transition location on the upper surface (chord fraction, `1.0` = free).
    pub forced_transition_top: f64,
    pub forced_transition_bottom: f64,
    /// Critical amplification factor of the e^n transition criterion.
    pub critical_amplification: f64,
    pub reynolds: f64,
    pub mach: f64,
    pub reynolds_mode: ReynoldsMode,
    pub mach_mode: MachMode,
    /// Upper bound on boundary-layer steps per viscous pass.
    pub max_iterations: usize,
    /// Reset the boundary layer after a pass that exhausts `max_iterations`.
    pub auto_reinitialize_boundary_layer: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            viscous: true,
            forced_transition_top: 0.5,
            forced_transition_bottom: 0.5,
            critical_amplification: 4.0,
            reynolds: 2.0e6,
            mach: 0.0,
            reynolds_mode: ReynoldsMode::Fixed,
            mach_mode: MachMode::Fixed,
            max_iterations: 200,
            auto_reinitialize_boundary_layer: true,
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    /// The subset of the configuration forwarded to the engine at analysis setup.
    pub fn analysis_parameters(&self) -> AnalysisParameters {
        AnalysisParameters {
            reynolds: self.reynolds,
            mach: self.mach,
            critical_amplification: self.critical_amplification,
            forced_transition_top: self.forced_transition_top,
            forced_transition_bottom: self.forced_transition_bottom,
            reynolds_mode: self.reynolds_mode,
            mach_mode: self.mach_mode,
            viscous: self.viscous,
        }
    }

    /// Checks the flow settings forwarded to the engine. The iteration cap is checked by the
    /// builder only.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = |name: &'static str, value: f64| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::invalid(name, format!("{value} is not finite")))
            }
        };
        let fraction = |name: &'static str, value: f64| {
            finite(name, value)?;
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::invalid(
                    name,
                    format!("{value} is outside the chord range [0, 1]"),
                ))
            }
        };

        fraction("forced_transition_top", self.forced_transition_top)?;
        fraction("forced_transition_bottom", self.forced_transition_bottom)?;

        finite("critical_amplification", self.critical_amplification)?;
        if self.critical_amplification <= 0.0 {
            return Err(ConfigError::invalid(
                "critical_amplification",
                "must be positive",
            ));
        }

        finite("reynolds", self.reynolds)?;
        if self.reynolds < 0.0 {
            return Err(ConfigError::invalid("reynolds", "must not be negative"));
        }
        if self.viscous && self.reynolds == 0.0 {
            return Err(ConfigError::invalid(
                "reynolds",
                "a viscous analysis needs a positive Reynolds number",
            ));
        }

        finite("mach", self.mach)?;
        if !(0.0..1.0).contains(&self.mach) {
            return Err(ConfigError::invalid("mach", "must lie in [0, 1)"));
        }
        Ok(())
    }
}

/// Builds an [`AnalysisConfig`] on top of the defaults; unset fields keep their default.
#[derive(Default)]
pub struct AnalysisConfigBuilder {
    viscous: Option<bool>,
    forced_transition_top: Option<f64>,
    forced_transition_bottom: Option<f64>,
    critical_amplification: Option<f64>,
    reynolds: Option<f64>,
    mach: Option<f64>,
    reynolds_mode: Option<ReynoldsMode>,
    mach_mode: Option<MachMode>,
    max_iterations: Option<usize>,
    auto_reinitialize_boundary_layer: Option<bool>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viscous(mut self, viscous: bool) -> Self {
        self.viscous = Some(viscous);
        self
    }
    pub fn forced_transition_top(mut self, x: f64) -> Self {
        self.forced_transition_top = Some(x);
        self
    }
    pub fn forced_transition_bottom(mut self, x: f64) -> Self {
        self.forced_transition_bottom = Some(x);
        self
    }
    pub fn critical_amplification(mut self, ncrit: f64) -> Self {
        self.critical_amplification = Some(ncrit);
        self
    }
    pub fn reynolds(mut self, reynolds: f64) -> Self {
        self.reynolds = Some(reynolds);
        self
    }
    pub fn mach(mut self, mach: f64) -> Self {
        self.mach = Some(mach);
        self
    }
    pub fn reynolds_mode(mut self, mode: ReynoldsMode) -> Self {
        self.reynolds_mode = Some(mode);
        self
    }
    pub fn mach_mode(mut self, mode: MachMode) -> Self {
        self.mach_mode = Some(mode);
        self
    }
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn auto_reinitialize_boundary_layer(mut self, enabled: bool) -> Self {
        self.auto_reinitialize_boundary_layer = Some(enabled);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            viscous: self.viscous.unwrap_or(defaults.viscous),
            forced_transition_top: self
                .forced_transition_top
                .unwrap_or(defaults.forced_transition_top),
            forced_transition_bottom: self
                .forced_transition_bottom
                .unwrap_or(defaults.forced_transition_bottom),
            critical_amplification: self
                .critical_amplification
                .unwrap_or(defaults.critical_amplification),
            reynolds: self.reynolds.unwrap_or(defaults.reynolds),
            mach: self.mach.unwrap_or(defaults.mach),
            reynolds_mode: self.reynolds_mode.unwrap_or(defaults.reynolds_mode),
            mach_mode: self.mach_mode.unwrap_or(defaults.mach_mode),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            auto_reinitialize_boundary_layer: self
                .auto_reinitialize_boundary_layer
                .unwrap_or(defaults.auto_reinitialize_boundary_layer),
        };
        config.validate()?;
        if config.max_iterations == 0 {
            return Err(ConfigError::invalid("max_iterations", "must be at least 1"));
        }
        Ok(config)
    }
}
