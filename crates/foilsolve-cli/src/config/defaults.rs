/// CLI-level defaults that have no counterpart in the core analysis configuration.
pub struct DefaultsConfig {
    /// Points per surface of generated sections.
    pub surface_points: usize,
    /// Angles in a `--from`/`--to` sweep when `--steps` is omitted.
    pub sweep_steps: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            surface_points: 100,
            sweep_steps: 10,
        }
    }
}
