use serde::Serialize;

/// Predicted (or forced) laminar-turbulent transition, as chord fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub top: f64,
    pub bottom: f64,
}

/// Aerodynamic data of a converged operating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AeroCoefficients {
    pub cl: f64,
    pub cd: f64,
    pub cdp: f64,
    pub cm: f64,
    pub reynolds: f64,
    /// Present only when the boundary layer was coupled and converged.
    pub transition: Option<Transition>,
}

/// Outcome record for one requested operating point.
///
/// A result always carries the angle of attack. The aerodynamic data is present only for
/// converged points: an unconverged point is a *partial* result rather than an error, so that
/// a sweep reports exactly one entry per requested point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperatingPointResult {
    pub alpha_deg: f64,
    pub aero: Option<AeroCoefficients>,
}

impl OperatingPointResult {
    pub fn converged_with(alpha_deg: f64, aero: AeroCoefficients) -> Self {
        Self {
            alpha_deg,
            aero: Some(aero),
        }
    }

    pub fn unconverged(alpha_deg: f64) -> Self {
        Self {
            alpha_deg,
            aero: None,
        }
    }

    #[inline]
    pub fn converged(&self) -> bool {
        self.aero.is_some()
    }

    pub fn viscous_data_valid(&self) -> bool {
        self.transition().is_some()
    }

    pub fn cl(&self) -> Option<f64> {
        self.aero.map(|a| a.cl)
    }

    pub fn cd(&self) -> Option<f64> {
        self.aero.map(|a| a.cd)
    }

    pub fn cdp(&self) -> Option<f64> {
        self.aero.map(|a| a.cdp)
    }

    pub fn cm(&self) -> Option<f64> {
        self.aero.map(|a| a.cm)
    }

    pub fn reynolds(&self) -> Option<f64> {
        self.aero.map(|a| a.reynolds)
    }

    pub fn transition(&self) -> Option<Transition> {
        self.aero.and_then(|a| a.transition)
    }

    /// Flattens the result into a table row; unavailable fields become `None`.
    pub fn to_row(&self) -> PolarRow {
        let transition = self.transition();
        PolarRow {
            alpha: self.alpha_deg,
            cl: self.cl(),
            cd: self.cd(),
            cdp: self.cdp(),
            cm: self.cm(),
            xtr_top: transition.map(|t| t.top),
            xtr_bottom: transition.map(|t| t.bottom),
            reynolds: self.reynolds(),
            converged: self.converged(),
        }
    }
}

/// Flat, serializable view of an [`OperatingPointResult`] used for tabular output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarRow {
    pub alpha: f64,
    pub cl: Option<f64>,
    pub cd: Option<f64>,
    pub cdp: Option<f64>,
    pub cm: Option<f64>,
    pub xtr_top: Option<f64>,
    pub xtr_bottom: Option<f64>,
    pub reynolds: Option<f64>,
    pub converged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viscous_coefficients() -> AeroCoefficients {
        AeroCoefficients {
            cl: 0.55,
            cd: 0.0081,
            cdp: 0.0023,
            cm: -0.052,
            reynolds: 2.0e6,
            transition: Some(Transition {
                top: 0.31,
                bottom: 0.74,
            }),
        }
    }

    #[test]
    fn unconverged_result_exposes_only_the_angle() {
        let result = OperatingPointResult::unconverged(12.0);
        assert_eq!(result.alpha_deg, 12.0);
        assert!(!result.converged());
        assert!(!result.viscous_data_valid());
        assert_eq!(result.cl(), None);
        assert_eq!(result.cd(), None);
        assert_eq!(result.cm(), None);
        assert_eq!(result.transition(), None);
    }

    #[test]
    fn converged_result_exposes_coefficients() {
        let result = OperatingPointResult::converged_with(4.0, viscous_coefficients());
        assert!(result.converged());
        assert!(result.viscous_data_valid());
        assert_eq!(result.cl(), Some(0.55));
        assert_eq!(result.reynolds(), Some(2.0e6));
    }

    #[test]
    fn inviscid_result_is_converged_without_viscous_data() {
        let aero = AeroCoefficients {
            transition: None,
            ..viscous_coefficients()
        };
        let result = OperatingPointResult::converged_with(4.0, aero);
        assert!(result.converged());
        assert!(!result.viscous_data_valid());
    }

    #[test]
    fn to_row_flattens_fields() {
        let row = OperatingPointResult::converged_with(4.0, viscous_coefficients()).to_row();
        assert_eq!(row.alpha, 4.0);
        assert_eq!(row.xtr_top, Some(0.31));
        assert_eq!(row.xtr_bottom, Some(0.74));
        assert!(row.converged);

        let partial = OperatingPointResult::unconverged(-3.0).to_row();
        assert_eq!(partial.alpha, -3.0);
        assert_eq!(partial.cl, None);
        assert_eq!(partial.xtr_top, None);
        assert!(!partial.converged);
    }
}
