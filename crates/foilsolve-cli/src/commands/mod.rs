pub mod point;
pub mod sweep;

use crate::cli::{AirfoilArgs, AnalysisArgs, SectionArgs};
use crate::config::{build_config, defaults::DefaultsConfig};
use crate::error::{CliError, Result};
use foilsolve::core::conformal::{
    Complex64, ConformalSection, JoukowskySection, KarmanTrefftzSection, VanDeVoorenSection,
};
use foilsolve::core::geometry::Geometry;
use foilsolve::core::naca::NacaFourDigit;
use foilsolve::core::thin_airfoil::ThinAirfoilEngine;
use foilsolve::engine::session::Session;
use tracing::info;

/// Generates the requested section and opens an analysis session on it.
fn open_session(
    airfoil: &AirfoilArgs,
    analysis: &AnalysisArgs,
) -> Result<Session<ThinAirfoilEngine>> {
    let defaults = DefaultsConfig::default();
    let config = build_config(analysis)?;

    let stations = airfoil.points.unwrap_or(defaults.surface_points);
    let (name, geometry) = generate_section(&airfoil.section, stations)?;
    info!("Generated {} with {} points.", name, geometry.num_points());

    Ok(Session::open(ThinAirfoilEngine::new(), geometry, config)?)
}

/// Builds the selected section with `stations` points per surface. Conformal sections get the
/// same `2 * stations - 1` contour points as a NACA section.
fn generate_section(section: &SectionArgs, stations: usize) -> Result<(String, Geometry)> {
    let contour_points = (2 * stations).saturating_sub(1);

    if let Some(code) = &section.naca {
        let geometry = NacaFourDigit::parse(code)?.generate(stations)?;
        return Ok((format!("NACA {}", code.trim()), geometry));
    }
    if let Some(&[re, im]) = section.joukowsky.as_deref() {
        let geometry = JoukowskySection::new(Complex64::new(re, im))?.generate(contour_points)?;
        return Ok((format!("Joukowsky section (midpoint {re}{im:+}i)"), geometry));
    }
    if let Some(&[re, im, tau]) = section.trefftz.as_deref() {
        let geometry =
            KarmanTrefftzSection::new(Complex64::new(re, im), tau)?.generate(contour_points)?;
        return Ok((
            format!("Karman-Trefftz section (midpoint {re}{im:+}i, tau {tau})"),
            geometry,
        ));
    }
    if let Some(&[tau, epsilon]) = section.vandevooren.as_deref() {
        let geometry = VanDeVoorenSection::new(tau, epsilon)?.generate(contour_points)?;
        return Ok((
            format!("Van de Vooren section (tau {tau}, epsilon {epsilon})"),
            geometry,
        ));
    }
    Err(CliError::Argument(
        "Select one airfoil section: --naca, --joukowsky, --trefftz or --vandevooren".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use foilsolve::core::geometry::GeometryError;

    fn section() -> SectionArgs {
        SectionArgs {
            naca: None,
            joukowsky: None,
            trefftz: None,
            vandevooren: None,
        }
    }

    #[test]
    fn conformal_sections_match_naca_point_count() {
        let naca = SectionArgs {
            naca: Some("0012".to_string()),
            ..section()
        };
        let joukowsky = SectionArgs {
            joukowsky: Some(vec![-0.1, 0.0]),
            ..section()
        };
        let (_, naca) = generate_section(&naca, 60).unwrap();
        let (name, joukowsky) = generate_section(&joukowsky, 60).unwrap();
        assert_eq!(naca.num_points(), joukowsky.num_points());
        assert!(name.starts_with("Joukowsky"));
        assert!(joukowsky.is_symmetric(1e-6));
    }

    #[test]
    fn every_generator_is_reachable() {
        let trefftz = SectionArgs {
            trefftz: Some(vec![-0.1, 0.1, 0.05]),
            ..section()
        };
        let vandevooren = SectionArgs {
            vandevooren: Some(vec![0.05, 0.05]),
            ..section()
        };
        assert!(generate_section(&trefftz, 50).is_ok());
        assert!(generate_section(&vandevooren, 50).is_ok());
    }

    #[test]
    fn invalid_section_parameters_surface_as_geometry_errors() {
        let bad = SectionArgs {
            joukowsky: Some(vec![0.5, 0.0]),
            ..section()
        };
        assert!(matches!(
            generate_section(&bad, 50),
            Err(CliError::Geometry(GeometryError::InvalidSection { .. }))
        ));
    }

    #[test]
    fn oversized_sections_are_rejected() {
        let naca = SectionArgs {
            naca: Some("2412".to_string()),
            ..section()
        };
        assert!(matches!(
            generate_section(&naca, 200),
            Err(CliError::Geometry(GeometryError::TooManyPoints { .. }))
        ));
    }

    #[test]
    fn empty_selection_is_an_argument_error() {
        assert!(matches!(
            generate_section(&section(), 50),
            Err(CliError::Argument(_))
        ));
    }
}
