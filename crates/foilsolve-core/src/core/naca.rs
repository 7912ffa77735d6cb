//! Four-digit NACA section generator.
//!
//! Digits encode, in order: maximum camber (percent of chord), position of maximum camber
//! (tenths of chord) and maximum thickness (percent of chord). `2412` is a 12% thick section
//! with 2% camber at 40% chord; `0012` is the symmetric 12% section.

use super::geometry::{Geometry, GeometryError};
use nalgebra::Point2;
use std::f64::consts::FRAC_PI_2;

const A0: f64 = 0.2969;
const A1: f64 = -0.126;
const A2: f64 = -0.3516;
const A3: f64 = 0.2843;
const A4: f64 = -0.1015;

/// Smallest accepted number of stations per surface.
pub const MIN_STATIONS: usize = 3;

/// Decoded four-digit designation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NacaFourDigit {
    pub max_camber: f64,
    pub camber_position: f64,
    pub thickness: f64,
}

impl NacaFourDigit {
    pub fn from_code(code: u32) -> Result<Self, GeometryError> {
        let invalid = |reason: &str| GeometryError::InvalidNaca {
            code: format!("{:04}", code),
            reason: reason.to_string(),
        };

        if code > 9999 {
            return Err(invalid("a four-digit designation is at most 9999"));
        }

        let max_camber = (code / 1000) as f64 * 0.01;
        let camber_position = ((code % 1000) / 100) as f64 * 0.1;
        let thickness = (code % 100) as f64 * 0.01;

        if thickness <= 0.0 {
            return Err(invalid("thickness digits must be non-zero"));
        }
        if max_camber > 0.0 && camber_position <= 0.0 {
            return Err(invalid(
                "a cambered section needs a non-zero camber position",
            ));
        }

        Ok(Self {
            max_camber,
            camber_position,
            thickness,
        })
    }

    /// Parses designations such as `"0012"`, `"2412"` or `"NACA 2412"`.
    pub fn parse(designation: &str) -> Result<Self, GeometryError> {
        let digits = designation
            .trim()
            .trim_start_matches(|c: char| c.is_ascii_alphabetic())
            .trim();
        let code = digits
            .parse::<u32>()
            .ok()
            .filter(|_| digits.len() == 4)
            .ok_or_else(|| GeometryError::InvalidNaca {
                code: designation.to_string(),
                reason: "expected exactly four digits".to_string(),
            })?;
        Self::from_code(code)
    }

    pub fn is_symmetric(&self) -> bool {
        self.max_camber == 0.0
    }

    /// Mean camber line ordinate and slope at chord fraction `x`.
    fn camber_line(&self, x: f64) -> (f64, f64) {
        let (m, p) = (self.max_camber, self.camber_position);
        if m == 0.0 {
            return (0.0, 0.0);
        }
        if x < p {
            (
                m / (p * p) * (2.0 * p * x - x * x),
                2.0 * m / (p * p) * (p - x),
            )
        } else {
            let q = (1.0 - p) * (1.0 - p);
            (
                m / q * ((1.0 - 2.0 * p) + 2.0 * p * x - x * x),
                2.0 * m / q * (p - x),
            )
        }
    }

    fn half_thickness(&self, x: f64) -> f64 {
        self.thickness / 0.2
            * (A0 * x.sqrt() + A1 * x + A2 * x.powi(2) + A3 * x.powi(3) + A4 * x.powi(4))
    }

    /// Generates the section contour with `stations` points per surface.
    ///
    /// The upper surface runs from the trailing edge to the nose, the lower surface from the
    /// nose back to the trailing edge; the nose point is shared, so the contour has
    /// `2 * stations - 1` points.
    pub fn generate(&self, stations: usize) -> Result<Geometry, GeometryError> {
        if stations < MIN_STATIONS {
            return Err(GeometryError::TooFewPoints {
                min: 2 * MIN_STATIONS - 1,
                actual: (2 * stations).saturating_sub(1),
            });
        }

        let mut upper = Vec::with_capacity(stations);
        let mut lower = Vec::with_capacity(stations);

        for i in 0..stations {
            let x = 1.0 - ((i as f64 / (stations - 1) as f64) * FRAC_PI_2).sin();
            let (camber, gradient) = self.camber_line(x);
            let yt = self.half_thickness(x);

            let cos_theta = (1.0 + gradient * gradient).powf(-0.5);
            let sin_theta = gradient * cos_theta;

            upper.push(Point2::new(x - yt * sin_theta, camber + yt * cos_theta));
            lower.push(Point2::new(x + yt * sin_theta, camber - yt * cos_theta));
        }

        let points = upper
            .into_iter()
            .chain(lower.into_iter().rev().skip(1))
            .collect();
        Geometry::new(points)
    }
}

/// Convenience wrapper: decode `code` and generate `stations` points per surface.
pub fn naca_four_digit(code: u32, stations: usize) -> Result<Geometry, GeometryError> {
    NacaFourDigit::from_code(code)?.generate(stations)
}
