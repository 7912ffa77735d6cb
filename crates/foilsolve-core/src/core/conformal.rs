//! Airfoil sections obtained by conformal mapping of a circle.
//!
//! Each section is the image of a circle in the `z`-plane that passes through the trailing-edge
//! singularity of its map, which yields the sharp trailing edge. Contours are returned
//! normalized (see [`Geometry::normalized`]): nose at the origin, unit chord on the x axis and a
//! closed trailing edge.

use super::geometry::{Geometry, GeometryError, MIN_POINTS};
use nalgebra::Point2;
use std::f64::consts::PI;

pub use num_complex::Complex64;

/// A circle-to-airfoil conformal map.
pub trait ConformalSection {
    /// Name used in error messages.
    const NAME: &'static str;

    fn circle_center(&self) -> Complex64;

    fn circle_radius(&self) -> f64;

    /// Maps a point of the circle plane to the airfoil plane.
    fn map(&self, z: Complex64) -> Complex64;

    /// Angle below the real axis of the ray from the circle center to the trailing edge.
    fn trailing_edge_angle(&self) -> f64 {
        (self.circle_center().im / self.circle_radius()).asin()
    }

    /// Maps `num_points` evenly spaced circle nodes, starting and ending at the trailing edge and
    /// running over the upper surface first.
    ///
    /// An odd count puts a node on the circle point opposite the trailing edge.
    fn generate(&self, num_points: usize) -> Result<Geometry, GeometryError> {
        if num_points < MIN_POINTS {
            return Err(GeometryError::TooFewPoints {
                min: MIN_POINTS,
                actual: num_points,
            });
        }

        let center = self.circle_center();
        let radius = self.circle_radius();
        let beta = self.trailing_edge_angle();
        let points = (0..num_points)
            .map(|i| {
                let phi = 2.0 * PI * i as f64 / (num_points - 1) as f64;
                let zeta = self.map(center + Complex64::from_polar(radius, phi - beta));
                Point2::new(zeta.re, zeta.im)
            })
            .collect();

        Geometry::new(points)?.normalized()
    }
}

fn invalid(section: &'static str, reason: impl Into<String>) -> GeometryError {
    GeometryError::InvalidSection {
        section,
        reason: reason.into(),
    }
}

/// Checks that a circle through `z = 1` around `midpoint` encloses the other singular point
/// `z = -1`. Returns the circle radius.
fn circle_through_trailing_edge(
    section: &'static str,
    midpoint: Complex64,
) -> Result<f64, GeometryError> {
    if !midpoint.re.is_finite() || !midpoint.im.is_finite() {
        return Err(invalid(section, format!("midpoint {midpoint} is not finite")));
    }
    let radius = (Complex64::new(1.0, 0.0) - midpoint).norm();
    if (Complex64::new(-1.0, 0.0) - midpoint).norm() > radius {
        return Err(invalid(
            section,
            format!("the circle around {midpoint} through z = 1 must enclose z = -1"),
        ));
    }
    Ok(radius)
}

fn trailing_edge_angle_in_range(section: &'static str, tau: f64) -> Result<(), GeometryError> {
    if (0.0..PI).contains(&tau) {
        Ok(())
    } else {
        Err(invalid(
            section,
            format!("trailing-edge angle {tau} must lie in [0, pi)"),
        ))
    }
}

/// Joukowsky section, the image of a circle under `ζ = z + 1/z`.
///
/// A real midpoint gives a symmetric section; a positive imaginary part adds camber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoukowskySection {
    midpoint: Complex64,
    radius: f64,
}

impl JoukowskySection {
    pub fn new(midpoint: Complex64) -> Result<Self, GeometryError> {
        let radius = circle_through_trailing_edge(Self::NAME, midpoint)?;
        Ok(Self { midpoint, radius })
    }

    pub fn midpoint(&self) -> Complex64 {
        self.midpoint
    }
}

impl ConformalSection for JoukowskySection {
    const NAME: &'static str = "Joukowsky";

    fn circle_center(&self) -> Complex64 {
        self.midpoint
    }

    fn circle_radius(&self) -> f64 {
        self.radius
    }

    fn map(&self, z: Complex64) -> Complex64 {
        z + z.inv()
    }
}

/// Kármán–Trefftz section: a Joukowsky section with a finite trailing-edge angle `tau`.
///
/// `tau = 0` reproduces the Joukowsky section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KarmanTrefftzSection {
    midpoint: Complex64,
    radius: f64,
    tau: f64,
}

impl KarmanTrefftzSection {
    pub fn new(midpoint: Complex64, tau: f64) -> Result<Self, GeometryError> {
        let radius = circle_through_trailing_edge(Self::NAME, midpoint)?;
        trailing_edge_angle_in_range(Self::NAME, tau)?;
        Ok(Self {
            midpoint,
            radius,
            tau,
        })
    }

    fn exponent(&self) -> f64 {
        2.0 - self.tau / PI
    }
}

impl ConformalSection for KarmanTrefftzSection {
    const NAME: &'static str = "Karman-Trefftz";

    fn circle_center(&self) -> Complex64 {
        self.midpoint
    }

    fn circle_radius(&self) -> f64 {
        self.radius
    }

    fn map(&self, z: Complex64) -> Complex64 {
        let n = self.exponent();
        let one = Complex64::new(1.0, 0.0);
        let a = (one + z.inv()).powf(n);
        let b = (one - z.inv()).powf(n);
        n * (a + b) / (a - b)
    }
}

/// Van de Vooren section with trailing-edge angle `tau` and thickness parameter `epsilon`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanDeVoorenSection {
    tau: f64,
    epsilon: f64,
}

impl VanDeVoorenSection {
    const CHORD: f64 = 2.0;

    pub fn new(tau: f64, epsilon: f64) -> Result<Self, GeometryError> {
        trailing_edge_angle_in_range(Self::NAME, tau)?;
        if !(epsilon > 0.0 && epsilon < 1.0) {
            return Err(invalid(
                Self::NAME,
                format!("thickness parameter {epsilon} must lie in (0, 1)"),
            ));
        }
        Ok(Self { tau, epsilon })
    }

    fn exponent(&self) -> f64 {
        2.0 - self.tau / PI
    }
}

impl ConformalSection for VanDeVoorenSection {
    const NAME: &'static str = "Van de Vooren";

    fn circle_center(&self) -> Complex64 {
        Complex64::new(0.0, 0.0)
    }

    fn circle_radius(&self) -> f64 {
        let k = self.exponent();
        2.0 * Self::CHORD * (1.0 + self.epsilon).powf(k - 1.0) * 2f64.powf(-k)
    }

    fn map(&self, z: Complex64) -> Complex64 {
        let k = self.exponent();
        let a = self.circle_radius();
        (z - a).powf(k) / (z - a * self.epsilon).powf(k - 1.0) + Self::CHORD
    }
}
