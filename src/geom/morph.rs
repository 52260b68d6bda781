//! Vrije-vorm morphvelden.
//!
//! Een morph beeldt punten af zonder de samenhang van de geometrie te kennen;
//! de ladingtypes lopen zelf over hun punten en vragen per punt het beeld op.

use super::core::{Point3, Vec3};

/// Een ruimtelijk veld dat punten verplaatst. Objectbewerkingen nemen het
/// veld als trait-object aan zodat gastheer-morphs er ook doorheen kunnen.
pub trait SpaceMorph {
    /// Beeld één punt af onder het veld.
    fn morph_point(&self, p: Point3) -> Point3;
}

/// Rotatie om een as, lineair oplopend met de afstand langs die as.
/// De hoek is radialen per lengte-eenheid langs de as.
#[derive(Debug, Clone, Copy)]
pub struct TwistMorph {
    origin: Point3,
    axis: Vec3,
    angle_per_length: f64,
}

impl TwistMorph {
    /// `None` wanneer de as niet te normaliseren is of de hoek niet eindig.
    #[must_use]
    pub fn new(origin: Point3, axis: Vec3, angle_per_length: f64) -> Option<Self> {
        let axis = axis.normalized()?;
        if !angle_per_length.is_finite() {
            return None;
        }
        Some(Self { origin, axis, angle_per_length })
    }
}

impl SpaceMorph for TwistMorph {
    fn morph_point(&self, p: Point3) -> Point3 {
        let local = p - self.origin;
        let height = local.dot(self.axis);
        let angle = self.angle_per_length * height;
        self.origin + rotate_about_axis(local, self.axis, angle)
    }
}

/// Schaling loodrecht op een as, lineair geïnterpoleerd tussen twee factoren
/// over een opgegeven bereik langs die as. Buiten het bereik wordt geklemd.
#[derive(Debug, Clone, Copy)]
pub struct TaperMorph {
    origin: Point3,
    axis: Vec3,
    start_factor: f64,
    end_factor: f64,
    extent: (f64, f64),
}

impl TaperMorph {
    /// `None` bij een ongeldige as, negatieve factoren of een leeg bereik.
    #[must_use]
    pub fn new(
        origin: Point3,
        axis: Vec3,
        start_factor: f64,
        end_factor: f64,
        extent: (f64, f64),
    ) -> Option<Self> {
        let axis = axis.normalized()?;
        let factors_ok = start_factor.is_finite()
            && end_factor.is_finite()
            && start_factor >= 0.0
            && end_factor >= 0.0;
        if !factors_ok || (extent.1 - extent.0).abs() < f64::EPSILON {
            return None;
        }
        Some(Self { origin, axis, start_factor, end_factor, extent })
    }
}

impl SpaceMorph for TaperMorph {
    fn morph_point(&self, p: Point3) -> Point3 {
        let local = p - self.origin;
        let height = local.dot(self.axis);
        let t = ((height - self.extent.0) / (self.extent.1 - self.extent.0)).clamp(0.0, 1.0);
        let factor = self.start_factor + (self.end_factor - self.start_factor) * t;
        // Alleen de component loodrecht op de as schaalt mee.
        let axial = self.axis.mul_scalar(height);
        let radial = local - axial;
        self.origin + axial + radial.mul_scalar(factor)
    }
}

/// Rodrigues-rotatie van een vector om een eenheidsas.
fn rotate_about_axis(v: Vec3, axis: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    v.mul_scalar(c) + axis.cross(v).mul_scalar(s) + axis.mul_scalar(axis.dot(v) * (1.0 - c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twist_leaves_axis_points_in_place() {
        let twist = TwistMorph::new(Point3::ORIGIN, Vec3::Z, 1.0).expect("geldige as");
        let on_axis = twist.morph_point(Point3::new(0.0, 0.0, 3.0));
        assert!((on_axis.x).abs() < 1e-12);
        assert!((on_axis.y).abs() < 1e-12);
        assert!((on_axis.z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn twist_rotates_proportional_to_height() {
        let quarter = std::f64::consts::FRAC_PI_2;
        let twist = TwistMorph::new(Point3::ORIGIN, Vec3::Z, quarter).expect("geldige as");
        // Op hoogte 1 hoort precies een kwartslag: (1,0,1) -> (0,1,1).
        let p = twist.morph_point(Point3::new(1.0, 0.0, 1.0));
        assert!((p.x).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
        assert!((p.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn twist_rejects_degenerate_axis() {
        assert!(TwistMorph::new(Point3::ORIGIN, Vec3::ZERO, 1.0).is_none());
        assert!(TwistMorph::new(Point3::ORIGIN, Vec3::Z, f64::NAN).is_none());
    }

    #[test]
    fn taper_scales_radial_component_only() {
        let taper = TaperMorph::new(Point3::ORIGIN, Vec3::Z, 1.0, 2.0, (0.0, 1.0))
            .expect("geldige parameters");
        // Op hoogte 1 geldt factor 2: straal verdubbelt, hoogte blijft.
        let p = taper.morph_point(Point3::new(1.0, 0.0, 1.0));
        assert!((p.x - 2.0).abs() < 1e-12);
        assert!((p.z - 1.0).abs() < 1e-12);
        // Onder het bereik klemt de factor op de startwaarde.
        let below = taper.morph_point(Point3::new(1.0, 0.0, -5.0));
        assert!((below.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn taper_rejects_empty_extent() {
        assert!(TaperMorph::new(Point3::ORIGIN, Vec3::Z, 1.0, 2.0, (1.0, 1.0)).is_none());
    }
}
