use serde::{Serialize, Deserialize};

/// Cartesian scene position (same unit as the scaled distance)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartesianPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPosition {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Inverse of [`EquatorialPosition::to_cartesian`]: (ra, dec) in degrees
    /// plus distance. `ra` is wrapped into [0, 360); the origin maps to dec 0.
    pub fn to_equatorial(&self) -> EquatorialPosition {
        let distance = self.magnitude();
        let ra = self.y.atan2(self.x).to_degrees().rem_euclid(360.0);
        let dec = if distance > 0.0 { (self.z / distance).asin().to_degrees() } else { 0.0 };
        EquatorialPosition { ra, dec, distance }
    }
}

/// Equatorial sky position. Angles in degrees, distance in any linear unit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquatorialPosition {
    /// Right ascension (azimuth), nominally [0, 360)
    pub ra: f64,
    /// Declination (elevation above the equatorial plane), nominally [-90, 90]
    pub dec: f64,
    pub distance: f64,
}

impl EquatorialPosition {
    pub fn new(ra: f64, dec: f64, distance: f64) -> Self {
        Self { ra, dec, distance }
    }

    /// Project onto Cartesian axes: x toward ra=0, z toward the pole.
    ///
    /// No range validation is done on the angles; out-of-range values still
    /// land on the sphere of radius `distance`.
    pub fn to_cartesian(&self) -> CartesianPosition {
        let ra_rad = self.ra.to_radians();
        let dec_rad = self.dec.to_radians();

        let cos_dec = dec_rad.cos();
        CartesianPosition {
            x: self.distance * cos_dec * ra_rad.cos(),
            y: self.distance * cos_dec * ra_rad.sin(),
            z: self.distance * dec_rad.sin(),
        }
    }
}
