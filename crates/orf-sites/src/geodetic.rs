//! Conversion from geodetic site frames to Earth-fixed detector geometry.

use nalgebra::{Matrix3, Vector3};
use orf_core::Detector;
use serde::{Deserialize, Serialize};

/// WGS-84 semi-major axis in metres.
pub const WGS84_SEMI_MAJOR: f64 = 6_378_137.0;
/// WGS-84 semi-minor axis in metres.
pub const WGS84_SEMI_MINOR: f64 = 6_356_752.314;

/// Geodetic description of an interferometer vertex and its two arms.
///
/// Angles are in radians. Azimuths are measured clockwise from local north,
/// altitudes upward from the local tangent plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDetector {
    /// Short site name.
    pub name: String,
    /// Two character channel prefix, e.g. `H1`.
    pub prefix: String,
    /// Vertex east longitude.
    pub vertex_longitude: f64,
    /// Vertex geodetic latitude.
    pub vertex_latitude: f64,
    /// Vertex height above the WGS-84 ellipsoid in metres.
    pub vertex_elevation: f64,
    /// Azimuth of the x arm.
    pub x_arm_azimuth: f64,
    /// Altitude of the x arm.
    pub x_arm_altitude: f64,
    /// Azimuth of the y arm.
    pub y_arm_azimuth: f64,
    /// Altitude of the y arm.
    pub y_arm_altitude: f64,
}

impl FrameDetector {
    /// Earth-fixed Cartesian position of the vertex in metres.
    pub fn vertex_location(&self) -> Vector3<f64> {
        let a2 = WGS84_SEMI_MAJOR * WGS84_SEMI_MAJOR;
        let b2 = WGS84_SEMI_MINOR * WGS84_SEMI_MINOR;
        let (sin_lat, cos_lat) = self.vertex_latitude.sin_cos();
        let (sin_lon, cos_lon) = self.vertex_longitude.sin_cos();
        let h = self.vertex_elevation;
        // Prime vertical radius of curvature.
        let n = a2 / (a2 * cos_lat * cos_lat + b2 * sin_lat * sin_lat).sqrt();
        Vector3::new(
            (n + h) * cos_lat * cos_lon,
            (n + h) * cos_lat * sin_lon,
            (b2 / a2 * n + h) * sin_lat,
        )
    }

    /// Earth-fixed unit vector along the x arm.
    pub fn x_arm(&self) -> Vector3<f64> {
        self.arm(self.x_arm_azimuth, self.x_arm_altitude)
    }

    /// Earth-fixed unit vector along the y arm.
    pub fn y_arm(&self) -> Vector3<f64> {
        self.arm(self.y_arm_azimuth, self.y_arm_altitude)
    }

    fn arm(&self, azimuth: f64, altitude: f64) -> Vector3<f64> {
        let (sin_lat, cos_lat) = self.vertex_latitude.sin_cos();
        let (sin_lon, cos_lon) = self.vertex_longitude.sin_cos();
        let (sin_az, cos_az) = azimuth.sin_cos();
        let (sin_alt, cos_alt) = altitude.sin_cos();
        let north = cos_alt * cos_az;
        let east = cos_alt * sin_az;
        // Component in the equatorial plane along the local meridian.
        let rho = -sin_lat * north + cos_lat * sin_alt;
        Vector3::new(
            cos_lon * rho - sin_lon * east,
            sin_lon * rho + cos_lon * east,
            cos_lat * north + sin_lat * sin_alt,
        )
    }

    /// Response tensor `(x x^T - y y^T) / 2` of the interferometer.
    pub fn response(&self) -> Matrix3<f64> {
        let x = self.x_arm();
        let y = self.y_arm();
        (x * x.transpose() - y * y.transpose()) * 0.5
    }
}

/// Converts a geodetic site frame into a [`Detector`].
pub fn detector_from_frame(frame: &FrameDetector) -> Detector {
    Detector::new(frame.vertex_location(), frame.response())
}
