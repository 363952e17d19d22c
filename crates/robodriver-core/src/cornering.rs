//! Friction-limited cornering speed.

use robodriver_model::{CarCoefficients, TrackSegment, VehicleState};

/// Sentinel for "no speed limit" on straights and fully aero-held curves.
pub const UNLIMITED_SPEED: f32 = f32::MAX;

/// Speed limits from tyre friction plus aerodynamic downforce.
///
/// Coefficients come from the car at race start; `mass` tracks fuel burn
/// and is refreshed every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorneringModel {
    pub mass: f32,
    pub downforce: f32,
    pub drag: f32,
    pub gravity: f32,
    pub full_accel_margin: f32,
}

impl CorneringModel {
    pub fn new(coefficients: &CarCoefficients, gravity: f32, full_accel_margin: f32) -> Self {
        Self {
            mass: coefficients.mass,
            downforce: coefficients.downforce,
            drag: coefficients.drag,
            gravity,
            full_accel_margin,
        }
    }

    /// Highest speed `segment` can be driven at without sliding.
    ///
    /// Straights are unlimited. On a curve the downforce share of the grip is
    /// capped at 100%, so a curve where aero alone holds the car is unlimited
    /// too.
    ///
    /// # RT Safety
    ///
    /// - No heap allocations
    /// - O(1) time complexity
    #[inline]
    pub fn max_speed(&self, segment: &TrackSegment) -> f32 {
        if segment.is_straight() {
            return UNLIMITED_SPEED;
        }

        let mu = segment.friction;
        let radius = segment.radius;
        let aero_share = (radius * self.downforce * mu / self.mass).min(1.0);
        let speed = (mu * self.gravity * radius / (1.0 - aero_share)).sqrt();

        if speed.is_nan() {
            0.0
        } else if speed.is_finite() {
            speed
        } else {
            UNLIMITED_SPEED
        }
    }

    /// Throttle fraction for driving `segment` on gear ratio `ratio`.
    ///
    /// Full throttle while the segment limit is more than the margin above
    /// current speed. Otherwise the engine fraction of redline that holds the
    /// limit speed at `ratio`.
    pub fn desired_accel(
        &self,
        segment: &TrackSegment,
        vehicle: &VehicleState,
        ratio: Option<f32>,
    ) -> f32 {
        let allowed = self.max_speed(segment);
        if allowed > vehicle.speed + self.full_accel_margin {
            return 1.0;
        }

        let radius = vehicle.drive_wheel_radius();
        match ratio {
            Some(ratio) if ratio > 0.0 && radius > 0.0 && vehicle.redline_rpm > 0.0 => {
                let fraction = allowed / radius * ratio / vehicle.redline_rpm;
                if fraction.is_finite() {
                    fraction.clamp(0.0, 1.0)
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }
}
