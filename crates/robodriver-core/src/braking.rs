//! Look-ahead braking predictor
//!
//! Scans the segments ahead of the car for a corner it cannot reach at its
//! current speed without starting to brake now. The answer is binary: full
//! brake or none.
//!
//! The scan stops at the first of:
//!
//! - the look-ahead distance passing the stopping distance from current speed
//! - the end of an open chain
//! - one full lap of segments on a closed circuit

use robodriver_model::{Track, TrackSegment, VehicleState};

use crate::cornering::CorneringModel;

pub const FULL_BRAKE: f32 = 1.0;
pub const NO_BRAKE: f32 = 0.0;

/// Distance needed to slow from `speed` to `target` with friction `mu`,
/// counting downforce and drag at the target speed.
///
/// Zero when `target` is not below `speed`.
#[inline]
pub fn braking_distance(model: &CorneringModel, speed: f32, target: f32, mu: f32) -> f32 {
    if target >= speed {
        return 0.0;
    }
    let target_sq = target * target;
    let numerator = model.mass * (speed * speed - target_sq);
    let denominator =
        2.0 * (mu * model.gravity * model.mass + target_sq * (model.downforce * mu + model.drag));
    numerator / denominator
}

/// Stopping distance from `speed` on friction `mu` without aero help.
#[inline]
pub fn stopping_distance(speed: f32, mu: f32, gravity: f32) -> f32 {
    speed * speed / (2.0 * mu * gravity)
}

/// Brake command for this tick, before ABS.
///
/// `segment` is the segment the car is on. All distances use its friction.
///
/// # RT Safety
///
/// - No heap allocations
/// - At most `track.len()` segments visited
pub fn brake_fraction(
    model: &CorneringModel,
    track: &Track,
    segment: &TrackSegment,
    vehicle: &VehicleState,
) -> f32 {
    let speed = vehicle.speed;
    if !(speed.is_finite() && speed > 0.0) {
        return NO_BRAKE;
    }

    if model.max_speed(segment) < speed {
        return FULL_BRAKE;
    }

    let mu = segment.friction;
    let horizon = stopping_distance(speed, mu, model.gravity);
    let mut lookahead = segment.distance_to_end(vehicle.position.to_start);
    let mut ahead = track.next(segment);

    for _ in 0..track.len() {
        if lookahead >= horizon {
            break;
        }
        let Some(next) = ahead else {
            break;
        };

        let allowed = model.max_speed(next);
        if allowed < speed && braking_distance(model, speed, allowed, mu) > lookahead {
            return FULL_BRAKE;
        }

        lookahead += next.length;
        ahead = track.next(next);
    }

    NO_BRAKE
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use robodriver_model::{CarCoefficients, Drivetrain, SegmentId, SegmentSpec};
    use robodriver_test_helpers::prelude::*;

    fn model(downforce: f32, drag: f32) -> CorneringModel {
        let coefficients = CarCoefficients {
            mass: 1000.0,
            downforce,
            drag,
            drivetrain: Drivetrain::Rear,
        };
        CorneringModel::new(&coefficients, robodriver_model::G, 1.0)
    }

    #[test]
    fn test_braking_distance_plain() {
        // 1000 * (2500 - 400) / (2 * 9810) = 107.03
        let distance = braking_distance(&model(0.0, 0.0), 50.0, 20.0, 1.0);
        assert_relative_eq!(distance, 2_100_000.0 / 19_620.0, epsilon = 1e-2);
    }

    #[test]
    fn test_aero_shortens_braking() {
        let plain = braking_distance(&model(0.0, 0.0), 50.0, 20.0, 1.0);
        let winged = braking_distance(&model(3.0, 0.5), 50.0, 20.0, 1.0);
        assert!(winged < plain);
    }

    #[test]
    fn test_no_distance_when_already_slow() {
        assert_relative_eq!(braking_distance(&model(0.0, 0.0), 10.0, 20.0, 1.0), 0.0);
    }

    #[test]
    fn test_stopping_distance() {
        assert_relative_eq!(stopping_distance(50.0, 1.0, 9.81), 127.42, epsilon = 1e-2);
    }

    #[test]
    fn test_over_limit_in_curve_brakes() {
        let track = TrackFixture::right_curve(30.0, 1.0);
        let segment = must_some(track.segment(SegmentId(0)), "curve");
        let vehicle = VehicleFixture::rolling(40.0).build();
        assert_relative_eq!(
            brake_fraction(&model(0.0, 0.0), &track, segment, &vehicle),
            FULL_BRAKE
        );
    }

    #[test]
    fn test_end_of_open_chain_means_no_brake() {
        let track = TrackFixture::straight(50.0, 10.0);
        let segment = must_some(track.segment(SegmentId(0)), "straight");
        let vehicle = VehicleFixture::rolling(80.0).build();
        assert_relative_eq!(
            brake_fraction(&model(0.0, 0.0), &track, segment, &vehicle),
            NO_BRAKE
        );
    }

    #[test]
    fn test_closed_straights_terminate() -> TestResult {
        // Zero friction makes the horizon infinite; the lap cap still ends the scan.
        let track = Track::from_specs(
            &[
                SegmentSpec::straight(100.0).with_friction(0.0),
                SegmentSpec::straight(100.0).with_friction(0.0),
            ],
            true,
        )?;
        let segment = must_some(track.segment(SegmentId(0)), "straight");
        let vehicle = VehicleFixture::rolling(30.0).build();
        assert_relative_eq!(
            brake_fraction(&model(0.0, 0.0), &track, segment, &vehicle),
            NO_BRAKE
        );
        Ok(())
    }

    #[test]
    fn test_stationary_never_brakes() {
        let track = TrackFixture::straight_into_curve(10.0, 5.0, 1.0);
        let segment = must_some(track.segment(SegmentId(0)), "straight");
        let vehicle = VehicleFixture::new().build();
        assert_relative_eq!(
            brake_fraction(&model(0.0, 0.0), &track, segment, &vehicle),
            NO_BRAKE
        );
    }
}
