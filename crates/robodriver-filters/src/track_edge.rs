//! Track-Edge Filter
//!
//! Withholds throttle while the car runs wide: off-center on a straight, or
//! toward the outside of a curve.

use robodriver_model::{TrackSegment, VehicleState};
use serde::{Deserialize, Serialize};

/// State for the track-edge filter.
///
/// # RT Safety
///
/// - `#[repr(C)]` for stable ABI
/// - No heap allocations
/// - O(1) time complexity
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackEdgeState {
    /// Ground speed (m/s) below which the filter is bypassed
    pub min_speed: f32,
    /// Lateral tolerance as a fraction of width: offset limit is `width / width_divisor`
    pub width_divisor: f32,
}

impl TrackEdgeState {
    /// Create a new track-edge filter state.
    pub fn new(min_speed: f32, width_divisor: f32) -> Self {
        Self {
            min_speed,
            width_divisor,
        }
    }

    /// Largest tolerated lateral offset on `segment`.
    #[inline]
    pub fn offset_limit(&self, segment: &TrackSegment) -> f32 {
        segment.width / self.width_divisor
    }
}

impl Default for TrackEdgeState {
    fn default() -> Self {
        Self::new(5.0, 4.0)
    }
}

/// Track-edge filter - zeroes throttle when running wide.
///
/// On a curve, an offset toward the inside always keeps the throttle.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
/// - No syscalls or I/O
#[inline]
pub fn track_edge_filter(
    accel: f32,
    vehicle: &VehicleState,
    segment: &TrackSegment,
    state: &TrackEdgeState,
) -> f32 {
    if vehicle.speed < state.min_speed || !vehicle.speed.is_finite() {
        return accel;
    }

    let offset = vehicle.position.to_middle;
    if offset * segment.kind.inside_sign() > 0.0 {
        return accel;
    }

    if offset.abs() > state.offset_limit(segment) {
        0.0
    } else {
        accel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use robodriver_model::SegmentId;
    use robodriver_test_helpers::prelude::*;

    fn first(track: &robodriver_model::Track) -> &TrackSegment {
        must_some(track.segment(SegmentId(0)), "segment 0")
    }

    #[test]
    fn test_straight_wide_cuts_throttle() {
        let track = TrackFixture::straight(500.0, 10.0);
        let vehicle = VehicleFixture::rolling(30.0).with_offset(5.0).build();
        let out = track_edge_filter(1.0, &vehicle, first(&track), &TrackEdgeState::default());
        assert_relative_eq!(out, 0.0);
    }

    #[test]
    fn test_straight_within_band_passes() {
        let track = TrackFixture::straight(500.0, 10.0);
        let vehicle = VehicleFixture::rolling(30.0).with_offset(-2.0).build();
        let out = track_edge_filter(1.0, &vehicle, first(&track), &TrackEdgeState::default());
        assert_relative_eq!(out, 1.0);
    }

    #[test]
    fn test_low_speed_exempt() {
        let track = TrackFixture::straight(500.0, 10.0);
        let vehicle = VehicleFixture::rolling(2.0).with_offset(5.0).build();
        let out = track_edge_filter(0.5, &vehicle, first(&track), &TrackEdgeState::default());
        assert_relative_eq!(out, 0.5);
    }

    #[test]
    fn test_left_curve_inside_always_allowed() {
        let track = TrackFixture::straight_into_curve(100.0, 40.0, 1.0);
        let curve = must_some(track.segment(SegmentId(1)), "curve");
        let vehicle = VehicleFixture::rolling(30.0).with_offset(4.5).build();
        let out = track_edge_filter(1.0, &vehicle, curve, &TrackEdgeState::default());
        assert_relative_eq!(out, 1.0);
    }

    #[test]
    fn test_left_curve_outside_wide_cuts() {
        let track = TrackFixture::straight_into_curve(100.0, 40.0, 1.0);
        let curve = must_some(track.segment(SegmentId(1)), "curve");
        let vehicle = VehicleFixture::rolling(30.0).with_offset(-4.5).build();
        let out = track_edge_filter(1.0, &vehicle, curve, &TrackEdgeState::default());
        assert_relative_eq!(out, 0.0);
    }

    #[test]
    fn test_right_curve_inside_is_negative_offset() {
        let track = TrackFixture::right_curve(40.0, 1.0);
        let curve = first(&track);
        let inside = VehicleFixture::rolling(30.0).with_offset(-4.5).build();
        let outside = VehicleFixture::rolling(30.0).with_offset(4.5).build();
        let state = TrackEdgeState::default();
        assert_relative_eq!(track_edge_filter(1.0, &inside, curve, &state), 1.0);
        assert_relative_eq!(track_edge_filter(1.0, &outside, curve, &state), 0.0);
    }

    #[test]
    fn test_curve_outside_within_band_passes() {
        let track = TrackFixture::right_curve(40.0, 1.0);
        let vehicle = VehicleFixture::rolling(30.0).with_offset(1.0).build();
        let out = track_edge_filter(0.9, &vehicle, first(&track), &TrackEdgeState::default());
        assert_relative_eq!(out, 0.9);
    }
}
