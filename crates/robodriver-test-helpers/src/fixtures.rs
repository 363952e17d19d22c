//! Test fixtures for tracks, vehicle snapshots and cars.

use robodriver_model::prelude::*;

use crate::must::must;

pub const WHEEL_RADIUS: f32 = 0.33;
pub const REDLINE: f32 = 1000.0;
pub const STEER_LOCK: f32 = 0.366;

/// Overall ratios (gearbox times final drive) for a six-speed car.
pub fn six_speed() -> GearRatios {
    GearRatios::new(-13.0, vec![13.0, 9.0, 6.8, 5.5, 4.6, 3.9])
}

/// Pre-built tracks.
#[derive(Debug, Clone, Copy)]
pub struct TrackFixture;

impl TrackFixture {
    /// A single open straight.
    pub fn straight(length: f32, width: f32) -> Track {
        must(Track::from_specs(
            &[SegmentSpec::straight(length).with_width(width)],
            false,
        ))
    }

    /// Open chain: straight, left curve, straight. Segment ids 0, 1, 2.
    pub fn straight_into_curve(straight: f32, radius: f32, arc: f32) -> Track {
        must(Track::from_specs(
            &[
                SegmentSpec::straight(straight),
                SegmentSpec::left(radius, arc),
                SegmentSpec::straight(straight),
            ],
            false,
        ))
    }

    /// Closed oval with two 180 degree left-handers.
    pub fn oval() -> Track {
        let half = std::f32::consts::PI;
        must(Track::from_specs(
            &[
                SegmentSpec::straight(400.0),
                SegmentSpec::left(60.0, half),
                SegmentSpec::straight(400.0),
                SegmentSpec::left(60.0, half),
            ],
            true,
        ))
    }

    /// A single right-hand curve, open.
    pub fn right_curve(radius: f32, arc: f32) -> Track {
        must(Track::from_specs(&[SegmentSpec::right(radius, arc)], false))
    }
}

/// Builder for [`VehicleState`] snapshots.
#[derive(Debug, Clone)]
pub struct VehicleFixture {
    state: VehicleState,
}

impl Default for VehicleFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleFixture {
    /// Stationary car in first gear at the start of segment 0.
    pub fn new() -> Self {
        Self {
            state: VehicleState {
                speed: 0.0,
                yaw: 0.0,
                position: TrackPosition::new(SegmentId(0), 0.0, 0.0),
                gear: 1,
                wheels: [Wheel::new(0.0, WHEEL_RADIUS); 4],
                redline_rpm: REDLINE,
                gear_ratios: six_speed(),
                steer_lock: STEER_LOCK,
                fuel: 0.0,
            },
        }
    }

    /// Car moving at `speed` with all four wheels rolling freely.
    pub fn rolling(speed: f32) -> Self {
        Self::new().with_speed(speed).with_wheel_speed(speed)
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.state.speed = speed;
        self
    }

    /// Set every wheel so its surface speed equals `surface_speed`.
    pub fn with_wheel_speed(self, surface_speed: f32) -> Self {
        self.with_front_wheel_speed(surface_speed)
            .with_rear_wheel_speed(surface_speed)
    }

    pub fn with_front_wheel_speed(mut self, surface_speed: f32) -> Self {
        for position in [WheelPosition::FrontRight, WheelPosition::FrontLeft] {
            self.set_wheel(position, surface_speed);
        }
        self
    }

    pub fn with_rear_wheel_speed(mut self, surface_speed: f32) -> Self {
        for position in [WheelPosition::RearRight, WheelPosition::RearLeft] {
            self.set_wheel(position, surface_speed);
        }
        self
    }

    fn set_wheel(&mut self, position: WheelPosition, surface_speed: f32) {
        if let Some(wheel) = self.state.wheels.get_mut(position.index()) {
            wheel.spin_vel = surface_speed / wheel.radius;
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.state.yaw = yaw;
        self
    }

    pub fn on_segment(mut self, segment: usize, to_start: f32) -> Self {
        self.state.position.segment = SegmentId(segment);
        self.state.position.to_start = to_start;
        self
    }

    pub fn with_offset(mut self, to_middle: f32) -> Self {
        self.state.position.to_middle = to_middle;
        self
    }

    pub fn in_gear(mut self, gear: i32) -> Self {
        self.state.gear = gear;
        self
    }

    pub fn with_fuel(mut self, fuel: f32) -> Self {
        self.state.fuel = fuel;
        self
    }

    pub fn build(self) -> VehicleState {
        self.state
    }
}

/// Car specs.
#[derive(Debug, Clone, Copy)]
pub struct CarFixture;

impl CarFixture {
    /// 1000 kg rear-driven car without aero.
    pub fn plain() -> CarSpec {
        CarSpec::default()
    }

    /// Winged car with moderate downforce and drag.
    pub fn winged(drivetrain: Drivetrain) -> CarSpec {
        CarSpec::default()
            .with_drivetrain(drivetrain)
            .with_aero(AeroSpec {
                rear_wing_area: 0.6,
                rear_wing_angle: 0.25,
                front_clift: 0.4,
                rear_clift: 0.4,
                cx: 0.35,
                front_area: 1.9,
            })
    }
}
