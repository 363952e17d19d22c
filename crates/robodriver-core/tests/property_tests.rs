//! Property-based tests for the controller.

use proptest::prelude::*;
use robodriver_core::prelude::*;
use robodriver_model::prelude::*;
use robodriver_test_helpers::prelude::*;

fn curve(radius: f32, friction: f32) -> Result<Track, TrackError> {
    Track::from_specs(&[SegmentSpec::left(radius, 1.0).with_friction(friction)], false)
}

fn model(mass: f32, downforce: f32) -> CorneringModel {
    let coefficients = CarCoefficients {
        mass,
        downforce,
        drag: 0.3,
        drivetrain: Drivetrain::Rear,
    };
    CorneringModel::new(&coefficients, G, 1.0)
}

fn drivetrain(index: u8) -> Drivetrain {
    match index % 3 {
        0 => Drivetrain::Rear,
        1 => Drivetrain::Front,
        _ => Drivetrain::All,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_tighter_curve_is_slower(
        radius in 5.0f32..400.0,
        shrink in 0.1f32..0.9,
        mu in 0.2f32..1.6,
        mass in 600.0f32..2000.0,
        downforce in 0.0f32..0.5,
    ) {
        // r * CA * mu / m stays well under 1 in this range
        let model = model(mass, downforce);
        let wide = curve(radius, mu).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let tight = curve(radius * shrink, mu).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let wide_speed = model.max_speed(must_some(wide.segment(SegmentId(0)), "wide"));
        let tight_speed = model.max_speed(must_some(tight.segment(SegmentId(0)), "tight"));
        prop_assert!(wide_speed.is_finite() && wide_speed < UNLIMITED_SPEED);
        prop_assert!(tight_speed < wide_speed);
    }

    #[test]
    fn prop_straights_unbounded(mu in 0.0f32..3.0, length in 1.0f32..2000.0) {
        let track = Track::from_specs(&[SegmentSpec::straight(length).with_friction(mu)], false)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let segment = must_some(track.segment(SegmentId(0)), "straight");
        prop_assert!(model(1000.0, 0.5).max_speed(segment) >= UNLIMITED_SPEED);
    }

    #[test]
    fn prop_command_in_range_and_exclusive(
        segment in 0usize..4,
        progress in 0.0f32..1.0,
        speed in -5.0f32..90.0,
        front in -10.0f32..120.0,
        rear in -10.0f32..120.0,
        offset in -8.0f32..8.0,
        yaw in -4.0f32..4.0,
        gear in -1i32..=6,
        layout in 0u8..3,
    ) {
        let track = TrackFixture::oval();
        let seg = must_some(track.segment(SegmentId(segment)), "segment");
        let to_start = if seg.is_straight() { seg.length * progress } else { seg.arc * progress };
        let car = CarFixture::winged(drivetrain(layout));
        let mut driver = RobotDriver::new_race(&car, DriverParams::default(), RaceConfig::default())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let vehicle = VehicleFixture::new()
            .with_speed(speed)
            .with_front_wheel_speed(front)
            .with_rear_wheel_speed(rear)
            .on_segment(segment, to_start)
            .with_offset(offset)
            .with_yaw(yaw)
            .in_gear(gear)
            .build();

        let command = driver.tick(&track, &vehicle);
        prop_assert!(!(command.accel > 0.0 && command.brake > 0.0));
        prop_assert!((0.0..=1.0).contains(&command.accel));
        prop_assert!((0.0..=1.0).contains(&command.brake));
        prop_assert!((-1.0..=1.0).contains(&command.steer));
        prop_assert!((-1..=6).contains(&command.gear));
        let heading = driver.heading_error();
        prop_assert!(heading > -std::f32::consts::PI - 1e-6 && heading <= std::f32::consts::PI + 1e-6);
    }

    #[test]
    fn prop_braking_distance_grows_with_speed(
        speed in 20.0f32..90.0,
        extra in 1.0f32..30.0,
        target in 0.0f32..19.0,
        mu in 0.3f32..1.5,
    ) {
        let model = model(1000.0, 0.4);
        let slow = braking_distance(&model, speed, target, mu);
        let fast = braking_distance(&model, speed + extra, target, mu);
        prop_assert!(slow > 0.0);
        prop_assert!(fast > slow);
    }
}
