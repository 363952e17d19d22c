//! The per-tick path must not touch the heap.

use robodriver_core::prelude::*;
use robodriver_model::prelude::*;
use robodriver_test_helpers::assert_no_alloc;
use robodriver_test_helpers::prelude::*;

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

#[test]
fn test_tick_does_not_allocate() -> TestResult {
    let oval = TrackFixture::oval();
    let mut driver = RobotDriver::new_race(
        &CarFixture::winged(Drivetrain::All),
        DriverParams::default(),
        RaceConfig::default(),
    )?;

    let snapshots = [
        VehicleFixture::rolling(30.0).on_segment(0, 10.0).build(),
        VehicleFixture::rolling(60.0).on_segment(0, 350.0).build(),
        VehicleFixture::rolling(25.0).on_segment(1, 1.0).with_offset(-4.0).build(),
        VehicleFixture::rolling(40.0)
            .with_rear_wheel_speed(70.0)
            .on_segment(2, 20.0)
            .build(),
        VehicleFixture::rolling(0.5)
            .with_offset(4.0)
            .with_yaw(1.2)
            .on_segment(0, 50.0)
            .build(),
        VehicleFixture::rolling(10.0).on_segment(9, 0.0).build(),
    ];

    // Warm up so one-time callsite registration happens outside the window
    for vehicle in &snapshots {
        std::hint::black_box(driver.tick(&oval, vehicle));
    }

    let guard = track();
    for _ in 0..150 {
        for vehicle in &snapshots {
            std::hint::black_box(driver.tick(&oval, vehicle));
        }
    }
    assert_no_alloc!(guard, "RobotDriver::tick");
    Ok(())
}
