//! Static car configuration and the coefficients derived from it at race start.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::vehicle::{Wheel, WheelPosition};

/// Which axle the engine drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Drivetrain {
    #[default]
    Rear,
    Front,
    All,
}

impl Drivetrain {
    pub fn as_str(self) -> &'static str {
        match self {
            Drivetrain::Rear => "RWD",
            Drivetrain::Front => "FWD",
            Drivetrain::All => "4WD",
        }
    }

    /// Average surface speed of the driven wheels.
    ///
    /// Each axle uses its left wheel's radius for both wheels; the all-wheel
    /// variant weights both axles equally.
    pub fn driven_wheel_speed(self, wheels: &[Wheel; 4]) -> f32 {
        let wheel = |p: WheelPosition| wheels.get(p.index()).copied().unwrap_or_default();
        let axle = |right: WheelPosition, left: WheelPosition| {
            (wheel(right).spin_vel + wheel(left).spin_vel) * wheel(left).radius
        };
        let front = || axle(WheelPosition::FrontRight, WheelPosition::FrontLeft);
        let rear = || axle(WheelPosition::RearRight, WheelPosition::RearLeft);

        match self {
            Drivetrain::Rear => rear() / 2.0,
            Drivetrain::Front => front() / 2.0,
            Drivetrain::All => front() / 4.0 + rear() / 4.0,
        }
    }
}

impl fmt::Display for Drivetrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Drivetrain {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RWD" => Ok(Drivetrain::Rear),
            "FWD" => Ok(Drivetrain::Front),
            "4WD" => Ok(Drivetrain::All),
            _ => Err(ConfigError::UnknownDrivetrain(s.to_string())),
        }
    }
}

impl TryFrom<String> for Drivetrain {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Drivetrain> for String {
    fn from(d: Drivetrain) -> String {
        d.as_str().to_string()
    }
}

/// Aerodynamic setup as read from the car file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AeroSpec {
    /// Rear wing area, m^2
    pub rear_wing_area: f32,
    /// Rear wing angle of attack, radians
    pub rear_wing_angle: f32,
    /// Front lift coefficient
    pub front_clift: f32,
    /// Rear lift coefficient
    pub rear_clift: f32,
    /// Drag coefficient
    pub cx: f32,
    /// Frontal area, m^2
    pub front_area: f32,
}

const DEFAULT_MASS: f32 = 1000.0;
const DEFAULT_RIDE_HEIGHT: f32 = 0.2;

/// Static car data supplied once per race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarSpec {
    /// Dry mass, kg
    pub mass: f32,
    pub drivetrain: Drivetrain,
    pub aero: AeroSpec,
    /// Ride height per wheel in host order, meters
    pub ride_heights: [f32; 4],
}

impl Default for CarSpec {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            drivetrain: Drivetrain::Rear,
            aero: AeroSpec::default(),
            ride_heights: [DEFAULT_RIDE_HEIGHT; 4],
        }
    }
}

impl CarSpec {
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_drivetrain(mut self, drivetrain: Drivetrain) -> Self {
        self.drivetrain = drivetrain;
        self
    }

    pub fn with_aero(mut self, aero: AeroSpec) -> Self {
        self.aero = aero;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ConfigError::invalid("mass", self.mass, "must be > 0"));
        }
        for height in self.ride_heights {
            if !height.is_finite() || height < 0.0 {
                return Err(ConfigError::invalid("ride_height", height, "must be >= 0"));
            }
        }
        let aero = [
            ("rear_wing_area", self.aero.rear_wing_area),
            ("rear_wing_angle", self.aero.rear_wing_angle),
            ("front_clift", self.aero.front_clift),
            ("rear_clift", self.aero.rear_clift),
            ("cx", self.aero.cx),
            ("front_area", self.aero.front_area),
        ];
        for (name, value) in aero {
            if !value.is_finite() {
                return Err(ConfigError::invalid(name, value, "must be finite"));
            }
        }
        Ok(())
    }

    /// Downforce coefficient (CA): ground effect from ride height plus rear wing.
    pub fn downforce_coeff(&self) -> f32 {
        let wing_ca = 1.23 * self.aero.rear_wing_area * self.aero.rear_wing_angle.sin();
        let cl = self.aero.front_clift + self.aero.rear_clift;

        let h = self.ride_heights.iter().sum::<f32>() * 1.5;
        let ground_effect = 2.0 * (-3.0 * h.powi(4)).exp();

        ground_effect * cl + 4.0 * wing_ca
    }

    /// Drag coefficient (CW).
    pub fn drag_coeff(&self) -> f32 {
        0.645 * self.aero.cx * self.aero.front_area
    }

    /// Validate and derive the per-race constants.
    pub fn coefficients(&self) -> ConfigResult<CarCoefficients> {
        self.validate()?;
        Ok(CarCoefficients {
            mass: self.mass,
            downforce: self.downforce_coeff(),
            drag: self.drag_coeff(),
            drivetrain: self.drivetrain,
        })
    }
}

/// Constants fixed for the whole race.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarCoefficients {
    /// Dry mass, kg
    pub mass: f32,
    /// Downforce coefficient (CA)
    pub downforce: f32,
    /// Drag coefficient (CW)
    pub drag: f32,
    pub drivetrain: Drivetrain,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn wheels(front: f32, rear: f32) -> [Wheel; 4] {
        [
            Wheel::new(front, 0.3),
            Wheel::new(front, 0.3),
            Wheel::new(rear, 0.3),
            Wheel::new(rear, 0.3),
        ]
    }

    #[test]
    fn test_drivetrain_parse() -> TestResult {
        assert_eq!("RWD".parse::<Drivetrain>()?, Drivetrain::Rear);
        assert_eq!("fwd".parse::<Drivetrain>()?, Drivetrain::Front);
        assert_eq!(" 4wd ".parse::<Drivetrain>()?, Drivetrain::All);
        assert_eq!(
            "AWD".parse::<Drivetrain>(),
            Err(ConfigError::UnknownDrivetrain("AWD".into()))
        );
        Ok(())
    }

    #[test]
    fn test_drivetrain_serde_roundtrip() -> TestResult {
        let json = serde_json::to_string(&Drivetrain::All)?;
        assert_eq!(json, "\"4WD\"");
        let back: Drivetrain = serde_json::from_str("\"FWD\"")?;
        assert_eq!(back, Drivetrain::Front);
        assert!(serde_json::from_str::<Drivetrain>("\"6WD\"").is_err());
        Ok(())
    }

    #[test]
    fn test_driven_wheel_speed_by_layout() {
        let w = wheels(100.0, 60.0);
        assert_relative_eq!(Drivetrain::Front.driven_wheel_speed(&w), 30.0);
        assert_relative_eq!(Drivetrain::Rear.driven_wheel_speed(&w), 18.0);
        assert_relative_eq!(Drivetrain::All.driven_wheel_speed(&w), 24.0);
    }

    #[test]
    fn test_drag_coeff() {
        let spec = CarSpec::default().with_aero(AeroSpec {
            cx: 0.35,
            front_area: 2.0,
            ..AeroSpec::default()
        });
        assert_relative_eq!(spec.drag_coeff(), 0.645 * 0.35 * 2.0);
    }

    #[test]
    fn test_downforce_coeff_wing_only() {
        let spec = CarSpec::default().with_aero(AeroSpec {
            rear_wing_area: 0.5,
            rear_wing_angle: std::f32::consts::FRAC_PI_2,
            ..AeroSpec::default()
        });
        assert_relative_eq!(spec.downforce_coeff(), 4.0 * 1.23 * 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_downforce_ground_effect_drops_with_ride_height() {
        let aero = AeroSpec {
            front_clift: 0.5,
            rear_clift: 0.5,
            ..AeroSpec::default()
        };
        let low = CarSpec {
            ride_heights: [0.05; 4],
            ..CarSpec::default()
        }
        .with_aero(aero);
        let high = CarSpec {
            ride_heights: [0.3; 4],
            ..CarSpec::default()
        }
        .with_aero(aero);
        assert!(low.downforce_coeff() > high.downforce_coeff());
        assert!(high.downforce_coeff() >= 0.0);
    }

    #[test]
    fn test_default_car_spec_from_empty_yaml() -> TestResult {
        let spec: CarSpec = serde_yaml::from_str("{}")?;
        assert_relative_eq!(spec.mass, 1000.0);
        assert_eq!(spec.drivetrain, Drivetrain::Rear);
        assert_eq!(spec.ride_heights, [0.2; 4]);
        Ok(())
    }

    #[test]
    fn test_invalid_mass_rejected() {
        let spec = CarSpec::default().with_mass(0.0);
        assert!(matches!(
            spec.coefficients(),
            Err(ConfigError::InvalidParameter { name: "mass", .. })
        ));
    }

    #[test]
    fn test_coefficients_carry_drivetrain() -> TestResult {
        let coeffs = CarSpec::default()
            .with_drivetrain(Drivetrain::Front)
            .coefficients()?;
        assert_eq!(coeffs.drivetrain, Drivetrain::Front);
        assert_relative_eq!(coeffs.mass, 1000.0);
        Ok(())
    }
}
