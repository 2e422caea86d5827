//! Compile-time configuration for the sampler and the animator
//!
//! All constructors are `const fn` returning [`Result`], so firmware can
//! validate its constants in a `const` item and reject a bad configuration
//! before the device ever boots.

use core::fmt;

use embassy_time::Duration;

/// Highest value produced by the 10-bit analog input.
pub const ADC_MAX: u16 = 1023;

/// Analog level separating quiet from loud.
pub const SENSOR_SENSITIVITY: u16 = 520;

/// Delay between two animation steps, in milliseconds.
pub const SAMPLE_INTERVAL_MS: u64 = 3;

/// Number of pixels on the strip (four chained 8-LED sticks).
pub const NEOPIXEL_LEDS: usize = 32;

/// Minimum light intensity (absolute min = 0)
pub const LIGHT_MIN: u8 = 5;

/// Maximum light intensity (absolute max = 255)
pub const LIGHT_MAX: u8 = 50;

/// Hue advance per step. 256 steps make one full rotation.
pub const HUE_INCREMENT: u16 = 256;

/// Configuration fault detected while building a config value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Lower intensity bound is above the upper one
    InvertedBounds { min: u8, max: u8 },
    /// Sensitivity threshold is outside of the analog range
    SensitivityOutOfRange(u16),
    /// Hue increment of zero would freeze the animation
    ZeroHueIncrement,
    /// Strip has no pixels
    EmptyStrip,
    /// Sampler and animator disagree on the intensity range
    MismatchedBounds {
        sampler: IntensityBounds,
        animator: IntensityBounds,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvertedBounds { min, max } => {
                write!(f, "intensity min {} is above max {}", min, max)
            }
            ConfigError::SensitivityOutOfRange(value) => {
                write!(f, "sensitivity {} is above {}", value, ADC_MAX)
            }
            ConfigError::ZeroHueIncrement => write!(f, "hue increment must not be zero"),
            ConfigError::EmptyStrip => write!(f, "strip must have at least one pixel"),
            ConfigError::MismatchedBounds { sampler, animator } => write!(
                f,
                "sampler intensity {}..={} differs from animator intensity {}..={}",
                sampler.min, sampler.max, animator.min, animator.max
            ),
        }
    }
}

/// Inclusive intensity range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityBounds {
    min: u8,
    max: u8,
}

impl IntensityBounds {
    pub const DEFAULT: Self = Self {
        min: LIGHT_MIN,
        max: LIGHT_MAX,
    };

    pub const fn new(min: u8, max: u8) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvertedBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub const fn min(&self) -> u8 {
        self.min
    }

    pub const fn max(&self) -> u8 {
        self.max
    }

    /// Clamp any value into the range
    pub const fn clamp(&self, value: u8) -> u8 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Width of the range
    pub const fn span(&self) -> u8 {
        self.max - self.min
    }
}

impl Default for IntensityBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How a raw reading turns into intensity
///
/// Every policy is monotonic: a louder reading never yields a lower intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntensityMapping {
    /// Whole analog range maps linearly onto the bounds
    Linear,
    /// Quiet readings stay at the floor, louder ones ramp up to the ceiling
    #[default]
    AboveThreshold,
    /// Floor when quiet, ceiling when loud
    Step,
}

/// Sensor sampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorConfig {
    pub sensitivity: u16,
    pub mapping: IntensityMapping,
    pub bounds: IntensityBounds,
}

impl SensorConfig {
    pub const DEFAULT: Self = Self {
        sensitivity: SENSOR_SENSITIVITY,
        mapping: IntensityMapping::AboveThreshold,
        bounds: IntensityBounds::DEFAULT,
    };

    pub const fn new(
        sensitivity: u16,
        mapping: IntensityMapping,
        bounds: IntensityBounds,
    ) -> Result<Self, ConfigError> {
        if sensitivity > ADC_MAX {
            return Err(ConfigError::SensitivityOutOfRange(sensitivity));
        }
        Ok(Self {
            sensitivity,
            mapping,
            bounds,
        })
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Animation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Hue advance per step, in 1/65536 of a full turn
    pub hue_increment: u16,
    /// Delay between two steps
    pub sample_interval: Duration,
    /// Apply gamma correction before brightness scaling
    pub gamma: bool,
    pub bounds: IntensityBounds,
}

impl AnimationConfig {
    pub const DEFAULT: Self = Self {
        hue_increment: HUE_INCREMENT,
        sample_interval: Duration::from_millis(SAMPLE_INTERVAL_MS),
        gamma: false,
        bounds: IntensityBounds::DEFAULT,
    };

    pub const fn new(
        hue_increment: u16,
        sample_interval: Duration,
        gamma: bool,
        bounds: IntensityBounds,
    ) -> Result<Self, ConfigError> {
        if hue_increment == 0 {
            return Err(ConfigError::ZeroHueIncrement);
        }
        Ok(Self {
            hue_increment,
            sample_interval,
            gamma,
            bounds,
        })
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Reject a zero-length strip
pub const fn check_strip_len(len: usize) -> Result<usize, ConfigError> {
    if len == 0 {
        return Err(ConfigError::EmptyStrip);
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_is_idempotent() {
        let bounds = IntensityBounds::DEFAULT;
        for value in 0..=u8::MAX {
            let once = bounds.clamp(value);
            assert_eq!(bounds.clamp(once), once);
            assert!((LIGHT_MIN..=LIGHT_MAX).contains(&once));
        }
    }

    #[test]
    fn equal_bounds_are_accepted() {
        let bounds = IntensityBounds::new(7, 7).unwrap();
        assert_eq!(bounds.clamp(0), 7);
        assert_eq!(bounds.clamp(255), 7);
        assert_eq!(bounds.span(), 0);
    }
}
