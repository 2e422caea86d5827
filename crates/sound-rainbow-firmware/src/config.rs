//! Board configuration
//!
//! Every value is checked at compile time: an invalid combination fails the
//! build instead of misbehaving on the device.

use embassy_time::Duration;
use sound_rainbow_composer::config::{
    HUE_INCREMENT, LIGHT_MAX, LIGHT_MIN, NEOPIXEL_LEDS, SAMPLE_INTERVAL_MS, SENSOR_SENSITIVITY,
    check_strip_len,
};
use sound_rainbow_composer::{AnimationConfig, IntensityBounds, IntensityMapping, SensorConfig};

pub(crate) struct FirmwareConfig {
    pub version: &'static str,
}

pub(crate) const FIRMWARE: FirmwareConfig = FirmwareConfig {
    version: env!("BUILD_VERSION"),
};

/// Number of pixels on the strip
pub(crate) const LED_COUNT: usize = match check_strip_len(NEOPIXEL_LEDS) {
    Ok(len) => len,
    Err(_) => panic!("strip must have at least one pixel"),
};

pub(crate) const BOUNDS: IntensityBounds = match IntensityBounds::new(LIGHT_MIN, LIGHT_MAX) {
    Ok(bounds) => bounds,
    Err(_) => panic!("LIGHT_MIN must not be above LIGHT_MAX"),
};

pub(crate) const SENSOR: SensorConfig =
    match SensorConfig::new(SENSOR_SENSITIVITY, IntensityMapping::AboveThreshold, BOUNDS) {
        Ok(config) => config,
        Err(_) => panic!("sensitivity is outside of the analog range"),
    };

pub(crate) const ANIMATION: AnimationConfig = match AnimationConfig::new(
    HUE_INCREMENT,
    Duration::from_millis(SAMPLE_INTERVAL_MS),
    cfg!(feature = "gamma"),
    BOUNDS,
) {
    Ok(config) => config,
    Err(_) => panic!("hue increment must not be zero"),
};

/// The ESP32 ADC resolves 12 bits, the sampler expects 10.
pub(crate) const ADC_SHIFT: u32 = 2;

/// Strip data line (logical pin 6)
#[macro_export]
macro_rules! led_gpio {
    ($p:expr) => {
        $p.GPIO25
    };
}

/// Sound sensor analog output (logical pin A0)
#[macro_export]
macro_rules! sensor_analog_gpio {
    ($p:expr) => {
        $p.GPIO36
    };
}

/// Sensitivity potentiometer (logical pin A1)
#[macro_export]
macro_rules! sensitivity_gpio {
    ($p:expr) => {
        $p.GPIO39
    };
}

/// Sound sensor digital output (logical pin 3)
#[macro_export]
macro_rules! sensor_digital_gpio {
    ($p:expr) => {
        $p.GPIO26
    };
}

/// Feedback LED (logical pin 4)
#[macro_export]
macro_rules! feedback_led_gpio {
    ($p:expr) => {
        $p.GPIO4
    };
}
