use esp_hal::gpio::Output;
use esp_hal::peripherals::GPIO36;
use sound_rainbow_composer::{BufferedStrip, RainbowLoop, SensorSampler};

use crate::config::LED_COUNT;
use crate::drivers::{AdcInput, EspLedDriver};

pub(crate) type LightStrip = BufferedStrip<EspLedDriver<'static>, LED_COUNT>;

pub(crate) type SoundInput = AdcInput<GPIO36<'static>>;

#[cfg(feature = "potentiometer")]
pub(crate) type SensitivityInput = AdcInput<esp_hal::peripherals::GPIO39<'static>>;
#[cfg(not(feature = "potentiometer"))]
pub(crate) type SensitivityInput = sound_rainbow_composer::FixedLevel;

#[cfg(feature = "comparator")]
pub(crate) type LoudnessComparator =
    sound_rainbow_composer::DigitalComparator<esp_hal::gpio::Input<'static>>;
#[cfg(not(feature = "comparator"))]
pub(crate) type LoudnessComparator = sound_rainbow_composer::NoComparator;

pub(crate) type SoundSampler =
    SensorSampler<SoundInput, Output<'static>, SensitivityInput, LoudnessComparator>;

pub(crate) type SoundRainbow = RainbowLoop<
    LightStrip,
    SoundInput,
    Output<'static>,
    SensitivityInput,
    LoudnessComparator,
>;
