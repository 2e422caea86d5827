use core::cell::RefCell;

use embassy_time::Delay;
use esp_hal::analog::adc::{Adc, AdcConfig, Attenuation};
use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::peripherals::{ADC1, GPIO36, RMT};
use sound_rainbow_composer::{BufferedStrip, RainbowLoop, SensorSampler};
use static_cell::StaticCell;

use crate::config;
use crate::drivers::{Adc1, AdcInput, EspLedDriver};
use crate::types::{LightStrip, SoundRainbow, SoundSampler};

static ADC: StaticCell<RefCell<Adc1>> = StaticCell::new();

/// Pins the render task needs on top of the strip
pub(crate) struct SensorPins {
    pub sound: GPIO36<'static>,
    pub feedback_led: Output<'static>,
    #[cfg(feature = "potentiometer")]
    pub sensitivity: esp_hal::peripherals::GPIO39<'static>,
    #[cfg(feature = "comparator")]
    pub comparator: esp_hal::gpio::Input<'static>,
}

/// Task for running the sound-reactive rainbow
///
/// Samples the sensor, renders one step and sleeps for the sample interval,
/// forever.
#[embassy_executor::task]
pub(crate) async fn rainbow_task(mut rainbow: SoundRainbow) {
    rainbow.run(Delay).await
}

pub(crate) fn init_rainbow<O>(
    rmt: RMT<'static>,
    led_pin: O,
    adc: ADC1<'static>,
    pins: SensorPins,
) -> SoundRainbow
where
    O: PeripheralOutput<'static>,
{
    let strip: LightStrip = BufferedStrip::new(EspLedDriver::new(rmt, led_pin));

    let mut adc_config = AdcConfig::new();
    let sound_pin = adc_config.enable_pin(pins.sound, Attenuation::_11dB);
    #[cfg(feature = "potentiometer")]
    let sensitivity_pin = adc_config.enable_pin(pins.sensitivity, Attenuation::_11dB);
    let adc = ADC.init(RefCell::new(Adc::new(adc, adc_config)));

    let sampler = SensorSampler::new(
        AdcInput::new(adc, sound_pin),
        pins.feedback_led,
        &config::SENSOR,
    );
    #[cfg(feature = "potentiometer")]
    let sampler = sampler.with_potentiometer(AdcInput::new(adc, sensitivity_pin));
    #[cfg(feature = "comparator")]
    let sampler =
        sampler.with_comparator(sound_rainbow_composer::DigitalComparator(pins.comparator));
    let sampler: SoundSampler = sampler;

    RainbowLoop::new(strip, sampler, &config::ANIMATION)
        .expect("sensor and animation intensity bounds differ")
}

/// Feedback LED starts dark
pub(crate) fn feedback_led(pin: impl esp_hal::gpio::OutputPin + 'static) -> Output<'static> {
    Output::new(pin, Level::Low, OutputConfig::default())
}
