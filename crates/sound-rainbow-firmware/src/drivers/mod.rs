mod adc;
mod led_ws2812;

pub(crate) use adc::{Adc1, AdcInput};
pub(crate) use led_ws2812::EspLedDriver;
