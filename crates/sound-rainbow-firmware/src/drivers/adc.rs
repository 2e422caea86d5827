use core::cell::RefCell;

use esp_hal::Blocking;
use esp_hal::analog::adc::{Adc, AdcChannel, AdcPin};
use esp_hal::peripherals::ADC1;
use sound_rainbow_composer::AnalogSource;

use crate::config::ADC_SHIFT;

pub(crate) type Adc1 = Adc<'static, ADC1<'static>, Blocking>;

/// One analog input on ADC1
///
/// Several inputs share the converter through a `RefCell`; they are all
/// read from the render task, never concurrently.
pub(crate) struct AdcInput<PIN> {
    adc: &'static RefCell<Adc1>,
    pin: AdcPin<PIN, ADC1<'static>>,
}

impl<PIN: AdcChannel> AdcInput<PIN> {
    pub(crate) fn new(adc: &'static RefCell<Adc1>, pin: AdcPin<PIN, ADC1<'static>>) -> Self {
        Self { adc, pin }
    }
}

impl<PIN: AdcChannel> AnalogSource for AdcInput<PIN> {
    fn read(&mut self) -> u16 {
        let mut adc = self.adc.borrow_mut();
        match nb::block!(adc.read_oneshot(&mut self.pin)) {
            Ok(value) => value >> ADC_SHIFT,
            Err(()) => {
                log::warn!("adc: conversion failed");
                0
            }
        }
    }
}
