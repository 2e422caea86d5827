//! Sound sensor sampling
//!
//! Turns a raw analog sound level into a bounded light intensity and drives
//! the feedback LED.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::{ADC_MAX, IntensityBounds, IntensityMapping, SensorConfig};
use crate::driver::{AnalogSource, FixedLevel};
use crate::math8::map_span;

/// Optional digital loudness input
///
/// Sound sensor modules carry an on-board comparator with its own digital
/// output. When one is attached it decides the feedback LED state.
pub trait Comparator {
    /// `None` when no comparator is present
    fn is_triggered(&mut self) -> Option<bool>;
}

/// No comparator attached; loudness comes from the analog threshold
#[derive(Debug, Clone, Copy, Default)]
pub struct NoComparator;

impl Comparator for NoComparator {
    fn is_triggered(&mut self) -> Option<bool> {
        None
    }
}

/// Comparator read from a digital input pin, high meaning loud
pub struct DigitalComparator<I>(pub I);

impl<I: InputPin> Comparator for DigitalComparator<I> {
    fn is_triggered(&mut self) -> Option<bool> {
        match self.0.is_high() {
            Ok(high) => Some(high),
            Err(e) => {
                log::warn!("sensor: comparator read failed: {:?}", e);
                None
            }
        }
    }
}

/// Map a raw reading to intensity under the given policy
///
/// Readings above [`ADC_MAX`] are treated as [`ADC_MAX`].
pub fn map_reading(
    raw: u16,
    sensitivity: u16,
    mapping: IntensityMapping,
    bounds: IntensityBounds,
) -> u8 {
    let raw = raw.min(ADC_MAX);
    let sensitivity = sensitivity.min(ADC_MAX);
    let intensity = match mapping {
        IntensityMapping::Linear => map_span(raw, ADC_MAX, bounds.min(), bounds.span()),
        IntensityMapping::AboveThreshold => {
            if raw <= sensitivity {
                bounds.min()
            } else {
                map_span(
                    raw - sensitivity,
                    ADC_MAX - sensitivity,
                    bounds.min(),
                    bounds.span(),
                )
            }
        }
        IntensityMapping::Step => {
            if raw > sensitivity {
                bounds.max()
            } else {
                bounds.min()
            }
        }
    };
    bounds.clamp(intensity)
}

/// Sound sensor sampler
///
/// * `S` - sound level input
/// * `P` - sensitivity input, [`FixedLevel`] unless a potentiometer is fitted
/// * `L` - feedback LED
/// * `C` - optional digital comparator
pub struct SensorSampler<S, L, P = FixedLevel, C = NoComparator> {
    sound: S,
    sensitivity_source: P,
    feedback: L,
    comparator: C,
    sensitivity: u16,
    mapping: IntensityMapping,
    bounds: IntensityBounds,
    last_raw: u16,
    loud: bool,
}

impl<S, L> SensorSampler<S, L>
where
    S: AnalogSource,
    L: OutputPin,
{
    /// Sampler with a fixed sensitivity taken from the config
    pub fn new(sound: S, feedback: L, config: &SensorConfig) -> Self {
        Self {
            sound,
            sensitivity_source: FixedLevel(config.sensitivity),
            feedback,
            comparator: NoComparator,
            sensitivity: config.sensitivity,
            mapping: config.mapping,
            bounds: config.bounds,
            last_raw: 0,
            loud: false,
        }
    }
}

impl<S, L, P, C> SensorSampler<S, L, P, C>
where
    S: AnalogSource,
    L: OutputPin,
    P: AnalogSource,
    C: Comparator,
{
    /// Take the sensitivity from a potentiometer instead
    #[must_use]
    pub fn with_potentiometer<P2: AnalogSource>(
        self,
        potentiometer: P2,
    ) -> SensorSampler<S, L, P2, C> {
        SensorSampler {
            sound: self.sound,
            sensitivity_source: potentiometer,
            feedback: self.feedback,
            comparator: self.comparator,
            sensitivity: self.sensitivity,
            mapping: self.mapping,
            bounds: self.bounds,
            last_raw: self.last_raw,
            loud: self.loud,
        }
    }

    /// Let a digital comparator drive the feedback LED
    #[must_use]
    pub fn with_comparator<C2: Comparator>(self, comparator: C2) -> SensorSampler<S, L, P, C2> {
        SensorSampler {
            sound: self.sound,
            sensitivity_source: self.sensitivity_source,
            feedback: self.feedback,
            comparator,
            sensitivity: self.sensitivity,
            mapping: self.mapping,
            bounds: self.bounds,
            last_raw: self.last_raw,
            loud: self.loud,
        }
    }

    /// Read the sensor, update the feedback LED and return the intensity
    pub fn sample(&mut self) -> u8 {
        self.sensitivity = self.sensitivity_source.read().min(ADC_MAX);
        let raw = self.sound.read().min(ADC_MAX);
        self.last_raw = raw;

        let loud = self
            .comparator
            .is_triggered()
            .unwrap_or(raw > self.sensitivity);
        self.set_feedback(loud);

        self.map(raw)
    }

    /// Intensity for a raw reading under the current sensitivity
    pub fn map(&self, raw: u16) -> u8 {
        map_reading(raw, self.sensitivity, self.mapping, self.bounds)
    }

    /// Sensitivity threshold used by the last sample
    pub fn sensitivity(&self) -> u16 {
        self.sensitivity
    }

    /// Last raw reading, clamped to the analog range
    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }

    /// Whether the last sample was loud
    pub fn is_loud(&self) -> bool {
        self.loud
    }

    pub fn bounds(&self) -> IntensityBounds {
        self.bounds
    }

    pub fn feedback(&self) -> &L {
        &self.feedback
    }

    fn set_feedback(&mut self, loud: bool) {
        let result = if loud {
            self.feedback.set_high()
        } else {
            self.feedback.set_low()
        };
        if let Err(e) = result {
            log::warn!("sensor: feedback led write failed: {:?}", e);
        }
        self.loud = loud;
    }
}
