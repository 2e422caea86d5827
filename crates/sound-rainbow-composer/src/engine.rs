//! Render loop
//!
//! Each cycle samples the sound sensor, renders one rainbow step with the
//! resulting intensity and then waits for the sample interval. The delay is
//! injected so the cadence can be observed in tests.

use embassy_time::Duration;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use crate::config::{AnimationConfig, ConfigError};
use crate::driver::{AnalogSource, PixelStrip};
use crate::rainbow::{RainbowAnimator, RainbowState};
use crate::sensor::{Comparator, SensorSampler};

/// Sound-reactive rainbow loop
///
/// Owns every piece of state it touches; nothing is shared with other tasks.
pub struct RainbowLoop<D, S, L, P, C> {
    strip: D,
    sampler: SensorSampler<S, L, P, C>,
    animator: RainbowAnimator,
    state: RainbowState,
    sample_interval: Duration,
}

impl<D, S, L, P, C> RainbowLoop<D, S, L, P, C>
where
    D: PixelStrip,
    S: AnalogSource,
    L: OutputPin,
    P: AnalogSource,
    C: Comparator,
{
    /// Build the loop
    ///
    /// The sampler and the animator must share one intensity range.
    pub fn new(
        strip: D,
        sampler: SensorSampler<S, L, P, C>,
        config: &AnimationConfig,
    ) -> Result<Self, ConfigError> {
        if sampler.bounds() != config.bounds {
            return Err(ConfigError::MismatchedBounds {
                sampler: sampler.bounds(),
                animator: config.bounds,
            });
        }
        let animator = RainbowAnimator::new(config);
        Ok(Self {
            strip,
            sampler,
            state: RainbowState::new(animator.bounds()),
            animator,
            sample_interval: config.sample_interval,
        })
    }

    pub fn state(&self) -> &RainbowState {
        &self.state
    }

    pub fn strip(&self) -> &D {
        &self.strip
    }

    pub fn sampler(&self) -> &SensorSampler<S, L, P, C> {
        &self.sampler
    }

    pub fn animator(&self) -> &RainbowAnimator {
        &self.animator
    }

    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }

    /// Sample once and render one step. Returns the applied intensity.
    pub fn cycle(&mut self) -> u8 {
        let intensity = self.sampler.sample();
        self.animator.step(&mut self.state, intensity, &mut self.strip);

        log::trace!(
            "rainbow: raw={} intensity={} hue={}",
            self.sampler.last_raw(),
            self.state.intensity(),
            self.state.first_pixel_hue()
        );
        self.state.intensity()
    }

    /// One cycle followed by the sample interval delay
    #[allow(clippy::cast_possible_truncation)]
    pub async fn tick<T: DelayNs>(&mut self, delay: &mut T) {
        self.cycle();
        delay.delay_ms(self.sample_interval.as_millis() as u32).await;
    }

    /// Run the loop indefinitely
    pub async fn run<T: DelayNs>(&mut self, mut delay: T) -> ! {
        log::info!(
            "rainbow: running on {} pixels, intensity {}..={}, every {} ms",
            self.strip.len(),
            self.animator.bounds().min(),
            self.animator.bounds().max(),
            self.sample_interval.as_millis()
        );
        loop {
            self.tick(&mut delay).await;
        }
    }
}
