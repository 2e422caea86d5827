//! Rotating rainbow animation
//!
//! Spreads one full turn of the hue wheel across the strip, scales it by the
//! current sound intensity and rotates the wheel a little on every step.

use smart_leds::{
    RGB8,
    hsv::{Hsv, hsv2rgb},
};

use crate::config::{AnimationConfig, IntensityBounds};
use crate::driver::PixelStrip;
use crate::math8::scale8_video;

/// Number of distinct values of the 16-bit hue wheel
pub const HUE_PERIOD: u32 = 1 << 16;

/// Animation state, owned by the render loop
///
/// Only [`RainbowAnimator::step`] writes it, so the intensity always lies
/// within the animator's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RainbowState {
    intensity: u8,
    first_pixel_hue: u16,
}

impl RainbowState {
    /// Neutral state: dimmest allowed light, wheel at red
    pub const fn new(bounds: IntensityBounds) -> Self {
        Self::at_hue(bounds, 0)
    }

    /// Dimmest allowed light with the wheel turned to `first_pixel_hue`
    pub const fn at_hue(bounds: IntensityBounds, first_pixel_hue: u16) -> Self {
        Self {
            intensity: bounds.min(),
            first_pixel_hue,
        }
    }

    /// Light intensity, set from the last sound level reading
    pub const fn intensity(&self) -> u8 {
        self.intensity
    }

    /// Hue of the first pixel. Wrapping `u16` arithmetic keeps it on the wheel.
    pub const fn first_pixel_hue(&self) -> u16 {
        self.first_pixel_hue
    }
}

impl Default for RainbowState {
    fn default() -> Self {
        Self::new(IntensityBounds::DEFAULT)
    }
}

/// Hue of pixel `index` on a strip of `len` pixels
#[allow(clippy::cast_possible_truncation)]
pub fn pixel_hue(first_pixel_hue: u16, index: usize, len: usize) -> u16 {
    if len == 0 {
        return first_pixel_hue;
    }
    let offset = (index as u64 * u64::from(HUE_PERIOD)) / len as u64;
    first_pixel_hue.wrapping_add(offset as u16)
}

/// Rainbow animator
#[derive(Debug, Clone, Copy)]
pub struct RainbowAnimator {
    bounds: IntensityBounds,
    hue_increment: u16,
    gamma: bool,
}

impl Default for RainbowAnimator {
    fn default() -> Self {
        Self::new(&AnimationConfig::DEFAULT)
    }
}

impl RainbowAnimator {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            bounds: config.bounds,
            hue_increment: config.hue_increment,
            gamma: config.gamma,
        }
    }

    pub fn bounds(&self) -> IntensityBounds {
        self.bounds
    }

    pub fn hue_increment(&self) -> u16 {
        self.hue_increment
    }

    /// Steps needed to bring the wheel back to where it started
    pub fn period_steps(&self) -> u32 {
        let mut a = HUE_PERIOD;
        let mut b = u32::from(self.hue_increment.max(1));
        while b != 0 {
            (a, b) = (b, a % b);
        }
        HUE_PERIOD / a
    }

    /// Color of one pixel for a given wheel position and intensity
    ///
    /// Without gamma the brightest channel of the result equals `intensity`.
    /// A lit channel never scales down to black.
    #[allow(clippy::cast_possible_truncation)]
    pub fn render_pixel(
        &self,
        first_pixel_hue: u16,
        index: usize,
        len: usize,
        intensity: u8,
    ) -> RGB8 {
        let hue = pixel_hue(first_pixel_hue, index, len);
        let mut color = hsv2rgb(Hsv {
            hue: (hue >> 8) as u8,
            sat: 255,
            val: 255,
        });
        if self.gamma {
            color = smart_leds::gamma(core::iter::once(color))
                .next()
                .unwrap_or(color);
        }
        RGB8 {
            r: scale8_video(color.r, intensity),
            g: scale8_video(color.g, intensity),
            b: scale8_video(color.b, intensity),
        }
    }

    /// Render one frame and advance the wheel
    ///
    /// `intensity` is clamped into the configured bounds and stored in
    /// `state` before rendering.
    pub fn step<D: PixelStrip>(&self, state: &mut RainbowState, intensity: u8, strip: &mut D) {
        state.intensity = self.bounds.clamp(intensity);

        let len = strip.len();
        for index in 0..len {
            let color = self.render_pixel(state.first_pixel_hue, index, len, state.intensity);
            strip.set_pixel_color(index, color);
        }
        strip.show();

        state.first_pixel_hue = state.first_pixel_hue.wrapping_add(self.hue_increment);
    }
}
