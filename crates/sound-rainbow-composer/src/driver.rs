//! Hardware abstraction layer
//!
//! The animator and the sampler only see these traits, so the same code
//! drives the ESP32 peripherals in firmware and in-memory fakes in tests.

use smart_leds::{RGB8, SmartLedsWrite};

/// Addressable LED strip
///
/// Colors set with [`PixelStrip::set_pixel_color`] become visible only after
/// [`PixelStrip::show`].
pub trait PixelStrip {
    /// Number of pixels on the strip
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stage a color for one pixel. Out-of-range indices are ignored.
    fn set_pixel_color(&mut self, index: usize, color: RGB8);

    /// Push the staged colors to the LEDs
    fn show(&mut self);
}

/// Source of analog readings in the 10-bit range
pub trait AnalogSource {
    fn read(&mut self) -> u16;
}

/// Analog source that always reports the same level
///
/// Stands in for the sensitivity potentiometer when none is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLevel(pub u16);

impl AnalogSource for FixedLevel {
    fn read(&mut self) -> u16 {
        self.0
    }
}

/// Strip buffer in front of a [`SmartLedsWrite`] backend
///
/// Keeps `N` staged colors and writes them in one burst on `show`.
pub struct BufferedStrip<W, const N: usize> {
    writer: W,
    pixels: [RGB8; N],
}

impl<W, const N: usize> BufferedStrip<W, N>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pixels: [RGB8::default(); N],
        }
    }

    /// Staged colors, as they will be written by the next `show`
    pub fn pixels(&self) -> &[RGB8; N] {
        &self.pixels
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W, const N: usize> PixelStrip for BufferedStrip<W, N>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
    W::Error: core::fmt::Debug,
{
    fn len(&self) -> usize {
        N
    }

    fn set_pixel_color(&mut self, index: usize, color: RGB8) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn show(&mut self) {
        if let Err(e) = self.writer.write(self.pixels.iter().copied()) {
            log::warn!("strip: write failed: {:?}", e);
        }
    }
}
