//! In-memory fakes for host-side tests of the rainbow engine

use core::convert::Infallible;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use smart_leds::{RGB8, SmartLedsWrite};
use sound_rainbow_composer::{AnalogSource, PixelStrip};

/// Strip that keeps every shown frame
pub struct FakeStrip<const N: usize> {
    pub pixels: [RGB8; N],
    pub frames: Vec<[RGB8; N]>,
}

impl<const N: usize> FakeStrip<N> {
    pub fn new() -> Self {
        Self {
            pixels: [RGB8::default(); N],
            frames: Vec::new(),
        }
    }

    pub fn last_frame(&self) -> &[RGB8; N] {
        self.frames.last().expect("no frame shown yet")
    }
}

impl<const N: usize> Default for FakeStrip<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PixelStrip for FakeStrip<N> {
    fn len(&self) -> usize {
        N
    }

    fn set_pixel_color(&mut self, index: usize, color: RGB8) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn show(&mut self) {
        self.frames.push(self.pixels);
    }
}

/// Analog source replaying a fixed script, repeating the last reading
pub struct ScriptedSource {
    readings: Vec<u16>,
    position: usize,
}

impl ScriptedSource {
    pub fn new(readings: &[u16]) -> Self {
        assert!(!readings.is_empty());
        Self {
            readings: readings.to_vec(),
            position: 0,
        }
    }

    pub fn constant(level: u16) -> Self {
        Self::new(&[level])
    }
}

impl AnalogSource for ScriptedSource {
    fn read(&mut self) -> u16 {
        let index = self.position.min(self.readings.len() - 1);
        self.position += 1;
        self.readings[index]
    }
}

/// Output pin remembering every level written to it
#[derive(Default)]
pub struct FakeLed {
    pub history: Vec<bool>,
}

impl FakeLed {
    pub fn is_on(&self) -> bool {
        self.history.last().copied().unwrap_or(false)
    }
}

impl ErrorType for FakeLed {
    type Error = Infallible;
}

impl OutputPin for FakeLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.history.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.history.push(true);
        Ok(())
    }
}

/// Pin whose every operation fails
pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ErrorKind;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }
}

/// Input pin fixed at one level
pub struct FakeInput(pub bool);

impl ErrorType for FakeInput {
    type Error = Infallible;
}

impl InputPin for FakeInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0)
    }
}

/// Delay that returns immediately and records each request in nanoseconds
#[derive(Default)]
pub struct RecordingDelay {
    pub requests_ns: Vec<u64>,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.requests_ns.push(u64::from(ns));
    }
}

/// `SmartLedsWrite` backend collecting written frames
#[derive(Default)]
pub struct CollectingWriter {
    pub frames: Vec<Vec<RGB8>>,
}

impl SmartLedsWrite for CollectingWriter {
    type Error = Infallible;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.frames.push(iterator.into_iter().map(Into::into).collect());
        Ok(())
    }
}

/// `SmartLedsWrite` backend that always fails
#[derive(Default)]
pub struct FailingWriter {
    pub attempts: usize,
}

impl SmartLedsWrite for FailingWriter {
    type Error = &'static str;
    type Color = RGB8;

    fn write<T, I>(&mut self, _iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.attempts += 1;
        Err("bus busy")
    }
}

/// Brightest channel of a pixel
pub fn peak(color: RGB8) -> u8 {
    color.r.max(color.g).max(color.b)
}
