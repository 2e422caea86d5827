#![no_std]

//! Sound-reactive rainbow engine
//!
//! Layers:
//! - `driver` - Hardware abstraction (`[PixelStrip]`, `[AnalogSource]`)
//! - `sensor` - Sound level to intensity mapping and feedback LED
//! - `rainbow` - Rotating rainbow state and animator
//! - `engine` - Render loop with injected delay
//! - `config` - Validated compile-time configuration
//!
//! Everything is generic over the driver traits, so the same code runs on
//! the ESP32 and against in-memory fakes.

pub mod config;
pub mod driver;
pub mod engine;
pub mod math8;
pub mod rainbow;
pub mod sensor;

// Config exports
pub use config::{AnimationConfig, ConfigError, IntensityBounds, IntensityMapping, SensorConfig};

// Driver exports
pub use driver::{AnalogSource, BufferedStrip, FixedLevel, PixelStrip};

// Engine exports
pub use engine::RainbowLoop;

// Rainbow exports
pub use rainbow::{HUE_PERIOD, RainbowAnimator, RainbowState};

// Sensor exports
pub use sensor::{Comparator, DigitalComparator, NoComparator, SensorSampler};

pub use smart_leds::RGB8;
