pub(crate) mod rainbow;

pub(crate) use rainbow::{SensorPins, feedback_led, init_rainbow, rainbow_task};
