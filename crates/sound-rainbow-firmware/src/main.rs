#![no_std]
#![no_main]

mod config;
mod drivers;
mod tasks;
mod types;

use embassy_executor::Spawner;
use embassy_time::Duration;

use esp_backtrace as _;
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};

use crate::tasks::{SensorPins, feedback_led, init_rainbow, rainbow_task};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    esp_println::println!("sound-rainbow: firmware {}", config::FIRMWARE.version);

    // Initialize hardware
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let pins = SensorPins {
        sound: sensor_analog_gpio!(peripherals),
        feedback_led: feedback_led(feedback_led_gpio!(peripherals)),
        #[cfg(feature = "potentiometer")]
        sensitivity: sensitivity_gpio!(peripherals),
        #[cfg(feature = "comparator")]
        comparator: esp_hal::gpio::Input::new(
            sensor_digital_gpio!(peripherals),
            esp_hal::gpio::InputConfig::default().with_pull(esp_hal::gpio::Pull::Down),
        ),
    };

    // Initialize the rainbow loop and spawn its task
    let rainbow = init_rainbow(
        peripherals.RMT,
        led_gpio!(peripherals),
        peripherals.ADC1,
        pins,
    );
    spawner.spawn(rainbow_task(rainbow)).ok();

    loop {
        embassy_time::Timer::after(Duration::from_secs(5)).await;
    }
}
