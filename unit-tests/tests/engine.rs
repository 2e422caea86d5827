//! Render loop tests

use embassy_futures::block_on;
use embassy_time::Duration;
use sound_rainbow_composer::config::{HUE_INCREMENT, LIGHT_MAX, LIGHT_MIN, NEOPIXEL_LEDS};
use sound_rainbow_composer::{
    AnimationConfig, BufferedStrip, ConfigError, IntensityBounds, IntensityMapping, PixelStrip,
    RainbowLoop, SensorConfig, SensorSampler,
};
use tests::{
    CollectingWriter, FailingWriter, FakeLed, FakeStrip, RecordingDelay, ScriptedSource, peak,
};

fn rainbow_loop(
    readings: &[u16],
) -> RainbowLoop<
    FakeStrip<NEOPIXEL_LEDS>,
    ScriptedSource,
    FakeLed,
    sound_rainbow_composer::FixedLevel,
    sound_rainbow_composer::NoComparator,
> {
    let sampler = SensorSampler::new(
        ScriptedSource::new(readings),
        FakeLed::default(),
        &SensorConfig::DEFAULT,
    );
    RainbowLoop::new(FakeStrip::new(), sampler, &AnimationConfig::DEFAULT).unwrap()
}

#[test]
fn loud_and_quiet_cycles_end_to_end() {
    let mut rainbow = rainbow_loop(&[1023, 0]);
    assert_eq!(rainbow.state().intensity(), LIGHT_MIN);
    assert_eq!(rainbow.state().first_pixel_hue(), 0);

    assert_eq!(rainbow.cycle(), LIGHT_MAX);
    assert_eq!(rainbow.state().first_pixel_hue(), HUE_INCREMENT);
    let loud = *rainbow.strip().last_frame();
    assert!(loud.iter().all(|pixel| peak(*pixel) == LIGHT_MAX));
    assert!(rainbow.sampler().feedback().is_on());

    assert_eq!(rainbow.cycle(), LIGHT_MIN);
    assert_eq!(rainbow.state().first_pixel_hue(), 2 * HUE_INCREMENT);
    let quiet = *rainbow.strip().last_frame();
    assert!(quiet.iter().all(|pixel| peak(*pixel) == LIGHT_MIN));
    assert!(!rainbow.sampler().feedback().is_on());

    assert_eq!(rainbow.strip().frames.len(), 2);
}

#[test]
fn sampler_and_animator_must_share_bounds() {
    let wide = IntensityBounds::new(10, 200).unwrap();
    let config = SensorConfig::new(520, IntensityMapping::AboveThreshold, wide).unwrap();
    let sampler = SensorSampler::new(
        ScriptedSource::new(&[560, 600, 700, 1023]),
        FakeLed::default(),
        &config,
    );

    let result = RainbowLoop::new(FakeStrip::<8>::new(), sampler, &AnimationConfig::DEFAULT);

    assert_eq!(
        result.err(),
        Some(ConfigError::MismatchedBounds {
            sampler: wide,
            animator: IntensityBounds::DEFAULT,
        })
    );
}

#[test]
fn shared_custom_bounds_reach_the_strip() {
    let bounds = IntensityBounds::new(10, 200).unwrap();
    let sensor = SensorConfig::new(520, IntensityMapping::AboveThreshold, bounds).unwrap();
    let animation = AnimationConfig {
        bounds,
        ..AnimationConfig::DEFAULT
    };
    let sampler = SensorSampler::new(ScriptedSource::new(&[0, 1023]), FakeLed::default(), &sensor);
    let mut rainbow = RainbowLoop::new(FakeStrip::<8>::new(), sampler, &animation).unwrap();

    assert_eq!(rainbow.cycle(), 10);
    assert!(rainbow.strip().last_frame().iter().all(|pixel| peak(*pixel) == 10));
    assert_eq!(rainbow.cycle(), 200);
    assert!(rainbow.strip().last_frame().iter().all(|pixel| peak(*pixel) == 200));
}

#[test]
fn tick_waits_for_the_sample_interval() {
    let mut rainbow = rainbow_loop(&[600]);
    let mut delay = RecordingDelay::default();

    block_on(async {
        for _ in 0..5 {
            rainbow.tick(&mut delay).await;
        }
    });

    assert_eq!(rainbow.sample_interval(), Duration::from_millis(3));
    assert_eq!(delay.requests_ns, vec![3_000_000; 5]);
    assert_eq!(rainbow.strip().frames.len(), 5);
    assert_eq!(rainbow.state().first_pixel_hue(), 5 * HUE_INCREMENT);
}

#[test]
fn custom_interval_reaches_the_delay() {
    let interval = Duration::from_millis(20);
    let config =
        AnimationConfig::new(HUE_INCREMENT, interval, false, IntensityBounds::DEFAULT).unwrap();
    let sampler = SensorSampler::new(
        ScriptedSource::constant(0),
        FakeLed::default(),
        &SensorConfig::DEFAULT,
    );
    let mut rainbow = RainbowLoop::new(FakeStrip::<8>::new(), sampler, &config).unwrap();
    let mut delay = RecordingDelay::default();

    block_on(rainbow.tick(&mut delay));

    assert_eq!(delay.requests_ns, vec![20_000_000]);
}

#[test]
fn intensity_stays_in_bounds_over_a_noisy_run() {
    let readings: Vec<u16> = (0..200u16).map(|i| (i * 97) % 1500).collect();
    let mut rainbow = rainbow_loop(&readings);
    for _ in 0..readings.len() {
        let intensity = rainbow.cycle();
        assert!((LIGHT_MIN..=LIGHT_MAX).contains(&intensity));
        assert_eq!(rainbow.state().intensity(), intensity);
    }
}

#[test]
fn buffered_strip_writes_whole_frame_on_show() {
    let mut strip: BufferedStrip<CollectingWriter, 4> =
        BufferedStrip::new(CollectingWriter::default());
    assert_eq!(strip.len(), 4);

    let red = sound_rainbow_composer::RGB8 { r: 9, g: 0, b: 0 };
    strip.set_pixel_color(1, red);
    strip.set_pixel_color(99, red);
    assert!(strip.writer().frames.is_empty());

    strip.show();
    assert_eq!(strip.writer().frames.len(), 1);
    assert_eq!(strip.writer().frames[0].len(), 4);
    assert_eq!(strip.writer().frames[0][1], red);
    assert_eq!(strip.pixels()[1], red);
}

#[test]
fn failed_strip_write_is_dropped() {
    let mut strip: BufferedStrip<FailingWriter, 4> = BufferedStrip::new(FailingWriter::default());
    strip.show();
    strip.show();
    assert_eq!(strip.writer().attempts, 2);
}

#[test]
fn loop_drives_a_buffered_strip() {
    let sampler = SensorSampler::new(
        ScriptedSource::constant(1023),
        FakeLed::default(),
        &SensorConfig::DEFAULT,
    );
    let strip: BufferedStrip<CollectingWriter, NEOPIXEL_LEDS> =
        BufferedStrip::new(CollectingWriter::default());
    let mut rainbow = RainbowLoop::new(strip, sampler, &AnimationConfig::DEFAULT).unwrap();

    rainbow.cycle();

    let frames = &rainbow.strip().writer().frames;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].len(), NEOPIXEL_LEDS);
    assert!(frames[0].iter().all(|pixel| peak(*pixel) == LIGHT_MAX));
}
