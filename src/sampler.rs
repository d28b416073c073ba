//! Sampler engine - the read/calibrate/validate/serialize/wait cycle
//!
//! This is the single component of the node. Each cycle it acquires one
//! [`SensorFrame`] through the ports, optionally normalizes and
//! validates it, serializes it to the link as one JSON line, then blocks
//! on the clock until the next cycle. It runs forever and never retries:
//! whatever the sensors produced this cycle is what goes on the wire.

use crate::config::NodeConfig;
use crate::domain::{CalibrationProfile, SensorFrame};
use crate::ports::{
    AnalogChannel, AnalogPort, ClimatePort, ClockPort, IndicatorPort, LinkPort, NoIndicator,
};
use crate::telemetry::{AnalogValue, TelemetryRecord};

/// Error type for a single cycle.
///
/// Acquisition failures are not cycle errors - they surface as `null`
/// climate values in the emitted record. Only failing to get the record
/// onto the wire counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleError {
    /// The record did not fit the line buffer
    Encode,
    /// The link rejected the line
    Send,
}

/// The sampling loop engine, generic over its ports.
pub struct Sampler<C, A, L, K, I = NoIndicator> {
    climate: C,
    analog: A,
    link: L,
    clock: K,
    indicator: Option<I>,
    config: NodeConfig,
    profile: CalibrationProfile,
    cycles: u32,
}

impl<C, A, L, K> Sampler<C, A, L, K, NoIndicator>
where
    C: ClimatePort,
    A: AnalogPort,
    L: LinkPort,
    K: ClockPort,
{
    /// Create a sampler without an activity indicator
    pub fn new(
        climate: C,
        analog: A,
        link: L,
        clock: K,
        config: NodeConfig,
        profile: CalibrationProfile,
    ) -> Self {
        Self {
            climate,
            analog,
            link,
            clock,
            indicator: None,
            config,
            profile,
            cycles: 0,
        }
    }
}

impl<C, A, L, K, I> Sampler<C, A, L, K, I>
where
    C: ClimatePort,
    A: AnalogPort,
    L: LinkPort,
    K: ClockPort,
    I: IndicatorPort,
{
    /// Attach an activity indicator, consumed on `led_indicator` config
    pub fn with_indicator<J: IndicatorPort>(self, indicator: J) -> Sampler<C, A, L, K, J> {
        Sampler {
            climate: self.climate,
            analog: self.analog,
            link: self.link,
            clock: self.clock,
            indicator: Some(indicator),
            config: self.config,
            profile: self.profile,
            cycles: self.cycles,
        }
    }

    /// Run the loop forever at the configured cadence
    pub async fn run(&mut self) {
        loop {
            self.run_once().await;
        }
    }

    /// One full cycle plus the inter-cycle delay
    pub async fn run_once(&mut self) {
        if let Err(err) = self.run_cycle().await {
            #[cfg(feature = "defmt")]
            defmt::warn!("cycle {} not emitted: {:?}", self.cycles, err);
            let _ = err;
        }
        self.clock.sleep_ms(self.config.read_interval_ms).await;
    }

    /// Acquire, normalize, and emit one telemetry record.
    ///
    /// Returns the record that went on the wire. The frame is emitted
    /// even when the climate acquisition failed; the failure shows up as
    /// `null` values in the JSON, never as a withheld field.
    pub async fn run_cycle(&mut self) -> Result<TelemetryRecord, CycleError> {
        self.indicate(true);

        let frame = self.acquire().await;
        let record = self.normalize(&frame);

        let result = self.emit(&record).await;

        self.indicate(false);
        self.cycles = self.cycles.wrapping_add(1);

        result.map(|()| record)
    }

    /// Number of cycles attempted since boot (diagnostics)
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Access the link port (diagnostics and tests)
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Access the clock port (diagnostics and tests)
    pub fn clock(&self) -> &K {
        &self.clock
    }

    async fn acquire(&mut self) -> SensorFrame {
        let climate = self.climate.read().await;
        let soil_raw = self.read_averaged(AnalogChannel::Soil).await;
        let light_raw = self.read_averaged(AnalogChannel::Light).await;

        let frame = match climate {
            Ok(reading) => SensorFrame::new(
                reading.temperature_c,
                reading.humidity_pct,
                soil_raw,
                light_raw,
            ),
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("climate read failed: {:?}", e);
                let _ = e;
                SensorFrame::without_climate(soil_raw, light_raw)
            }
        };

        if self.config.debug {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "raw frame: temp={:?} hum={:?} soil={} light={}",
                frame.temperature_c,
                frame.humidity_pct,
                frame.soil_raw,
                frame.light_raw
            );
        }

        frame
    }

    /// Average `samples_per_cycle` conversions on one channel.
    ///
    /// Failed conversions are dropped from the average; a channel whose
    /// every conversion failed reports 0.
    async fn read_averaged(&mut self, channel: AnalogChannel) -> u16 {
        let samples = self.config.samples_per_cycle.max(1) as u32;
        let mut sum = 0u32;
        let mut taken = 0u32;

        for _ in 0..samples {
            match self.analog.read(channel).await {
                Ok(raw) => {
                    sum += raw as u32;
                    taken += 1;
                }
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("analog conversion failed on {:?}", channel);
                }
            }
        }

        if taken == 0 {
            0
        } else {
            (sum / taken) as u16
        }
    }

    fn normalize(&self, frame: &SensorFrame) -> TelemetryRecord {
        let (temp, hum) = if self.config.validate {
            (
                self.admit(frame.temperature_c, self.profile.temperature),
                self.admit(frame.humidity_pct, self.profile.humidity),
            )
        } else {
            (frame.temperature_c, frame.humidity_pct)
        };

        let (soil, light) = if self.config.calibrate {
            (
                AnalogValue::Percent(self.profile.soil_percent(frame.soil_raw)),
                AnalogValue::Percent(self.profile.light_percent(frame.light_raw)),
            )
        } else {
            (
                AnalogValue::Raw(frame.soil_raw),
                AnalogValue::Raw(frame.light_raw),
            )
        };

        TelemetryRecord {
            temp,
            hum,
            soil,
            light,
        }
    }

    /// Validation: clamp to the nearest bound; a non-finite value is
    /// demoted to the acquisition-failure sentinel.
    fn admit(&self, value: Option<f32>, range: crate::domain::ValidRange) -> Option<f32> {
        value.filter(|v| v.is_finite()).map(|v| range.admit(v))
    }

    async fn emit(&mut self, record: &TelemetryRecord) -> Result<(), CycleError> {
        let line = record.encode().map_err(|_| CycleError::Encode)?;
        self.link
            .send_line(&line)
            .await
            .map_err(|_| CycleError::Send)
    }

    fn indicate(&mut self, on: bool) {
        if !self.config.led_indicator {
            return;
        }
        if let Some(indicator) = self.indicator.as_mut() {
            indicator.set_active(on);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalogCal, ValidRange};
    use crate::ports::{AnalogError, ClimateError, ClimateReading};
    use embassy_futures::block_on;

    struct MockClimate {
        results: Vec<Result<ClimateReading, ClimateError>>,
    }

    impl MockClimate {
        fn ok(temperature_c: f32, humidity_pct: f32) -> Self {
            Self {
                results: vec![Ok(ClimateReading {
                    temperature_c,
                    humidity_pct,
                })],
            }
        }

        fn failing(error: ClimateError) -> Self {
            Self {
                results: vec![Err(error)],
            }
        }
    }

    impl ClimatePort for MockClimate {
        async fn read(&mut self) -> Result<ClimateReading, ClimateError> {
            if self.results.len() > 1 {
                self.results.remove(0)
            } else {
                self.results[0]
            }
        }
    }

    struct MockAnalog {
        soil: Vec<Result<u16, AnalogError>>,
        light: Vec<Result<u16, AnalogError>>,
    }

    impl MockAnalog {
        fn fixed(soil: u16, light: u16) -> Self {
            Self {
                soil: vec![Ok(soil)],
                light: vec![Ok(light)],
            }
        }
    }

    impl AnalogPort for MockAnalog {
        async fn read(&mut self, channel: AnalogChannel) -> Result<u16, AnalogError> {
            let queue = match channel {
                AnalogChannel::Soil => &mut self.soil,
                AnalogChannel::Light => &mut self.light,
            };
            if queue.len() > 1 {
                queue.remove(0)
            } else {
                queue[0]
            }
        }
    }

    #[derive(Default)]
    struct MockLink {
        lines: Vec<String>,
    }

    impl LinkPort for MockLink {
        async fn send_line(&mut self, line: &str) -> Result<(), crate::ports::LinkError> {
            self.lines.push(line.to_string());
            Ok(())
        }
    }

    /// Virtual clock: `sleep_ms` advances time instantly and records the
    /// requested delay.
    #[derive(Default)]
    struct MockClock {
        now: u64,
        sleeps: Vec<u64>,
    }

    impl ClockPort for MockClock {
        fn now_ms(&self) -> u64 {
            self.now
        }

        async fn sleep_ms(&mut self, ms: u64) {
            self.now += ms;
            self.sleeps.push(ms);
        }
    }

    #[derive(Default)]
    struct MockIndicator {
        transitions: std::rc::Rc<std::cell::RefCell<Vec<bool>>>,
    }

    impl IndicatorPort for MockIndicator {
        fn set_active(&mut self, on: bool) {
            self.transitions.borrow_mut().push(on);
        }
    }

    fn profile() -> CalibrationProfile {
        CalibrationProfile::new(
            AnalogCal::new(850, 400),
            AnalogCal::new(50, 900),
            ValidRange::new(-40.0, 80.0),
            ValidRange::new(0.0, 100.0),
        )
    }

    fn raw_config() -> NodeConfig {
        NodeConfig {
            calibrate: false,
            validate: false,
            samples_per_cycle: 1,
            ..NodeConfig::default()
        }
    }

    #[test]
    fn uncalibrated_cycle_emits_raw_passthrough() {
        let mut sampler = Sampler::new(
            MockClimate::ok(25.0, 60.0),
            MockAnalog::fixed(600, 500),
            MockLink::default(),
            MockClock::default(),
            raw_config(),
            profile(),
        );

        block_on(sampler.run_cycle()).unwrap();

        assert_eq!(
            sampler.link().lines,
            vec!["{\"temp\":25.00,\"hum\":60.00,\"soil\":600,\"light\":500}".to_string()]
        );
    }

    #[test]
    fn calibrated_cycle_emits_percentages() {
        let config = NodeConfig {
            samples_per_cycle: 1,
            ..NodeConfig::default()
        };
        let mut sampler = Sampler::new(
            MockClimate::ok(21.0, 55.0),
            // wet soil bound, over-bright light reading
            MockAnalog::fixed(400, 1000),
            MockLink::default(),
            MockClock::default(),
            config,
            profile(),
        );

        let record = block_on(sampler.run_cycle()).unwrap();

        assert_eq!(record.soil, AnalogValue::Percent(100));
        assert_eq!(record.light, AnalogValue::Percent(100));
    }

    #[test]
    fn failed_climate_read_still_emits_frame_with_nulls() {
        let config = NodeConfig {
            samples_per_cycle: 1,
            ..NodeConfig::default()
        };
        let mut sampler = Sampler::new(
            MockClimate::failing(ClimateError::Timeout),
            MockAnalog::fixed(850, 50),
            MockLink::default(),
            MockClock::default(),
            config,
            profile(),
        );

        let record = block_on(sampler.run_cycle()).unwrap();

        assert_eq!(record.temp, None);
        assert_eq!(record.hum, None);
        assert_eq!(
            sampler.link().lines[0],
            "{\"temp\":null,\"hum\":null,\"soil\":0,\"light\":0}"
        );
    }

    #[test]
    fn validation_clamps_out_of_range_climate() {
        let config = NodeConfig {
            calibrate: false,
            samples_per_cycle: 1,
            ..NodeConfig::default()
        };
        let mut sampler = Sampler::new(
            MockClimate::ok(120.0, -3.0),
            MockAnalog::fixed(0, 0),
            MockLink::default(),
            MockClock::default(),
            config,
            profile(),
        );

        let record = block_on(sampler.run_cycle()).unwrap();

        assert_eq!(record.temp, Some(80.0));
        assert_eq!(record.hum, Some(0.0));
    }

    #[test]
    fn validation_demotes_non_finite_to_sentinel() {
        let config = NodeConfig {
            calibrate: false,
            samples_per_cycle: 1,
            ..NodeConfig::default()
        };
        let mut sampler = Sampler::new(
            MockClimate::ok(f32::NAN, 50.0),
            MockAnalog::fixed(10, 10),
            MockLink::default(),
            MockClock::default(),
            config,
            profile(),
        );

        let record = block_on(sampler.run_cycle()).unwrap();

        assert_eq!(record.temp, None);
        assert_eq!(record.hum, Some(50.0));
    }

    #[test]
    fn analog_samples_are_averaged() {
        let config = NodeConfig {
            calibrate: false,
            samples_per_cycle: 4,
            ..NodeConfig::default()
        };
        let analog = MockAnalog {
            soil: vec![Ok(100), Ok(200), Ok(300), Ok(400)],
            light: vec![Ok(7)],
        };
        let mut sampler = Sampler::new(
            MockClimate::ok(20.0, 40.0),
            analog,
            MockLink::default(),
            MockClock::default(),
            config,
            profile(),
        );

        let record = block_on(sampler.run_cycle()).unwrap();

        assert_eq!(record.soil, AnalogValue::Raw(250));
        assert_eq!(record.light, AnalogValue::Raw(7));
    }

    #[test]
    fn failed_conversions_are_dropped_from_average() {
        let config = NodeConfig {
            calibrate: false,
            samples_per_cycle: 3,
            ..NodeConfig::default()
        };
        let analog = MockAnalog {
            soil: vec![Ok(300), Err(AnalogError::ConversionFailed), Ok(500)],
            light: vec![Err(AnalogError::ConversionFailed)],
        };
        let mut sampler = Sampler::new(
            MockClimate::ok(20.0, 40.0),
            analog,
            MockLink::default(),
            MockClock::default(),
            config,
            profile(),
        );

        let record = block_on(sampler.run_cycle()).unwrap();

        assert_eq!(record.soil, AnalogValue::Raw(400));
        // every light conversion failed this cycle
        assert_eq!(record.light, AnalogValue::Raw(0));
    }

    #[test]
    fn cycle_cadence_follows_read_interval() {
        let mut sampler = Sampler::new(
            MockClimate::ok(22.0, 45.0),
            MockAnalog::fixed(600, 600),
            MockLink::default(),
            MockClock::default(),
            raw_config(),
            profile(),
        );

        block_on(sampler.run_once());
        block_on(sampler.run_once());
        block_on(sampler.run_once());

        assert_eq!(sampler.clock().sleeps, vec![2000, 2000, 2000]);
        assert_eq!(sampler.clock().now_ms(), 6000);
        assert_eq!(sampler.link().lines.len(), 3);
        assert_eq!(sampler.cycles(), 3);
    }

    #[test]
    fn two_cycles_of_same_frame_are_byte_identical() {
        let mut sampler = Sampler::new(
            MockClimate::ok(19.75, 61.2),
            MockAnalog::fixed(512, 700),
            MockLink::default(),
            MockClock::default(),
            raw_config(),
            profile(),
        );

        block_on(sampler.run_cycle()).unwrap();
        block_on(sampler.run_cycle()).unwrap();

        let lines = &sampler.link().lines;
        assert_eq!(lines[0], lines[1]);
    }

    #[test]
    fn every_emitted_line_is_valid_json() {
        let config = NodeConfig {
            samples_per_cycle: 1,
            ..NodeConfig::default()
        };
        let climate = MockClimate {
            results: vec![
                Ok(ClimateReading {
                    temperature_c: 24.0,
                    humidity_pct: 55.0,
                }),
                Err(ClimateError::ChecksumMismatch),
            ],
        };
        let mut sampler = Sampler::new(
            climate,
            MockAnalog::fixed(625, 475),
            MockLink::default(),
            MockClock::default(),
            config,
            profile(),
        );

        block_on(sampler.run_cycle()).unwrap();
        block_on(sampler.run_cycle()).unwrap();

        for line in &sampler.link().lines {
            crate::telemetry::parse_line(line).expect("invalid JSON on the wire");
        }
    }

    #[test]
    fn non_finite_climate_stays_valid_json_without_validation() {
        // validation off, as in a bench build: the wire boundary alone
        // must keep the line parseable
        let mut sampler = Sampler::new(
            MockClimate::ok(f32::NAN, f32::INFINITY),
            MockAnalog::fixed(600, 500),
            MockLink::default(),
            MockClock::default(),
            raw_config(),
            profile(),
        );

        let record = block_on(sampler.run_cycle()).unwrap();

        let line = &sampler.link().lines[0];
        let frame = crate::telemetry::parse_line(line).expect("invalid JSON on the wire");
        assert_eq!(frame.temp, None);
        assert_eq!(frame.hum, None);
        // the record itself still carries what the port produced
        assert!(record.temp.is_some_and(|v| v.is_nan()));
    }

    #[test]
    fn indicator_toggles_around_cycle_when_enabled() {
        let transitions = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let indicator = MockIndicator {
            transitions: transitions.clone(),
        };
        let config = NodeConfig {
            led_indicator: true,
            samples_per_cycle: 1,
            ..NodeConfig::default()
        };
        let mut sampler = Sampler::new(
            MockClimate::ok(20.0, 50.0),
            MockAnalog::fixed(500, 500),
            MockLink::default(),
            MockClock::default(),
            config,
            profile(),
        )
        .with_indicator(indicator);

        block_on(sampler.run_cycle()).unwrap();

        assert_eq!(*transitions.borrow(), vec![true, false]);
    }

    #[test]
    fn indicator_stays_dark_when_disabled() {
        let transitions = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let indicator = MockIndicator {
            transitions: transitions.clone(),
        };
        let mut sampler = Sampler::new(
            MockClimate::ok(20.0, 50.0),
            MockAnalog::fixed(500, 500),
            MockLink::default(),
            MockClock::default(),
            raw_config(),
            profile(),
        )
        .with_indicator(indicator);

        block_on(sampler.run_cycle()).unwrap();

        assert!(transitions.borrow().is_empty());
    }
}
