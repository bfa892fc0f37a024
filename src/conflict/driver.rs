//! Real-time tick driver
//!
//! Schedules `advance()` on a tokio interval of `tick_interval_ms / speed`
//! and stops on extinction, on an exhausted tick budget or when the stop
//! signal flips.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::conflict::simulation::TickReport;
use crate::conflict::world::SimulationContext;
use crate::core::error::Result;
use crate::core::rng::RandomSource;

pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 20.0;

/// Why a driven run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Extinction,
    TickBudget,
    StopSignal,
}

/// Observer invoked after each driven tick
pub trait TickObserver {
    fn on_tick(&mut self, report: &TickReport);
}

/// Observer that ignores every tick
pub struct NoOpObserver;

impl TickObserver for NoOpObserver {
    fn on_tick(&mut self, _report: &TickReport) {}
}

impl<F: FnMut(&TickReport)> TickObserver for F {
    fn on_tick(&mut self, report: &TickReport) {
        self(report)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveResult {
    pub reason: StopReason,
    pub ticks: u64,
}

pub struct TickDriver {
    base_interval_ms: u64,
    speed: f64,
    max_ticks: Option<u64>,
}

impl TickDriver {
    pub fn new(base_interval_ms: u64) -> Self {
        Self {
            base_interval_ms,
            speed: 1.0,
            max_ticks: None,
        }
    }

    /// Speed multiplier, clamped to [0.1, 20]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.set_speed(speed);
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = if speed.is_finite() {
            speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            1.0
        };
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Delay between ticks at the current speed (at least 1ms)
    pub fn interval(&self) -> Duration {
        let ms = (self.base_interval_ms as f64 / self.speed).max(1.0);
        Duration::from_micros((ms * 1000.0).round() as u64)
    }

    /// Drive `ctx` until it halts, the budget runs out, or `stop` turns true
    ///
    /// Starts the context if it is paused and pauses it again on exit.
    pub async fn drive<R: RandomSource>(
        &self,
        ctx: &mut SimulationContext<R>,
        mut stop: watch::Receiver<bool>,
        observer: &mut dyn TickObserver,
    ) -> Result<DriveResult> {
        ctx.start()?;
        let mut ticker = tokio::time::interval(self.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks = 0u64;

        info!(interval_ms = self.interval().as_millis() as u64, speed = self.speed, "tick driver started");

        let reason = loop {
            if *stop.borrow() {
                break StopReason::StopSignal;
            }
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                break StopReason::TickBudget;
            }

            tokio::select! {
                _ = ticker.tick() => {}
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break StopReason::StopSignal;
                    }
                    continue;
                }
            }

            let report = ctx.advance()?;
            ticks += 1;
            observer.on_tick(&report);

            if report.extinct.is_some() {
                break StopReason::Extinction;
            }
        };

        ctx.pause();
        info!(?reason, ticks, "tick driver stopped");
        Ok(DriveResult { reason, ticks })
    }
}

/// Routes an interrupt to the drive in progress, if there is one
///
/// A console keeps one of these for its whole session so a single Ctrl-C
/// listener can stop a real-time run or, with nothing running, let the
/// caller exit.
pub struct InterruptGate {
    driving: AtomicBool,
    stop: watch::Sender<bool>,
}

impl Default for InterruptGate {
    fn default() -> Self {
        let (stop, _) = watch::channel(false);
        Self {
            driving: AtomicBool::new(false),
            stop,
        }
    }
}

impl InterruptGate {
    /// Clear any earlier stop and hand out the signal for a new drive
    pub fn arm(&self) -> watch::Receiver<bool> {
        self.stop.send_replace(false);
        self.driving.store(true, Ordering::SeqCst);
        self.stop.subscribe()
    }

    pub fn disarm(&self) {
        self.driving.store(false, Ordering::SeqCst);
    }

    pub fn is_driving(&self) -> bool {
        self.driving.load(Ordering::SeqCst)
    }

    /// Stop the armed drive. Returns false when nothing was driving.
    pub fn interrupt(&self) -> bool {
        if self.driving.swap(false, Ordering::SeqCst) {
            self.stop.send_replace(true);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::civilization::CivilizationConfig;
    use crate::core::config::SimulationConfig;
    use crate::core::rng::SeededRandom;

    fn context() -> SimulationContext {
        SimulationContext::from_config(SimulationConfig::seeded(8)).unwrap()
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut driver = TickDriver::new(200);
        driver.set_speed(100.0);
        assert_eq!(driver.speed(), MAX_SPEED);
        driver.set_speed(0.0);
        assert_eq!(driver.speed(), MIN_SPEED);
        driver.set_speed(f64::NAN);
        assert_eq!(driver.speed(), 1.0);
    }

    #[test]
    fn test_interval_scales_with_speed() {
        let driver = TickDriver::new(200).with_speed(2.0);
        assert_eq!(driver.interval(), Duration::from_millis(100));
        let driver = TickDriver::new(200).with_speed(0.1);
        assert_eq!(driver.interval(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_stops_at_budget() {
        let mut ctx = context();
        let (_tx, rx) = watch::channel(false);
        let mut seen = Vec::new();
        let mut observer = |report: &TickReport| seen.push(report.tick);

        let result = TickDriver::new(200)
            .with_speed(20.0)
            .with_max_ticks(5)
            .drive(&mut ctx, rx, &mut observer)
            .await
            .unwrap();

        assert_eq!(result, DriveResult { reason: StopReason::TickBudget, ticks: 5 });
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert!(!ctx.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_honours_stop_signal() {
        let mut ctx = context();
        let (tx, rx) = watch::channel(true);
        let result = TickDriver::new(200)
            .drive(&mut ctx, rx, &mut NoOpObserver)
            .await
            .unwrap();

        assert_eq!(result.reason, StopReason::StopSignal);
        assert_eq!(result.ticks, 0);
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_stops_on_extinction() {
        let mut initial = [
            CivilizationConfig::new("CIV A", "#88ccff", "#3399ff"),
            CivilizationConfig::new("CIV B", "#ff9999", "#ff5555"),
        ];
        initial[0].population = 0.0;
        let mut ctx =
            SimulationContext::with_initial(SimulationConfig::default(), SeededRandom::new(2), initial).unwrap();
        let (_tx, rx) = watch::channel(false);

        let result = TickDriver::new(200)
            .drive(&mut ctx, rx, &mut NoOpObserver)
            .await
            .unwrap();

        assert_eq!(result.reason, StopReason::Extinction);
        assert_eq!(result.ticks, 1);
    }

    #[test]
    fn test_interrupt_without_drive_is_refused() {
        let gate = InterruptGate::default();
        assert!(!gate.is_driving());
        assert!(!gate.interrupt());
    }

    #[test]
    fn test_rearming_clears_previous_stop() {
        let gate = InterruptGate::default();
        let first = gate.arm();
        assert!(gate.interrupt());
        assert!(*first.borrow());

        let second = gate.arm();
        assert!(gate.is_driving());
        assert!(!*second.borrow());
        gate.disarm();
        assert!(!gate.interrupt());
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_stops_armed_drive() {
        let mut ctx = context();
        let gate = InterruptGate::default();
        let rx = gate.arm();
        let driver = TickDriver::new(200);
        let mut observer = NoOpObserver;

        let (result, stopped) = tokio::join!(
            driver.drive(&mut ctx, rx, &mut observer),
            async {
                tokio::time::sleep(Duration::from_millis(1100)).await;
                gate.interrupt()
            }
        );

        let result = result.unwrap();
        assert!(stopped);
        assert_eq!(result.reason, StopReason::StopSignal);
        assert_eq!(result.ticks, 6);
        assert!(!ctx.is_running());
        assert!(!gate.interrupt());
    }
}
