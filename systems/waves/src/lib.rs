#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave lifecycle controller.
//!
//! A wave starts in phase one, where its units spawn and must all be
//! destroyed or escape. Clearing phase one arms a short delay, after which a
//! whole-second survival countdown runs. When the countdown expires the wave
//! ends and the controller advances to the next configured wave.

use std::time::Duration;

use path_defence_core::{
    timer::{TimerHandle, Timers},
    Event, WaveDefinition, WaveIndex, WavePhase, WaveStartRejection,
};
use tracing::{debug, info, warn};

const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WaveTimer {
    CountdownStart,
    CountdownSecond,
}

/// Drives the configured waves through their phases.
#[derive(Debug)]
pub struct WaveController {
    waves: Vec<WaveDefinition>,
    index: usize,
    phase: WavePhase,
    exhausted: bool,
    countdown: Option<u32>,
    timers: Timers<WaveTimer>,
    pending: Option<TimerHandle>,
}

impl WaveController {
    /// Creates an idle controller positioned at the first wave.
    #[must_use]
    pub fn new(waves: Vec<WaveDefinition>) -> Self {
        Self {
            waves,
            index: 0,
            phase: WavePhase::Idle,
            exhausted: false,
            countdown: None,
            timers: Timers::new(),
            pending: None,
        }
    }

    /// Attempts to start the current wave.
    ///
    /// Rejections emit [`Event::WaveStartRejected`] and leave the controller
    /// untouched.
    pub fn request_start(
        &mut self,
        path_valid: bool,
        out: &mut Vec<Event>,
    ) -> Result<WaveDefinition, WaveStartRejection> {
        match self.start_candidate(path_valid) {
            Ok(definition) => {
                self.phase = WavePhase::PhaseOneActive;
                let wave = self.current_wave();
                info!(
                    wave = wave.number(),
                    minions = definition.minions,
                    tanks = definition.tanks,
                    "wave_started"
                );
                out.push(Event::WaveStarted {
                    wave,
                    minions: definition.minions,
                    tanks: definition.tanks,
                });
                Ok(definition)
            }
            Err(reason) => {
                debug!(%reason, "wave_start_rejected");
                out.push(Event::WaveStartRejected { reason });
                Err(reason)
            }
        }
    }

    /// Moves the running wave into phase two.
    ///
    /// Ignored unless phase one is active, so duplicate signals are harmless.
    pub fn phase_one_complete(&mut self, out: &mut Vec<Event>) -> bool {
        if self.phase != WavePhase::PhaseOneActive {
            warn!(phase = ?self.phase, "phase_one_complete_ignored");
            return false;
        }
        let Some(definition) = self.waves.get(self.index).copied() else {
            warn!(index = self.index, "phase_one_complete_without_wave");
            return false;
        };

        self.phase = WavePhase::PhaseTwoActive;
        let wave = self.current_wave();
        info!(
            wave = wave.number(),
            delay_secs = definition.phase_two_delay.as_secs_f32(),
            "phase_one_complete"
        );
        out.push(Event::PhaseOneComplete { wave });
        self.disarm();
        self.pending = Some(
            self.timers
                .schedule(definition.phase_two_delay, WaveTimer::CountdownStart),
        );
        true
    }

    /// Advances the phase-two delay and countdown. Returns `true` when a wave
    /// ended during this call.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<Event>) -> bool {
        self.timers.advance(dt);
        let mut ended = false;
        while let Some(fired) = self.timers.pop_due() {
            self.pending = None;
            match fired.payload {
                WaveTimer::CountdownStart => {
                    if self.start_countdown(fired.due, out) {
                        ended = true;
                    }
                }
                WaveTimer::CountdownSecond => {
                    if self.countdown_second(fired.due, out) {
                        ended = true;
                    }
                }
            }
        }
        ended
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Wave that is running or will start next.
    #[must_use]
    pub fn current_wave(&self) -> WaveIndex {
        WaveIndex::new(u32::try_from(self.index).unwrap_or(u32::MAX))
    }

    /// Whole seconds left in the survival countdown, if it is running.
    #[must_use]
    pub fn countdown_remaining(&self) -> Option<u32> {
        self.countdown
    }

    /// Whether the final wave already ended.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of configured waves.
    #[must_use]
    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    /// Drops pending timers and returns to idle without advancing the wave.
    pub fn cancel(&mut self) {
        self.disarm();
        self.countdown = None;
        self.phase = WavePhase::Idle;
    }

    fn start_candidate(&self, path_valid: bool) -> Result<WaveDefinition, WaveStartRejection> {
        if self.phase != WavePhase::Idle {
            return Err(WaveStartRejection::WaveInProgress);
        }
        if self.waves.is_empty() {
            return Err(WaveStartRejection::NoWavesConfigured);
        }
        if self.exhausted {
            return Err(WaveStartRejection::NoWavesRemaining);
        }
        if !path_valid {
            return Err(WaveStartRejection::PathInvalid);
        }
        self.waves
            .get(self.index)
            .copied()
            .ok_or(WaveStartRejection::NoWavesRemaining)
    }

    fn start_countdown(&mut self, due: Duration, out: &mut Vec<Event>) -> bool {
        let Some(definition) = self.waves.get(self.index).copied() else {
            return false;
        };
        let seconds = whole_seconds(definition.phase_two_duration);
        let wave = self.current_wave();
        info!(wave = wave.number(), seconds, "phase_two_started");
        out.push(Event::PhaseTwoStarted {
            wave,
            duration_secs: seconds,
        });

        if seconds == 0 {
            self.end_wave(out);
            return true;
        }
        self.countdown = Some(seconds);
        out.push(Event::CountdownTick {
            wave,
            remaining_secs: seconds,
        });
        self.arm_countdown_second(due);
        false
    }

    fn countdown_second(&mut self, due: Duration, out: &mut Vec<Event>) -> bool {
        let remaining = self.countdown.unwrap_or(0).saturating_sub(1);
        if remaining == 0 {
            self.end_wave(out);
            return true;
        }
        self.countdown = Some(remaining);
        out.push(Event::CountdownTick {
            wave: self.current_wave(),
            remaining_secs: remaining,
        });
        self.arm_countdown_second(due);
        false
    }

    fn arm_countdown_second(&mut self, previous_due: Duration) {
        let due = previous_due.saturating_add(COUNTDOWN_STEP);
        self.pending = Some(self.timers.schedule_at(due, WaveTimer::CountdownSecond));
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.pending.take() {
            let _ = self.timers.cancel(handle);
        }
    }

    fn end_wave(&mut self, out: &mut Vec<Event>) {
        self.phase = WavePhase::WaveEndSettling;
        self.disarm();
        self.countdown = None;

        let wave = self.current_wave();
        info!(wave = wave.number(), "wave_ended");
        out.push(Event::WaveEnded { wave });

        if self.index + 1 < self.waves.len() {
            self.index += 1;
            debug!(next = self.current_wave().number(), "next_wave_ready");
        } else {
            self.exhausted = true;
            info!("all_waves_completed");
            out.push(Event::AllWavesCompleted);
        }
        self.phase = WavePhase::Idle;
    }
}

fn whole_seconds(duration: Duration) -> u32 {
    let secs = duration.as_secs();
    let rounded = if duration.subsec_nanos() > 0 {
        secs.saturating_add(1)
    } else {
        secs
    };
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_rounds_partial_seconds_up() {
        assert_eq!(whole_seconds(Duration::ZERO), 0);
        assert_eq!(whole_seconds(Duration::from_millis(1)), 1);
        assert_eq!(whole_seconds(Duration::from_secs(10)), 10);
        assert_eq!(whole_seconds(Duration::from_millis(2_500)), 3);
    }

    #[test]
    fn cancel_returns_to_idle_on_the_same_wave() {
        let mut waves = WaveController::new(vec![WaveDefinition::new(1, 0)]);
        let mut events = Vec::new();
        let _ = waves.request_start(true, &mut events).expect("wave starts");
        assert!(waves.phase_one_complete(&mut events));

        assert!(waves.pending.is_some());
        waves.cancel();
        events.clear();
        assert!(waves.pending.is_none());
        assert!(waves.timers.is_empty());

        assert!(!waves.tick(Duration::from_secs(60), &mut events));
        assert!(events.is_empty());
        assert_eq!(waves.phase(), WavePhase::Idle);
        assert_eq!(waves.current_wave(), WaveIndex::new(0));
    }
}
