// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The pomodoro state machine.
//!
//! A single repetition counter drives everything: each phase transition
//! increments it, and its value selects the next phase. Every eighth
//! repetition is a long break, odd repetitions are work intervals, and the
//! remaining even repetitions are short breaks. A counter of zero is idle.
//!
//! The countdown is driven by one self-rescheduling callback in a
//! [`Scheduler`]. [`Pomodoro`] never holds more than one pending callback,
//! and keeps a [`FaceText`] that the renderer draws verbatim.

pub(crate) mod scheduler;

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::util::format::format_time;

pub(crate) use scheduler::{CallbackId, Scheduler};

/// Interval between countdown callbacks.
pub(crate) const TICK: Duration = Duration::from_secs(1);

/// Longest accepted phase, one day.
pub(crate) const MAX_MINUTES: u64 = 24 * 60;

/// Title shown before the first start and after a reset.
pub(crate) const IDLE_TITLE: &str = "Timer";

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum TimerError {
    #[error("{0} duration must be at least one minute")]
    ZeroDuration(Phase),

    #[error("{0} duration must be at most {max} minutes", max = MAX_MINUTES)]
    TooLong(Phase),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// The phase a repetition count belongs to, `None` for the idle count 0.
    pub(crate) fn for_rep(reps: u32) -> Option<Phase> {
        (reps != 0).then(|| Self::of_rep(reps))
    }

    fn of_rep(reps: u32) -> Phase {
        if reps % 8 == 0 {
            Phase::LongBreak
        } else if reps % 2 == 1 {
            Phase::Work
        } else {
            Phase::ShortBreak
        }
    }

    /// Text of the title label while this phase runs.
    pub(crate) fn title(&self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::ShortBreak | Phase::LongBreak => "Break",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Work => "work",
            Phase::ShortBreak => "short break",
            Phase::LongBreak => "long break",
        };
        f.write_str(name)
    }
}

/// Configured length of each phase, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Durations {
    pub(crate) work: Duration,
    pub(crate) short_break: Duration,
    pub(crate) long_break: Duration,
}

impl Durations {
    pub(crate) fn from_minutes(work: u64, short_break: u64, long_break: u64) -> Result<Self, TimerError> {
        Ok(Self {
            work: minutes(Phase::Work, work)?,
            short_break: minutes(Phase::ShortBreak, short_break)?,
            long_break: minutes(Phase::LongBreak, long_break)?,
        })
    }

    pub(crate) fn for_phase(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Work => self.work,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }

    /// Replaces the length of one phase.
    pub(crate) fn set_minutes(&mut self, phase: Phase, value: u64) -> Result<(), TimerError> {
        let duration = minutes(phase, value)?;
        match phase {
            Phase::Work => self.work = duration,
            Phase::ShortBreak => self.short_break = duration,
            Phase::LongBreak => self.long_break = duration,
        }
        Ok(())
    }
}

fn minutes(phase: Phase, value: u64) -> Result<Duration, TimerError> {
    if value == 0 {
        return Err(TimerError::ZeroDuration(phase));
    }
    if value > MAX_MINUTES {
        return Err(TimerError::TooLong(phase));
    }
    Ok(Duration::from_secs(value * 60))
}

/// Everything the timer contributes to the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FaceText {
    pub(crate) title: &'static str,
    /// Phase the title was last set for, `None` while idle.
    pub(crate) title_phase: Option<Phase>,
    pub(crate) time: String,
    /// Completed work intervals, shown as checkmarks.
    pub(crate) checkmarks: u32,
}

impl FaceText {
    fn idle() -> Self {
        Self {
            title: IDLE_TITLE,
            title_phase: None,
            time: format_time(0),
            checkmarks: 0,
        }
    }
}

pub(crate) struct Pomodoro {
    durations: Durations,
    reps: u32,
    remaining: u64,
    pending: Option<CallbackId>,
    scheduler: Scheduler<u64>,
    face: FaceText,
}

impl Pomodoro {
    pub(crate) fn new(durations: Durations) -> Self {
        Self {
            durations,
            reps: 0,
            remaining: 0,
            pending: None,
            scheduler: Scheduler::new(),
            face: FaceText::idle(),
        }
    }

    pub(crate) fn reps(&self) -> u32 {
        self.reps
    }

    pub(crate) fn phase(&self) -> Option<Phase> {
        Phase::for_rep(self.reps)
    }

    pub(crate) fn remaining_secs(&self) -> u64 {
        self.remaining
    }

    pub(crate) fn is_running(&self) -> bool {
        self.pending.is_some_and(|id| self.scheduler.is_pending(id))
    }

    pub(crate) fn face(&self) -> &FaceText {
        &self.face
    }

    pub(crate) fn durations(&self) -> &Durations {
        &self.durations
    }

    /// New lengths apply from the next phase that starts.
    pub(crate) fn durations_mut(&mut self) -> &mut Durations {
        &mut self.durations
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Advances to the next phase and starts counting it down.
    ///
    /// Starting while a countdown is running skips the rest of the current
    /// phase; its pending tick is cancelled first.
    pub(crate) fn start(&mut self, now: Instant) -> Phase {
        self.cancel_pending();

        self.reps += 1;
        let phase = Phase::of_rep(self.reps);

        self.face.title = phase.title();
        self.face.title_phase = Some(phase);
        if phase == Phase::Work {
            self.face.checkmarks = self.reps / 2;
        }

        tracing::info!(reps = self.reps, %phase, "phase started");

        let count = self.durations.for_phase(phase).as_secs();
        self.countdown(count, now);

        phase
    }

    /// Stops the countdown and returns to the idle display.
    pub(crate) fn reset(&mut self) {
        // Only cancel a callback that is actually pending.
        self.cancel_pending();

        self.reps = 0;
        self.remaining = 0;
        self.face = FaceText::idle();

        tracing::info!("timer reset");
    }

    /// Fires every countdown tick due at `now`, in deadline order.
    ///
    /// Returns the phases that were started because a countdown ran out,
    /// which can be more than one after a long stall.
    pub(crate) fn fire_due(&mut self, now: Instant) -> Vec<Phase> {
        let mut started = Vec::new();

        while let Some((id, deadline, count)) = self.scheduler.pop_due(now) {
            if self.pending == Some(id) {
                self.pending = None;
            }
            if let Some(phase) = self.tick(count, deadline) {
                started.push(phase);
            }
        }

        started
    }

    // One second elapsed: show `count` and re-arm, or move on at zero.
    fn tick(&mut self, count: u64, deadline: Instant) -> Option<Phase> {
        self.countdown(count, deadline);
        (count == 0).then(|| self.start(deadline))
    }

    fn countdown(&mut self, count: u64, now: Instant) {
        self.remaining = count;
        self.face.time = format_time(count);

        if count > 0 {
            // Re-arm relative to the previous deadline so late ticks do not
            // accumulate drift.
            let id = self.scheduler.schedule_at(now + TICK, count - 1);
            self.pending = Some(id);
            // start cancels before arming and fire_due pops before re-arming.
            debug_assert_eq!(self.scheduler.len(), 1);
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Err(e) = self.scheduler.cancel(id) {
                tracing::warn!(error = %e, "pending countdown already gone");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn short_durations() -> Durations {
        Durations {
            work: secs(3),
            short_break: secs(2),
            long_break: secs(4),
        }
    }

    #[test]
    fn first_eight_reps_cycle_through_phases() {
        let phases: Vec<_> = (1..=8).map(|r| Phase::for_rep(r).unwrap()).collect();
        assert_eq!(
            phases,
            vec![
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::ShortBreak,
                Phase::Work,
                Phase::LongBreak,
            ]
        );
    }

    #[test]
    fn phase_rule_holds_past_the_first_cycle() {
        assert_eq!(Phase::for_rep(0), None);
        assert_eq!(Phase::for_rep(9), Some(Phase::Work));
        assert_eq!(Phase::for_rep(10), Some(Phase::ShortBreak));
        assert_eq!(Phase::for_rep(16), Some(Phase::LongBreak));
        assert_eq!(Phase::for_rep(24), Some(Phase::LongBreak));
    }

    #[test]
    fn durations_reject_zero_minutes() {
        assert_eq!(
            Durations::from_minutes(25, 0, 20),
            Err(TimerError::ZeroDuration(Phase::ShortBreak))
        );
        assert_eq!(
            TimerError::ZeroDuration(Phase::LongBreak).to_string(),
            "long break duration must be at least one minute"
        );
    }

    #[test]
    fn durations_are_capped_at_one_day() {
        let durations = Durations::from_minutes(MAX_MINUTES, 5, 20).unwrap();
        assert_eq!(durations.work, secs(24 * 60 * 60));

        assert_eq!(
            Durations::from_minutes(MAX_MINUTES + 1, 5, 20),
            Err(TimerError::TooLong(Phase::Work))
        );
        assert_eq!(
            Durations::from_minutes(25, 5, u64::MAX),
            Err(TimerError::TooLong(Phase::LongBreak))
        );
        assert_eq!(
            TimerError::TooLong(Phase::ShortBreak).to_string(),
            "short break duration must be at most 1440 minutes"
        );
    }

    #[test]
    fn set_minutes_keeps_old_value_when_too_long() {
        let mut durations = Durations::from_minutes(25, 5, 20).unwrap();
        assert_eq!(
            durations.set_minutes(Phase::Work, u64::MAX),
            Err(TimerError::TooLong(Phase::Work))
        );
        assert_eq!(durations.work, secs(25 * 60));
    }

    #[test]
    fn set_minutes_replaces_one_phase() {
        let mut durations = Durations::from_minutes(25, 5, 20).unwrap();
        durations.set_minutes(Phase::Work, 50).unwrap();
        assert_eq!(durations.work, secs(50 * 60));
        assert_eq!(durations.short_break, secs(5 * 60));
        assert!(durations.set_minutes(Phase::LongBreak, 0).is_err());
        assert_eq!(durations.long_break, secs(20 * 60));
    }

    #[test]
    fn idle_face() {
        let pomodoro = Pomodoro::new(short_durations());
        let face = pomodoro.face();
        assert_eq!(face.title, "Timer");
        assert_eq!(face.title_phase, None);
        assert_eq!(face.time, "00:00");
        assert_eq!(face.checkmarks, 0);
        assert!(!pomodoro.is_running());
    }

    #[test]
    fn start_begins_a_work_countdown() {
        let t0 = Instant::now();
        let mut pomodoro = Pomodoro::new(Durations::from_minutes(25, 5, 20).unwrap());

        assert_eq!(pomodoro.start(t0), Phase::Work);
        assert_eq!(pomodoro.reps(), 1);
        assert_eq!(pomodoro.face().title, "Work");
        assert_eq!(pomodoro.face().time, "25:00");
        assert_eq!(pomodoro.next_deadline(), Some(t0 + TICK));
        assert!(pomodoro.is_running());
    }

    #[test]
    fn each_tick_counts_down_one_second() {
        let t0 = Instant::now();
        let mut pomodoro = Pomodoro::new(Durations::from_minutes(1, 1, 1).unwrap());
        pomodoro.start(t0);

        assert!(pomodoro.fire_due(t0 + secs(1)).is_empty());
        assert_eq!(pomodoro.remaining_secs(), 59);
        assert_eq!(pomodoro.face().time, "00:59");

        // Nothing new is due half a second later.
        pomodoro.fire_due(t0 + Duration::from_millis(1500));
        assert_eq!(pomodoro.remaining_secs(), 59);

        pomodoro.fire_due(t0 + secs(2));
        assert_eq!(pomodoro.face().time, "00:58");
    }

    #[test]
    fn reaching_zero_starts_the_next_phase() {
        let t0 = Instant::now();
        let mut pomodoro = Pomodoro::new(short_durations());
        pomodoro.start(t0);

        pomodoro.fire_due(t0 + secs(2));
        assert_eq!(pomodoro.face().time, "00:01");

        let started = pomodoro.fire_due(t0 + secs(3));
        assert_eq!(started, vec![Phase::ShortBreak]);
        assert_eq!(pomodoro.reps(), 2);
        assert_eq!(pomodoro.face().title, "Break");
        assert_eq!(pomodoro.face().title_phase, Some(Phase::ShortBreak));
        assert_eq!(pomodoro.face().time, "00:02");
        assert_eq!(pomodoro.next_deadline(), Some(t0 + secs(4)));
    }

    #[test]
    fn overdue_ticks_catch_up_in_order() {
        let t0 = Instant::now();
        let mut pomodoro = Pomodoro::new(short_durations());
        pomodoro.start(t0);

        let started = pomodoro.fire_due(t0 + secs(10));
        assert_eq!(
            started,
            vec![Phase::ShortBreak, Phase::Work, Phase::ShortBreak, Phase::Work]
        );
        assert_eq!(pomodoro.reps(), 5);
        assert_eq!(pomodoro.remaining_secs(), 3);
        assert_eq!(pomodoro.face().checkmarks, 2);
        assert_eq!(pomodoro.next_deadline(), Some(t0 + secs(11)));
    }

    #[test]
    fn eighth_rep_is_a_long_break() {
        let t0 = Instant::now();
        let mut pomodoro = Pomodoro::new(short_durations());
        for _ in 0..7 {
            pomodoro.start(t0);
        }
        assert_eq!(pomodoro.face().checkmarks, 3);

        assert_eq!(pomodoro.start(t0), Phase::LongBreak);
        assert_eq!(pomodoro.face().title, "Break");
        assert_eq!(pomodoro.face().title_phase, Some(Phase::LongBreak));
        assert_eq!(pomodoro.face().time, "00:04");

        assert_eq!(pomodoro.start(t0), Phase::Work);
        assert_eq!(pomodoro.face().checkmarks, 4);
    }

    #[test]
    fn starting_while_running_keeps_one_pending_tick() {
        let t0 = Instant::now();
        let mut pomodoro = Pomodoro::new(short_durations());
        pomodoro.start(t0);
        pomodoro.start(t0 + Duration::from_millis(500));

        assert_eq!(pomodoro.reps(), 2);
        assert_eq!(pomodoro.scheduler.len(), 1);
        assert_eq!(pomodoro.next_deadline(), Some(t0 + Duration::from_millis(1500)));
    }

    #[test]
    fn reset_before_start_is_harmless() {
        let mut pomodoro = Pomodoro::new(short_durations());
        pomodoro.reset();
        assert_eq!(pomodoro.reps(), 0);
        assert_eq!(pomodoro.face().title, IDLE_TITLE);
    }

    #[test]
    fn reset_cancels_and_restores_idle_display() {
        let t0 = Instant::now();
        let mut pomodoro = Pomodoro::new(short_durations());
        pomodoro.start(t0);
        pomodoro.fire_due(t0 + secs(4));
        assert_eq!(pomodoro.reps(), 2);

        pomodoro.reset();
        assert_eq!(pomodoro.reps(), 0);
        assert_eq!(pomodoro.phase(), None);
        assert!(!pomodoro.is_running());
        assert_eq!(pomodoro.scheduler.len(), 0);
        assert_eq!(pomodoro.face(), &FaceText::idle());

        assert!(pomodoro.fire_due(t0 + secs(60)).is_empty());
        assert_eq!(pomodoro.face().time, "00:00");

        // Reset twice in a row.
        pomodoro.reset();
        assert_eq!(pomodoro.start(t0), Phase::Work);
    }

    #[test]
    fn changed_durations_apply_to_the_next_phase() {
        let t0 = Instant::now();
        let mut pomodoro = Pomodoro::new(short_durations());
        pomodoro.start(t0);

        pomodoro.durations_mut().set_minutes(Phase::ShortBreak, 1).unwrap();
        assert_eq!(pomodoro.face().time, "00:03");

        pomodoro.start(t0);
        assert_eq!(pomodoro.face().time, "01:00");
        assert_eq!(pomodoro.durations().short_break, secs(60));
    }
}
