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

//! One-shot callback scheduling.
//!
//! A minimal stand-in for a GUI toolkit's `after`/`after_cancel` registry.
//! Callbacks are registered with a deadline and an arbitrary payload, and
//! the event loop pops them once their deadline has passed. Nothing here
//! spawns threads or sleeps; time only moves when the caller passes a later
//! [`Instant`] to [`Scheduler::pop_due`].

use std::{fmt, time::Instant};

use thiserror::Error;

/// Handle to a pending callback, returned by [`Scheduler::schedule_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CallbackId(u64);

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "after#{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum SchedulerError {
    #[error("no pending callback {0}")]
    UnknownCallback(CallbackId),
}

#[derive(Debug)]
struct Pending<T> {
    id: CallbackId,
    deadline: Instant,
    payload: T,
}

/// Pending callbacks ordered by deadline, then by registration order.
#[derive(Debug)]
pub(crate) struct Scheduler<T> {
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Registers `payload` to fire once `deadline` has passed.
    pub(crate) fn schedule_at(&mut self, deadline: Instant, payload: T) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;

        // Equal deadlines keep registration order.
        let index = self.pending.partition_point(|p| p.deadline <= deadline);
        self.pending.insert(
            index,
            Pending {
                id,
                deadline,
                payload,
            },
        );

        id
    }

    /// Removes a pending callback, returning its payload.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::UnknownCallback`] if the callback has
    /// already fired, was already cancelled, or never existed.
    pub(crate) fn cancel(&mut self, id: CallbackId) -> Result<T, SchedulerError> {
        let index = self
            .pending
            .iter()
            .position(|p| p.id == id)
            .ok_or(SchedulerError::UnknownCallback(id))?;
        Ok(self.pending.remove(index).payload)
    }

    /// Pops the earliest callback whose deadline is at or before `now`.
    pub(crate) fn pop_due(&mut self, now: Instant) -> Option<(CallbackId, Instant, T)> {
        if self.pending.first()?.deadline > now {
            return None;
        }
        let p = self.pending.remove(0);
        Some((p.id, p.deadline, p.payload))
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.pending.first().map(|p| p.deadline)
    }

    pub(crate) fn is_pending(&self, id: CallbackId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}
