//! Cancellable one-shot timers owned by a single component.
//!
//! Every waiting step of the simulation (the spawn interval, the pause before
//! the survival countdown, each countdown second) is an entry in a [`Timers`]
//! arena owned by the component that waits. Entries are addressed through
//! generational [`TimerHandle`]s, so a handle kept after its timer fired or was
//! cancelled can never reach a newer entry reusing the same slot. Owners keep
//! the handle of the step they wait on and cancel it when they stop waiting.

use std::time::Duration;

/// Generational reference to a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    index: usize,
    generation: u32,
}

/// Timer that reached its due time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fired<T> {
    /// Handle the timer was scheduled under; no longer pending.
    pub handle: TimerHandle,
    /// Clock reading at which the timer was due.
    pub due: Duration,
    /// Value supplied when the timer was scheduled.
    pub payload: T,
}

/// Arena of pending timers driven by an owner-local clock.
#[derive(Debug)]
pub struct Timers<T> {
    now: Duration,
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    sequence: u64,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    entry: Option<Entry<T>>,
}

#[derive(Debug)]
struct Entry<T> {
    due: Duration,
    sequence: u64,
    payload: T,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timers<T> {
    /// Creates an empty arena with its clock at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            slots: Vec::new(),
            free: Vec::new(),
            sequence: 0,
        }
    }

    /// Schedules `payload` to fire once `delay` has elapsed.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerHandle {
        let due = self.now.saturating_add(delay);
        self.schedule_at(due, payload)
    }

    /// Schedules `payload` to fire when the clock reaches `due`.
    ///
    /// A due time in the past fires on the next [`Timers::pop_due`].
    pub fn schedule_at(&mut self, due: Duration, payload: T) -> TimerHandle {
        let sequence = self.sequence;
        self.sequence = self.sequence.wrapping_add(1);
        let entry = Entry {
            due,
            sequence,
            payload,
        };

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.entry = Some(entry);
            return TimerHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            entry: Some(entry),
        });
        TimerHandle {
            index,
            generation: 0,
        }
    }

    /// Cancels a pending timer, returning its payload.
    ///
    /// Stale handles (already fired or cancelled) return `None`.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        self.release(handle.index);
        Some(entry.payload)
    }

    /// Moves the clock forward without firing anything.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Removes and returns the earliest timer whose due time has passed.
    ///
    /// Timers due at the same instant fire in scheduling order.
    pub fn pop_due(&mut self) -> Option<Fired<T>> {
        let mut earliest: Option<(usize, Duration, u64)> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(entry) = &slot.entry else {
                continue;
            };
            if entry.due > self.now {
                continue;
            }
            let earlier = earliest.map_or(true, |(_, due, sequence)| {
                (entry.due, entry.sequence) < (due, sequence)
            });
            if earlier {
                earliest = Some((index, entry.due, entry.sequence));
            }
        }

        let (index, _, _) = earliest?;
        let slot = &mut self.slots[index];
        let generation = slot.generation;
        let entry = slot.entry.take()?;
        self.release(index);
        Some(Fired {
            handle: TimerHandle { index, generation },
            due: entry.due,
            payload: entry.payload,
        })
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Reports whether no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn release(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
    }
}
