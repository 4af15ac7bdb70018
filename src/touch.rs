/*
 * This file is part of mtrack.
 *
 * Copyright (C) 2025 mtrack contributors
 *
 * mtrack is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * mtrack is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with mtrack. If not, see <https://www.gnu.org/licenses/>.
 */

//! Tracked touches and the fixed-capacity touch set
//!
//! The [`TouchSet`] owns 32 slots and a used mask. A slot is live from the
//! frame its contact crosses the touch-on threshold until the frame after
//! it is released, so consumers always get to observe the release.

use std::time::Duration;

use tracing::warn;

use crate::bits::{SlotMask, DIM_TOUCHES};

bitflags::bitflags! {
    /// Lifecycle and classification flags of one tracked touch.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TouchFlags: u32 {
        /// First frame of the touch.
        const NEW = 1 << 0;
        /// Contact is gone; the slot is reclaimed next frame.
        const RELEASED = 1 << 1;
        /// Downstream consumers should ignore this touch.
        const INVALID = 1 << 2;
        const THUMB = 1 << 3;
        const PALM = 1 << 4;
        /// Began in the bottom edge band.
        const BOTTOM_EDGE = 1 << 5;
        /// Began in the top edge band.
        const TOP_EDGE = 1 << 6;
        /// Began in one of the top corner regions.
        const TOP_CORNERS = 1 << 7;
    }
}

/// One live slot of the tracking table
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackedTouch {
    pub tracking_id: i32,
    pub flags: TouchFlags,
    /// Position after inversion and zero-basing
    pub x: i32,
    pub y: i32,
    /// Movement since the previous frame
    pub dx: i32,
    pub dy: i32,
    /// Movement since touch-down
    pub total_dx: i32,
    pub total_dy: i32,
    /// Heading of the last movement, see [`crate::trig::direction`]
    pub direction: Option<f64>,
    /// Event time of the frame the touch started in
    pub down: Duration,
}

impl TrackedTouch {
    pub fn is_new(&self) -> bool {
        self.flags.contains(TouchFlags::NEW)
    }

    pub fn is_released(&self) -> bool {
        self.flags.contains(TouchFlags::RELEASED)
    }

    pub fn is_invalid(&self) -> bool {
        self.flags.contains(TouchFlags::INVALID)
    }

    /// Time since touch-down as of `now`
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.down)
    }
}

/// Fixed-capacity table of tracked touches
#[derive(Clone, Debug, Default)]
pub struct TouchSet {
    touch: [TrackedTouch; DIM_TOUCHES],
    used: SlotMask,
}

impl TouchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn capacity(&self) -> usize {
        DIM_TOUCHES
    }

    pub fn len(&self) -> usize {
        self.used.count()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn used_mask(&self) -> SlotMask {
        self.used
    }

    pub fn get(&self, slot: usize) -> Option<&TrackedTouch> {
        if self.used.contains(slot) {
            self.touch.get(slot)
        } else {
            None
        }
    }

    /// Live touches with their slot index, in ascending slot order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &TrackedTouch)> + '_ {
        self.used.iter().map(move |i| (i, &self.touch[i]))
    }

    /// Slot holding `tracking_id`, if it is tracked
    pub fn find(&self, tracking_id: i32) -> Option<usize> {
        self.used
            .iter()
            .find(|&i| self.touch[i].tracking_id == tracking_id)
    }

    pub(crate) fn slot_mut(&mut self, slot: usize) -> &mut TrackedTouch {
        &mut self.touch[slot]
    }

    /// Claim the lowest free slot for a new touch. When all slots are taken
    /// the contact is dropped with a warning and None is returned.
    pub(crate) fn allocate(
        &mut self,
        tracking_id: i32,
        x: i32,
        y: i32,
        down: Duration,
    ) -> Option<usize> {
        let Some(n) = self.used.first_free() else {
            warn!(
                tracking_id,
                capacity = DIM_TOUCHES,
                "Too many touches to track, ignoring touch"
            );
            return None;
        };
        self.touch[n] = TrackedTouch {
            tracking_id,
            flags: TouchFlags::NEW,
            x,
            y,
            down,
            ..Default::default()
        };
        self.used.set(n);
        Some(n)
    }

    pub(crate) fn release(&mut self, slot: usize) {
        let t = &mut self.touch[slot];
        t.dx = 0;
        t.dy = 0;
        t.direction = None;
        t.flags.remove(TouchFlags::NEW);
        t.flags.insert(TouchFlags::RELEASED);
    }

    /// Free every slot released during the previous frame
    pub(crate) fn reclaim(&mut self) {
        for i in self.used {
            if self.touch[i].is_released() {
                self.used.clear(i);
            }
        }
    }

    pub(crate) fn invalidate_all(&mut self) {
        for i in self.used {
            self.touch[i].flags.insert(TouchFlags::INVALID);
        }
    }
}
