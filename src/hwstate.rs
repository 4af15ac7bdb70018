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

//! Raw per-frame hardware contacts
//!
//! A [`HardwareFrame`] is the decoded state of one sampling instant. It is
//! built by the capture layer and only read by the touch core.

use std::time::Duration;

use crate::bits::{SlotMask, DIM_FINGER};

/// One finger as reported by the hardware for the current frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawContact {
    pub tracking_id: i32,
    pub position_x: i32,
    pub position_y: i32,
    pub touch_major: i32,
    pub touch_minor: i32,
    pub width_major: i32,
    pub pressure: i32,
}

/// All contacts active in one sampling instant
#[derive(Clone, Debug, Default)]
pub struct HardwareFrame {
    data: [RawContact; DIM_FINGER],
    used: SlotMask,
    evtime: Duration,
}

impl HardwareFrame {
    pub fn new(evtime: Duration) -> Self {
        Self {
            evtime,
            ..Default::default()
        }
    }

    /// Build a frame from a list of contacts. Contacts past the frame
    /// capacity are dropped.
    pub fn from_contacts(evtime: Duration, contacts: &[RawContact]) -> Self {
        let mut frame = Self::new(evtime);
        for contact in contacts {
            if !frame.push(*contact) {
                break;
            }
        }
        frame
    }

    /// Add a contact. Returns false when the frame is full.
    pub fn push(&mut self, contact: RawContact) -> bool {
        match self.used.first_free() {
            Some(i) => {
                self.data[i] = contact;
                self.used.set(i);
                true
            }
            None => false,
        }
    }

    pub fn evtime(&self) -> Duration {
        self.evtime
    }

    pub fn len(&self) -> usize {
        self.used.count()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn contacts(&self) -> impl Iterator<Item = &RawContact> + '_ {
        self.used.iter().map(move |i| &self.data[i])
    }

    /// Index of the contact carrying `tracking_id`, if present
    pub fn find_finger(&self, tracking_id: i32) -> Option<usize> {
        self.used
            .iter()
            .find(|&i| self.data[i].tracking_id == tracking_id)
    }

    pub fn contains(&self, tracking_id: i32) -> bool {
        self.find_finger(tracking_id).is_some()
    }
}
