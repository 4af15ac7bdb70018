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

//! Fixed-width slot bitmask shared by hardware frames and the touch set.

/// Number of contacts a hardware frame can carry
pub const DIM_FINGER: usize = 32;

/// Number of slots in the touch tracking table
pub const DIM_TOUCHES: usize = 32;

/// A set of slot indices in 0..32, one bit per slot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlotMask(u32);

impl SlotMask {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, slot: usize) -> bool {
        slot < 32 && (self.0 >> slot) & 1 == 1
    }

    pub fn set(&mut self, slot: usize) {
        if slot < 32 {
            self.0 |= 1 << slot;
        }
    }

    pub fn clear(&mut self, slot: usize) {
        if slot < 32 {
            self.0 &= !(1 << slot);
        }
    }

    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Lowest slot index whose bit is clear, or None when all 32 are taken
    pub fn first_free(self) -> Option<usize> {
        let free = !self.0;
        if free == 0 {
            None
        } else {
            Some(free.trailing_zeros() as usize)
        }
    }

    /// Iterate set slots in ascending order
    pub fn iter(self) -> SlotIter {
        SlotIter(self.0)
    }
}

impl IntoIterator for SlotMask {
    type Item = usize;
    type IntoIter = SlotIter;

    fn into_iter(self) -> SlotIter {
        self.iter()
    }
}

/// Iterator over the set bits of a [`SlotMask`]
#[derive(Clone, Debug)]
pub struct SlotIter(u32);

impl Iterator for SlotIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let slot = self.0.trailing_zeros() as usize;
        // drop the lowest set bit
        self.0 &= self.0 - 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}
