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

//! Device capabilities consumed by the touch core
//!
//! Axis ranges and feature flags reported by the device at open time. The core
//! only uses them to normalize positions (flip and zero-base) and to seed
//! device-dependent configuration defaults.

/// Reported range of one absolute axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AbsRange {
    pub minimum: i32,
    pub maximum: i32,
}

impl AbsRange {
    pub const fn new(minimum: i32, maximum: i32) -> Self {
        Self { minimum, maximum }
    }

    /// Extent of the axis
    pub fn size(&self) -> i32 {
        self.maximum.saturating_sub(self.minimum)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub has_touch_major: bool,
    pub has_touch_minor: bool,
    pub has_width_major: bool,
    pub has_width_minor: bool,
    pub has_pressure: bool,
    pub abs_position_x: AbsRange,
    pub abs_position_y: AbsRange,
    pub abs_touch_major: AbsRange,
    pub abs_width_major: AbsRange,
    pub abs_pressure: AbsRange,
}

impl Capabilities {
    /// Mirror an X coordinate across the reported X range
    pub fn xflip(&self, x: i32) -> i32 {
        let r = &self.abs_position_x;
        r.maximum.saturating_sub(x.saturating_sub(r.minimum))
    }

    /// Mirror a Y coordinate across the reported Y range
    pub fn yflip(&self, y: i32) -> i32 {
        let r = &self.abs_position_y;
        r.maximum.saturating_sub(y.saturating_sub(r.minimum))
    }

    pub fn zero_based_x(&self, x: i32) -> i32 {
        x.saturating_sub(self.abs_position_x.minimum)
    }

    pub fn zero_based_y(&self, y: i32) -> i32 {
        y.saturating_sub(self.abs_position_y.minimum)
    }

    pub fn xsize(&self) -> i32 {
        self.abs_position_x.size()
    }

    pub fn ysize(&self) -> i32 {
        self.abs_position_y.size()
    }

    /// Flip (if requested) and zero-base a raw device position
    pub fn normalize(&self, x: i32, y: i32, invert_x: bool, invert_y: bool) -> (i32, i32) {
        let x = if invert_x { self.xflip(x) } else { x };
        let y = if invert_y { self.yflip(y) } else { y };
        (self.zero_based_x(x), self.zero_based_y(y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps() -> Capabilities {
        Capabilities {
            abs_position_x: AbsRange::new(-100, 900),
            abs_position_y: AbsRange::new(50, 650),
            ..Default::default()
        }
    }

    #[test]
    fn test_sizes() {
        let caps = caps();
        assert_eq!(caps.xsize(), 1000);
        assert_eq!(caps.ysize(), 600);
    }

    #[test]
    fn test_flip_maps_ends_onto_each_other() {
        let caps = caps();
        assert_eq!(caps.xflip(-100), 900);
        assert_eq!(caps.xflip(900), -100);
        assert_eq!(caps.yflip(50), 650);
        assert_eq!(caps.yflip(150), 550);
    }

    #[test]
    fn test_zero_based() {
        let caps = caps();
        assert_eq!(caps.zero_based_x(-100), 0);
        assert_eq!(caps.zero_based_y(650), 600);
    }

    #[test]
    fn test_normalize_flips_before_zero_basing() {
        let caps = caps();
        assert_eq!(caps.normalize(0, 100, false, false), (100, 50));
        assert_eq!(caps.normalize(0, 100, true, true), (900, 550));
    }
}
