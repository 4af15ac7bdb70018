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

//! Movement direction helpers
//!
//! Directions are headings in eighths of a turn, measured clockwise from
//! "up". Device Y grows downward, so up is negative dy.

use std::f64::consts::PI;

/// Heading of a (dx, dy) movement in [0, 8), or None for no movement
pub fn direction(dx: i32, dy: i32) -> Option<f64> {
    if dx == 0 && dy == 0 {
        return None;
    }
    let angle = (dx as f64).atan2(-(dy as f64));
    let mut dir = angle * 4.0 / PI;
    if dir < 0.0 {
        dir += 8.0;
    }
    if dir >= 8.0 {
        dir -= 8.0;
    }
    Some(dir)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Octant {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Octant {
    /// Snap a heading to the nearest of the eight compass directions
    pub fn from_direction(dir: f64) -> Self {
        match (dir.round() as i64).rem_euclid(8) {
            0 => Octant::Up,
            1 => Octant::UpRight,
            2 => Octant::Right,
            3 => Octant::DownRight,
            4 => Octant::Down,
            5 => Octant::DownLeft,
            6 => Octant::Left,
            _ => Octant::UpLeft,
        }
    }
}
