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

//! mtrack - touch tracking core for multitouch trackpads
//!
//! Converts raw per-frame hardware contacts into a stable set of tracked
//! touches, each annotated with lifecycle and classification flags
//! (new, released, invalid, thumb, palm, edge, corner). Gesture
//! recognition consumes the resulting [`TouchSet`]; it is not part of
//! this crate.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use mtrack::{extract, Capabilities, Config, HardwareFrame, RawContact, TouchSet};
//!
//! let caps = Capabilities::default();
//! let cfg = Config::default();
//! let mut touches = TouchSet::new();
//!
//! let mut frame = HardwareFrame::new(Duration::from_millis(16));
//! frame.push(RawContact { tracking_id: 1, ..Default::default() });
//! extract(&mut touches, &cfg, &frame, &caps);
//!
//! assert_eq!(touches.len(), 1);
//! ```

pub mod bits;
pub mod capabilities;
pub mod classify;
pub mod config;
pub mod constants;
pub mod hwstate;
pub mod logger;
pub mod touch;
pub mod tracker;
pub mod trig;

pub use bits::{SlotMask, DIM_FINGER, DIM_TOUCHES};
pub use capabilities::{AbsRange, Capabilities};
pub use config::{config_path, load_config, save_config, Config, TouchMode};
pub use hwstate::{HardwareFrame, RawContact};
pub use mt_error::{MtrackError, Result};
pub use touch::{TouchFlags, TouchSet, TrackedTouch};
pub use tracker::extract;
pub use trig::{direction, Octant};

#[cfg(test)]
pub mod test_utils;
