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

//! Constants and configuration defaults for mtrack
//!
//! Default tuning values match what the trackpad driver has shipped with.
//! Add new magic numbers here rather than inline.

/// Default classification and threshold values (percentages unless noted)
pub mod defaults {
    pub const TOUCH_DOWN: i32 = 5;
    pub const TOUCH_UP: i32 = 5;
    pub const THUMB_RATIO: i32 = 70;
    pub const THUMB_SIZE: i32 = 25;
    pub const PALM_SIZE: i32 = 40;
    pub const BOTTOM_EDGE: i32 = 10;
    pub const TOP_EDGE: i32 = 0;
    pub const TOP_CORNERS: i32 = 0;
}

/// Bounds used by configuration validation
pub mod limits {
    pub const PERCENT_MIN: i32 = 0;
    pub const PERCENT_MAX: i32 = 100;
}

/// Configuration file locations
pub mod paths {
    pub const APP_DIR: &str = "mtrack";
    pub const CONFIG_FILE: &str = "config.json";
    pub const SYSTEM_CONFIG_DIR: &str = "/etc/mtrack";
}
