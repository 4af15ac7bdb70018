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

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use mt_error::{MtrackError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::capabilities::Capabilities;
use crate::constants::{defaults, limits, paths};

/// Which contact measurement gates touch-down and release
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TouchMode {
    /// Every reported contact is touching; only disappearance releases it
    #[default]
    #[serde(rename = "none")]
    Unconditioned,
    /// Touch major relative to the device-reported width
    Scale,
    /// Touch major remapped against the calibrated bounds
    Size,
    /// Pressure remapped against the calibrated bounds
    Pressure,
}

/// Tuning read by the touch core on every frame. Never mutated by it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub touch_mode: TouchMode,
    /// Percentage a contact must exceed to start tracking
    pub touch_down: i32,
    /// Percentage a tracked contact must drop below to release
    pub touch_up: i32,
    /// Calibrated bounds for the measured axis (Size/Pressure remapping)
    pub touch_min: i32,
    pub touch_max: i32,
    /// Classify thumbs from the minor/major axis ratio
    pub touch_minor: bool,
    pub pad_width: i32,
    pub pad_height: i32,
    pub thumb_ratio: i32,
    pub thumb_size: i32,
    pub palm_size: i32,
    pub bottom_edge: i32,
    pub top_edge: i32,
    pub top_corners: i32,
    pub axis_x_invert: bool,
    pub axis_y_invert: bool,
    pub ignore_thumb: bool,
    pub disable_on_thumb: bool,
    pub ignore_palm: bool,
    pub disable_on_palm: bool,
    pub ignore_top: bool,
    pub ignore_top_corners: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            touch_mode: TouchMode::Unconditioned,
            touch_down: defaults::TOUCH_DOWN,
            touch_up: defaults::TOUCH_UP,
            touch_min: 0,
            touch_max: 0,
            touch_minor: false,
            pad_width: 0,
            pad_height: 0,
            thumb_ratio: defaults::THUMB_RATIO,
            thumb_size: defaults::THUMB_SIZE,
            palm_size: defaults::PALM_SIZE,
            bottom_edge: defaults::BOTTOM_EDGE,
            top_edge: defaults::TOP_EDGE,
            top_corners: defaults::TOP_CORNERS,
            axis_x_invert: false,
            axis_y_invert: false,
            ignore_thumb: false,
            disable_on_thumb: false,
            ignore_palm: false,
            disable_on_palm: false,
            ignore_top: false,
            ignore_top_corners: false,
        }
    }
}

impl Config {
    /// Defaults with the device-dependent fields filled in from `caps`
    pub fn for_device(caps: &Capabilities) -> Self {
        let mut cfg = Self::default();
        cfg.init_from_caps(caps);
        cfg
    }

    /// Derive pad extent, threshold mode, and calibration bounds from the
    /// axes the device reports.
    pub fn init_from_caps(&mut self, caps: &Capabilities) {
        self.touch_minor = caps.has_touch_minor;
        self.pad_width = caps.xsize();
        self.pad_height = caps.ysize();

        let calibrated = if caps.has_touch_major && caps.has_width_major {
            self.touch_mode = TouchMode::Scale;
            Some(caps.abs_touch_major)
        } else if caps.has_touch_major {
            self.touch_mode = TouchMode::Size;
            Some(caps.abs_touch_major)
        } else if caps.has_pressure {
            self.touch_mode = TouchMode::Pressure;
            Some(caps.abs_pressure)
        } else {
            self.touch_mode = TouchMode::Unconditioned;
            None
        };
        if let Some(range) = calibrated {
            self.touch_min = range.minimum;
            self.touch_max = range.maximum;
        }

        info!(
            mode = ?self.touch_mode,
            touch_min = self.touch_min,
            touch_max = self.touch_max,
            pad_width = self.pad_width,
            pad_height = self.pad_height,
            minor = self.touch_minor,
            "Configured touch detection from device capabilities"
        );
    }

    /// Reject values the touch core cannot interpret sensibly
    pub fn validate(&self) -> Result<()> {
        let percents = [
            ("touch_down", self.touch_down),
            ("touch_up", self.touch_up),
            ("thumb_ratio", self.thumb_ratio),
            ("thumb_size", self.thumb_size),
            ("palm_size", self.palm_size),
            ("bottom_edge", self.bottom_edge),
            ("top_edge", self.top_edge),
            ("top_corners", self.top_corners),
        ];
        for (field, value) in percents {
            if !(limits::PERCENT_MIN..=limits::PERCENT_MAX).contains(&value) {
                return Err(MtrackError::invalid_percentage(field, value));
            }
        }

        if self.touch_up > self.touch_down {
            return Err(MtrackError::invalid_config(
                "touch_up",
                format!("must not exceed touch_down ({})", self.touch_down),
            ));
        }

        let remaps = self.touch_mode != TouchMode::Unconditioned || self.touch_minor;
        if remaps && self.touch_min >= self.touch_max {
            return Err(MtrackError::InvalidCalibration {
                min: self.touch_min,
                max: self.touch_max,
            });
        }

        if self.pad_width < 0 || self.pad_height < 0 {
            return Err(MtrackError::config(format!(
                "pad extent cannot be negative ({} x {})",
                self.pad_width, self.pad_height
            )));
        }
        Ok(())
    }
}

/// Location of the user configuration file
pub fn config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join(paths::APP_DIR).join(paths::CONFIG_FILE);
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join(paths::APP_DIR)
            .join(paths::CONFIG_FILE);
    }
    Path::new(paths::SYSTEM_CONFIG_DIR).join(paths::CONFIG_FILE)
}

/// Read, parse, and validate a configuration file
pub fn load_config(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path).map_err(|source| MtrackError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: Config = serde_json::from_str(&data)?;
    cfg.validate()?;
    debug!(path = %path.display(), mode = ?cfg.touch_mode, "Loaded configuration");
    Ok(cfg)
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    cfg.validate()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(cfg)?;
    fs::write(path, json).map_err(|source| MtrackError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Saved configuration");
    Ok(())
}
