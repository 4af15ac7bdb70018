/*
 * Test utilities for mtrack
 *
 * Fixture builders shared by the unit test modules.
 */

use std::time::Duration;

use crate::capabilities::{AbsRange, Capabilities};
use crate::config::{Config, TouchMode};
use crate::hwstate::{HardwareFrame, RawContact};

/// A round, medium-sized contact that touches under `size_config`
pub fn contact(tracking_id: i32, x: i32, y: i32) -> RawContact {
    RawContact {
        tracking_id,
        position_x: x,
        position_y: y,
        touch_major: 20,
        touch_minor: 20,
        width_major: 100,
        pressure: 20,
    }
}

/// Size mode on a 1000 x 1000 pad calibrated 0..100
pub fn size_config() -> Config {
    Config {
        touch_mode: TouchMode::Size,
        touch_min: 0,
        touch_max: 100,
        pad_width: 1000,
        pad_height: 1000,
        ..Default::default()
    }
}

/// Device with a 0..1000 square position range
pub fn square_caps() -> Capabilities {
    Capabilities {
        has_touch_major: true,
        has_touch_minor: true,
        abs_position_x: AbsRange::new(0, 1000),
        abs_position_y: AbsRange::new(0, 1000),
        abs_touch_major: AbsRange::new(0, 100),
        ..Default::default()
    }
}

pub fn frame(ms: u64, contacts: &[RawContact]) -> HardwareFrame {
    HardwareFrame::from_contacts(Duration::from_millis(ms), contacts)
}
