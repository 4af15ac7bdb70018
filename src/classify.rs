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

//! Touch thresholds and contact classification
//!
//! Two flag policies live here and must stay separate:
//!
//! - **Re-evaluated**: THUMB and PALM follow the contact shape every frame
//!   and can toggle during a touch's lifetime.
//! - **Latched at touch-down**: TOP_EDGE, BOTTOM_EDGE and TOP_CORNERS can
//!   only be set while the touch is NEW. Once set they stay set until the
//!   touch leaves the region. A touch that enters a region later never
//!   gets the flag.
//!
//! Percentages are truncated toward zero. Zero divisors never panic; the
//! floating point ratio saturates on the cast back to an integer.

use tracing::trace;

use crate::config::{Config, TouchMode};
use crate::hwstate::RawContact;
use crate::touch::{TouchFlags, TrackedTouch};

fn percentage(dividend: i32, divisor: i32) -> i32 {
    (dividend as f64 / divisor as f64 * 100.0) as i32
}

/// Remap `value` into 0..100 against the calibrated bounds
fn touch_range_ratio(cfg: &Config, value: i32) -> i32 {
    let span = cfg.touch_max as f64 - cfg.touch_min as f64;
    ((value as f64 - cfg.touch_min as f64) / span * 100.0) as i32
}

/// Threshold percentage of a contact under the configured mode, or None
/// when the mode does not measure contacts at all.
pub fn touch_measure(cfg: &Config, hw: &RawContact) -> Option<i32> {
    match cfg.touch_mode {
        TouchMode::Scale => Some(percentage(hw.touch_major, hw.width_major)),
        TouchMode::Size => Some(touch_range_ratio(cfg, hw.touch_major)),
        TouchMode::Pressure => Some(touch_range_ratio(cfg, hw.pressure)),
        TouchMode::Unconditioned => None,
    }
}

/// Whether an untracked contact is pressed hard enough to start a touch
pub fn is_touch(cfg: &Config, hw: &RawContact) -> bool {
    match touch_measure(cfg, hw) {
        Some(pct) => pct > cfg.touch_down,
        None => true,
    }
}

/// Whether a tracked contact has eased off enough to be released
pub fn is_release(cfg: &Config, hw: &RawContact) -> bool {
    match touch_measure(cfg, hw) {
        Some(pct) => pct < cfg.touch_up,
        None => false,
    }
}

pub fn is_thumb(cfg: &Config, hw: &RawContact) -> bool {
    if !cfg.touch_minor {
        return false;
    }
    let min = hw.touch_minor.min(hw.touch_major);
    let max = hw.touch_minor.max(hw.touch_major);
    let ratio = percentage(min, max);
    let size = touch_range_ratio(cfg, hw.touch_major);
    let thumb = ratio < cfg.thumb_ratio && size > cfg.thumb_size;
    trace!(
        tracking_id = hw.tracking_id,
        thumb,
        ratio,
        thumb_ratio = cfg.thumb_ratio,
        size,
        thumb_size = cfg.thumb_size,
        "Thumb check"
    );
    thumb
}

pub fn is_palm(cfg: &Config, hw: &RawContact) -> bool {
    if !matches!(cfg.touch_mode, TouchMode::Scale | TouchMode::Size) {
        return false;
    }
    let size = touch_range_ratio(cfg, hw.touch_major);
    let palm = size > cfg.palm_size;
    trace!(
        tracking_id = hw.tracking_id,
        palm,
        size,
        palm_size = cfg.palm_size,
        "Palm check"
    );
    palm
}

/// `pct` percent of `extent`, in integer device units
fn band(pct: i64, extent: i32) -> i64 {
    pct * extent as i64 / 100
}

fn fraction(value: i32, extent: i32) -> i64 {
    if extent == 0 {
        0
    } else {
        value as i64 * 100 / extent as i64
    }
}

pub fn in_bottom_edge(cfg: &Config, y: i32) -> bool {
    cfg.pad_height > 0 && y as i64 > band(100 - cfg.bottom_edge as i64, cfg.pad_height)
}

pub fn in_top_edge(cfg: &Config, y: i32) -> bool {
    cfg.pad_height > 0 && (y as i64) < band(cfg.top_edge as i64, cfg.pad_height)
}

/// Inside the triangle cut off either top corner by a line at
/// `top_corners` percent along each axis
pub fn in_top_corners(cfg: &Config, x: i32, y: i32) -> bool {
    if cfg.pad_height <= 0 || (y as i64) >= band(cfg.top_corners as i64, cfg.pad_height) {
        return false;
    }
    let xfrac = fraction(x, cfg.pad_width);
    let yfrac = fraction(y, cfg.pad_height);
    let corners = cfg.top_corners as i64;
    xfrac + yfrac < corners || (100 - xfrac) + yfrac < corners
}

/// Set `flag` only on a NEW touch inside the region; clear it as soon as
/// the touch is outside.
fn latch(flags: &mut TouchFlags, flag: TouchFlags, inside: bool) {
    if !inside {
        flags.remove(flag);
    } else if flags.contains(TouchFlags::NEW) {
        flags.insert(flag);
    }
}

/// Classify one touch against the contact that updated it this frame.
/// Returns true when the touch should disable every touch in the frame.
pub fn classify(touch: &mut TrackedTouch, cfg: &Config, hw: &RawContact) -> bool {
    let flags = &mut touch.flags;

    flags.set(TouchFlags::THUMB, is_thumb(cfg, hw));
    flags.set(TouchFlags::PALM, is_palm(cfg, hw));

    latch(flags, TouchFlags::BOTTOM_EDGE, in_bottom_edge(cfg, touch.y));
    latch(flags, TouchFlags::TOP_EDGE, in_top_edge(cfg, touch.y));
    latch(
        flags,
        TouchFlags::TOP_CORNERS,
        in_top_corners(cfg, touch.x, touch.y),
    );

    // Bottom edge touches are dropped regardless of configuration.
    let invalid = (flags.contains(TouchFlags::THUMB) && cfg.ignore_thumb)
        || (flags.contains(TouchFlags::PALM) && cfg.ignore_palm)
        || (flags.contains(TouchFlags::TOP_EDGE) && cfg.ignore_top)
        || (flags.contains(TouchFlags::TOP_CORNERS) && cfg.ignore_top_corners)
        || flags.contains(TouchFlags::BOTTOM_EDGE);
    flags.set(TouchFlags::INVALID, invalid);

    (cfg.disable_on_thumb && flags.contains(TouchFlags::THUMB))
        || (cfg.disable_on_palm && flags.contains(TouchFlags::PALM))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{contact, size_config};

    fn scale_config(down: i32, up: i32) -> Config {
        Config {
            touch_mode: TouchMode::Scale,
            touch_down: down,
            touch_up: up,
            touch_min: 0,
            touch_max: 100,
            ..Default::default()
        }
    }

    fn scaled(major: i32, width: i32) -> RawContact {
        RawContact {
            touch_major: major,
            width_major: width,
            ..contact(1, 0, 0)
        }
    }

    #[test]
    fn test_scale_hysteresis() {
        let cfg = scale_config(30, 20);
        // 25% is between the two thresholds
        assert!(!is_touch(&cfg, &scaled(25, 100)));
        assert!(!is_release(&cfg, &scaled(25, 100)));
        assert!(!is_touch(&cfg, &scaled(30, 100)));
        assert!(is_touch(&cfg, &scaled(31, 100)));
        assert!(!is_release(&cfg, &scaled(20, 100)));
        assert!(is_release(&cfg, &scaled(19, 100)));
    }

    #[test]
    fn test_scale_is_relative_to_width() {
        let cfg = scale_config(30, 20);
        assert!(is_touch(&cfg, &scaled(70, 200)));
        assert!(!is_touch(&cfg, &scaled(50, 200)));
    }

    #[test]
    fn test_size_remaps_against_calibration() {
        let mut cfg = size_config();
        cfg.touch_min = 100;
        cfg.touch_max = 300;
        cfg.touch_down = 50;
        let mut hw = contact(1, 0, 0);
        hw.touch_major = 200; // exactly 50%
        assert!(!is_touch(&cfg, &hw));
        hw.touch_major = 204; // 52%
        assert!(is_touch(&cfg, &hw));
    }

    #[test]
    fn test_pressure_mode_reads_pressure() {
        let cfg = Config {
            touch_mode: TouchMode::Pressure,
            touch_down: 10,
            touch_up: 5,
            touch_min: 0,
            touch_max: 100,
            ..Default::default()
        };
        let mut hw = contact(1, 0, 0);
        hw.touch_major = 90;
        hw.pressure = 3;
        assert!(!is_touch(&cfg, &hw));
        assert!(is_release(&cfg, &hw));
        hw.pressure = 40;
        assert!(is_touch(&cfg, &hw));
    }

    #[test]
    fn test_unconditioned_always_touching() {
        let cfg = Config::default();
        let hw = contact(1, 0, 0);
        assert!(is_touch(&cfg, &hw));
        assert!(!is_release(&cfg, &hw));
        assert_eq!(touch_measure(&cfg, &hw), None);
    }

    #[test]
    fn test_zero_divisors_do_not_panic() {
        let cfg = scale_config(30, 20);
        assert!(!is_touch(&cfg, &scaled(0, 0)));
        let _ = is_touch(&cfg, &scaled(10, 0));

        let mut degenerate = size_config();
        degenerate.touch_max = degenerate.touch_min;
        let _ = is_touch(&degenerate, &contact(1, 0, 0));
        let _ = is_palm(&degenerate, &contact(1, 0, 0));

        let mut flat = size_config();
        flat.pad_width = 0;
        flat.pad_height = 0;
        assert!(!in_top_corners(&flat, 0, 0));
        assert!(!in_bottom_edge(&flat, 10));
    }

    #[test]
    fn test_extreme_region_percentages_do_not_panic() {
        let cfg = Config {
            bottom_edge: i32::MIN,
            top_edge: i32::MAX,
            top_corners: i32::MAX,
            ..size_config()
        };
        let mut touch = TrackedTouch {
            flags: TouchFlags::NEW,
            x: i32::MAX,
            y: 10,
            ..Default::default()
        };
        classify(&mut touch, &cfg, &contact(1, 0, 10));
        // 100 - i32::MIN percent lies far below the pad: no bottom edge
        assert!(!touch.flags.contains(TouchFlags::BOTTOM_EDGE));
        assert!(touch.flags.contains(TouchFlags::TOP_EDGE));

        let cfg = Config { bottom_edge: i32::MAX, ..size_config() };
        assert!(in_bottom_edge(&cfg, 0));
        assert!(!in_top_edge(&Config { top_edge: i32::MIN, ..size_config() }, 0));
    }

    #[test]
    fn test_thumb_needs_minor_classification() {
        let mut cfg = size_config();
        cfg.touch_minor = false;
        let mut hw = contact(1, 0, 0);
        hw.touch_major = 80;
        hw.touch_minor = 20;
        assert!(!is_thumb(&cfg, &hw));
        cfg.touch_minor = true;
        assert!(is_thumb(&cfg, &hw));
    }

    #[test]
    fn test_thumb_requires_elongated_and_large() {
        let cfg = Config { touch_minor: true, ..size_config() };
        let mut hw = contact(1, 0, 0);
        // round contact
        hw.touch_major = 80;
        hw.touch_minor = 75;
        assert!(!is_thumb(&cfg, &hw));
        // elongated but small
        hw.touch_major = 20;
        hw.touch_minor = 5;
        assert!(!is_thumb(&cfg, &hw));
    }

    #[test]
    fn test_palm_only_in_scale_or_size() {
        let mut cfg = size_config();
        let mut hw = contact(1, 0, 0);
        hw.touch_major = 60;
        assert!(is_palm(&cfg, &hw));
        cfg.touch_mode = TouchMode::Pressure;
        assert!(!is_palm(&cfg, &hw));
        cfg.touch_mode = TouchMode::Unconditioned;
        assert!(!is_palm(&cfg, &hw));
    }

    #[test]
    fn test_region_bounds() {
        let cfg = Config {
            top_edge: 10,
            bottom_edge: 10,
            top_corners: 20,
            ..size_config()
        };
        // pad is 1000 x 1000
        assert!(in_top_edge(&cfg, 99));
        assert!(!in_top_edge(&cfg, 100));
        assert!(in_bottom_edge(&cfg, 901));
        assert!(!in_bottom_edge(&cfg, 900));
        assert!(in_top_corners(&cfg, 50, 50));
        assert!(in_top_corners(&cfg, 950, 50));
        assert!(!in_top_corners(&cfg, 500, 50));
        assert!(!in_top_corners(&cfg, 150, 150));
    }

    #[test]
    fn test_latch_only_sets_on_new() {
        let mut flags = TouchFlags::empty();
        latch(&mut flags, TouchFlags::TOP_EDGE, true);
        assert!(!flags.contains(TouchFlags::TOP_EDGE));

        let mut flags = TouchFlags::NEW;
        latch(&mut flags, TouchFlags::TOP_EDGE, true);
        assert!(flags.contains(TouchFlags::TOP_EDGE));

        flags.remove(TouchFlags::NEW);
        latch(&mut flags, TouchFlags::TOP_EDGE, true);
        assert!(flags.contains(TouchFlags::TOP_EDGE));
        latch(&mut flags, TouchFlags::TOP_EDGE, false);
        assert!(!flags.contains(TouchFlags::TOP_EDGE));
    }

    #[test]
    fn test_classify_bottom_edge_always_invalid() {
        let cfg = size_config();
        let mut touch = TrackedTouch {
            flags: TouchFlags::NEW,
            y: 950,
            ..Default::default()
        };
        let disable = classify(&mut touch, &cfg, &contact(1, 0, 950));
        assert!(!disable);
        assert!(touch.flags.contains(TouchFlags::BOTTOM_EDGE));
        assert!(touch.is_invalid());
    }

    #[test]
    fn test_classify_ignore_gates() {
        let mut cfg = size_config();
        let mut hw = contact(1, 500, 500);
        hw.touch_major = 60;
        let mut touch = TrackedTouch { x: 500, y: 500, ..Default::default() };

        classify(&mut touch, &cfg, &hw);
        assert!(touch.flags.contains(TouchFlags::PALM));
        assert!(!touch.is_invalid());

        cfg.ignore_palm = true;
        classify(&mut touch, &cfg, &hw);
        assert!(touch.is_invalid());

        // palm clears once the contact shrinks, and so does INVALID
        hw.touch_major = 10;
        classify(&mut touch, &cfg, &hw);
        assert!(!touch.flags.contains(TouchFlags::PALM));
        assert!(!touch.is_invalid());
    }

    #[test]
    fn test_classify_reports_disable() {
        let cfg = Config { disable_on_palm: true, ..size_config() };
        let mut hw = contact(1, 500, 500);
        hw.touch_major = 60;
        let mut touch = TrackedTouch { x: 500, y: 500, ..Default::default() };
        assert!(classify(&mut touch, &cfg, &hw));
        hw.touch_major = 10;
        assert!(!classify(&mut touch, &cfg, &hw));
    }
}
