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

//! Per-frame touch tracking
//!
//! [`extract`] turns one [`HardwareFrame`] into an updated [`TouchSet`]:
//! reclaim slots released last frame, release touches whose contact is
//! gone, match the remaining contacts by tracking id (updating or starting
//! touches), then classify every touch the frame mentioned.

use std::time::Duration;

use tracing::{trace, Level};

use crate::capabilities::Capabilities;
use crate::classify::{classify, is_release, is_touch};
use crate::config::Config;
use crate::hwstate::{HardwareFrame, RawContact};
use crate::touch::{TouchFlags, TouchSet, TrackedTouch};
use crate::trig;

/// Process one frame. Runs to completion; never fails.
pub fn extract(
    touches: &mut TouchSet,
    cfg: &Config,
    frame: &HardwareFrame,
    caps: &Capabilities,
) {
    touches.reclaim();
    update_touches(touches, cfg, frame, caps);
    dump_touches(touches, frame);
}

impl TouchSet {
    /// See [`extract`]
    pub fn process_frame(&mut self, cfg: &Config, frame: &HardwareFrame, caps: &Capabilities) {
        extract(self, cfg, frame, caps);
    }
}

fn update_touches(
    touches: &mut TouchSet,
    cfg: &Config,
    frame: &HardwareFrame,
    caps: &Capabilities,
) {
    // A contact missing from the frame is gone, whatever the thresholds say.
    for i in touches.used_mask() {
        let missing = touches
            .get(i)
            .is_some_and(|t| !frame.contains(t.tracking_id));
        if missing {
            touches.release(i);
        }
    }

    let mut disable = false;
    for hw in frame.contacts() {
        let slot = match touches.find(hw.tracking_id) {
            Some(n) => {
                if is_release(cfg, hw) {
                    touches.release(n);
                } else {
                    update_touch(touches.slot_mut(n), cfg, caps, hw);
                }
                Some(n)
            }
            None if is_touch(cfg, hw) => {
                let (x, y) = caps.normalize(
                    hw.position_x,
                    hw.position_y,
                    cfg.axis_x_invert,
                    cfg.axis_y_invert,
                );
                touches.allocate(hw.tracking_id, x, y, frame.evtime())
            }
            None => None,
        };

        if let Some(n) = slot {
            disable |= classify(touches.slot_mut(n), cfg, hw);
        }
    }

    if disable {
        touches.invalidate_all();
    }
}

fn update_touch(touch: &mut TrackedTouch, cfg: &Config, caps: &Capabilities, hw: &RawContact) {
    let (x, y) = caps.normalize(
        hw.position_x,
        hw.position_y,
        cfg.axis_x_invert,
        cfg.axis_y_invert,
    );
    touch.dx = x.saturating_sub(touch.x);
    touch.dy = y.saturating_sub(touch.y);
    touch.total_dx = touch.total_dx.saturating_add(touch.dx);
    touch.total_dy = touch.total_dy.saturating_add(touch.dy);
    touch.x = x;
    touch.y = y;
    touch.direction = trig::direction(touch.dx, touch.dy);
    touch.flags.remove(TouchFlags::NEW);
}

fn dump_touches(touches: &TouchSet, frame: &HardwareFrame) {
    if !tracing::enabled!(Level::TRACE) || touches.is_empty() {
        return;
    }
    let now = frame.evtime();
    trace!(
        touches = touches.len(),
        evtime_ms = now.as_millis() as u64,
        "Touch state"
    );
    for (slot, t) in touches.iter() {
        let (state, elapsed_ms) = dump_state(t, now);
        trace!(
            slot,
            state,
            x = t.x,
            y = t.y,
            dx = t.dx,
            dy = t.dy,
            direction = ?t.direction,
            down_ms = t.down.as_millis() as u64,
            elapsed_ms = ?elapsed_ms,
            flags = ?t.flags,
            "  touch"
        );
    }
}

/// Label for the trace dump, plus time since touch-down for touches that
/// are ending (released or invalid).
fn dump_state(t: &TrackedTouch, now: Duration) -> (&'static str, Option<u64>) {
    let state = if t.is_released() {
        "released"
    } else if t.is_new() {
        "new"
    } else if t.is_invalid() {
        "invalid"
    } else {
        "touching"
    };
    let elapsed_ms = if t.is_released() || t.is_invalid() {
        Some(t.elapsed(now).as_millis() as u64)
    } else {
        None
    };
    (state, elapsed_ms)
}
