//! Capture-region geometry shared between the UI context and the capture thread.
//!
//! [`Region`] is a rectangle in screen-pixel coordinates. [`RegionTracker`] is
//! the one object both contexts touch while a recording is live: the UI
//! replaces the rectangle as its window moves or resizes, and the capture loop
//! reads it once per tick. Each update replaces the whole struct under a lock,
//! so a reader sees either the old or the new rectangle, never a mix.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// A rectangular region on the screen.
///
/// The extent is unsigned, so a degenerate drag can never produce a negative
/// width or height; use [`Region::from_corners`] to normalize a rectangle
/// given as two arbitrary drag corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a region from two opposite corners in any order.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let x = x1.min(x2);
        let y = y1.min(y2);
        Self {
            x,
            y,
            width: x1.abs_diff(x2),
            height: y1.abs_diff(y2),
        }
    }

    /// A region with zero area cannot be captured.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is within the region.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && x < self.x + self.width as i32
            && y >= self.y
            && y < self.y + self.height as i32
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Intersection with another region, or `None` when they do not overlap.
    pub fn intersect(&self, other: Region) -> Option<Region> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = (self.x + self.width as i32).min(other.x + other.width as i32);
        let bottom = (self.y + self.height as i32).min(other.y + other.height as i32);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Region {
            x: left,
            y: top,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

/// Shared handle to the current capture rectangle.
///
/// Clones share the same rectangle. The UI context calls [`set`](Self::set)
/// on drag/resize events; the capture loop calls [`get`](Self::get) once per
/// tick, so a tick may use a rectangle one update behind, which is the
/// accepted source of visual drift under live-resize.
#[derive(Clone, Debug, Default)]
pub struct RegionTracker {
    inner: Arc<Mutex<Region>>,
}

impl RegionTracker {
    pub fn new(region: Region) -> Self {
        Self {
            inner: Arc::new(Mutex::new(region)),
        }
    }

    /// Replace the current rectangle in one atomic swap.
    pub fn set(&self, region: Region) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = region;
    }

    /// Latest rectangle, by copy.
    pub fn get(&self) -> Region {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
