// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay placement relative to an anchor.
//!
//! ## Formula
//!
//! - `top = floor(anchor.y0 + anchor.height)`: the overlay sits flush below the anchor.
//! - `left = max(0, anchor_mid_x - overlay.width / 2)`: centered on the anchor, never left of
//!   the viewport origin.
//!
//! There is no clamping against the right edge or the bottom of the viewport.
//!
//! ## Two passes
//!
//! The overlay's own width is only known once it is mounted. [`Placement`] starts out
//! [`Pending`](Placement::Pending) with the final `top` and a provisional `left` of zero, and
//! becomes [`Placed`](Placement::Placed) once the overlay size is measured.
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_tooltip::position::{compute_position, OverlayGeometry};
//!
//! let anchor = Rect::from_origin_size((100.0, 50.0), (40.0, 20.0));
//! let g = compute_position(anchor, Size::new(60.0, 30.0));
//! assert_eq!(g, OverlayGeometry { top: 70.0, left: 90.0 });
//! ```

use kurbo::{Rect, Size};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Computed overlay offsets in root (viewport) pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OverlayGeometry {
    /// Offset of the overlay's top edge.
    pub top: f64,
    /// Offset of the overlay's left edge.
    pub left: f64,
}

/// Place an overlay of size `overlay` under `anchor`.
///
/// `anchor` is normalized first. Controllers only ever pass rectangles accepted by
/// [`measurable`].
pub fn compute_position(anchor: Rect, overlay: Size) -> OverlayGeometry {
    let anchor = anchor.abs();
    let mid_x = anchor.x0 + anchor.width() / 2.0;
    OverlayGeometry {
        top: anchor_bottom(anchor),
        left: (mid_x - overlay.width / 2.0).max(0.0),
    }
}

fn anchor_bottom(anchor: Rect) -> f64 {
    (anchor.y0 + anchor.height()).floor()
}

/// Returns `rect` if it can serve as anchor geometry.
///
/// Rectangles with NaN or infinite coordinates, or with a negative width or height, are
/// rejected.
pub fn measurable(rect: Rect) -> Option<Rect> {
    let valid = rect.is_finite() && rect.x1 >= rect.x0 && rect.y1 >= rect.y0;
    valid.then_some(rect)
}

/// Placement state of a mounted overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Placement {
    /// Overlay mounted but not measured yet.
    Pending {
        /// Final top offset; it does not depend on the overlay size.
        top: f64,
    },
    /// Overlay measured and positioned.
    Placed(OverlayGeometry),
}

impl Placement {
    /// First-pass placement for a freshly captured anchor.
    pub fn initial(anchor: Rect) -> Self {
        Self::Pending {
            top: anchor_bottom(anchor.abs()),
        }
    }

    /// Second pass: correct `left` now that the overlay size is known.
    ///
    /// Sizes with a non-finite width leave the placement pending.
    pub fn settle(&mut self, anchor: Rect, overlay: Size) {
        if overlay.is_finite() {
            *self = Self::Placed(compute_position(anchor, overlay));
        }
    }

    /// Returns true once the overlay has been measured.
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed(_))
    }

    /// Current offsets. Pending placements report a provisional `left` of zero.
    pub fn geometry(&self) -> OverlayGeometry {
        match *self {
            Self::Pending { top } => OverlayGeometry { top, left: 0.0 },
            Self::Placed(g) => g,
        }
    }

    /// Target opacity: hidden until placed, then fully opaque.
    pub fn opacity(&self) -> f64 {
        if self.is_placed() { 1.0 } else { 0.0 }
    }
}
