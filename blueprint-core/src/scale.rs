use architect_core::{Land, Room};
use serde::{Deserialize, Serialize};

use crate::RenderError;

/// Pixel margins around the drawing, reserved for rulers and the legend.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Margins {
            top: 50.0,
            right: 50.0,
            bottom: 100.0,
            left: 70.0,
        }
    }
}

/// Axis-aligned rectangle in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PxRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Feet to pixels for one render pass.
///
/// x is a linear map from `[-padding, land.width + padding]` onto
/// `[margin.left, width - margin.right]`. y uses the same pixels-per-foot
/// with no offset, so a foot is square on screen and each floor translates
/// its own subtree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    domain: (f64, f64),
    range: (f64, f64),
    px_per_ft: f64,
}

impl Scale {
    pub fn new(
        land: Land,
        surface_width: f64,
        margins: Margins,
        padding_ft: f64,
    ) -> Result<Self, RenderError> {
        if !land.width.is_finite() || land.width <= 0.0 {
            return Err(RenderError::DegenerateLand(land.width));
        }
        let mut s = Scale {
            domain: (-padding_ft, land.width + padding_ft),
            range: (margins.left, surface_width - margins.right),
            px_per_ft: 0.0,
        };
        s.px_per_ft = (s.x(land.width) - s.x(0.0)) / land.width;
        Ok(s)
    }

    pub fn x(&self, ft: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (ft - d0) * (r1 - r0) / (d1 - d0)
    }

    pub fn y(&self, ft: f64) -> f64 {
        ft * self.px_per_ft
    }

    pub fn px_per_ft(&self) -> f64 {
        self.px_per_ft
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Width is taken as a difference of two mapped x positions so that
    /// neighbouring rooms share the exact same pixel edge.
    pub fn rect(&self, room: &Room) -> PxRect {
        let x = self.x(room.x);
        PxRect {
            x,
            y: self.y(room.y),
            w: self.x(room.right()) - x,
            h: self.y(room.height),
        }
    }

    pub fn land_rect(&self, land: Land) -> PxRect {
        let x = self.x(0.0);
        PxRect {
            x,
            y: 0.0,
            w: self.x(land.width) - x,
            h: self.y(land.height),
        }
    }
}
