//! Schematic blueprint renderer: turns a [`HouseLayout`] and a viewport
//! width into a vector [`Scene`], then into SVG.
//!
//! Stages run in a fixed order for every floor: scaling, room fills and
//! outlines, the merge overlay for split rooms, labels and dimensions.
//! Floors are stacked top to bottom, followed by the ruler, the area
//! legend and the compass.
//!
//! [`HouseLayout`]: architect_core::HouseLayout

use thiserror::Error;

pub mod labels;
pub mod overlay;
pub mod render;
pub mod scale;
pub mod scene;
pub mod ticks;

pub use overlay::{EdgeAxis, MERGE_EPSILON, SharedEdge, shared_edges};
pub use render::{RenderOptions, canvas_height, render_layout};
pub use scale::{Margins, PxRect, Scale};
pub use scene::{Node, Scene};

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("land width must be positive to derive a scale, got {0}")]
    DegenerateLand(f64),
}

/// Render straight to an SVG document.
pub fn build_blueprint_svg(
    layout: &architect_core::HouseLayout,
    opts: &RenderOptions,
) -> Result<(String, u32, u32), RenderError> {
    let scene = render_layout(layout, opts)?;
    let w = scene.width.ceil() as u32;
    let h = scene.height.ceil() as u32;
    Ok((scene.to_svg(), w, h))
}
