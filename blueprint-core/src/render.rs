use architect_core::{AreaTotals, Floor, HouseLayout, Land, round_area};
use serde::{Deserialize, Serialize};

use crate::RenderError;
use crate::labels::{label_nodes, place_labels};
use crate::overlay::{overlay_node, shared_edges};
use crate::scale::{Margins, PxRect, Scale};
use crate::scene::{Anchor, Font, GridPattern, Node, Scene, Style};
use crate::ticks::nice_ticks;

const OUTLINE_COLOR: &str = "#334155";
const GRID_COLOR: &str = "#e2e8f0";
const LAND_COLOR: &str = "#cbd5e1";
const GRID_CELL_FT: f64 = 10.0;
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

/// Geometry knobs for one render pass. Only `width` normally changes
/// between calls (it follows the host viewport).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub width: f64,
    pub margins: Margins,
    pub padding_ft: f64,
    pub floor_gap_px: f64,
    pub min_height: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            width: 1000.0,
            margins: Margins::default(),
            padding_ft: 5.0,
            floor_gap_px: 80.0,
            min_height: 700.0,
        }
    }
}

impl RenderOptions {
    pub fn with_width(width: f64) -> Self {
        RenderOptions {
            width,
            ..Default::default()
        }
    }
}

/// Vertical extent of the stacked floors, gaps included, in pixels.
fn floors_height(floor_px: f64, count: usize, gap: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    floor_px * count as f64 + gap * (count - 1) as f64
}

pub fn canvas_height(opts: &RenderOptions, floor_px: f64, count: usize) -> f64 {
    let m = opts.margins;
    let content = m.top + m.bottom + floors_height(floor_px, count, opts.floor_gap_px);
    content.max(opts.min_height)
}

/// Render the whole layout. Pure: equal inputs give equal scenes.
pub fn render_layout(layout: &HouseLayout, opts: &RenderOptions) -> Result<Scene, RenderError> {
    let scale = Scale::new(layout.land, opts.width, opts.margins, opts.padding_ft)?;
    let floor_px = scale.y(layout.land.height);
    let count = layout.floors.len();
    log::debug!(
        "render: {} floor(s), width {} px, {:.3} px/ft",
        count,
        opts.width,
        scale.px_per_ft()
    );

    let mut nodes = Vec::new();
    for (i, floor) in layout.floors.iter().enumerate() {
        let dy = opts.margins.top + i as f64 * (floor_px + opts.floor_gap_px);
        nodes.push(render_floor(floor, layout.land, &scale, opts, dy));
    }
    nodes.push(top_ruler(&scale, opts));
    let legend_y =
        opts.margins.top + floors_height(floor_px, count, opts.floor_gap_px) + 30.0;
    nodes.push(legend(AreaTotals::of(layout), opts.margins.left, legend_y));
    nodes.push(compass(opts.width));

    Ok(Scene {
        width: opts.width,
        height: canvas_height(opts, floor_px, count),
        grid: Some(GridPattern {
            id: "grid".to_string(),
            cell_w: scale.x(GRID_CELL_FT) - scale.x(0.0),
            cell_h: scale.y(GRID_CELL_FT),
            stroke: GRID_COLOR.to_string(),
        }),
        nodes,
    })
}

fn render_floor(floor: &Floor, land: Land, scale: &Scale, opts: &RenderOptions, dy: f64) -> Node {
    let mut children = vec![Node::text(
        (opts.margins.left, -25.0),
        floor.name.clone(),
        Font::new(18.0, "#1e293b").bold(),
        Anchor::Start,
    )];
    children.push(Node::Rect {
        rect: scale.land_rect(land),
        rx: None,
        style: Style {
            fill: Some("url(#grid)".to_string()),
            stroke: Some(LAND_COLOR.to_string()),
            stroke_width: Some(2.0),
            dash: Some("5,5".to_string()),
        },
    });

    // Fills first, then outlines, so no fill ever covers a neighbour's wall.
    let fills = floor
        .rooms
        .iter()
        .map(|r| Node::Rect {
            rect: scale.rect(r),
            rx: None,
            style: Style::fill(r.fill()),
        })
        .collect();
    let outlines = floor
        .rooms
        .iter()
        .map(|r| Node::Rect {
            rect: scale.rect(r),
            rx: None,
            style: Style::stroke(OUTLINE_COLOR, 2.0),
        })
        .collect();
    let merges = shared_edges(&floor.rooms)
        .iter()
        .map(|e| overlay_node(e, scale))
        .collect();
    let labels = place_labels(&floor.rooms, scale)
        .iter()
        .flat_map(label_nodes)
        .collect();
    children.push(Node::group(
        "rooms",
        (0.0, 0.0),
        vec![
            Node::group("fills", (0.0, 0.0), fills),
            Node::group("outlines", (0.0, 0.0), outlines),
            Node::group("merge", (0.0, 0.0), merges),
            Node::group("labels", (0.0, 0.0), labels),
        ],
    ));
    children.push(side_axis(land, scale, opts.margins.left));
    Node::group("floor", (0.0, dy), children)
}

fn side_axis(land: Land, scale: &Scale, x: f64) -> Node {
    let color = "#94a3b8";
    let bottom = scale.y(land.height);
    let mut children = vec![Node::Line {
        from: (0.0, 0.0),
        to: (0.0, bottom),
        stroke: color.to_string(),
        width: 1.0,
    }];
    for t in nice_ticks(0.0, land.height, 5) {
        let y = scale.y(t);
        children.push(Node::Line {
            from: (-TICK_SIZE, y),
            to: (0.0, y),
            stroke: color.to_string(),
            width: 1.0,
        });
        children.push(Node::Text {
            at: (-(TICK_SIZE + TICK_PADDING), y),
            text: format!("{}'", architect_core::fmt_feet(t)),
            font: Font::new(10.0, color),
            anchor: Anchor::End,
            middle: true,
        });
    }
    Node::Group {
        class: "axis-side".to_string(),
        offset: (x, 0.0),
        opacity: Some(0.5),
        children,
    }
}

fn top_ruler(scale: &Scale, opts: &RenderOptions) -> Node {
    let color = "#64748b";
    let (lo, hi) = scale.domain();
    let mut children = vec![Node::Line {
        from: (scale.x(lo), 0.0),
        to: (scale.x(hi), 0.0),
        stroke: color.to_string(),
        width: 1.0,
    }];
    for t in nice_ticks(lo, hi, 10) {
        let x = scale.x(t);
        children.push(Node::Line {
            from: (x, -TICK_SIZE),
            to: (x, 0.0),
            stroke: color.to_string(),
            width: 1.0,
        });
        children.push(Node::text(
            (x, -(TICK_SIZE + TICK_PADDING)),
            format!("{}'", architect_core::fmt_feet(t)),
            Font::new(10.0, color),
            Anchor::Middle,
        ));
    }
    Node::group("ruler", (0.0, opts.margins.top), children)
}

pub fn main_text(totals: AreaTotals) -> String {
    format!("Main House (+Garage): {} sqft", round_area(totals.main))
}

pub fn adu_text(totals: AreaTotals) -> String {
    format!("ADU Unit: {} sqft", round_area(totals.adu))
}

fn legend(totals: AreaTotals, x: f64, y: f64) -> Node {
    let line = Font::new(11.0, "#475569");
    Node::group(
        "legend",
        (x, y),
        vec![
            Node::Rect {
                rect: PxRect {
                    x: -10.0,
                    y: -15.0,
                    w: 220.0,
                    h: 60.0,
                },
                rx: Some(5.0),
                style: Style {
                    fill: Some("white".to_string()),
                    stroke: Some(GRID_COLOR.to_string()),
                    ..Default::default()
                },
            },
            Node::text(
                (0.0, 0.0),
                "Total Area Calculation:",
                Font::new(12.0, "#334155").bold(),
                Anchor::Start,
            ),
            Node::text((0.0, 18.0), main_text(totals), line.clone(), Anchor::Start),
            Node::text((0.0, 34.0), adu_text(totals), line, Anchor::Start),
        ],
    )
}

fn compass(width: f64) -> Node {
    Node::group(
        "compass",
        (width - 50.0, 40.0),
        vec![
            Node::Circle {
                center: (0.0, 0.0),
                r: 18.0,
                style: Style {
                    fill: Some("white".to_string()),
                    stroke: Some(LAND_COLOR.to_string()),
                    ..Default::default()
                },
            },
            Node::text((-6.0, 5.0), "N", Font::new(12.0, "#334155").bold(), Anchor::Start),
            Node::text((0.0, -8.0), "E", Font::new(10.0, "#64748b").bold(), Anchor::Start),
        ],
    )
}
