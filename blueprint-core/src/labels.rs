//! Name/area labels and side dimensions, one set per logical room.

use architect_core::{Room, fmt_feet, group_rooms, round_area};

use crate::scale::{PxRect, Scale};
use crate::scene::{Anchor, Font, Node, Span};

/// Smallest anchor, in pixels, that still gets a name/area label.
pub const LABEL_MIN_W_PX: f64 = 20.0;
pub const LABEL_MIN_H_PX: f64 = 15.0;
/// Smallest side, in pixels, that still gets a dimension annotation.
pub const DIMENSION_MIN_PX: f64 = 20.0;
const DIMENSION_GAP_PX: f64 = 4.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Placement<'a> {
    pub name: &'a str,
    pub anchor: &'a Room,
    pub rect: PxRect,
    pub total_area: f64,
    pub show_label: bool,
    pub show_width: bool,
    pub show_height: bool,
}

impl Placement<'_> {
    pub fn area_text(&self) -> String {
        format!("{} sqft", round_area(self.total_area))
    }
}

/// Pick, per name group, the anchor rectangle and which annotations fit.
pub fn place_labels<'a>(rooms: &'a [Room], scale: &Scale) -> Vec<Placement<'a>> {
    group_rooms(rooms)
        .into_iter()
        .map(|g| {
            let anchor = g.anchor();
            let rect = scale.rect(anchor);
            Placement {
                name: g.name(),
                anchor,
                rect,
                total_area: g.total_area(),
                show_label: rect.w > LABEL_MIN_W_PX && rect.h > LABEL_MIN_H_PX,
                show_width: rect.w > DIMENSION_MIN_PX,
                show_height: rect.h > DIMENSION_MIN_PX,
            }
        })
        .collect()
}

pub fn label_nodes(p: &Placement<'_>) -> Vec<Node> {
    let r = p.rect;
    let cx = r.x + r.w / 2.0;
    let cy = r.y + r.h / 2.0;
    let mut out = Vec::new();
    if p.show_label {
        out.push(Node::Label {
            at: (cx, cy),
            spans: vec![
                Span {
                    text: p.name.to_string(),
                    dy_em: -0.4,
                    font: Font::new(10.0, "#1e293b").bold(),
                },
                Span {
                    text: p.area_text(),
                    dy_em: 1.2,
                    font: Font::new(8.0, "#475569"),
                },
            ],
        });
    }
    let dim = Font::new(9.0, "#64748b");
    if p.show_width {
        out.push(Node::text(
            (cx, r.y - DIMENSION_GAP_PX),
            format!("{}'", fmt_feet(p.anchor.width)),
            dim.clone(),
            Anchor::Middle,
        ));
    }
    if p.show_height {
        out.push(Node::Text {
            at: (r.x - DIMENSION_GAP_PX, cy),
            text: format!("{}'", fmt_feet(p.anchor.height)),
            font: dim,
            anchor: Anchor::End,
            middle: true,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::Margins;
    use architect_core::Land;

    fn room(id: &str, name: &str, x: f64, y: f64, w: f64, h: f64) -> Room {
        Room {
            id: id.into(),
            name: name.into(),
            x,
            y,
            width: w,
            height: h,
            ..Default::default()
        }
    }

    fn scale() -> Scale {
        // 10 px per foot
        Scale::new(
            Land {
                width: 75.0,
                height: 60.0,
            },
            970.0,
            Margins::default(),
            5.0,
        )
        .unwrap()
    }

    #[test]
    fn three_part_group_labels_largest_with_summed_area() {
        let rooms = vec![
            room("p1", "Suite", 0.0, 0.0, 4.0, 10.0),
            room("p2", "Suite", 4.0, 0.0, 20.0, 15.0),
            room("p3", "Suite", 24.0, 0.0, 12.0, 10.0),
        ];
        let placements = place_labels(&rooms, &scale());
        assert_eq!(placements.len(), 1);
        let p = &placements[0];
        assert_eq!(p.anchor.id, "p2");
        assert_eq!(p.total_area, 460.0);
        assert_eq!(p.area_text(), "460 sqft");
        let labels: Vec<_> = label_nodes(p)
            .into_iter()
            .filter(|n| matches!(n, Node::Label { .. }))
            .collect();
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn small_rooms_lose_labels_before_dimensions() {
        // 2.5 ft x 1.8 ft -> 25 px x 18 px: label fits, height dimension does not.
        let rooms = vec![room("c", "Closet", 0.0, 0.0, 2.5, 1.8)];
        let p = &place_labels(&rooms, &scale())[0];
        assert!(p.show_label && p.show_width && !p.show_height);

        // 1.5 ft wide -> 15 px: nothing horizontal fits.
        let rooms = vec![room("c", "Closet", 0.0, 0.0, 1.5, 3.0)];
        let p = &place_labels(&rooms, &scale())[0];
        assert!(!p.show_label && !p.show_width && p.show_height);
        assert_eq!(label_nodes(p).len(), 1);
    }

    #[test]
    fn dimensions_use_anchor_sides() {
        let rooms = vec![
            room("a", "L", 0.0, 0.0, 10.0, 26.0),
            room("b", "L", 10.0, 16.0, 5.0, 10.0),
        ];
        let p = &place_labels(&rooms, &scale())[0];
        let texts: Vec<String> = label_nodes(p)
            .into_iter()
            .filter_map(|n| match n {
                Node::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["10'", "26'"]);
    }
}
