//! Merge overlay: strokes that hide the wall between two rectangles of the
//! same logical room.

use std::collections::HashSet;

use architect_core::Room;

use crate::scale::Scale;
use crate::scene::Node;

/// Gap, in feet, under which two edges count as touching.
pub const MERGE_EPSILON: f64 = 0.1;
/// Pixels trimmed from each end of an overlay so corners stay outlined.
pub const MERGE_INSET_PX: f64 = 1.0;
pub const MERGE_STROKE_WIDTH: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeAxis {
    /// Wall at a fixed x, spanning y.
    Vertical,
    /// Wall at a fixed y, spanning x.
    Horizontal,
}

/// A wall segment shared by two same-named rooms, in land coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SharedEdge<'a> {
    pub axis: EdgeAxis,
    pub at: f64,
    pub from: f64,
    pub to: f64,
    /// Room whose colour paints the overlay: the first of the pair in
    /// floor order.
    pub room: &'a Room,
}

fn pair_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Touching edge between `a` and `b` on one axis, whichever side of `a`
/// the other room sits on.
fn touching(a_lo: f64, a_hi: f64, b_lo: f64, b_hi: f64) -> Option<f64> {
    if (a_hi - b_lo).abs() < MERGE_EPSILON {
        Some(a_hi)
    } else if (b_hi - a_lo).abs() < MERGE_EPSILON {
        Some(b_hi)
    } else {
        None
    }
}

/// Every shared wall between pairs of rooms with equal names and
/// different ids. Each id pair is considered once, and the edges must
/// overlap along the wall by a positive length.
pub fn shared_edges(rooms: &[Room]) -> Vec<SharedEdge<'_>> {
    let mut out = Vec::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    for (i, r1) in rooms.iter().enumerate() {
        for r2 in &rooms[i + 1..] {
            if r1.id == r2.id || r1.name != r2.name {
                continue;
            }
            if !seen.insert(pair_key(&r1.id, &r2.id)) {
                continue;
            }
            let y0 = r1.y.max(r2.y);
            let y1 = r1.bottom().min(r2.bottom());
            if y1 > y0
                && let Some(at) = touching(r1.x, r1.right(), r2.x, r2.right())
            {
                out.push(SharedEdge {
                    axis: EdgeAxis::Vertical,
                    at,
                    from: y0,
                    to: y1,
                    room: r1,
                });
            }
            let x0 = r1.x.max(r2.x);
            let x1 = r1.right().min(r2.right());
            if x1 > x0
                && let Some(at) = touching(r1.y, r1.bottom(), r2.y, r2.bottom())
            {
                out.push(SharedEdge {
                    axis: EdgeAxis::Horizontal,
                    at,
                    from: x0,
                    to: x1,
                    room: r1,
                });
            }
        }
    }
    out
}

pub fn overlay_node(edge: &SharedEdge<'_>, scale: &Scale) -> Node {
    let (from, to) = match edge.axis {
        EdgeAxis::Vertical => {
            let x = scale.x(edge.at);
            (
                (x, scale.y(edge.from) + MERGE_INSET_PX),
                (x, scale.y(edge.to) - MERGE_INSET_PX),
            )
        }
        EdgeAxis::Horizontal => {
            let y = scale.y(edge.at);
            (
                (scale.x(edge.from) + MERGE_INSET_PX, y),
                (scale.x(edge.to) - MERGE_INSET_PX, y),
            )
        }
    };
    Node::Line {
        from,
        to,
        stroke: edge.room.fill().to_string(),
        width: MERGE_STROKE_WIDTH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn stacked_parts_share_one_horizontal_edge() {
        let rooms = vec![
            room("a", "X", 15.0, 5.0, 20.0, 16.0),
            room("b", "X", 15.0, 21.0, 20.0, 10.0),
        ];
        let edges = shared_edges(&rooms);
        assert_eq!(edges.len(), 1);
        let e = &edges[0];
        assert_eq!(e.axis, EdgeAxis::Horizontal);
        assert_eq!((e.at, e.from, e.to), (21.0, 15.0, 35.0));
    }

    #[test]
    fn side_by_side_parts_share_vertical_edge() {
        let rooms = vec![
            room("living_a", "Living", 35.0, 5.0, 10.0, 26.0),
            room("living_b", "Living", 45.0, 21.0, 5.0, 10.0),
        ];
        let edges = shared_edges(&rooms);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].axis, EdgeAxis::Vertical);
        assert_eq!((edges[0].at, edges[0].from, edges[0].to), (45.0, 21.0, 31.0));
        assert_eq!(edges[0].room.id, "living_a");
    }

    #[test]
    fn order_of_the_pair_does_not_matter() {
        let rooms = vec![
            room("b", "Living", 45.0, 21.0, 5.0, 10.0),
            room("a", "Living", 35.0, 5.0, 10.0, 26.0),
        ];
        let edges = shared_edges(&rooms);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].at, 45.0);
    }

    #[test]
    fn within_epsilon_only() {
        let near = vec![
            room("a", "X", 0.0, 0.0, 10.0, 10.0),
            room("b", "X", 10.09, 0.0, 5.0, 10.0),
        ];
        assert_eq!(shared_edges(&near).len(), 1);
        let far = vec![
            room("a", "X", 0.0, 0.0, 10.0, 10.0),
            room("b", "X", 10.25, 0.0, 5.0, 10.0),
        ];
        assert!(shared_edges(&far).is_empty());
    }

    #[test]
    fn corner_contact_is_not_an_edge() {
        let rooms = vec![
            room("a", "X", 0.0, 0.0, 10.0, 10.0),
            room("b", "X", 10.0, 10.0, 5.0, 5.0),
        ];
        assert!(shared_edges(&rooms).is_empty());
    }

    #[test]
    fn different_names_or_same_id_are_skipped() {
        let rooms = vec![
            room("a", "X", 0.0, 0.0, 10.0, 10.0),
            room("b", "Y", 10.0, 0.0, 5.0, 10.0),
            room("a", "X", 10.0, 0.0, 5.0, 10.0),
        ];
        assert!(shared_edges(&rooms).is_empty());
    }

    #[test]
    fn repeated_id_pair_is_processed_once() {
        let rooms = vec![
            room("a", "X", 0.0, 0.0, 10.0, 10.0),
            room("b", "X", 10.0, 0.0, 5.0, 10.0),
            room("b", "X", 0.0, 10.0, 10.0, 5.0),
        ];
        let edges = shared_edges(&rooms);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].axis, EdgeAxis::Vertical);
    }
}
