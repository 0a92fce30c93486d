use std::collections::HashSet;
use std::fmt;

use crate::model::{HouseLayout, Room};

/// Problems found in a layout. Hard issues make the layout unrenderable;
/// soft issues break the guidance given to the model but still draw.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutIssue {
    NonPositiveLand { width: f64, height: f64 },
    NonFinite { floor: String, room: String },
    NonPositiveRoom { floor: String, room: String },
    DuplicateRoomId { floor: String, room: String },
    OutsideLand { floor: String, room: String },
    Overlap { floor: String, a: String, b: String },
}

impl LayoutIssue {
    pub fn is_hard(&self) -> bool {
        !matches!(
            self,
            LayoutIssue::OutsideLand { .. } | LayoutIssue::Overlap { .. }
        )
    }
}

impl fmt::Display for LayoutIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutIssue::NonPositiveLand { width, height } => {
                write!(f, "land must be positive, got {width}x{height}")
            }
            LayoutIssue::NonFinite { floor, room } => {
                write!(f, "room '{room}' on floor '{floor}' has a non-finite coordinate")
            }
            LayoutIssue::NonPositiveRoom { floor, room } => {
                write!(f, "room '{room}' on floor '{floor}' has a non-positive size")
            }
            LayoutIssue::DuplicateRoomId { floor, room } => {
                write!(f, "room id '{room}' appears more than once on floor '{floor}'")
            }
            LayoutIssue::OutsideLand { floor, room } => {
                write!(f, "room '{room}' on floor '{floor}' extends past the land boundary")
            }
            LayoutIssue::Overlap { floor, a, b } => {
                write!(f, "rooms '{a}' and '{b}' overlap on floor '{floor}'")
            }
        }
    }
}

fn overlaps(a: &Room, b: &Room) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

impl HouseLayout {
    /// Check the layout against the model's invariants and the soft
    /// placement guidance. Nothing is corrected.
    pub fn validate(&self) -> Vec<LayoutIssue> {
        let mut out = Vec::new();
        let land = self.land;
        let land_ok = land.width.is_finite()
            && land.height.is_finite()
            && land.width > 0.0
            && land.height > 0.0;
        if !land_ok {
            out.push(LayoutIssue::NonPositiveLand {
                width: land.width,
                height: land.height,
            });
        }
        for floor in &self.floors {
            let mut seen: HashSet<&str> = HashSet::new();
            for r in &floor.rooms {
                let ids = || (floor.id.clone(), r.id.clone());
                if !seen.insert(r.id.as_str()) {
                    let (floor, room) = ids();
                    out.push(LayoutIssue::DuplicateRoomId { floor, room });
                }
                if ![r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite()) {
                    let (floor, room) = ids();
                    out.push(LayoutIssue::NonFinite { floor, room });
                    continue;
                }
                if r.width <= 0.0 || r.height <= 0.0 {
                    let (floor, room) = ids();
                    out.push(LayoutIssue::NonPositiveRoom { floor, room });
                    continue;
                }
                if land_ok
                    && (r.x < 0.0 || r.y < 0.0 || r.right() > land.width || r.bottom() > land.height)
                {
                    let (floor, room) = ids();
                    out.push(LayoutIssue::OutsideLand { floor, room });
                }
            }
            for (i, a) in floor.rooms.iter().enumerate() {
                for b in &floor.rooms[i + 1..] {
                    if overlaps(a, b) {
                        out.push(LayoutIssue::Overlap {
                            floor: floor.id.clone(),
                            a: a.id.clone(),
                            b: b.id.clone(),
                        });
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Floor, Land};

    fn layout(rooms: Vec<Room>) -> HouseLayout {
        HouseLayout {
            land: Land {
                width: 20.0,
                height: 20.0,
            },
            floors: vec![Floor {
                id: "f".into(),
                name: "F".into(),
                rooms,
            }],
        }
    }

    fn room(id: &str, x: f64, y: f64, w: f64, h: f64) -> Room {
        Room {
            id: id.into(),
            name: id.into(),
            x,
            y,
            width: w,
            height: h,
            ..Default::default()
        }
    }

    #[test]
    fn clean_layout_has_no_issues() {
        let l = layout(vec![room("a", 0.0, 0.0, 10.0, 10.0), room("b", 10.0, 0.0, 10.0, 10.0)]);
        assert!(l.validate().is_empty());
    }

    #[test]
    fn touching_rooms_do_not_overlap() {
        let l = layout(vec![room("a", 0.0, 0.0, 10.0, 10.0), room("b", 0.0, 10.0, 10.0, 5.0)]);
        assert!(l.validate().is_empty());
    }

    #[test]
    fn soft_and_hard_issues() {
        let l = layout(vec![
            room("a", 0.0, 0.0, 10.0, 10.0),
            room("b", 5.0, 5.0, 20.0, 2.0),
            room("a", 0.0, 15.0, 0.0, 2.0),
        ]);
        let issues = l.validate();
        assert!(issues.contains(&LayoutIssue::OutsideLand {
            floor: "f".into(),
            room: "b".into()
        }));
        assert!(issues.contains(&LayoutIssue::Overlap {
            floor: "f".into(),
            a: "a".into(),
            b: "b".into()
        }));
        let hard: Vec<_> = issues.iter().filter(|i| i.is_hard()).collect();
        assert_eq!(hard.len(), 2);
    }

    #[test]
    fn degenerate_land_is_hard() {
        let mut l = layout(Vec::new());
        l.land.width = 0.0;
        let issues = l.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_hard());
        assert!(issues[0].to_string().contains("land"));
    }
}
