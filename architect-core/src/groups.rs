use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Floor, HouseLayout, Room};

/// Rooms on one floor that share a name. Derived on demand, never stored.
/// Only [`group_rooms`] builds these, so `parts` is never empty.
#[derive(Clone, Debug)]
pub struct RoomGroup<'a> {
    name: &'a str,
    parts: Vec<&'a Room>,
}

impl<'a> RoomGroup<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Parts in floor order.
    pub fn parts(&self) -> &[&'a Room] {
        &self.parts
    }

    /// The part with strictly the largest area; on ties the earliest part
    /// in floor order wins.
    pub fn anchor(&self) -> &'a Room {
        let mut best = self.parts[0];
        for r in &self.parts[1..] {
            if r.area() > best.area() {
                best = r;
            }
        }
        best
    }

    pub fn total_area(&self) -> f64 {
        self.parts.iter().map(|r| r.area()).sum()
    }

    pub fn summary(&self) -> RoomGroupSummary {
        let first = self.parts[0];
        RoomGroupSummary {
            name: self.name.to_string(),
            total_area: self.total_area(),
            color: first.fill().to_string(),
            part_count: self.parts.len(),
            anchor_x: first.x,
            anchor_y: first.y,
        }
    }
}

/// Group rooms by name, keeping groups in order of first appearance and
/// parts in floor order.
pub fn group_rooms(rooms: &[Room]) -> Vec<RoomGroup<'_>> {
    let mut groups: Vec<RoomGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for r in rooms {
        if let Some(i) = index.get(r.name.as_str()) {
            groups[*i].parts.push(r);
        } else {
            index.insert(r.name.as_str(), groups.len());
            groups.push(RoomGroup {
                name: r.name.as_str(),
                parts: vec![r],
            });
        }
    }
    groups
}

/// Sidebar row for one logical room. Colour and position come from the
/// group's first-listed part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomGroupSummary {
    pub name: String,
    pub total_area: f64,
    pub color: String,
    pub part_count: usize,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

impl RoomGroupSummary {
    /// Position line shown under the name: coordinates for simple rooms,
    /// a marker for multi-part ones.
    pub fn position_text(&self) -> String {
        if self.part_count > 1 {
            "Complex Shape".to_string()
        } else {
            format!("X: {}' | Y: {}'", fmt_feet(self.anchor_x), fmt_feet(self.anchor_y))
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorSummary {
    pub id: String,
    pub name: String,
    pub groups: Vec<RoomGroupSummary>,
}

pub fn floor_summary(floor: &Floor) -> FloorSummary {
    FloorSummary {
        id: floor.id.clone(),
        name: floor.name.clone(),
        groups: group_rooms(&floor.rooms)
            .iter()
            .map(RoomGroup::summary)
            .collect(),
    }
}

pub fn floor_summaries(layout: &HouseLayout) -> Vec<FloorSummary> {
    layout.floors.iter().map(floor_summary).collect()
}

/// Sum of every room's area across all floors.
pub fn grand_total(layout: &HouseLayout) -> f64 {
    layout.floors.iter().map(Floor::area).sum()
}

/// Area split between the main house and the accessory dwelling unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaTotals {
    pub main: f64,
    pub adu: f64,
}

impl AreaTotals {
    pub fn of(layout: &HouseLayout) -> Self {
        let mut t = AreaTotals::default();
        for r in layout.rooms() {
            if r.is_adu() {
                t.adu += r.area();
            } else {
                t.main += r.area();
            }
        }
        t
    }

    pub fn total(&self) -> f64 {
        self.main + self.adu
    }
}

/// Feet as printed on plans: the shortest decimal that reads back as the
/// same value, so integers carry no fraction and nothing is rounded away.
pub fn fmt_feet(v: f64) -> String {
    if v == 0.0 {
        // no "-0"
        return "0".to_string();
    }
    format!("{v}")
}

/// Whole square feet, rounding halves up.
pub fn round_area(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Land;

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
    fn anchor_is_largest_part_and_area_is_summed() {
        let rooms = vec![
            room("a", "Guest", 0.0, 0.0, 4.0, 10.0),
            room("b", "Guest", 4.0, 0.0, 15.0, 20.0),
            room("c", "Guest", 19.0, 0.0, 12.0, 10.0),
        ];
        let groups = group_rooms(&rooms);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].anchor().id, "b");
        assert_eq!(groups[0].total_area(), 460.0);
    }

    #[test]
    fn anchor_ties_keep_first() {
        let rooms = vec![
            room("a", "Hall", 0.0, 0.0, 5.0, 4.0),
            room("b", "Hall", 5.0, 0.0, 4.0, 5.0),
        ];
        assert_eq!(group_rooms(&rooms)[0].anchor().id, "a");
    }

    #[test]
    fn groups_follow_first_appearance() {
        let rooms = vec![
            room("1", "B", 0.0, 0.0, 1.0, 1.0),
            room("2", "A", 0.0, 0.0, 1.0, 1.0),
            room("3", "B", 0.0, 0.0, 1.0, 1.0),
        ];
        let groups = group_rooms(&rooms);
        let names: Vec<_> = groups.iter().map(|g| g.name()).collect();
        assert_eq!(names, ["B", "A"]);
        let ids: Vec<_> = groups[0].parts().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn summary_uses_first_part() {
        let mut a = room("a", "Living", 35.0, 5.0, 10.0, 26.0);
        a.color = Some("#38bdf8".into());
        let b = room("b", "Living", 45.0, 21.0, 5.0, 10.0);
        let floor = Floor {
            id: "f".into(),
            name: "First".into(),
            rooms: vec![a, b],
        };
        let s = floor_summary(&floor);
        let g = &s.groups[0];
        assert_eq!(g.part_count, 2);
        assert_eq!(g.total_area, 310.0);
        assert_eq!(g.color, "#38bdf8");
        assert_eq!((g.anchor_x, g.anchor_y), (35.0, 5.0));
        assert_eq!(g.position_text(), "Complex Shape");
        let v = serde_json::to_value(g).unwrap();
        assert_eq!(v["totalArea"], 310.0);
        assert_eq!(v["partCount"], 2);
    }

    #[test]
    fn adu_split_covers_every_room() {
        let layout = HouseLayout {
            land: Land {
                width: 50.0,
                height: 50.0,
            },
            floors: vec![
                Floor {
                    id: "1".into(),
                    name: "1".into(),
                    rooms: vec![
                        room("main_x", "ADU Room 1", 0.0, 0.0, 10.0, 10.0),
                        room("garage", "Garage", 10.0, 0.0, 20.0, 22.0),
                    ],
                },
                Floor {
                    id: "2".into(),
                    name: "2".into(),
                    rooms: vec![room("adu_bed", "Bedroom", 0.0, 0.0, 3.0, 4.0)],
                },
            ],
        };
        let t = AreaTotals::of(&layout);
        assert_eq!(t.adu, 112.0);
        assert_eq!(t.main, 440.0);
        assert_eq!(t.total(), grand_total(&layout));
        let per_floor: Vec<_> = layout.floors.iter().map(Floor::area).collect();
        assert_eq!(per_floor, [540.0, 12.0]);
        assert_eq!(grand_total(&layout), 552.0);
    }

    #[test]
    fn every_group_has_an_anchor_among_its_parts() {
        let rooms = vec![
            room("1", "A", 0.0, 0.0, 2.0, 2.0),
            room("2", "B", 2.0, 0.0, 3.0, 3.0),
            room("3", "A", 0.0, 2.0, 4.0, 4.0),
        ];
        for g in group_rooms(&rooms) {
            assert!(!g.parts().is_empty());
            assert!(g.parts().iter().any(|r| std::ptr::eq(*r, g.anchor())));
        }
        assert!(group_rooms(&[]).is_empty());
    }

    #[test]
    fn feet_formatting() {
        assert_eq!(fmt_feet(20.0), "20");
        assert_eq!(fmt_feet(7.5), "7.5");
        assert_eq!(fmt_feet(3.125), "3.125");
        assert_eq!(fmt_feet(12.3456), "12.3456");
        assert_eq!(fmt_feet(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(fmt_feet(-0.0), "0");
        assert_eq!(fmt_feet(-2.5), "-2.5");
        assert_eq!(round_area(459.5), 460);
        assert_eq!(round_area(459.4), 459);
    }
}
