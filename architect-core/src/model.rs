use serde::{Deserialize, Serialize};

/// Fill used for rooms that carry no colour of their own.
pub const DEFAULT_ROOM_COLOR: &str = "#cbd5e1";

/// Buildable plane shared by every floor, in feet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Land {
    pub width: f64,
    pub height: f64,
}

/// One axis-aligned rectangle. `(x, y)` is the top-left corner in land
/// coordinates; `width` runs along x and `height` along y.
///
/// Several rooms on a floor may share a `name`; together they draw as one
/// logical (e.g. L-shaped) room.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Room {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn fill(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_ROOM_COLOR)
    }

    /// Accessory dwelling unit membership: a name starting with `ADU` or an
    /// id starting with `adu_`. Either rule is enough.
    pub fn is_adu(&self) -> bool {
        self.name.starts_with("ADU") || self.id.starts_with("adu_")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    pub name: String,
    pub rooms: Vec<Room>,
}

impl Floor {
    pub fn area(&self) -> f64 {
        self.rooms.iter().map(Room::area).sum()
    }
}

/// The whole document: exchanged with the transform and re-rendered on
/// every change.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseLayout {
    pub land: Land,
    pub floors: Vec<Floor>,
}

impl HouseLayout {
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.floors.iter().flat_map(|f| f.rooms.iter())
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adu_by_name_or_id() {
        let mut r = Room {
            id: "main_x".into(),
            name: "ADU Room 1".into(),
            ..Default::default()
        };
        assert!(r.is_adu());
        r.name = "Bedroom".into();
        assert!(!r.is_adu());
        r.id = "adu_bed".into();
        assert!(r.is_adu());
        // Prefix rules are case sensitive.
        r.id = "ADU_bed".into();
        r.name = "adu bedroom".into();
        assert!(!r.is_adu());
    }

    #[test]
    fn missing_color_falls_back_to_gray() {
        let r: Room = serde_json::from_str(
            r#"{"id":"a","name":"A","x":0,"y":0,"width":2,"height":3}"#,
        )
        .unwrap();
        assert_eq!(r.fill(), DEFAULT_ROOM_COLOR);
        assert_eq!(r.area(), 6.0);
        assert_eq!(r.right(), 2.0);
        assert_eq!(r.bottom(), 3.0);
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let res = HouseLayout::from_json(
            r#"{"land":{"width":10,"height":10},"floors":[{"id":"f","name":"F","rooms":[{"id":"a","name":"A","x":0,"y":0,"width":2}]}]}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn json_shape_is_stable() {
        let layout = HouseLayout {
            land: Land {
                width: 10.0,
                height: 8.0,
            },
            floors: vec![Floor {
                id: "f1".into(),
                name: "First".into(),
                rooms: vec![Room {
                    id: "r".into(),
                    name: "R".into(),
                    width: 1.0,
                    height: 1.0,
                    ..Default::default()
                }],
            }],
        };
        let v: serde_json::Value = serde_json::from_str(&layout.to_json()).unwrap();
        assert_eq!(v["land"]["width"], 10.0);
        assert_eq!(v["floors"][0]["rooms"][0]["id"], "r");
        assert!(v["floors"][0]["rooms"][0].get("color").is_none());
        assert_eq!(HouseLayout::from_json(&layout.to_json()).unwrap(), layout);
    }
}
