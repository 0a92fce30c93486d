use crate::model::HouseLayout;

const STARTER_JSON: &str = include_str!("../../layouts/starter.json");

/// Instructions offered as one-click examples in the editor.
pub const SAMPLE_PROMPTS: [&str; 4] = [
    "Swap the position of the ADU Living room and ADU Room 1 on the 2nd floor.",
    "Expand the garage on the 1st floor to be 25ft wide.",
    "Add a balcony to Bedroom 5 on the 2nd floor facing West.",
    "Make the stairs 10ft wide instead of 5ft.",
];

/// Two-floor 75x60 plot the editor opens with and resets to.
pub fn starter_layout() -> HouseLayout {
    serde_json::from_str(STARTER_JSON).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::{AreaTotals, grand_total};

    #[test]
    fn starter_parses_and_is_valid() {
        let l = starter_layout();
        assert_eq!(l.land.width, 75.0);
        assert_eq!(l.land.height, 60.0);
        assert_eq!(l.floors.len(), 2);
        assert_eq!(l.floors[0].rooms.len(), 7);
        assert_eq!(l.floors[1].rooms.len(), 9);
        assert!(l.validate().is_empty(), "{:?}", l.validate());
    }

    #[test]
    fn starter_area_split() {
        let l = starter_layout();
        let t = AreaTotals::of(&l);
        assert_eq!(t.adu, 710.0);
        assert_eq!(t.main, 2550.0);
        assert_eq!(grand_total(&l), 3260.0);
    }
}
