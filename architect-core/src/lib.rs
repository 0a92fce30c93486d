//! Layout data model and editing session for the floor-plan editor.
//!
//! Everything here is plain data plus pure functions; rendering lives in
//! `blueprint-core` and the network call lives with the host.

pub mod groups;
pub mod model;
pub mod session;
pub mod starter;
pub mod transform;
pub mod validate;

pub use groups::{
    AreaTotals, FloorSummary, RoomGroup, RoomGroupSummary, floor_summaries, fmt_feet,
    grand_total, group_rooms, round_area,
};
pub use model::{DEFAULT_ROOM_COLOR, Floor, HouseLayout, Land, Room};
pub use session::{ADVISORY_MESSAGE, EditSession, SessionError, Submission};
pub use starter::{SAMPLE_PROMPTS, starter_layout};
pub use transform::{TransformConfig, TransformError, TransformRequest};
pub use validate::LayoutIssue;
