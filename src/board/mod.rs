pub mod state;
pub mod notice;
pub mod store;
pub mod range;

pub use state::{AssignmentMap, ZoneMap};
pub use notice::{copy_to_clipboard, Notice};
pub use store::{reduce, Action, AssignmentStore, BoardState};
pub use range::{RangeAction, RangeState, RangeStore};
