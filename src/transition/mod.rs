//! Keyed reconciliation of rendered elements and their time-based
//! enter/update/exit animations.

mod join;
mod scene;
mod track;

pub use join::Join;
pub use scene::{
    BarHit, BarSnapshot, JoinStats, ReconcileStats, RowSnapshot, Scene, Snapshot, TextSnapshot,
};
pub use track::{Track, ease_cubic_in_out, interpolate};
