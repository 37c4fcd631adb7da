mod frame;
mod rows;
pub mod scale;
pub(crate) mod types;
pub use types::*;

pub use frame::{bar_scale, plan_frame, tick_scale};
pub use rows::{compute_layout, layout_row, layout_rows};
pub use scale::{Scale, make_scale};
