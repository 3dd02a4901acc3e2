mod macros;

pub mod arc;
pub mod color;
pub mod geometry;
pub mod layout;
pub mod protocol;
pub mod sequence;

pub use arc::ArcSpec;
pub use color::{Swatch, SwatchColor, SwatchId};
pub use geometry::{Direction, Offset, Point};
pub use layout::{Layout, LayoutConfig, compute_layout};
pub use sequence::{
    ConcealTiming, Cue, Plan, RevealTiming, Schedule, ScheduleKind, plan_conceal, plan_reveal,
};
