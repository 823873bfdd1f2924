//! Placement of diagram nodes.
//!
//! Positions come from two sources: a layout saved by a previous editing
//! session, or the default row/column grid with collision avoidance.

pub mod positioning;

pub use positioning::{PositionResolver, PriorPositions, RowCursor};
