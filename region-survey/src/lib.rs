//! Region survey engine for labeled rectangular grids.
//!
//! Partitions a grid into maximal 4-connected regions of identical label and
//! computes, per region, its area, its perimeter (exposed edges), and its
//! number of distinct straight sides (collinear boundary runs counted once).
//! Regions are priced as area × sides, with area × perimeter kept as the
//! simpler cross-check variant.

pub mod direction;
pub mod events;
pub mod grid;
pub mod region;
pub mod trace;

pub use direction::{Direction, SideSet};
pub use events::{ChannelSink, NullSink, TraceEvent, TraceSink};
pub use grid::{Grid, Position, SurveyError};
pub use region::{Region, Survey};
pub use trace::{survey, survey_with};
