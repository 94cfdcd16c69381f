pub mod schedule;
pub mod session;

pub use schedule::{ScheduledSession, StatKind};
pub use session::{Band, Coord, Metric, SessionRecord};
