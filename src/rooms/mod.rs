//! Room assignment core
//!
//! Pure operations over an explicit [`RoomCollection`]: room construction,
//! join resolution, consistency checks and admin views. Nothing here holds
//! ambient state, performs I/O or waits.

pub mod assignment;
pub mod clusters;
pub mod collection;
pub mod consistency;
pub mod factory;

pub use assignment::{resolve_join, JoinOutcome};
pub use clusters::{JointMeeting, RoomCluster};
pub use collection::{RoomCollection, RoomStats};
pub use consistency::{check_consistency, ConsistencyFault};
