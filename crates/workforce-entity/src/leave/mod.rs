//! Leave request entities.

pub mod kind;
pub mod model;
pub mod status;

pub use kind::LeaveType;
pub use model::{CreateLeave, LeaveFilter, LeaveRequest, LeaveView};
pub use status::{LeaveDecision, LeaveStatus};
