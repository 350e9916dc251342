pub mod actor;
pub mod notification;
pub mod sweep;

pub use actor::{Actor, Role};
pub use notification::{NotificationKind, NotificationRequest};
pub use sweep::{StepFailure, SweepReport, SweepStep};
