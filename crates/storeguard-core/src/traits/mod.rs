pub mod clock;
pub mod config_source;
pub mod notifier;
pub mod records;

pub use clock::{Clock, SystemClock};
pub use config_source::{ConfigSource, StaticConfigSource};
pub use notifier::NotificationSink;
pub use records::RecordStore;
