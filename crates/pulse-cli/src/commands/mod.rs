//! Command implementations.

pub mod analytics;
pub mod cameras;
pub mod incidents;
pub mod profile;
pub mod watch;

pub use self::analytics::execute_analytics;
pub use self::cameras::execute_cameras;
pub use self::incidents::execute_incidents;
pub use self::profile::execute_profile;
pub use self::watch::execute_watch;
