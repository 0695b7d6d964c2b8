use chrono::{DateTime, Utc};

/// Represents an entity responsible for providing the current time across the application, so
/// that "now" can be fixed in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Utc>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
