pub mod attendance;
pub mod cache;
pub mod config;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod logging;
pub mod persistence;
pub mod report;
pub mod statistics;
pub mod weekday;

pub use attendance::{AttendanceRecord, Dataset, PersonId, PersonSchedule, Presence};
pub use cache::{DatasetCache, TtlCache};
pub use config::Config;
pub use persistence::{
    MalformedRow, ParseReport, PersistenceError, PersistenceResult, load_dataset_from_csv,
    read_dataset, read_dataset_with_report,
};
pub use report::{Listing, NO_DATA};
pub use statistics::{mean, median};
pub use weekday::{
    StartEnd, group_by_weekday, group_start_end_by_weekday, interval, seconds_since_midnight,
};
