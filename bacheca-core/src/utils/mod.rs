pub mod time;

pub use self::time::{format_timestamp, now_utc, parse_timestamp};
