pub mod cache;
pub mod clock;

pub use cache::{CachedResponse, ResponseCache, DEFAULT_TTL_SECS};
pub use clock::{Clock, ManualClock, SystemClock};
