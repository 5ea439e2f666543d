pub mod round_clock;

pub use round_clock::{RoundClock, format_time};
