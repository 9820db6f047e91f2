pub mod clock;

pub use clock::{PlaybackClock, PlaybackState, SimulatedClock};
