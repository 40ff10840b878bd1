pub mod bow;
pub mod telemetry;

pub use bow::OwnedOrBorrowed;
