// Domain data shapes shared across layers

pub mod investigation;
pub mod sighting;

pub use investigation::{Investigation, RawPayload, TriageStatus};
pub use sighting::{RawSighting, Signal};
