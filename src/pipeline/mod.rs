// Import pipeline stages: ingestion, selection, and per-record processing

pub mod ingestion;
pub mod processing;
pub mod selection;

pub use ingestion::load_sightings;
pub use selection::{select, EffectCounts, Selection};
