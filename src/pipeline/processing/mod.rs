// Per-record processing: text cleanup, triage scoring, and row shaping

pub mod text;
pub mod transform;
pub mod triage;

pub use transform::transform_record;
pub use triage::{quality_score, TriageAssessment};
