use serde::Serialize;

use crate::constants::GENERIC_SHAPES;
use crate::domain::{RawSighting, TriageStatus};

pub const MAX_TRIAGE_SCORE: u8 = 10;
pub const MAX_CONFOUND_SCORE: u8 = 100;

/// Scores computed for one sighting during triage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TriageAssessment {
    /// Evidence quality, 0 to 10
    pub triage_score: u8,
    /// Likelihood of a conventional explanation, 0 to 100
    pub confound_score: u8,
    pub status: TriageStatus,
}

impl TriageAssessment {
    pub fn assess(record: &RawSighting) -> Self {
        let triage_score = triage_score(record);
        let confound_score = confound_score(record);
        Self {
            triage_score,
            confound_score,
            status: classify(triage_score, confound_score),
        }
    }

    pub fn notes(&self) -> String {
        format!(
            "Batch import. Quality: {}/{}, Confound: {}%",
            self.triage_score, MAX_TRIAGE_SCORE, self.confound_score
        )
    }
}

/// Ranking heuristic used to pick which sightings to import first.
///
/// Unbounded above; only meaningful relative to other records.
pub fn quality_score(record: &RawSighting) -> u32 {
    let mut score = 0u32;

    if record.has_physiological_effects() {
        score += 3;
    }
    if record.has_em_interference() {
        score += 3;
    }
    if record.has_earthquake_nearby() {
        score += 2;
    }
    if record.has_geomagnetic_storm() {
        score += 2;
    }
    if record.has_multiple_witnesses() {
        score += record.witnesses().min(3) as u32;
    }
    if record.duration() > 60.0 {
        score += 1;
    }
    if let Some(shape) = record.shape.as_deref() {
        if !shape.is_empty() && !GENERIC_SHAPES.contains(&shape) {
            score += 1;
        }
    }

    score
}

/// Evidence quality in `0..=10`.
pub fn triage_score(record: &RawSighting) -> u8 {
    let mut score = 0i64;

    if record.has_coordinates() {
        score += 3;
    }
    if record.has_multiple_witnesses() {
        score += (record.witnesses() - 1).min(2);
    }
    if record.duration() > 0.0 {
        score += 1;
    }
    if record.has_physical_effects() || record.has_physiological_effects() {
        score += 2;
    }
    if record.has_em_interference() {
        score += 1;
    }
    if record.has_source() {
        score += 1;
    }

    score.clamp(0, MAX_TRIAGE_SCORE as i64) as u8
}

/// Likelihood of a conventional explanation in `0..=100`.
///
/// Proximity to airports and military bases raises it; reported effects on
/// people or electronics lower it.
pub fn confound_score(record: &RawSighting) -> u8 {
    let mut score = 0i32;

    if let Some(km) = record.airport_nearby_km {
        if km < 10.0 {
            score += 40;
        } else if km < 30.0 {
            score += 25;
        } else if km < 50.0 {
            score += 10;
        }
    }
    if let Some(km) = record.military_base_nearby_km {
        if km < 30.0 {
            score += 30;
        } else if km < 50.0 {
            score += 15;
        }
    }
    if record.has_physiological_effects() {
        score -= 20;
    }
    if record.has_em_interference() {
        score -= 15;
    }

    score.clamp(0, MAX_CONFOUND_SCORE as i32) as u8
}

/// `Verified` wins over `Provisional`; `Pending` is the fallback.
pub fn classify(triage_score: u8, confound_score: u8) -> TriageStatus {
    if triage_score >= 7 && confound_score < 30 {
        TriageStatus::Verified
    } else if triage_score >= 4 || confound_score < 50 {
        TriageStatus::Provisional
    } else {
        TriageStatus::Pending
    }
}
