use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Row shape of the investigations table.
///
/// Built once per selected sighting and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investigation {
    pub user_id: Uuid,
    pub investigation_type: String,
    pub title: String,
    pub description: String,
    pub raw_data: RawPayload,
    pub triage_score: u8,
    pub triage_status: TriageStatus,
    pub triage_notes: String,
}

/// Triage label assigned at import time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageStatus {
    Verified,
    Provisional,
    Pending,
}

impl TriageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriageStatus::Verified => "verified",
            TriageStatus::Provisional => "provisional",
            TriageStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for TriageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `raw_data` column: input values grouped by theme, unchanged, plus
/// both scores. Absent fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPayload {
    pub date_time: Option<Value>,
    pub local_sidereal_time: Option<Value>,
    pub duration_seconds: Option<Value>,
    pub shape: Option<Value>,
    pub witness_count: Option<Value>,
    pub location: LocationData,
    pub geophysical: GeophysicalData,
    pub geomagnetic: GeomagneticData,
    pub confounds: ConfoundData,
    pub effects: EffectData,
    pub source: Option<Value>,
    pub source_id: Option<Value>,
    /// Same value as the row's `triage_score`.
    pub quality_score: u8,
    pub confound_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub city: Option<Value>,
    pub state: Option<Value>,
    pub country: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeophysicalData {
    pub nearest_fault_line_km: Option<Value>,
    pub bedrock_type: Option<Value>,
    pub piezoelectric_bedrock: Option<Value>,
    pub earthquake_nearby: Option<Value>,
    pub earthquake_count: Option<Value>,
    pub max_magnitude: Option<Value>,
    pub population_density: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeomagneticData {
    pub kp_index: Option<Value>,
    pub kp_max: Option<Value>,
    pub geomagnetic_storm: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfoundData {
    pub military_base_nearby_km: Option<Value>,
    pub airport_nearby_km: Option<Value>,
    pub weather_conditions: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectData {
    pub physical_effects: Option<Value>,
    pub physical_effects_desc: Option<Value>,
    pub physiological_effects: Option<Value>,
    pub physiological_effects_desc: Option<Value>,
    pub em_interference: Option<Value>,
    pub em_interference_desc: Option<Value>,
}
