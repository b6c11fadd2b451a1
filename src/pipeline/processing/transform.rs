use uuid::Uuid;

use crate::constants::{
    CITY_MAX_LEN, DEFAULT_DESCRIPTION, DEFAULT_TEXT_LEN, INVESTIGATION_TYPE, SHAPE_MAX_LEN,
    STATE_MAX_LEN, TITLE_MAX_LEN, UNKNOWN,
};
use crate::domain::investigation::{
    ConfoundData, EffectData, GeomagneticData, GeophysicalData, LocationData,
};
use crate::domain::{Investigation, RawPayload, RawSighting};
use crate::pipeline::processing::text::{sanitize, truncate_chars};
use crate::pipeline::processing::triage::TriageAssessment;

/// Maps a selected sighting onto an investigations row owned by `user_id`.
pub fn transform_record(record: &RawSighting, user_id: Uuid) -> Investigation {
    let assessment = TriageAssessment::assess(record);

    Investigation {
        user_id,
        investigation_type: INVESTIGATION_TYPE.to_string(),
        title: build_title(record),
        description: build_description(record),
        raw_data: build_raw_payload(record, &assessment),
        triage_score: assessment.triage_score,
        triage_status: assessment.status,
        triage_notes: assessment.notes(),
    }
}

/// `"{shape }UFO - {city}, {state} ({date})"`, capped at 200 characters.
pub fn build_title(record: &RawSighting) -> String {
    let shape = sanitize(record.shape.as_deref(), SHAPE_MAX_LEN);
    let city = sanitize(Some(record.city.as_deref().unwrap_or(UNKNOWN)), CITY_MAX_LEN);
    let state = sanitize(record.state.as_deref(), STATE_MAX_LEN);
    let date = match record.date_time.as_deref() {
        Some(dt) if !dt.is_empty() => truncate_chars(dt, 10),
        _ => UNKNOWN,
    };
    let prefix = if shape.is_empty() { String::new() } else { format!("{} ", shape) };

    let title = format!("{}UFO - {}, {} ({})", prefix, city, state, date);
    truncate_chars(&title, TITLE_MAX_LEN).to_string()
}

pub fn build_description(record: &RawSighting) -> String {
    let desc = sanitize(record.description.as_deref(), DEFAULT_TEXT_LEN);
    if desc.is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        desc
    }
}

/// Groups the input values as read; scores come from the typed view.
pub fn build_raw_payload(record: &RawSighting, assessment: &TriageAssessment) -> RawPayload {
    let field = |key: &str| record.original(key);
    RawPayload {
        date_time: field("date_time"),
        local_sidereal_time: field("local_sidereal_time"),
        duration_seconds: field("duration_seconds"),
        shape: field("shape"),
        witness_count: field("witness_count"),
        location: LocationData {
            city: field("city"),
            state: field("state"),
            country: field("country"),
            latitude: field("latitude"),
            longitude: field("longitude"),
        },
        geophysical: GeophysicalData {
            nearest_fault_line_km: field("nearest_fault_line_km"),
            bedrock_type: field("bedrock_type"),
            piezoelectric_bedrock: field("piezoelectric_bedrock"),
            earthquake_nearby: field("earthquake_nearby"),
            earthquake_count: field("earthquake_count"),
            max_magnitude: field("max_magnitude"),
            population_density: field("population_density"),
        },
        geomagnetic: GeomagneticData {
            kp_index: field("kp_index"),
            kp_max: field("kp_max"),
            geomagnetic_storm: field("geomagnetic_storm"),
        },
        confounds: ConfoundData {
            military_base_nearby_km: field("military_base_nearby_km"),
            airport_nearby_km: field("airport_nearby_km"),
            weather_conditions: field("weather_conditions"),
        },
        effects: EffectData {
            physical_effects: field("physical_effects"),
            physical_effects_desc: field("physical_effects_desc"),
            physiological_effects: field("physiological_effects"),
            physiological_effects_desc: field("physiological_effects_desc"),
            em_interference: field("em_interference"),
            em_interference_desc: field("em_interference_desc"),
        },
        source: field("source"),
        source_id: field("source_id"),
        quality_score: assessment.triage_score,
        confound_score: assessment.confound_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SYSTEM_USER_ID;
    use crate::domain::TriageStatus;
    use serde_json::json;

    fn sighting(value: serde_json::Value) -> RawSighting {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_title_with_shape() {
        let r = sighting(json!({
            "shape": "disk",
            "city": "Reno",
            "state": "NV",
            "date_time": "2020-05-01T00:00:00"
        }));
        assert_eq!(build_title(&r), "disk UFO - Reno, NV (2020-05-01)");
    }

    #[test]
    fn test_title_without_shape_or_date() {
        let r = sighting(json!({"city": "Reno", "state": "NV"}));
        assert_eq!(build_title(&r), "UFO - Reno, NV (Unknown)");

        let blank = sighting(json!({"shape": "   ", "date_time": ""}));
        assert_eq!(build_title(&blank), "UFO - Unknown,  (Unknown)");
    }

    #[test]
    fn test_title_caps_field_lengths() {
        let r = sighting(json!({
            "shape": "x".repeat(40),
            "city": "c".repeat(80),
            "state": "s".repeat(40)
        }));
        let title = build_title(&r);
        assert!(title.starts_with(&format!("{} UFO - ", "x".repeat(20))));
        assert!(title.contains(&format!("{}, {} (", "c".repeat(50), "s".repeat(20))));
        assert!(title.chars().count() <= TITLE_MAX_LEN);
    }

    #[test]
    fn test_description_default() {
        assert_eq!(build_description(&RawSighting::default()), "UFO sighting report");
        let r = sighting(json!({"description": "  \0  "}));
        assert_eq!(build_description(&r), "UFO sighting report");
        let r = sighting(json!({"description": " Hovering lights over the ridge "}));
        assert_eq!(build_description(&r), "Hovering lights over the ridge");
    }

    #[test]
    fn test_transform_record() {
        let r = sighting(json!({
            "latitude": 39.53,
            "longitude": -119.81,
            "local_sidereal_time": 14.2,
            "date_time": "2020-05-01T21:30:00",
            "duration_seconds": 300,
            "shape": "disk",
            "witness_count": 3,
            "city": "Reno",
            "state": "NV",
            "country": "us",
            "description": "Silent disk over the valley",
            "source": "NUFORC",
            "source_id": "abc-1",
            "em_interference": true,
            "em_interference_desc": "car radio static",
            "airport_nearby_km": 45.0
        }));
        let inv = transform_record(&r, SYSTEM_USER_ID);

        assert_eq!(inv.user_id, Uuid::nil());
        assert_eq!(inv.investigation_type, "ufo");
        assert_eq!(inv.title, "disk UFO - Reno, NV (2020-05-01)");
        // 3 coords + 2 witnesses + 1 duration + 1 em + 1 source
        assert_eq!(inv.triage_score, 8);
        // airport 10 - em 15, floored
        assert_eq!(inv.raw_data.confound_score, 0);
        assert_eq!(inv.raw_data.quality_score, 8);
        assert_eq!(inv.triage_status, TriageStatus::Verified);
        assert_eq!(inv.triage_notes, "Batch import. Quality: 8/10, Confound: 0%");
        assert_eq!(inv.raw_data.location.city, Some(json!("Reno")));
        assert_eq!(inv.raw_data.effects.em_interference, Some(json!(true)));
    }

    #[test]
    fn test_falsy_text_fields_carry_no_signal() {
        let r = sighting(json!({
            "source": false,
            "shape": 0,
            "description": false,
            "city": "Reno",
            "state": "NV"
        }));
        let inv = transform_record(&r, SYSTEM_USER_ID);
        assert_eq!(inv.triage_score, 0);
        assert_eq!(crate::pipeline::processing::quality_score(&r), 0);
        assert_eq!(inv.title, "UFO - Reno, NV (Unknown)");
        assert_eq!(inv.description, "UFO sighting report");
    }

    #[test]
    fn test_raw_payload_keeps_input_values() {
        let r = sighting(json!({
            "duration_seconds": 900,
            "witness_count": "3",
            "population_density": 120,
            "airport_nearby_km": 45,
            "city": {"name": "Reno"},
            "source": false
        }));
        let inv = transform_record(&r, SYSTEM_USER_ID);
        let value = serde_json::to_value(&inv.raw_data).unwrap();

        assert_eq!(value["duration_seconds"], json!(900));
        assert_eq!(value["witness_count"], json!("3"));
        assert_eq!(value["geophysical"]["population_density"], json!(120));
        assert_eq!(value["confounds"]["airport_nearby_km"], json!(45));
        assert_eq!(value["location"]["city"], json!({"name": "Reno"}));
        assert_eq!(value["source"], json!(false));

        // scoring still reads the typed view: 2 witnesses, 1 duration
        assert_eq!(inv.triage_score, 3);
        assert_eq!(inv.raw_data.confound_score, 10);
    }

    #[test]
    fn test_raw_payload_keeps_absent_fields_as_null() {
        let inv = transform_record(&RawSighting::default(), SYSTEM_USER_ID);
        let value = serde_json::to_value(&inv).unwrap();

        assert_eq!(value["user_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(value["triage_status"], "provisional");
        assert!(value["raw_data"]["location"]["latitude"].is_null());
        assert!(value["raw_data"]["geomagnetic"].as_object().unwrap().contains_key("kp_index"));
        assert!(value["raw_data"]["confounds"]["weather_conditions"].is_null());
        assert_eq!(value["raw_data"]["confound_score"], 0);
    }
}
