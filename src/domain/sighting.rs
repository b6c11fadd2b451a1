use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Truthiness shared by every scorer and filter.
///
/// Absent values, `null`, `false`, zero, empty strings and empty containers
/// carry no signal; anything else does.
pub trait Signal {
    fn is_signal(&self) -> bool;
}

impl Signal for Value {
    fn is_signal(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(fields) => !fields.is_empty(),
        }
    }
}

impl Signal for f64 {
    fn is_signal(&self) -> bool {
        *self != 0.0
    }
}

impl Signal for i64 {
    fn is_signal(&self) -> bool {
        *self != 0
    }
}

impl Signal for String {
    fn is_signal(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Signal> Signal for Option<T> {
    fn is_signal(&self) -> bool {
        self.as_ref().map_or(false, |v| v.is_signal())
    }
}

/// One enriched sighting as it appears in the input file.
///
/// Every field is optional. Values of an unexpected JSON type are read as
/// absent rather than failing the whole load. The input object is kept as
/// read so pass-through fields reach the database unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSighting {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub local_sidereal_time: Option<Value>,
    pub date_time: Option<String>,
    pub duration_seconds: Option<f64>,
    pub shape: Option<String>,
    pub witness_count: Option<i64>,

    pub city: Option<String>,
    pub state: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
    pub source_id: Option<String>,

    // Effects
    pub physical_effects: Option<Value>,
    pub physiological_effects: Option<Value>,
    pub em_interference: Option<Value>,

    // Geophysical
    pub earthquake_nearby: Option<Value>,

    // Geomagnetic
    pub geomagnetic_storm: Option<Value>,

    // Confounds
    pub airport_nearby_km: Option<f64>,
    pub military_base_nearby_km: Option<f64>,

    original: Map<String, Value>,
}

impl<'de> Deserialize<'de> for RawSighting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_fields(fields))
    }
}

impl RawSighting {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            latitude: lenient::number(fields.get("latitude")),
            longitude: lenient::number(fields.get("longitude")),
            local_sidereal_time: lenient::value(fields.get("local_sidereal_time")),
            date_time: lenient::text(fields.get("date_time")),
            duration_seconds: lenient::number(fields.get("duration_seconds")),
            shape: lenient::text(fields.get("shape")),
            witness_count: lenient::count(fields.get("witness_count")),
            city: lenient::text(fields.get("city")),
            state: lenient::text(fields.get("state")),
            description: lenient::text(fields.get("description")),
            source: lenient::text(fields.get("source")),
            source_id: lenient::text(fields.get("source_id")),
            physical_effects: lenient::value(fields.get("physical_effects")),
            physiological_effects: lenient::value(fields.get("physiological_effects")),
            em_interference: lenient::value(fields.get("em_interference")),
            earthquake_nearby: lenient::value(fields.get("earthquake_nearby")),
            geomagnetic_storm: lenient::value(fields.get("geomagnetic_storm")),
            airport_nearby_km: lenient::number(fields.get("airport_nearby_km")),
            military_base_nearby_km: lenient::number(fields.get("military_base_nearby_km")),
            original: fields,
        }
    }

    /// The input value for `key` exactly as read, `None` when absent or null.
    pub fn original(&self, key: &str) -> Option<Value> {
        lenient::value(self.original.get(key))
    }

    pub fn has_physiological_effects(&self) -> bool {
        self.physiological_effects.is_signal()
    }

    pub fn has_physical_effects(&self) -> bool {
        self.physical_effects.is_signal()
    }

    pub fn has_em_interference(&self) -> bool {
        self.em_interference.is_signal()
    }

    pub fn has_earthquake_nearby(&self) -> bool {
        self.earthquake_nearby.is_signal()
    }

    pub fn has_geomagnetic_storm(&self) -> bool {
        self.geomagnetic_storm.is_signal()
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_signal() && self.longitude.is_signal()
    }

    pub fn has_sidereal_time(&self) -> bool {
        self.local_sidereal_time.is_signal()
    }

    pub fn has_source(&self) -> bool {
        self.source.is_signal()
    }

    /// Witness count, zero when unknown.
    pub fn witnesses(&self) -> i64 {
        self.witness_count.unwrap_or(0)
    }

    pub fn has_multiple_witnesses(&self) -> bool {
        self.witnesses() > 1
    }

    /// Duration in seconds, zero when unknown.
    pub fn duration(&self) -> f64 {
        self.duration_seconds.unwrap_or(0.0)
    }

    /// Coordinates plus sidereal time: enough to place the sighting on the sky.
    pub fn is_tier_one(&self) -> bool {
        self.has_coordinates() && self.has_sidereal_time()
    }

    /// At least one corroborating effect or more than one witness.
    pub fn is_high_signal(&self) -> bool {
        self.has_physiological_effects()
            || self.has_em_interference()
            || self.has_earthquake_nearby()
            || self.has_multiple_witnesses()
    }
}

/// Field readers that degrade to `None` instead of rejecting the record.
mod lenient {
    use super::Signal;
    use serde_json::Value;

    pub fn value(value: Option<&Value>) -> Option<Value> {
        value.filter(|v| !v.is_null()).cloned()
    }

    pub fn number(value: Option<&Value>) -> Option<f64> {
        match value? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    pub fn count(value: Option<&Value>) -> Option<i64> {
        match value? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
            }
            _ => None,
        }
    }

    /// Strings pass through; truthy numbers and `true` are stringified.
    /// `false` and zero read as absent, like any other value without signal.
    pub fn text(value: Option<&Value>) -> Option<String> {
        match value? {
            Value::String(s) => Some(s.clone()),
            v @ (Value::Number(_) | Value::Bool(_)) if v.is_signal() => Some(v.to_string()),
            _ => None,
        }
    }
}
