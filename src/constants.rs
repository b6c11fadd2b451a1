//! Process-wide defaults for an import run.
//! `ImportConfig::default()` is built from these; files and flags override them.

use uuid::Uuid;

/// Owner recorded on every imported investigation (the nil UUID).
pub const SYSTEM_USER_ID: Uuid = Uuid::nil();

pub const INVESTIGATION_TYPE: &str = "ufo";
pub const DEFAULT_TABLE: &str = "aletheia_investigations";

pub const DEFAULT_BATCH_SIZE: usize = 500;
pub const DEFAULT_MAX_RECORDS: usize = 5000;

// Relative to $HOME
pub const DEFAULT_INPUT_FILE: &str = "~/Desktop/ufo-data-prep/outputs/ufo_sightings_enriched.json";
pub const DEFAULT_CONFIG_FILE: &str = "ufo_import.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

// Environment variable names
pub const ENV_PUBLIC_URL: &str = "NEXT_PUBLIC_SUPABASE_URL";
pub const ENV_URL: &str = "SUPABASE_URL";
pub const ENV_PROJECT_REF: &str = "SUPABASE_PROJECT_REF";
pub const ENV_SERVICE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";

// Text limits
pub const DEFAULT_TEXT_LEN: usize = 500;
pub const TITLE_MAX_LEN: usize = 200;
pub const CITY_MAX_LEN: usize = 50;
pub const STATE_MAX_LEN: usize = 20;
pub const SHAPE_MAX_LEN: usize = 20;

pub const UNKNOWN: &str = "Unknown";
pub const DEFAULT_DESCRIPTION: &str = "UFO sighting report";

/// Shapes too generic to count toward the quality ranking.
pub const GENERIC_SHAPES: [&str; 3] = ["unknown", "other", "light"];
