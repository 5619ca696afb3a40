//! Application-level configuration constants.

use log::LevelFilter;

// Submission target
pub const SUBMIT_ENDPOINT: &str = "/confirm";
pub const SUBMIT_METHOD: &str = "post";
pub const SUBMIT_ENCTYPE: &str = "multipart/form-data";

// Numeric thickness input constraints
pub const THICKNESS_STEP: &str = "0.1";
pub const THICKNESS_MIN: &str = "0.1";

// File input filter
pub const ACCEPTED_IMAGE_TYPES: &str = "image/*";

// Logging
pub const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// Element ids. The preset selector has an id but no name, so the browser
// never submits it.
pub const IMAGE_INPUT_ID: &str = "image";
pub const PRESET_SELECT_ID: &str = "thickness_preset";
pub const THICKNESS_INPUT_ID: &str = "thickness";
pub const UNIT_SELECT_ID: &str = "unit";
pub const NOTES_INPUT_ID: &str = "notes";
pub const TERMS_INPUT_ID: &str = "terms";
