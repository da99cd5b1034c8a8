//! Application-level configuration constants.

use log::LevelFilter;

// Persistence
pub const NAMES_STORAGE_KEY: &str = "christmas_gift_generator_names_v1";
pub const EXPORT_FILENAME: &str = "names.json";
pub const EXPORT_URL_REVOKE_MS: u32 = 1_000;

// Spin timing
pub const SPIN_STEP_MS: u32 = 120;
pub const SPIN_TOTAL_MS: u32 = 6_000;

// Slideshow
pub const SLIDE_INTERVAL_MS: u32 = 4_000;

// Audio cues, one is picked at random for every spin. Paths are relative to
// the served root, e.g. "assets/sounds/jingle-bells.mp3". Empty spins silently.
pub const JINGLE_SOUNDS: &[&str] = &[];

// UI constants
pub const SNOWFLAKE_COUNT: usize = 20;
pub const SNOWFLAKE_DELAY_STEP_SEC: f64 = 0.5;

pub const LOG_LEVEL: LevelFilter = if cfg!(debug_assertions) {
    LevelFilter::Debug
} else {
    LevelFilter::Info
};
