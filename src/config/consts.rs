// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; crime_scrape/0.3)";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const GEOCODE_TIMEOUT_SECS: u64 = 10;
pub const REQUEST_PAUSE_MS: u64 = 300; // be polite, per host

// Pagination
pub const PAGE_MIN_RECORDS: usize = 10; // a short page is the last page
pub const MAX_PAGES: usize = 500;

// Geocoding
pub const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const COORD_DECIMALS: i32 = 7;

// Local files
pub const STORE_DIR: &str = ".store";
pub const DEBUG_LOG: &str = ".store/debug.log";
pub const GEOCODE_CACHE_FILE: &str = "geocode_cache.json";
pub const SCHOOL_CODE_CSV: &str = "2627FederalSchoolCodeList2ndQuarter.csv";
pub const DEFAULT_EXPORTS_DIR: &str = "crime_logs";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const OUTPUT_SEP: char = ',';
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

// Env
pub const ENV_API_KEY: &str = "GOOGLE_MAPS_API_KEY";
pub const ENV_CACHE: &str = "CRIME_SCRAPE_CACHE";
pub const ENV_OUT_DIR: &str = "CRIME_SCRAPE_OUT";
pub const ENV_EXPORTS_DIR: &str = "CRIME_SCRAPE_EXPORTS";
pub const ENV_SCHOOL_CODES: &str = "CRIME_SCRAPE_SCHOOL_CODES";
