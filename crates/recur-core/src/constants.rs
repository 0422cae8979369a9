/// Name shared by the binary, its config file and its environment prefix
pub const APP_NAME: &str = "recur";
pub const CONFIG_FILE_NAME: &str = const_str::concat!(APP_NAME, ".toml");
pub const ENV_PREFIX: &str = "RECUR";

/// Ceiling on consecutive periods that yield no candidate before expansion gives up.
pub const DEFAULT_MAX_EMPTY_PERIODS: u32 = 100_000;

/// Result cap applied by the CLI unless configured otherwise.
///
/// Matches the 730-instance ceiling hosted calendars apply to open-ended series.
pub const DEFAULT_MAX_OCCURRENCES: usize = 730;

pub const DEFAULT_LOG_LEVEL: &str = "info";
