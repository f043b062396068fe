/// Default configuration constants.

/// Session name a fresh gateway starts with.
pub const DEFAULT_SESSION: &str = "default";

/// Default per-request timeout (30 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Config file name searched for in the working directory.
pub const CONFIG_FILE_STEM: &str = "wawebjs";
