pub const XITI_DOMAIN: &str = "xiti.com";
pub const HIT_PATH: &str = "/hit.xiti";
pub const COLLECTOR_SCHEME: &str = "http";

pub const ENV_PREFIX: &str = "XITI";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_FILE_NAME: &str = "xiti-tag.log";

pub const WORKER_THREAD_NAME: &str = "xiti-delivery";

// prefix of the `os` parameter, followed by the OS release
pub const OS_NAME_PREFIX: &str = "android-";
