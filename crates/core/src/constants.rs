//! Application constants and configuration defaults.

/// Minimum sample length, in characters, handed to the statistical detectors.
/// Shorter samples are tiled up to this length.
pub const MIN_DETECTION_CHARS: usize = 20;

/// Default deployment locale tag.
pub const DEFAULT_LOCALE: &str = "en";

/// Config file name looked up under the user config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "watchline";

/// Base URL for public Telegram links.
pub const TELEGRAM_LINK_BASE: &str = "https://t.me/";

/// Number of leading characters dropped from a `-100…` channel id when
/// building a private channel link.
pub const CHANNEL_ID_PREFIX_LEN: usize = 4;

/// Default `strftime` pattern for compact timestamps.
pub const DEFAULT_TIME_FORMAT: &str = "%Y%m%d%H%M%S";
