pub const DEFAULT_QUALITY: u8 = 85;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

pub const DEFAULT_MAX_WIDTH: u32 = 1920;

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;
pub const OXIPNG_PRESET: u8 = 4;

/// Background used when an alpha channel has to be dropped.
pub const DEFAULT_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Extensions picked up by the directory walker (compared lowercase).
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp", "tiff"];

pub const OUTPUT_DIR_PREFIX: &str = "compress-";
pub const ORIGINALS_DIR_NAME: &str = "originals";
pub const NO_LIMIT_LABEL: &str = "orig";

pub const RANDOM_NAME_SUFFIX: &str = "-compress";
pub const RANDOM_TOKEN_MIN: u32 = 10_000;
pub const RANDOM_TOKEN_MAX: u32 = 99_999;
pub const RANDOM_TOKEN_RETRIES: usize = 32;
pub const NAME_PLACEHOLDER: &str = "_";

pub const REPORT_FILE_PREFIX: &str = "compression_report_";
pub const REPORT_FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";
pub const REPORT_HEADER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const REPORT_RULE_WIDTH: usize = 60;

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
pub const PROGRESS_CHARS: &str = "█▓░";

// Common output message prefixes
pub const SIZE_PREFIX: &str = "📊";
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️ ";
pub const ERROR_PREFIX: &str = "❌";
pub const INFO_PREFIX: &str = "📋";
pub const FOLDER_PREFIX: &str = "📁";
pub const RATIO_PREFIX: &str = "🎯";
