//! Header constants and structure

/// Magic bytes identifying a tuplevault container
pub const MAGIC: &[u8; 8] = b"TVAULT\0\0";

/// Current binary format version
pub const VERSION: u32 = 1;

/// Header size in bytes (magic + version + flags)
pub const HEADER_SIZE: usize = 16;

/// Name of the root attribute carrying the data-model version
pub const FILE_VERSION_NAME: &str = "FileVersion";

/// Data-model version stamped into newly created files
pub const FILE_VERSION: &str = "7.0";
