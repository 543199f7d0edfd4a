// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Extension sets, destination layout names and tuning constants.

/// Camera RAW formats. Checked before `PROCESSED_EXTENSIONS`.
pub const RAW_EXTENSIONS: [&str; 7] = ["CR2", "NEF", "ARW", "DNG", "ORF", "RAF", "SR2"];

/// Rendered image formats (exports, phone captures, scans).
pub const PROCESSED_EXTENSIONS: [&str; 6] = ["JPG", "JPEG", "PNG", "HEIC", "TIFF", "BMP"];

// Destination layout.
pub const DIR_RAW: &str = "RAW";
pub const DIR_PROCESSED: &str = "Processed";
pub const DIR_OTHER: &str = "Other";
pub const DIR_QUARANTINE: &str = "_QUARANTINE";

/// Format of EXIF `DateTimeOriginal` and `DateTime` values.
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Canonical media file stem, e.g. `20230501_100000`.
pub const CANONICAL_STEM_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Read size while hashing. Bounds memory regardless of file size.
pub const HASH_CHUNK_SIZE: usize = 64 * 1024;

/// Highest collision counter tried before giving up on a file.
pub const MAX_PROBE: u32 = 9999;
