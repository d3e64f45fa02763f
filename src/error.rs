use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TapError {
    #[error("Output path would overwrite the input file: {}", .path.display())]
    OutputCollision { path: PathBuf },

    #[error("Not a C64 TAP file (bad magic)")]
    BadMagic,

    #[error("TAP data truncated: got {len} bytes")]
    Truncated { len: usize },

    #[error("Unsupported TAP version {0}")]
    UnsupportedVersion(u8),

    #[error("TAP payload too large: {0} pulses")]
    PayloadTooLarge(usize),
}
