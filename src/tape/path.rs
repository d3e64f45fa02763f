use std::path::{Path, PathBuf};

use crate::error::TapError;

/// Pick the output path for `input`, refusing to overwrite the input itself.
///
/// Without an explicit `output`, every `.wav` in the input path becomes `.tap`.
/// An existing output is also compared by canonical path, so aliases such as
/// `dir/sub/../game.wav` are caught.
pub fn resolve_output_path(input: &Path, output: Option<&Path>) -> Result<PathBuf, TapError> {
    let out = match output {
        Some(path) => path.to_path_buf(),
        None => derive_output_path(input),
    };

    if out == input || (out.exists() && same_file(input, &out)) {
        return Err(TapError::OutputCollision { path: out });
    }
    Ok(out)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

pub fn derive_output_path(input: &Path) -> PathBuf {
    PathBuf::from(input.to_string_lossy().replace(".wav", ".tap"))
}
