//! Destination filename handling for vigbo-dl

use std::path::{Path, PathBuf};

/// Replaces characters that are illegal in filenames on common filesystems
/// with an underscore.
pub fn sanitize_filename(name: &str) -> String {
    name.replace(&['<', '>', ':', '"', '/', '\\', '|', '?', '*'][..], "_")
}

/// Allocates a destination path that does not collide with an existing file.
///
/// If `filename` is free in `folder` it is used as-is; otherwise `name(1).ext`,
/// `name(2).ext`, ... are probed in order until a free name is found. This is a
/// point-in-time check, not a reservation: the batch runs sequentially and each
/// name is claimed immediately before the transfer starts, so files created
/// earlier in the same run are seen.
pub fn unique_path(folder: &Path, filename: &str) -> PathBuf {
    let candidate = folder.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = split_extension(filename);
    let mut counter = 1;
    loop {
        let numbered = match ext {
            Some(ext) => format!("{stem}({counter}).{ext}"),
            None => format!("{stem}({counter})"),
        };
        let candidate = folder.join(numbered);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Splits `photo.zip` into `("photo", Some("zip"))`; names without a dot keep
/// the whole string as the stem.
fn split_extension(filename: &str) -> (&str, Option<&str>) {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    }
}
