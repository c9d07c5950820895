//! Destination directory handling
//!
//! Every format owns the destination exclusively while it runs. The driver
//! wipes and recreates it between formats so no format sees another's files.

use crate::io::PathContext;
use crate::Result;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};

/// Create the destination (and parents); existing directories are fine
pub fn prepare(destination: &Path) -> Result<()> {
    fs::create_dir_all(destination).at(destination)
}

/// Recursively delete the destination, ignoring every error.
///
/// Removing a destination that does not exist is a no-op.
pub fn remove_quietly(destination: &Path) {
    match fs::remove_dir_all(destination) {
        Ok(()) => log::debug!("Removed {}", destination.display()),
        Err(err) => log::debug!("Ignoring cleanup of {}: {}", destination.display(), err),
    }
}

/// Remove then recreate the destination
pub fn reset(destination: &Path) -> Result<()> {
    remove_quietly(destination);
    prepare(destination)
}

/// Total byte size of every regular file below `destination`
pub fn dir_size(destination: &Path) -> Result<u64> {
    if !destination.exists() {
        return Ok(0);
    }
    let pattern = format!("{}/**/*", Pattern::escape(&destination.to_string_lossy()));

    let mut total = 0u64;
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        let metadata = fs::metadata(&path).at(&path)?;
        if metadata.is_file() {
            total += metadata.len();
        }
    }
    Ok(total)
}

/// Artifacts directly inside `destination` whose name ends in `suffix`,
/// paired with the key they were saved under (the name minus `suffix`).
pub fn artifacts_with_suffix(destination: &Path, suffix: &str) -> Result<Vec<(String, PathBuf)>> {
    let pattern = format!(
        "{}/*{}",
        Pattern::escape(&destination.to_string_lossy()),
        Pattern::escape(suffix)
    );

    let mut artifacts = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        let key = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(suffix))
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        match key {
            Some(key) => artifacts.push((key, path)),
            None => log::debug!("Skipping artifact without a usable key: {}", path.display()),
        }
    }
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        let destination = temp_dir.path().join("data");

        // Never created
        remove_quietly(&destination);
        assert!(!destination.exists());

        prepare(&destination).unwrap();
        fs::write(destination.join("a.npy"), b"x").unwrap();
        remove_quietly(&destination);
        remove_quietly(&destination);
        assert!(!destination.exists());
    }

    #[test]
    fn test_reset_clears_residue() {
        let temp_dir = tempdir().unwrap();
        let destination = temp_dir.path().join("data");

        prepare(&destination).unwrap();
        fs::write(destination.join("stale.npy"), b"old").unwrap();
        reset(&destination).unwrap();

        assert!(destination.is_dir());
        assert_eq!(fs::read_dir(&destination).unwrap().count(), 0);
    }

    #[test]
    fn test_dir_size_is_recursive() {
        let temp_dir = tempdir().unwrap();
        let destination = temp_dir.path().join("data");
        prepare(&destination.join("nested")).unwrap();

        fs::write(destination.join("a.bin"), vec![0u8; 100]).unwrap();
        fs::write(destination.join("nested").join("b.bin"), vec![0u8; 28]).unwrap();
        fs::write(destination.join(".hidden"), vec![0u8; 2]).unwrap();

        assert_eq!(dir_size(&destination).unwrap(), 130);
    }

    #[test]
    fn test_dir_size_of_missing_directory_is_zero() {
        let temp_dir = tempdir().unwrap();
        assert_eq!(dir_size(&temp_dir.path().join("absent")).unwrap(), 0);
    }

    #[test]
    fn test_artifacts_with_suffix() {
        let temp_dir = tempdir().unwrap();
        let destination = temp_dir.path().join("da[ta]");
        prepare(&destination).unwrap();

        for name in ["a.npy", "b.npy", "c.npy.gz", "data.npz", ".npy"] {
            fs::write(destination.join(name), b"").unwrap();
        }

        let mut npy = artifacts_with_suffix(&destination, ".npy").unwrap();
        npy.sort();
        let keys: Vec<&str> = npy.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);

        let gz = artifacts_with_suffix(&destination, ".npy.gz").unwrap();
        assert_eq!(gz.len(), 1);
        assert_eq!(gz[0].0, "c");
        assert_eq!(gz[0].1, destination.join("c.npy.gz"));
    }
}
