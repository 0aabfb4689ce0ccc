use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("unable to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("snapshot encoding failed: {0}")]
    Encode(serde_json::Error),
    #[error("snapshot {path:?} is malformed: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Directory that holds `path`, treating a bare file name as the cwd.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Replaces `path` with `contents` without ever exposing a truncated file.
///
/// The bytes go to a temp file next to the target, are synced, then renamed
/// over it. On failure the previous file is left untouched.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), PersistError> {
    let io_err = |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = parent_dir(path);
    fs::create_dir_all(&dir).map_err(io_err)?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
    tmp.write_all(contents.as_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|err| io_err(err.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("out.txt");
        write_atomic(&path, "first").expect("first write");
        write_atomic(&path, "second").expect("second write");
        assert_eq!(fs::read_to_string(&path).expect("read back"), "second");
        let leftovers = fs::read_dir(path.parent().expect("parent"))
            .expect("list dir")
            .count();
        assert_eq!(leftovers, 1, "temp file must not linger");
    }

    #[test]
    fn failed_write_keeps_previous_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("taken");
        fs::create_dir(&target).expect("make dir");
        fs::write(target.join("keep.txt"), "old").expect("seed");

        let err = write_atomic(&target, "new").expect_err("directory target must fail");
        assert!(matches!(err, PersistError::Io { .. }));
        assert_eq!(
            fs::read_to_string(target.join("keep.txt")).expect("read seed"),
            "old"
        );
    }

    #[test]
    fn bare_file_name_uses_current_dir() {
        assert_eq!(parent_dir(Path::new("README.md")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("out/a.json")), PathBuf::from("out"));
    }
}
