//! Log sinks for the binary. The library itself only emits `tracing` events.

use std::{
    fs::{self, File, OpenOptions},
    io,
    path::Path,
    sync::Mutex,
};

use tracing_subscriber::fmt::{
    self,
    format::{DefaultFields, Format},
};

use crate::utils;

pub const DEFAULT_LOG_FILE: &str = "hackathon-finder.log";

/// Filter used when `HACKATHON_FINDER_LOG` is unset.
pub fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("hackathon_finder_lib={level}")
}

/// Opens the run log for appending, creating it and its directory if needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    fs::create_dir_all(utils::parent_dir(path))?;
    OpenOptions::new().create(true).append(true).open(path)
}

/// Plain-text layer writing to the run log.
pub fn file_layer<S>(file: File) -> fmt::Layer<S, DefaultFields, Format, Mutex<File>> {
    fmt::layer().with_ansi(false).with_writer(Mutex::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::prelude::*;

    fn log_run(path: &Path, message: &str) {
        let file = open_log_file(path).expect("open log file");
        let subscriber = tracing_subscriber::registry().with(file_layer(file));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(source = "devpost", "{message}");
        });
    }

    #[test]
    fn run_log_accumulates_across_runs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("logs").join("hackathon-finder.log");
        log_run(&path, "first update");
        log_run(&path, "second update");

        let contents = fs::read_to_string(&path).expect("read log");
        let first = contents.find("first update").expect("first run logged");
        let second = contents.find("second update").expect("second run logged");
        assert!(first < second);
        assert!(contents.contains("source=\"devpost\""));
        assert!(!contents.contains('\u{1b}'), "no colour codes in the file");
    }

    #[test]
    fn verbose_raises_the_default_level() {
        assert_eq!(default_filter(false), "hackathon_finder_lib=info");
        assert_eq!(default_filter(true), "hackathon_finder_lib=debug");
    }
}
