//! File logging. Stdout belongs to the terminal UI, so logs go to a file in
//! the platform data directory.

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "plexus.log";
/// Environment variable holding filter directives, e.g. `plexus_field=debug`.
const FILTER_ENV: &str = "PLEXUS_LOG";

/// Install the global subscriber. Logging stays off if the log file can't be
/// opened.
pub fn init(verbose: bool) {
    let Some(path) = plexus_config::data_dir().map(|dir| dir.join(LOG_FILE)) else {
        return;
    };
    let Ok(file) = open_log(&path) else {
        return;
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose, std::env::var(FILTER_ENV).ok()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    if installed.is_ok() {
        tracing::info!(path = %path.display(), "logging started");
    }
}

/// Open `path` for appending, creating it and its directory if needed.
fn open_log(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    File::options().create(true).append(true).open(path)
}

fn filter(verbose: bool, directives: Option<String>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_filter_defaults_to_info() {
        assert_eq!(filter(false, None).to_string(), "info");
    }

    #[test]
    fn test_filter_uses_env_directives() {
        let f = filter(false, Some("plexus_field=trace".to_string()));
        assert_eq!(f.to_string(), "plexus_field=trace");
    }

    #[test]
    fn test_verbose_wins_over_env() {
        let f = filter(true, Some("warn".to_string()));
        assert_eq!(f.to_string(), "debug");
    }

    #[test]
    fn test_open_log_creates_directory_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join(LOG_FILE);

        writeln!(open_log(&path).unwrap(), "first").unwrap();
        writeln!(open_log(&path).unwrap(), "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
