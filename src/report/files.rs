//! Report file naming, cleanup and browser launch.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::infra::CommandSpec;
use crate::report::ReportResult;

/// Extensions owned by the report cleanup
pub const REPORT_EXTENSIONS: [&str; 3] = ["html", "xlsx", "csv"];

/// Timestamp suffix used in report file names
pub fn timestamp_suffix(at: DateTime<Local>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// `<dir>/<prefix><YYYYMMDD_HHMMSS>.<extension>`
pub fn report_path(dir: &Path, prefix: &str, extension: &str, at: DateTime<Local>) -> PathBuf {
    dir.join(format!("{}{}.{}", prefix, timestamp_suffix(at), extension))
}

/// Write `contents` to a fresh timestamped report file, creating `dir` if needed
pub fn write_report(dir: &Path, prefix: &str, extension: &str, contents: &[u8]) -> ReportResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = report_path(dir, prefix, extension, Local::now());
    fs::write(&path, contents)?;
    Ok(path)
}

fn is_old_report(name: &str, prefix: &str) -> bool {
    name.starts_with(prefix)
        && Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| REPORT_EXTENSIONS.contains(&e))
}

/// Delete previous reports of one variant from `dir`.
///
/// Only regular files named `<prefix>*.{html,xlsx,csv}` are touched. A
/// missing directory or an empty match set is not an error. Returns the
/// number of files deleted.
pub fn cleanup_old_reports(dir: &Path, prefix: &str) -> ReportResult<usize> {
    info!("Cleaning up old reports in {}...", dir.display());
    if !dir.exists() {
        info!("No old reports found");
        return Ok(0);
    }

    let mut deleted = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !is_old_report(name, prefix) || !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted {}", path.display());
                deleted += 1;
            }
            Err(e) => warn!("Could not delete {}: {}", path.display(), e),
        }
    }

    if deleted > 0 {
        info!("Cleanup finished: {} old reports deleted", deleted);
    } else {
        info!("No old reports found");
    }
    Ok(deleted)
}

/// `file:///` URL of a report
pub fn file_url(path: &Path) -> ReportResult<String> {
    let absolute = std::path::absolute(path)?;
    let text = absolute.to_string_lossy().replace('\\', "/");
    Ok(format!("file:///{}", text.trim_start_matches('/')))
}

/// Command opening `url`, with the configured browser or the platform default
pub fn browser_command(browser: Option<&str>, url: &str) -> CommandSpec {
    if let Some(browser) = browser {
        let mut parts = browser.split_whitespace();
        let program = parts.next().unwrap_or(browser);
        return CommandSpec::new(program).args(parts).arg(url);
    }

    if cfg!(target_os = "windows") {
        CommandSpec::new("cmd").args(["/c", "start", "chrome", url])
    } else if cfg!(target_os = "macos") {
        CommandSpec::new("open").args(["-a", "Google Chrome", url])
    } else {
        CommandSpec::new("google-chrome").arg(url)
    }
}
