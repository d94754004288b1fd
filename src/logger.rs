//! Per-run log file for the batch tool.
//!
//! `init` truncates `<data dir>/ShiftInvert/shiftinvert.log`, so the file only
//! holds the latest run. Until then the `log_*!` macros do nothing, which keeps
//! the library quiet inside hosts that never set up a log.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

struct Sink {
    path: PathBuf,
    file: Mutex<File>,
}

static SINK: OnceLock<Sink> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
    Panic,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Panic => "PANIC",
        })
    }
}

pub fn log_path() -> Option<&'static Path> {
    SINK.get().map(|s| s.path.as_path())
}

/// Append one record. I/O failures are dropped.
pub fn write(level: Level, msg: &str) {
    let Some(sink) = SINK.get() else { return };
    if let Ok(mut file) = sink.file.lock() {
        let _ = writeln!(file, "{}", format_record(now_secs(), level, msg));
    }
}

// Expression-position macros: usable as a bare match arm.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::write($crate::logger::Level::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::write($crate::logger::Level::Warn, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_err {
    ($($arg:tt)*) => {
        $crate::logger::write($crate::logger::Level::Error, &format!($($arg)*))
    };
}

pub fn init() {
    init_at(&data_dir().join("ShiftInvert").join("shiftinvert.log"));
}

/// Open (truncating) the log at `path` and hook panics into it.
/// Later calls in the same process are ignored.
pub fn init_at(path: &Path) {
    if SINK.get().is_some() {
        return;
    }
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = match OpenOptions::new().create(true).write(true).truncate(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("warning: cannot open log file {}: {}", path.display(), e);
            return;
        }
    };
    if SINK
        .set(Sink { path: path.to_path_buf(), file: Mutex::new(file) })
        .is_err()
    {
        return;
    }

    log_info!("shiftinvert {} started (unix {})", env!("CARGO_PKG_VERSION"), now_secs());

    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        write(Level::Panic, &info.to_string());
        prev(info);
    }));
}

fn data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata);
    }
    #[cfg(target_os = "macos")]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join("Library").join("Application Support");
    }
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| std::env::var("HOME").map(|h| PathBuf::from(h).join(".local").join("share")))
        .unwrap_or_else(|_| PathBuf::from("."))
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// `[HH:MM:SS] [LEVEL] msg`, clock taken modulo one UTC day.
fn format_record(secs: u64, level: Level, msg: &str) -> String {
    let day = secs % 86_400;
    format!(
        "[{:02}:{:02}:{:02}] [{}] {}",
        day / 3600,
        (day % 3600) / 60,
        day % 60,
        level,
        msg
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_format() {
        assert_eq!(format_record(3661, Level::Warn, "x"), "[01:01:01] [WARN] x");
        assert_eq!(format_record(86_400 + 59, Level::Info, "y"), "[00:00:59] [INFO] y");
    }

    #[test]
    fn macros_work_in_expression_position() {
        let results: [Result<u8, &str>; 2] = [Ok(1), Err("bad")];
        for r in results {
            match r {
                Ok(v) => crate::log_info!("ok {}", v),
                Err(e) => crate::log_warn!("failed: {}", e),
            }
        }
        let n = 3;
        let logged = if n > 2 { crate::log_err!("n = {}", n) } else { crate::log_info!("small") };
        let () = logged;
    }
}
