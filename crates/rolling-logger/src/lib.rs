//! Rolling Logger
//!
//! Installs a `tracing` subscriber that writes to `<dir>/<app>.log`, rotates
//! the file to `<app>.log.1` once it grows past a size cap, and keeps the most
//! recent lines in memory. Records emitted through the `log` facade are
//! bridged into the same sink.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// Size at which the log file is rotated
pub const MAX_FILE_BYTES: u64 = 2 * 1024 * 1024;
/// Lines kept in the in-memory ring
pub const RECENT_CAPACITY: usize = 500;

static SINK: OnceLock<Arc<Mutex<RollingFile>>> = OnceLock::new();

/// Log file with size-capped rotation and a ring of recent lines
pub struct RollingFile {
    path: PathBuf,
    max_bytes: u64,
    file: File,
    written: u64,
    recent: VecDeque<String>,
    capacity: usize,
    /// Text after the last newline, waiting for the rest of its line
    partial: String,
}

impl RollingFile {
    pub fn open(path: &Path, max_bytes: u64, capacity: usize) -> Result<Self, String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| format!("Failed to create log dir: {}", e))?;
        }
        let file = open_append(path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            path: path.to_path_buf(),
            max_bytes,
            file,
            written,
            recent: VecDeque::with_capacity(capacity),
            capacity,
            partial: String::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn recent_lines(&self) -> Vec<String> {
        self.recent.iter().cloned().collect()
    }

    fn rotated_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".1");
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        std::fs::rename(&self.path, self.rotated_path())?;
        self.file = open_append(&self.path).map_err(io::Error::other)?;
        self.written = 0;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(end) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=end).collect();
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            if self.recent.len() == self.capacity {
                self.recent.pop_front();
            }
            self.recent.push_back(line.to_string());
        }
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        self.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> Result<File, String> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Failed to open {}: {}", path.display(), e))
}

/// Handle given to the fmt layer for each event
struct SinkWriter(Arc<Mutex<RollingFile>>);

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).flush()
    }
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the global logger. Call once per process.
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    #[cfg(target_os = "android")]
    {
        let _ = &log_dir;
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Info)
                .with_tag(app_name),
        );
        return Ok(());
    }

    #[cfg(not(target_os = "android"))]
    {
        let path = log_dir.join(format!("{}.log", app_name));
        let sink = Arc::new(Mutex::new(RollingFile::open(&path, MAX_FILE_BYTES, RECENT_CAPACITY)?));
        SINK.set(sink.clone())
            .map_err(|_| "Logger already initialized".to_string())?;

        let writer_sink = sink.clone();
        tracing_subscriber::fmt()
            .with_writer(move || SinkWriter(writer_sink.clone()))
            .with_timer(LocalTime)
            .with_ansi(false)
            .with_target(true)
            .with_max_level(tracing::Level::DEBUG)
            .try_init()
            .map_err(|e| format!("Failed to install subscriber: {}", e))?;

        tracing::info!(app = app_name, path = %path.display(), "logger initialized");
        Ok(())
    }
}

fn ensure_initialized() -> Result<(), String> {
    if SINK.get().is_some() {
        Ok(())
    } else {
        Err("Logger not initialized".to_string())
    }
}

pub fn info(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    log::info!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    log::error!("{}", message);
    Ok(())
}

/// Most recent lines written since start-up, oldest first
pub fn recent_lines() -> Vec<String> {
    SINK.get()
        .map(|sink| sink.lock().unwrap_or_else(|e| e.into_inner()).recent_lines())
        .unwrap_or_default()
}
