//! Rolling Logger
//!
//! File logging for the desktop shell. Records go through a `tracing`
//! subscriber (with `log` records bridged) into a size-capped set of files:
//! `{app}.log` is the active file, `{app}.1.log` .. `{app}.{N-1}.log` are older
//! generations and the oldest one is dropped on rotation. The most recent lines
//! are also kept in an in-memory circular buffer.

use std::collections::VecDeque;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 3;
pub const DEFAULT_BUFFER_LINES: usize = 200;

static LOGGER: OnceLock<RollingFileWriter> = OnceLock::new();

#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    AlreadyInitialized,
    NotInitialized,
    Subscriber(String),
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "Log file error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "Logger already initialized"),
            LoggerError::NotInitialized => write!(f, "Logger not initialized"),
            LoggerError::Subscriber(msg) => write!(f, "Failed to install subscriber: {}", msg),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<io::Error> for LoggerError {
    fn from(e: io::Error) -> Self {
        LoggerError::Io(e)
    }
}

/// Limits for the rolling file set
#[derive(Debug, Clone, Copy)]
pub struct RollingOptions {
    /// Rotate once the active file would grow past this size
    pub max_bytes: u64,
    /// Files kept, including the active one
    pub max_files: usize,
    /// Lines kept in memory
    pub buffer_lines: usize,
}

impl Default for RollingOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_files: DEFAULT_MAX_FILES,
            buffer_lines: DEFAULT_BUFFER_LINES,
        }
    }
}

/// Size-rotated log file writer, cheap to clone
#[derive(Clone)]
pub struct RollingFileWriter {
    inner: Arc<Mutex<WriterState>>,
}

struct WriterState {
    dir: PathBuf,
    prefix: String,
    options: RollingOptions,
    file: File,
    written: u64,
    recent: VecDeque<String>,
    partial: String,
}

impl RollingFileWriter {
    pub fn open(dir: impl AsRef<Path>, prefix: &str, options: RollingOptions) -> Result<Self, LoggerError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        let active = log_path(&dir, prefix, 0);
        let file = OpenOptions::new().create(true).append(true).open(&active)?;
        let written = file.metadata()?.len();

        Ok(Self {
            inner: Arc::new(Mutex::new(WriterState {
                dir,
                prefix: prefix.to_string(),
                options,
                file,
                written,
                recent: VecDeque::new(),
                partial: String::new(),
            })),
        })
    }

    pub fn active_path(&self) -> PathBuf {
        match self.inner.lock() {
            Ok(state) => log_path(&state.dir, &state.prefix, 0),
            Err(poisoned) => {
                let state = poisoned.into_inner();
                log_path(&state.dir, &state.prefix, 0)
            }
        }
    }

    /// Most recent complete lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|state| state.recent.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        state.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        state.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingFileWriter {
    type Writer = RollingFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl WriterState {
    fn write_record(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + buf.len() as u64 > self.options.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        self.remember(buf);
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let keep = self.options.max_files.max(1);

        let oldest = log_path(&self.dir, &self.prefix, keep - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (0..keep - 1).rev() {
            let from = log_path(&self.dir, &self.prefix, index);
            if from.exists() {
                fs::rename(&from, log_path(&self.dir, &self.prefix, index + 1))?;
            }
        }

        let active = log_path(&self.dir, &self.prefix, 0);
        self.file = OpenOptions::new().create(true).write(true).truncate(true).open(active)?;
        self.written = 0;
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            self.recent.push_back(line.trim_end().to_string());
            while self.recent.len() > self.options.buffer_lines {
                self.recent.pop_front();
            }
        }
    }
}

fn log_path(dir: &Path, prefix: &str, index: usize) -> PathBuf {
    if index == 0 {
        dir.join(format!("{}.log", prefix))
    } else {
        dir.join(format!("{}.{}.log", prefix, index))
    }
}

/// Local wall-clock timestamps
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the global logger writing under `log_dir` as `{app_name}.log`
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, RollingOptions::default())
}

pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    options: RollingOptions,
) -> Result<(), LoggerError> {
    let writer = RollingFileWriter::open(log_dir, app_name, options)?;
    LOGGER
        .set(writer.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Info)
            .with_tag(app_name),
    );

    #[cfg(not(target_os = "android"))]
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_timer(LocalTimer)
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    log::info!("{} logger initialized", app_name);
    Ok(())
}

fn ensure_init() -> Result<(), LoggerError> {
    LOGGER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_init()?;
    log::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), LoggerError> {
    ensure_init()?;
    log::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_init()?;
    log::error!("{}", msg);
    Ok(())
}

/// Recent lines of the global logger (empty before init)
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(|w| w.recent_lines()).unwrap_or_default()
}

/// Active file of the global logger (`None` before init)
pub fn active_log_path() -> Option<PathBuf> {
    LOGGER.get().map(|w| w.active_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(max_bytes: u64, max_files: usize, buffer_lines: usize) -> RollingOptions {
        RollingOptions { max_bytes, max_files, buffer_lines }
    }

    #[test]
    fn test_rotation_keeps_newest_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingFileWriter::open(dir.path(), "app", options(32, 3, 10)).unwrap();

        for i in 0..10 {
            writer.write_all(format!("line number {:02}\n", i).as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert!(dir.path().join("app.log").exists());
        assert!(dir.path().join("app.1.log").exists());
        assert!(dir.path().join("app.2.log").exists());
        assert!(!dir.path().join("app.3.log").exists());

        let active = fs::read_to_string(writer.active_path()).unwrap();
        assert!(active.contains("line number 09"));
        assert!(active.len() as u64 <= 32);
    }

    #[test]
    fn test_buffer_keeps_recent_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingFileWriter::open(dir.path(), "app", options(1024, 2, 2)).unwrap();

        writer.write_all(b"first\nsecond\n").unwrap();
        writer.write_all(b"thi").unwrap();
        writer.write_all(b"rd\n").unwrap();

        assert_eq!(writer.recent_lines(), vec!["second".to_string(), "third".to_string()]);
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut writer = RollingFileWriter::open(dir.path(), "app", RollingOptions::default()).unwrap();
            writer.write_all(b"before\n").unwrap();
        }
        let mut writer = RollingFileWriter::open(dir.path(), "app", RollingOptions::default()).unwrap();
        writer.write_all(b"after\n").unwrap();

        let content = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert_eq!(content, "before\nafter\n");
    }

    #[test]
    fn test_helpers_require_init() {
        assert!(matches!(info("hello"), Err(LoggerError::NotInitialized)));
        assert!(matches!(error("hello"), Err(LoggerError::NotInitialized)));
        assert!(recent_lines().is_empty());
        assert!(active_log_path().is_none());
    }
}
