use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::error::NavError;

pub struct LogFileWriter {
    file: Arc<Mutex<File>>,
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?
            .flush()
    }
}

/// Hands out writers that share one append-mode log file. Stderr is never a
/// target, since it would draw over the alternate screen.
#[derive(Clone, Debug)]
pub struct SubscriberMakeWriter {
    file: Arc<Mutex<File>>,
}

impl SubscriberMakeWriter {
    /// Append to `path`, creating it if needed.
    pub fn file(path: &Path) -> Result<Self, NavError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
        })
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = LogFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter {
            file: Arc::clone(&self.file),
        }
    }
}

/// Install the global subscriber. With no `log_file` nothing is installed,
/// since stderr would draw over the navbar. Returns whether a subscriber was
/// installed; repeated calls are no-ops.
pub fn init(log_file: Option<&Path>) -> Result<bool, NavError> {
    let Some(path) = log_file else {
        return Ok(false);
    };
    let writer = SubscriberMakeWriter::file(path)?;
    Ok(tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init()
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn file_writer_appends() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nav.log");
        let make = SubscriberMakeWriter::file(&path).expect("open log file");
        make.make_writer().write_all(b"first\n").expect("write");
        let mut second = make.make_writer();
        second.write_all(b"second\n").expect("write");
        second.flush().expect("flush");
        let contents = std::fs::read_to_string(&path).expect("read log");
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn no_log_file_installs_nothing() {
        assert!(!init(None).expect("no-op"));
    }

    #[test]
    fn unopenable_log_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("missing").join("nav.log");
        assert!(matches!(init(Some(&missing)), Err(NavError::Io(_))));
    }
}
