// Wed Jan 14 2026 - Alex

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

/// Something a worker can read submission lines from.
pub trait SubmissionSource: Send + Sync {
    fn name(&self) -> String;

    fn open(&self) -> io::Result<Box<dyn BufRead + Send>>;
}

impl SubmissionSource for PathBuf {
    fn name(&self) -> String {
        self.display().to_string()
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + Send>> {
        open_file(self)
    }
}

fn open_file(path: &Path) -> io::Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)?;
    Ok(Box::new(BufReader::new(file)))
}

/// In-memory source, mostly useful for piping and tests.
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    contents: String,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

impl SubmissionSource for MemorySource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + Send>> {
        Ok(Box::new(Cursor::new(self.contents.clone().into_bytes())))
    }
}
