use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A CSV file on disk used for explicit export and import
///
/// Writes are plain overwrites with no temp-file swap; a failure part-way can
/// leave a truncated file behind.
pub struct CsvFile {
    file_path: PathBuf,
}

impl CsvFile {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn exists(&self) -> bool {
        self.file_path.exists()
    }

    /// Read every line of the file (UTF-8), without line terminators
    pub fn read_lines(&self) -> io::Result<Vec<String>> {
        let content = fs::read_to_string(&self.file_path)?;
        Ok(content.lines().map(str::to_string).collect())
    }

    /// Replace the file content, creating missing parent directories first
    pub fn write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.file_path, content)
    }
}
