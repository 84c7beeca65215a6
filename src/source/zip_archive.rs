use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use log::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use super::{ImageSource, SourceError};

pub const DEFAULT_PREFIX: &str = "product_images/";

/// Reads images out of a zip file on disk.
///
/// The archive is reopened for every lookup, so replacing the file on disk
/// takes effect for the next request without a restart.
#[derive(Debug, Clone)]
pub struct ZipArchiveSource {
    path: PathBuf,
    prefix: String,
}

impl ZipArchiveSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_prefix(path, DEFAULT_PREFIX)
    }

    pub fn with_prefix(path: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            prefix: prefix.into(),
        }
    }

    fn entry_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}

impl ImageSource for ZipArchiveSource {
    fn open(&self, name: &str) -> Result<Vec<u8>, SourceError> {
        let file = File::open(&self.path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;

        let entry_name = self.entry_name(name);
        let mut entry = match archive.by_name(&entry_name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Err(SourceError::NotFound(name.to_string())),
            Err(e) => return Err(e.into()),
        };

        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data)?;
        debug!("Read {} bytes for '{}' from {}", data.len(), entry_name, self.path.display());

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_archive(dir: &tempfile::TempDir, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.path().join("images.zip");
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        for (name, data) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn reads_prefixed_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(&dir, &[("product_images/shoe.png", b"shoe-bytes")]);

        let source = ZipArchiveSource::new(&path);
        assert_eq!(source.open("shoe.png").unwrap(), b"shoe-bytes");
    }

    #[test]
    fn missing_entry_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(&dir, &[("shoe.png", b"outside the prefix")]);

        let source = ZipArchiveSource::new(&path);
        assert!(matches!(source.open("shoe.png"), Err(SourceError::NotFound(name)) if name == "shoe.png"));
    }

    #[test]
    fn custom_prefix_is_honoured() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(&dir, &[("shoe.png", b"root")]);

        let source = ZipArchiveSource::with_prefix(&path, "");
        assert_eq!(source.open("shoe.png").unwrap(), b"root");
    }

    #[test]
    fn missing_archive_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = ZipArchiveSource::new(dir.path().join("absent.zip"));
        assert!(matches!(source.open("shoe.png"), Err(SourceError::Io(_))));
    }

    #[test]
    fn garbage_archive_is_an_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.zip");
        std::fs::write(&path, b"not a zip file").unwrap();

        let source = ZipArchiveSource::new(&path);
        assert!(matches!(source.open("shoe.png"), Err(SourceError::Archive(_))));
    }
}
