//! Output sink: single JSON document with atomic tmp→rename

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Writes one JSON document to `final_path`.
///
/// The document is written to `<final_path>.tmp` next to the destination,
/// fsynced, then renamed over the final path, so readers only ever see the
/// previous complete file or the new complete file.
#[derive(Debug)]
pub struct JsonSink {
    tmp_path: PathBuf,
    final_path: PathBuf,
    pretty: bool,
}

impl JsonSink {
    pub fn new(final_path: impl Into<PathBuf>) -> Self {
        let final_path = final_path.into();
        let tmp_path = tmp_path_for(&final_path);
        Self {
            tmp_path,
            final_path,
            pretty: false,
        }
    }

    /// Indent output for human reading
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.final_path
    }

    /// Serialize `value` and atomically publish it. Returns bytes written.
    ///
    /// On failure the tmp file is removed and the destination is untouched.
    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<u64> {
        if let Some(parent) = self.final_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Clean up stale tmp file
        if self.tmp_path.exists() {
            log::warn!("Removing stale tmp file: {}", self.tmp_path.display());
            fs::remove_file(&self.tmp_path)?;
        }

        let published = self
            .write_tmp(value)
            .and_then(|bytes| fs::rename(&self.tmp_path, &self.final_path).map(|()| bytes));
        match published {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                let _ = fs::remove_file(&self.tmp_path);
                Err(e)
            }
        }
    }

    fn write_tmp<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<u64> {
        let file = File::create(&self.tmp_path)?;
        let mut writer = BufWriter::new(file);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, value)?;
        } else {
            serde_json::to_writer(&mut writer, value)?;
        }
        writer.write_all(b"\n")?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(file.metadata()?.len())
    }
}

fn tmp_path_for(final_path: &Path) -> PathBuf {
    let mut name = final_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    final_path.with_file_name(name)
}
