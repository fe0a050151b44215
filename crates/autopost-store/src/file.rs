//! Corpus file I/O

use crate::StoreError;
use autopost_domain::RawPost;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read a raw corpus: a JSON array of objects, each with a string `text`
///
/// A missing file is reported as [`StoreError::NotFound`] so callers can
/// treat it as a configuration problem.
pub fn read_raw_posts(path: &Path) -> Result<Vec<RawPost>, StoreError> {
    let values: Vec<Value> = read_json(path)?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            match value.get("text") {
                Some(Value::String(_)) => {}
                Some(_) => {
                    return Err(StoreError::InvalidPost {
                        index,
                        reason: "'text' is not a string".to_string(),
                    })
                }
                None => {
                    return Err(StoreError::InvalidPost {
                        index,
                        reason: "missing 'text'".to_string(),
                    })
                }
            }
            serde_json::from_value(value).map_err(|e| StoreError::InvalidPost {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write `value` as pretty JSON, replacing `path` atomically
///
/// The document is written to a temporary file next to `path` and renamed
/// into place, so readers never observe a half-written corpus.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}
