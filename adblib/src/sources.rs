//! Чтение именованных файлов-источников и их склейка по порядку.

use crate::{
    error::{AdbError, Result},
    model::RawRecord,
    traits::ReadRecords,
};
use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

pub fn read_source<F: ReadRecords>(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => AdbError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => AdbError::Io(e),
    })?;
    if file.metadata().map(|m| m.is_dir()).unwrap_or(false) {
        return Err(AdbError::SourceNotFound { path: path.to_path_buf() });
    }

    let records = F::read(BufReader::new(file), &path.display().to_string())?;
    debug!(path = %path.display(), rows = records.len(), "source read");
    Ok(records)
}

/// По вектору строк на файл, в порядке `paths`. Первый же недоступный файл — ошибка.
pub fn load_sources<F: ReadRecords>(paths: &[PathBuf]) -> Result<Vec<Vec<RawRecord>>> {
    let sources = paths
        .iter()
        .map(|p| read_source::<F>(p))
        .collect::<Result<Vec<_>>>()?;
    info!(
        files = sources.len(),
        rows = sources.iter().map(Vec::len).sum::<usize>(),
        "sources loaded"
    );
    Ok(sources)
}
