// src/system/fs_ops.rs

use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FsError {
    #[error("Could not read directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not remove '{path}': {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not archive '{path}': {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Zip error while writing '{path}': {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("Unknown step script '{0}'")]
    UnknownScript(String),
}

/// Removes a directory tree. A path that does not exist is not an error.
pub fn remove_folder(path: &Path) -> Result<(), FsError> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            log::debug!("Removed '{}'", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(FsError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Returns the entry names of a directory, sorted.
pub fn list_dir(path: &Path) -> Result<Vec<String>, FsError> {
    let read_dir_error = |source: io::Error| FsError::ReadDir {
        path: path.to_path_buf(),
        source,
    };
    let mut names = fs::read_dir(path)
        .map_err(read_dir_error)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_dir_error)?;
    names.sort();
    Ok(names)
}

/// Creates `path` (and its parents) when it does not exist yet.
pub fn ensure_dir(path: &Path) -> Result<(), FsError> {
    fs::create_dir_all(path).map_err(|source| FsError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
