// src/system/archive.rs

use crate::system::fs_ops::FsError;
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, write::FileOptions};

/// Writes a deflated zip of everything under `src` to `dest`.
///
/// Entry names are relative to `src` and always use `/`. When `dest` lives
/// inside `src` it is left out of the archive. Returns the number of files written.
pub fn zip_directory(src: &Path, dest: &Path) -> Result<usize, FsError> {
    let archive_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| FsError::Archive { path, source }
    };
    let zip_error = |source: zip::result::ZipError| FsError::Zip {
        path: dest.to_path_buf(),
        source,
    };

    let root = dunce::canonicalize(src).map_err(archive_error(src))?;
    let file = File::create(dest).map_err(archive_error(dest))?;
    let dest_abs = dunce::canonicalize(dest).map_err(archive_error(dest))?;

    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut files_written = 0;

    for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| FsError::Archive {
            path: root.clone(),
            source: e.into(),
        })?;
        let path = entry.path();
        if path == dest_abs {
            continue;
        }

        let name = entry_name(&root, path);
        if entry.file_type().is_dir() {
            writer.add_directory(name, options).map_err(zip_error)?;
        } else if entry.file_type().is_file() {
            writer.start_file(name, options).map_err(zip_error)?;
            let mut input = File::open(path).map_err(archive_error(path))?;
            io::copy(&mut input, &mut writer).map_err(archive_error(path))?;
            files_written += 1;
        } else {
            log::debug!("Skipping non-regular entry '{}'", path.display());
        }
    }

    writer.finish().map_err(zip_error)?;
    log::debug!(
        "Archived {} file(s) from '{}' into '{}'",
        files_written,
        root.display(),
        dest.display()
    );
    Ok(files_written)
}

fn entry_name(root: &Path, path: &Path) -> String {
    let relative: PathBuf = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use zip::ZipArchive;

    #[test]
    fn test_zip_directory_uses_relative_names() {
        let src = tempdir().unwrap();
        fs::create_dir_all(src.path().join("src/language")).unwrap();
        fs::write(src.path().join("package.json"), "{}").unwrap();
        fs::write(src.path().join("src/language/main.ts"), "export {}").unwrap();

        let out = tempdir().unwrap();
        let dest = out.path().join("tutorial.zip");
        let count = zip_directory(src.path(), &dest).unwrap();
        assert_eq!(count, 2);

        let mut archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        assert_eq!(
            names,
            vec!["package.json", "src/", "src/language/", "src/language/main.ts"]
        );
        let mut contents = String::new();
        io::Read::read_to_string(
            &mut archive.by_name("src/language/main.ts").unwrap(),
            &mut contents,
        )
        .unwrap();
        assert_eq!(contents, "export {}");
    }

    #[test]
    fn test_zip_inside_source_is_skipped() {
        let src = tempdir().unwrap();
        fs::write(src.path().join("a.txt"), "a").unwrap();
        let dest = src.path().join("self.zip");

        assert_eq!(zip_directory(src.path(), &dest).unwrap(), 1);
        let archive = ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        assert_eq!(archive.file_names().collect::<Vec<_>>(), vec!["a.txt"]);
    }

    #[test]
    fn test_missing_source_is_error() {
        let out = tempdir().unwrap();
        let err = zip_directory(&out.path().join("missing"), &out.path().join("x.zip"));
        assert!(matches!(err, Err(FsError::Archive { .. })));
    }
}
