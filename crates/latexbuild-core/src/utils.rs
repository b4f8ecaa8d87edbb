//! Filesystem helpers that do not fit anywhere else.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Default number of random characters added by [`random_name_filepath`].
pub const DEFAULT_RANDOM_LENGTH: usize = 5;

/// Returns `length` random uppercase hexadecimal characters.
///
/// The characters are taken from a v4 UUID, so `length` must be between 1
/// and 32 inclusive.
pub fn random_str_uuid(length: usize) -> Result<String> {
    if !(1..=32).contains(&length) {
        return Err(Error::InvalidArgument(format!(
            "length must satisfy 1 <= length <= 32, got {}",
            length
        )));
    }
    let random = Uuid::new_v4().simple().to_string().to_uppercase();
    Ok(random[..length].to_string())
}

/// Appends `length` random characters to the file stem of `path`.
///
/// The parent directory and extension are preserved:
/// `/tmp/main.tex` becomes something like `/tmp/main3F9A1.tex`.
pub fn random_name_filepath(path: impl AsRef<Path>, length: usize) -> Result<PathBuf> {
    let path = path.as_ref();
    let stem = path.file_stem().ok_or_else(|| {
        Error::InvalidArgument(format!("{} has no file name", path.display()))
    })?;

    let mut file_name = stem.to_os_string();
    file_name.push(random_str_uuid(length)?);
    if let Some(ext) = path.extension() {
        file_name.push(".");
        file_name.push(ext);
    }
    Ok(path.with_file_name(file_name))
}

/// Lists the regular files directly inside `dir` whose name starts with
/// `prefix`, sorted by path.
///
/// Subdirectories are neither returned nor descended into.
pub fn list_filepaths_with_predicate(
    dir: impl AsRef<Path>,
    prefix: &str,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::invalid_path(dir, "not a directory"));
    }

    let io_err = |source| Error::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        let matches = entry.file_name().to_string_lossy().starts_with(prefix);
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Reads a UTF-8 text file.
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "/hello/world/test.txt";

    #[test]
    fn test_random_str_correct_length() {
        assert_eq!(random_str_uuid(4).unwrap().len(), 4);
        assert_eq!(random_str_uuid(7).unwrap().len(), 7);
        assert_eq!(random_str_uuid(1).unwrap().len(), 1);
        assert_eq!(random_str_uuid(32).unwrap().len(), 32);
    }

    #[test]
    fn test_random_str_is_uppercase_hex() {
        let s = random_str_uuid(32).unwrap();
        assert!(s.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn test_random_str_is_random() {
        assert_ne!(random_str_uuid(7).unwrap(), random_str_uuid(7).unwrap());
    }

    #[test]
    fn test_random_str_out_of_range() {
        assert!(matches!(random_str_uuid(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(random_str_uuid(33), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_random_name_correct_length() {
        let finish = random_name_filepath(PATH, 5).unwrap();
        assert_eq!(finish.as_os_str().len(), PATH.len() + 5);
    }

    #[test]
    fn test_random_name_extension_still_there() {
        let finish = random_name_filepath(PATH, 7).unwrap();
        assert_eq!(finish.extension().unwrap(), "txt");
        assert_eq!(finish.parent().unwrap(), Path::new("/hello/world"));
    }

    #[test]
    fn test_random_name_beginning_still_there() {
        let finish = random_name_filepath(PATH, 5).unwrap();
        let stem = finish.file_stem().unwrap().to_string_lossy().to_string();
        assert_eq!(stem.len(), "test".len() + 5);
        assert!(stem.starts_with("test"));
    }

    #[test]
    fn test_random_name_middle_is_random() {
        let a = random_name_filepath(PATH, 5).unwrap();
        let b = random_name_filepath(PATH, 5).unwrap();
        assert_ne!(a.file_stem(), b.file_stem());
    }

    #[test]
    fn test_random_name_without_extension() {
        let finish = random_name_filepath("build/Makefile", 3).unwrap();
        assert_eq!(finish.extension(), None);
        assert_eq!(finish.as_os_str().len(), "build/Makefile".len() + 3);
    }

    #[test]
    fn test_random_name_rejects_path_without_file_name() {
        assert!(matches!(
            random_name_filepath("/", 5),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_list_single_match() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("main.tex");
        fs::write(&target, "\\documentclass{article}").unwrap();
        fs::write(dir.path().join("refs.bib"), "").unwrap();

        let files = list_filepaths_with_predicate(dir.path(), "mai").unwrap();
        assert_eq!(files, vec![target]);
    }

    #[test]
    fn test_list_skips_directories_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("main_figures")).unwrap();
        fs::write(dir.path().join("main.tex"), "").unwrap();
        fs::write(dir.path().join("main.aux"), "").unwrap();

        let files = list_filepaths_with_predicate(dir.path(), "main").unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("main.aux"), dir.path().join("main.tex")]
        );
    }

    #[test]
    fn test_list_not_a_match() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.tex"), "").unwrap();
        let files =
            list_filepaths_with_predicate(dir.path(), "no root therefore impossible").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_list_invalid_directory() {
        assert!(matches!(
            list_filepaths_with_predicate("notadirectory", "anything"),
            Err(Error::InvalidPath { .. })
        ));

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.tex");
        fs::write(&file, "").unwrap();
        assert!(matches!(
            list_filepaths_with_predicate(&file, "main"),
            Err(Error::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("README.md");
        fs::write(&file, "# latexbuild\n").unwrap();
        assert_eq!(read_file(&file).unwrap(), "# latexbuild\n");
        assert!(matches!(
            read_file(dir.path().join("missing.md")),
            Err(Error::Io { .. })
        ));
    }
}
