//! Capability-based file access for command inputs and outputs.

use std::io;
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

use crate::CliError;

/// Open `path` for reading.
pub(crate) fn open_input(path: &Utf8Path) -> Result<fs_utf8::File, CliError> {
    fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Create or truncate `path`, creating missing parent directories first.
pub(crate) fn create_output(path: &Utf8Path) -> Result<fs_utf8::File, CliError> {
    let create = || -> io::Result<fs_utf8::File> {
        let (dir, file_name) = parent_dir_and_name(path, true)?;
        dir.create(file_name)
    };
    create().map_err(|source| CliError::CreateOutput {
        path: path.to_path_buf(),
        source,
    })
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_file(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    let inspect = || -> io::Result<bool> {
        let (dir, file_name) = parent_dir_and_name(path, false)?;
        dir.metadata(file_name).map(|meta| meta.is_file())
    };
    match inspect() {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Open the directory containing `path` and return it with the file name.
fn parent_dir_and_name(path: &Utf8Path, create_parent: bool) -> io::Result<(fs_utf8::Dir, &str)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?;
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new(""));
    let (base, relative) = split_base(parent)?;
    let base_dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    if relative.as_str().is_empty() {
        return Ok((base_dir, file_name));
    }
    if create_parent {
        base_dir.create_dir_all(&relative)?;
    }
    Ok((base_dir.open_dir(&relative)?, file_name))
}

/// Split `parent` into an ambient root and a path relative to it.
///
/// Absolute paths are rooted at their prefix or `/`; relative paths at `.`.
fn split_base(parent: &Utf8Path) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let separator = std::path::MAIN_SEPARATOR.to_string();
    let base = match parent.as_std_path().components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(prefix_str).join(separator)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(separator),
        _ => return Ok((Utf8PathBuf::from("."), parent.to_path_buf())),
    };
    let relative = parent
        .strip_prefix(&base)
        .map_err(|_| io::Error::other("failed to strip root from parent path"))?;
    Ok((base, relative.to_path_buf()))
}
