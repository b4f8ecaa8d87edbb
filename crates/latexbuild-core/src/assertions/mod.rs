//! Assertions about arguments.
//!
//! Every function in this module either returns successfully or reports the
//! unmet criterion as an [`Error`]. None of them have side effects.
//!
//! ## Examples
//!
//! ```
//! use latexbuild_core::assertions::has_file_extension;
//!
//! assert!(has_file_extension("paper/main.tex", ".tex").is_ok());
//! assert!(has_file_extension("paper/main.tex", ".pdf").is_err());
//! ```

use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::{type_name, Any};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Checks that `path` ends in `required_ext`.
///
/// The extension is compared including its leading dot (`".pdf"`, `".tex"`),
/// so a path without an extension only matches `""`.
///
/// # Errors
///
/// Returns [`Error::ExtensionMismatch`] when the suffix differs.
pub fn has_file_extension(path: impl AsRef<Path>, required_ext: &str) -> Result<()> {
    let path = path.as_ref();
    let found = suffix(path);
    if found != required_ext {
        return Err(Error::ExtensionMismatch {
            path: path.to_path_buf(),
            found,
            expected: required_ext.to_string(),
        });
    }
    Ok(())
}

/// Final component's extension with its leading dot, or an empty string.
fn suffix(path: &Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => format!(".{}", ext.to_string_lossy()),
        _ => String::new(),
    }
}

/// Resolves `name` as an executable on the process `PATH`.
///
/// Returns the resolved location on success. The lookup is the same one a
/// shell performs before running a command.
///
/// # Errors
///
/// * [`Error::InvalidArgument`] if `name` is empty or whitespace.
/// * [`Error::InvalidBinary`] if nothing executable is found.
pub fn is_system_binary(name: &str) -> Result<PathBuf> {
    check_binary_name(name)?;
    let resolved = which::which(name).map_err(|e| {
        debug!("which({}) failed: {}", name, e);
        Error::InvalidBinary {
            name: name.to_string(),
        }
    })?;
    debug!("Resolved {} to {:?}", name, resolved);
    Ok(resolved)
}

/// Like [`is_system_binary`], but searches `search_path` (a `PATH`-style
/// list) instead of the process environment. Relative names are resolved
/// against `cwd`.
pub fn is_system_binary_in(
    name: &str,
    search_path: impl AsRef<OsStr>,
    cwd: impl AsRef<Path>,
) -> Result<PathBuf> {
    check_binary_name(name)?;
    which::which_in(name, Some(search_path), cwd).map_err(|e| {
        debug!("which_in({}) failed: {}", name, e);
        Error::InvalidBinary {
            name: name.to_string(),
        }
    })
}

fn check_binary_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument(
            "binary name must be a non-empty string".into(),
        ));
    }
    Ok(())
}

/// Checks that every element of a type-erased list is a `T`.
///
/// Typed slices never need this; it exists for values that crossed an
/// untyped boundary and were stored as `dyn Any`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] listing the offending indices.
pub fn list_is_type<T: Any>(items: &[&dyn Any]) -> Result<()> {
    let bad: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is::<T>())
        .map(|(i, _)| i)
        .collect();

    if !bad.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "elements at {:?} are not {}",
            bad,
            type_name::<T>()
        )));
    }
    Ok(())
}

/// The JSON type of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

/// Checks that every element of a deserialized list has JSON type `kind`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] listing the elements of the wrong kind.
pub fn list_is_kind(items: &[Value], kind: ValueKind) -> Result<()> {
    let bad: Vec<&Value> = items
        .iter()
        .filter(|item| ValueKind::of(item) != kind)
        .collect();

    if !bad.is_empty() {
        return Err(Error::InvalidArgument(format!("{:?} are not {:?}", bad, kind)));
    }
    Ok(())
}
