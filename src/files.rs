//! Source discovery and generated-file output.
//!
//! Both sides of the core pipeline's I/O: finding the declaration source
//! units of a package directory, and writing finished buffers to disk.
//! Every file is a single acquire-use-release with no retry.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use std::io::Write;
use tracing::debug;

use crate::aggregate::RenderedUnits;
use crate::error::GenError;
use crate::model::PackageModel;

/// Suffix appended to the lower-cased type name for default output files.
pub const OUTPUT_SUFFIX: &str = "_accessors.rs";

/// Resolved input location: the package directory generated output lands
/// in, plus the source file names (relative to it) to parse.
#[derive(Debug)]
pub struct InputSelection {
    /// Directory default output files are placed in.
    pub package_dir: Utf8PathBuf,
    /// Source file names relative to `package_dir`, lexicographically
    /// sorted for deterministic parse order.
    pub file_names: Vec<String>,
}

/// Resolves `path` — a package directory or a single source file — into
/// the set of units to parse.
pub fn select_input(path: &Utf8Path) -> Result<InputSelection, GenError> {
    if path.is_dir() {
        let mut file_names = list_source_files(path)?;
        file_names.sort();
        return Ok(InputSelection {
            package_dir: path.to_path_buf(),
            file_names,
        });
    }

    let name = path
        .file_name()
        .ok_or_else(|| GenError::Config(format!("input path {path} has no file name")))?
        .to_owned();
    let package_dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };
    Ok(InputSelection {
        package_dir,
        file_names: vec![name],
    })
}

/// Parses every selected unit into one package model.
pub fn parse_sources(selection: &InputSelection) -> Result<PackageModel, GenError> {
    let dir = open_dir(&selection.package_dir)?;
    let mut model = PackageModel::new();
    for name in &selection.file_names {
        let source = dir.read_to_string(name).map_err(|err| GenError::Io {
            path: selection.package_dir.join(name),
            source: err,
        })?;
        model.merge_unit(&selection.package_dir.join(name), &source)?;
    }
    debug!(
        units = selection.file_names.len(),
        types = model.type_names().count(),
        "parsed package sources"
    );
    Ok(model)
}

/// Default output file name for one target type.
#[must_use]
pub fn default_output_name(type_name: &str) -> String {
    format!("{}{OUTPUT_SUFFIX}", type_name.to_lowercase())
}

/// Writes each requested type's buffer to disk, in request order.
///
/// Without an explicit path every type gets its own file beside the
/// input; an explicit path receives every type in turn, so multiple
/// requested types overwrite one another (a caller constraint this tool
/// does not validate).
pub fn write_units(
    units: &RenderedUnits,
    type_names: &[String],
    package_dir: &Utf8Path,
    explicit: Option<&Utf8Path>,
) -> Result<(), GenError> {
    for type_name in type_names {
        let content = units.get(type_name)?;
        let target = match explicit {
            Some(path) => path.to_path_buf(),
            None => package_dir.join(default_output_name(type_name)),
        };
        write_file(&target, content)?;
        debug!(%type_name, path = %target, "wrote generated file");
    }
    Ok(())
}

fn list_source_files(path: &Utf8Path) -> Result<Vec<String>, GenError> {
    let dir = open_dir(path)?;
    let mut file_names = Vec::new();
    for entry_result in dir.read_dir(".").map_err(|err| GenError::Io {
        path: path.to_path_buf(),
        source: err,
    })? {
        let entry = entry_result.map_err(|err| GenError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
        let name = entry.file_name().map_err(|err| GenError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
        let file_type = entry.file_type().map_err(|err| GenError::Io {
            path: path.join(&name),
            source: err,
        })?;
        if file_type.is_file() && name.ends_with(".rs") {
            file_names.push(name);
        }
    }
    Ok(file_names)
}

fn open_dir(path: &Utf8Path) -> Result<Dir, GenError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|err| GenError::Io {
        path: path.to_path_buf(),
        source: err,
    })
}

fn write_file(path: &Utf8Path, content: &str) -> Result<(), GenError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| GenError::Config(format!("output path {path} has no file name")))?;

    let dir = open_dir(&parent)?;
    let mut file = dir
        .open_with(
            name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|err| GenError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    file.write_all(content.as_bytes())
        .map_err(|err| GenError::Io {
            path: path.to_path_buf(),
            source: err,
        })
}
