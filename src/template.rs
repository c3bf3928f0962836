//! Getter/setter template slots with optional directory override.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::GenError;

/// Reserved override file name for the getter slot.
pub const GETTER_FILE: &str = "accessor_getter.j2";
/// Reserved override file name for the setter slot.
pub const SETTER_FILE: &str = "accessor_setter.j2";

const BUILTIN_GETTER: &str = include_str!("../templates/accessor_getter.j2");
const BUILTIN_SETTER: &str = include_str!("../templates/accessor_setter.j2");

/// The two template slots, resolved at start-up and immutable afterwards.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    getter: String,
    setter: String,
}

impl TemplateSet {
    /// Built-in template text for both slots.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            getter: BUILTIN_GETTER.to_owned(),
            setter: BUILTIN_SETTER.to_owned(),
        }
    }

    /// Loads both override files from `dir`.
    ///
    /// The override is all-or-nothing: either reserved file missing or
    /// unreadable is a fatal configuration error, not a partial fallback.
    pub fn from_override_dir(dir: &Utf8Path) -> Result<Self, GenError> {
        let handle =
            Dir::open_ambient_dir(dir, ambient_authority()).map_err(|err| GenError::Io {
                path: dir.to_path_buf(),
                source: err,
            })?;
        Ok(Self {
            getter: read_slot(&handle, dir, GETTER_FILE)?,
            setter: read_slot(&handle, dir, SETTER_FILE)?,
        })
    }

    /// Template text for the getter slot.
    #[must_use]
    pub fn getter(&self) -> &str {
        &self.getter
    }

    /// Template text for the setter slot.
    #[must_use]
    pub fn setter(&self) -> &str {
        &self.setter
    }
}

fn read_slot(handle: &Dir, dir: &Utf8Path, name: &'static str) -> Result<String, GenError> {
    match handle.read_to_string(name) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(GenError::IncompleteTemplateOverride {
                dir: dir.to_path_buf(),
                name,
            })
        }
        Err(err) => Err(GenError::Io {
            path: dir.join(name),
            source: err,
        }),
    }
}
