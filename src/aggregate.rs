//! Per-type buffering of rendered fragments.

use std::collections::BTreeMap;

use crate::error::GenError;

/// Append-only generated-source buffers, one per target type name.
///
/// Buffers are created lazily on first write and never shared across type
/// names. Requesting the same type twice duplicates its preamble and
/// fragments; deduplication is the caller's responsibility.
#[derive(Debug, Default)]
pub struct RenderedUnits {
    buffers: BTreeMap<String, String>,
}

impl RenderedUnits {
    /// Creates an empty unit set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits the generated-file preamble for one requested occurrence of a
    /// type: the machine-generated header echoing the invocation, and the
    /// import clause tying the companion module to its parent.
    pub fn begin_type(&mut self, type_name: &str, invocation: &str) {
        let buffer = self.buffer(type_name);
        buffer.push_str(&format!(
            "// Code generated by \"accessorgen {invocation}\"; DO NOT EDIT.\n\n"
        ));
        buffer.push_str("use super::*;\n\n");
    }

    /// Appends one rendered fragment to `type_name`'s buffer.
    pub fn append(&mut self, type_name: &str, fragment: &str) {
        let buffer = self.buffer(type_name);
        buffer.push_str(fragment);
        buffer.push_str("\n\n");
    }

    /// Returns the accumulated buffer for `type_name`.
    ///
    /// An unknown name is an error carrying the offending type, never a
    /// panic.
    pub fn get(&self, type_name: &str) -> Result<&str, GenError> {
        self.buffers
            .get(type_name)
            .map(String::as_str)
            .ok_or_else(|| GenError::UnknownType(type_name.to_owned()))
    }

    /// Iterates buffers in sorted type-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.buffers
            .iter()
            .map(|(name, buffer)| (name.as_str(), buffer.as_str()))
    }

    /// Number of buffered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether nothing has been buffered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    fn buffer(&mut self, type_name: &str) -> &mut String {
        self.buffers.entry(type_name.to_owned()).or_default()
    }
}
