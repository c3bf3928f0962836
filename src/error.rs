//! Error types for `accessorgen`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `accessorgen` pipeline.
///
/// Every variant is fatal: no error is retried or recovered locally, and a
/// failure while processing one target type discards the buffered output of
/// every other type in the run.
#[derive(Debug, Error)]
pub enum GenError {
    /// A start-up configuration problem outside the parse/render pipeline.
    #[error("configuration error: {0}")]
    Config(String),

    /// An override directory supplied one template slot without the other.
    #[error(
        "template override directory {dir} is missing {name}; \
         getter and setter overrides must be supplied together"
    )]
    IncompleteTemplateOverride {
        /// Directory passed via `--templates`.
        dir: Utf8PathBuf,
        /// Reserved file name of the missing slot.
        name: &'static str,
    },

    /// A source unit could not be parsed; the whole unit is discarded.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Source file that failed to parse.
        path: Utf8PathBuf,
        /// Underlying parser diagnostic.
        #[source]
        source: syn::Error,
    },

    /// The same struct name is declared by two source units in one run.
    #[error("struct `{name}` is declared in both {first} and {second}")]
    DuplicateType {
        /// Conflicting struct name.
        name: String,
        /// Unit that declared the name first.
        first: Utf8PathBuf,
        /// Unit that re-declared it.
        second: Utf8PathBuf,
    },

    /// A requested struct name was never found among the parsed declarations.
    #[error("struct `{0}` was not found in the parsed sources")]
    UnknownType(String),

    /// A template failed to compile or a substitution failed mid-render.
    #[error("template rendering failed: {0}")]
    Render(#[from] minijinja::Error),

    /// A file read or write failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path of the file or directory involved.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
