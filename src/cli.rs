//! Command-line interface definitions for `accessorgen`.

use camino::Utf8PathBuf;
use clap::Parser;

use crate::policy::Operation;

/// Parsed CLI arguments for `accessorgen`.
#[derive(Debug, Parser)]
#[command(name = "accessorgen")]
#[command(about = "Generate getter/setter accessors for annotated Rust structs")]
#[command(version)]
pub struct Args {
    /// Struct names to generate accessors for, in emission order.
    #[arg(long = "types", value_name = "Name", value_delimiter = ',', required = true)]
    pub types: Vec<String>,
    /// Accessor operations to emit, in emission order.
    #[arg(
        long = "ops",
        value_enum,
        value_delimiter = ',',
        default_values_t = [Operation::Getter, Operation::Setter]
    )]
    pub ops: Vec<Operation>,
    /// Directory holding `accessor_getter.j2` and `accessor_setter.j2`
    /// overrides (both files required).
    #[arg(long = "templates", value_name = "dir")]
    pub templates: Option<Utf8PathBuf>,
    /// Explicit output file, applied to every requested type.
    #[arg(long = "output", value_name = "path")]
    pub output: Option<Utf8PathBuf>,
    /// Input source file or package directory.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: Utf8PathBuf,
}
