//! CLI entrypoint for `accessorgen`.

use clap::Parser;

use accessorgen::cli::Args;
use accessorgen::error::GenError;
use accessorgen::files;
use accessorgen::pipeline::{self, GenerationRequest};
use accessorgen::render::Renderer;
use accessorgen::template::TemplateSet;

fn main() -> Result<(), GenError> {
    run()
}

fn run() -> Result<(), GenError> {
    let args = Args::parse();

    // Template overrides are validated before any source is parsed.
    let templates = match args.templates.as_deref() {
        Some(dir) => TemplateSet::from_override_dir(dir)?,
        None => TemplateSet::builtin(),
    };
    let renderer = Renderer::new(&templates)?;

    let selection = files::select_input(&args.path)?;
    let model = files::parse_sources(&selection)?;

    let request = GenerationRequest {
        type_names: args.types.clone(),
        operations: args.ops.clone(),
        invocation: invocation_echo(),
    };
    let units = pipeline::generate(&model, &request, &renderer)?;
    files::write_units(
        &units,
        &request.type_names,
        &selection.package_dir,
        args.output.as_deref(),
    )
}

fn invocation_echo() -> String {
    std::env::args().skip(1).collect::<Vec<_>>().join(" ")
}
