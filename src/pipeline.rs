//! End-to-end generation: model lookup, policy gating, rendering, and
//! per-type aggregation.

use tracing::debug;

use crate::aggregate::RenderedUnits;
use crate::error::GenError;
use crate::model::PackageModel;
use crate::policy::Operation;
use crate::render::Renderer;

/// Caller-supplied description of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Target type names in emission order; repeats are honoured verbatim.
    pub type_names: Vec<String>,
    /// Requested operations in emission order; later repeats are dropped.
    pub operations: Vec<Operation>,
    /// Invocation arguments echoed into each generated-file header.
    pub invocation: String,
}

/// Renders every requested type into per-type buffers.
///
/// Fragments are emitted in field-declaration order, then request
/// operation order, gated per field by `request ∩ policy`. A requested
/// name absent from the model aborts the run; nothing partial survives.
pub fn generate(
    model: &PackageModel,
    request: &GenerationRequest,
    renderer: &Renderer,
) -> Result<RenderedUnits, GenError> {
    let operations = dedup_operations(&request.operations);
    let mut units = RenderedUnits::new();

    for type_name in &request.type_names {
        let fields = model
            .get(type_name)
            .ok_or_else(|| GenError::UnknownType(type_name.clone()))?;
        debug!(%type_name, field_count = fields.len(), "rendering accessors");

        units.begin_type(type_name, &request.invocation);
        for field in fields {
            for operation in &operations {
                if !field.policy.allows(*operation) {
                    continue;
                }
                let fragment = match operation {
                    Operation::Getter => {
                        renderer.getter(type_name, &field.name, &field.type_literal)?
                    }
                    Operation::Setter => renderer.setter(
                        type_name,
                        &field.name,
                        &field.type_literal,
                        field.column.as_deref().unwrap_or_default(),
                    )?,
                };
                units.append(type_name, &fragment);
            }
        }
    }

    debug!(buffered_types = units.len(), "generation complete");
    Ok(units)
}

fn dedup_operations(operations: &[Operation]) -> Vec<Operation> {
    let mut seen = Vec::with_capacity(operations.len());
    for operation in operations {
        if !seen.contains(operation) {
            seen.push(*operation);
        }
    }
    seen
}
