//! Struct model construction from parsed declaration source.
//!
//! One source unit is parsed with `syn` and every struct declaration it
//! contains — including those nested in inline modules — contributes an
//! ordered field model. Filtering by requested type name happens later in
//! the pipeline, so one parse pass serves any number of targets.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use camino::{Utf8Path, Utf8PathBuf};
use quote::ToTokens;
use syn::{Item, ItemStruct};

use crate::error::GenError;
use crate::policy::AccessPolicy;
use crate::tag;

/// The field annotation key recognized by a run. One key per run.
pub const TAG_KEY: &str = "orm";

/// One declared named field of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field identifier, unique within its owning struct.
    pub name: String,
    /// Literal surface syntax of the declared type, opaque downstream.
    pub type_literal: String,
    /// Operations the field is eligible for.
    pub policy: AccessPolicy,
    /// Column identifier extracted from the annotation, when present.
    pub column: Option<String>,
}

/// Ordered field descriptors for one declared struct.
pub type TypeModel = Vec<FieldDescriptor>;

/// Every struct declared across the parsed source units, keyed by name.
///
/// Built fresh per invocation and discarded after rendering; nothing
/// persists between runs.
#[derive(Debug, Default)]
pub struct PackageModel {
    types: BTreeMap<String, (Utf8PathBuf, TypeModel)>,
}

impl PackageModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one source unit and merges its struct declarations.
    ///
    /// A parse failure discards the whole unit. A struct name already
    /// claimed by an earlier unit is reported as a conflict rather than
    /// silently overwritten.
    pub fn merge_unit(&mut self, path: &Utf8Path, source: &str) -> Result<(), GenError> {
        let file = syn::parse_file(source).map_err(|err| GenError::Parse {
            path: path.to_path_buf(),
            source: err,
        })?;

        let mut declared = Vec::new();
        collect_items(&file.items, &mut declared);

        for (name, fields) in declared {
            match self.types.entry(name) {
                Entry::Occupied(existing) => {
                    return Err(GenError::DuplicateType {
                        name: existing.key().clone(),
                        first: existing.get().0.clone(),
                        second: path.to_path_buf(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert((path.to_path_buf(), fields));
                }
            }
        }
        Ok(())
    }

    /// Looks up the field model for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeModel> {
        self.types.get(name).map(|(_, fields)| fields)
    }

    /// Declared struct names, in sorted order, for diagnostics.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

fn collect_items(items: &[Item], out: &mut Vec<(String, TypeModel)>) {
    for item in items {
        match item {
            Item::Struct(item) => collect_struct(item, out),
            Item::Mod(module) => {
                if let Some((_, items)) = &module.content {
                    collect_items(items, out);
                }
            }
            _ => {}
        }
    }
}

fn collect_struct(item: &ItemStruct, out: &mut Vec<(String, TypeModel)>) {
    let mut fields = Vec::new();
    for field in &item.fields {
        // Tuple-struct fields carry no identifier and are skipped, the
        // same way anonymous/embedded fields are.
        let Some(ident) = &field.ident else { continue };
        let name = ident.to_string();
        let (policy, column) = match tag::raw_tag_value(&field.attrs, TAG_KEY) {
            Some(raw) => (AccessPolicy::full(), tag::column_attribute(&raw)),
            None => (AccessPolicy::infer(&name), None),
        };
        fields.push(FieldDescriptor {
            name,
            type_literal: type_literal(&field.ty),
            policy,
            column,
        });
    }
    out.push((item.ident.to_string(), fields));
}

/// Renders a parsed type back to its literal surface syntax.
fn type_literal(ty: &syn::Type) -> String {
    normalize_type_text(&ty.to_token_stream().to_string())
}

/// Re-joins token-stream spacing so the literal matches source syntax.
fn normalize_type_text(spaced: &str) -> String {
    const JOINS: &[(&str, &str)] = &[
        (" :: ", "::"),
        (":: ", "::"),
        (" < ", "<"),
        ("< ", "<"),
        (" >", ">"),
        (" ,", ","),
        ("( ", "("),
        (" )", ")"),
        ("[ ", "["),
        (" ]", "]"),
        (" ;", ";"),
        ("& ", "&"),
    ];
    let mut text = spaced.trim().to_owned();
    for (from, to) in JOINS {
        text = text.replace(from, to);
    }
    text
}

#[cfg(test)]
mod tests {
    //! Tests for struct model construction.

    use super::*;
    use crate::policy::Operation;
    use rstest::rstest;

    const UNIT: &str = r#"
        pub struct Office {
            #[orm("column:name;not null;comment:display name")]
            pub Name: String,
            master: String,
            pub Logo: Vec<u8>,
        }

        struct Plain(u32, u32);

        mod nested {
            pub struct Inner {
                pub Value: i64,
            }
        }
    "#;

    fn parsed() -> PackageModel {
        let mut model = PackageModel::new();
        model
            .merge_unit(Utf8Path::new("office.rs"), UNIT)
            .expect("fixture parses");
        model
    }

    #[rstest]
    fn collects_structs_including_nested_modules() {
        let model = parsed();
        let names: Vec<&str> = model.type_names().collect();
        assert_eq!(names, ["Inner", "Office", "Plain"]);
    }

    #[rstest]
    fn preserves_field_declaration_order() {
        let model = parsed();
        let fields = model.get("Office").expect("Office is declared");
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Name", "master", "Logo"]);
    }

    #[rstest]
    fn annotated_field_carries_column_and_full_policy() {
        let model = parsed();
        let fields = model.get("Office").expect("Office is declared");
        let name = &fields[0];
        assert_eq!(name.column.as_deref(), Some("name"));
        assert!(name.policy.allows(Operation::Setter));
    }

    #[rstest]
    fn unannotated_fields_fall_back_to_casing_inference() {
        let model = parsed();
        let fields = model.get("Office").expect("Office is declared");
        let master = &fields[1];
        assert_eq!(master.column, None);
        assert!(master.policy.allows(Operation::Getter));
        assert!(!master.policy.allows(Operation::Setter));
        let logo = &fields[2];
        assert!(logo.policy.allows(Operation::Setter));
    }

    #[rstest]
    fn tuple_struct_fields_are_skipped() {
        let model = parsed();
        let fields = model.get("Plain").expect("Plain is declared");
        assert!(fields.is_empty());
    }

    #[rstest]
    fn duplicate_declaration_across_units_is_a_conflict() {
        let mut model = parsed();
        let err = model
            .merge_unit(Utf8Path::new("other.rs"), "pub struct Office { pub x: u8 }")
            .expect_err("duplicate must be rejected");
        match err {
            GenError::DuplicateType {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "Office");
                assert_eq!(first, Utf8Path::new("office.rs"));
                assert_eq!(second, Utf8Path::new("other.rs"));
            }
            other => panic!("expected DuplicateType, got {other:?}"),
        }
    }

    #[rstest]
    fn malformed_source_aborts_the_unit() {
        let mut model = PackageModel::new();
        let err = model
            .merge_unit(Utf8Path::new("broken.rs"), "struct {")
            .expect_err("malformed unit must fail");
        assert!(matches!(err, GenError::Parse { .. }));
        assert_eq!(model.type_names().count(), 0);
    }

    #[rstest]
    #[case("String", "String")]
    #[case("Vec < String >", "Vec<String>")]
    #[case("Option < Vec < u8 > >", "Option<Vec<u8>>")]
    #[case("std :: time :: Duration", "std::time::Duration")]
    #[case("& 'static str", "&'static str")]
    #[case("& mut u8", "&mut u8")]
    #[case("[u8 ; 4]", "[u8; 4]")]
    #[case("(u8 , u16)", "(u8, u16)")]
    fn type_text_is_normalized(#[case] spaced: &str, #[case] expected: &str) {
        assert_eq!(normalize_type_text(spaced), expected);
    }

    #[rstest]
    fn type_literal_round_trips_surface_syntax() {
        let mut model = PackageModel::new();
        model
            .merge_unit(
                Utf8Path::new("t.rs"),
                "struct T { a: std::collections::BTreeMap<String, u32> }",
            )
            .expect("fixture parses");
        let fields = model.get("T").expect("T is declared");
        assert_eq!(
            fields[0].type_literal,
            "std::collections::BTreeMap<String, u32>"
        );
    }
}
