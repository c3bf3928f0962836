//! Template substitution for accessor fragments.
//!
//! Rendering is pure substitution: no check that the produced text is
//! well-formed Rust. A malformed custom template surfaces as a fatal
//! render error.

use minijinja::{Environment, UndefinedBehavior, context};

use crate::error::GenError;
use crate::template::TemplateSet;

/// Derives the receiver variable name from a type name: its first
/// character, lower-cased.
#[must_use]
pub fn receiver(type_name: &str) -> String {
    type_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().to_string())
        .unwrap_or_default()
}

/// Compiled getter/setter templates ready for substitution.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Compiles both template slots.
    ///
    /// Undefined-variable references are strict, so a custom template
    /// naming a variable outside the contract fails at render time.
    pub fn new(templates: &TemplateSet) -> Result<Self, GenError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template_owned("getter", templates.getter().to_owned())?;
        env.add_template_owned("setter", templates.setter().to_owned())?;
        Ok(Self { env })
    }

    /// Renders one getter fragment.
    pub fn getter(
        &self,
        struct_name: &str,
        field_name: &str,
        type_literal: &str,
    ) -> Result<String, GenError> {
        let template = self.env.get_template("getter")?;
        Ok(template.render(context! {
            Receiver => receiver(struct_name),
            Struct => struct_name,
            Field => field_name,
            Type => type_literal,
        })?)
    }

    /// Renders one setter fragment. `column` may be empty.
    pub fn setter(
        &self,
        struct_name: &str,
        field_name: &str,
        type_literal: &str,
        column: &str,
    ) -> Result<String, GenError> {
        let template = self.env.get_template("setter")?;
        Ok(template.render(context! {
            Receiver => receiver(struct_name),
            Struct => struct_name,
            Field => field_name,
            Type => type_literal,
            Column => column,
        })?)
    }
}

#[cfg(test)]
mod tests {
    //! Tests for fragment rendering.

    use super::*;
    use rstest::rstest;

    fn builtin_renderer() -> Renderer {
        Renderer::new(&TemplateSet::builtin()).expect("builtin templates compile")
    }

    #[rstest]
    #[case("Office", "o")]
    #[case("bloc", "b")]
    #[case("Z", "z")]
    fn receiver_is_first_character_lower_cased(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(receiver(name), expected);
    }

    #[rstest]
    fn getter_reads_the_field_directly_and_ignores_the_column() {
        let rendered = builtin_renderer()
            .getter("Office", "Name", "String")
            .expect("render getter");
        assert!(rendered.contains("impl Office {"));
        assert!(rendered.contains("pub fn Name(&self) -> &String"));
        assert!(rendered.contains("&self.Name"));
        assert!(!rendered.contains("column"));
    }

    #[rstest]
    fn setter_substitutes_the_column() {
        let rendered = builtin_renderer()
            .setter("Office", "Name", "String", "name")
            .expect("render setter");
        assert!(rendered.contains("pub fn set_Name(&mut self, value: String)"));
        assert!(rendered.contains("(column `name`)"));
    }

    #[rstest]
    fn setter_with_empty_column_omits_the_column_note() {
        let rendered = builtin_renderer()
            .setter("Office", "Logo", "Vec<u8>", "")
            .expect("render setter");
        assert!(rendered.contains("pub fn set_Logo(&mut self, value: Vec<u8>)"));
        assert!(!rendered.contains("column"));
    }

    #[rstest]
    fn rendering_is_deterministic() {
        let renderer = builtin_renderer();
        let first = renderer
            .setter("Office", "Name", "String", "name")
            .expect("render once");
        let second = renderer
            .setter("Office", "Name", "String", "name")
            .expect("render twice");
        assert_eq!(first, second);
    }

    #[rstest]
    fn custom_template_receives_the_receiver_variable() {
        let templates = custom_pair(
            "// {{ Receiver }}.{{ Field }}",
            "// {{ Receiver }}.{{ Field }} = {{ Column }}",
        );
        let renderer = Renderer::new(&templates).expect("custom templates compile");
        let rendered = renderer
            .getter("Office", "Name", "String")
            .expect("render custom getter");
        assert_eq!(rendered, "// o.Name");
    }

    #[rstest]
    fn unknown_variable_in_a_custom_template_fails_the_render() {
        let templates = custom_pair("{{ Bogus }}", "x");
        let renderer = Renderer::new(&templates).expect("templates compile lazily");
        let err = renderer
            .getter("Office", "Name", "String")
            .expect_err("strict undefined must fail");
        assert!(matches!(err, GenError::Render(_)));
    }

    fn custom_pair(getter: &str, setter: &str) -> TemplateSet {
        use cap_std::ambient_authority;
        use cap_std::fs_utf8::Dir;

        let tempdir = tempfile::tempdir().expect("create temp dir");
        let root = camino::Utf8PathBuf::from_path_buf(tempdir.path().to_path_buf())
            .expect("tempdir path is UTF-8");
        let dir = Dir::open_ambient_dir(&root, ambient_authority()).expect("open temp dir");
        dir.write(crate::template::GETTER_FILE, getter)
            .expect("write getter override");
        dir.write(crate::template::SETTER_FILE, setter)
            .expect("write setter override");
        TemplateSet::from_override_dir(&root).expect("load overrides")
    }
}
