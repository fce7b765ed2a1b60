//! Handlebars-based class renderer.
//!
//! Strict mode is always on: a template that references a variable missing
//! from the context fails to render instead of producing a source file with
//! holes in it. HTML escaping is off; values go through the `java_string`
//! and `comment` helpers instead.
//!
//! ## Template context
//!
//! ```text
//! generated_class_name   "G" or "C"
//! package_name           "" for the default package
//! groups[]
//!   name                 property file base name
//!   identifier           sanitised class identifier
//!   constants[]
//!     key                original property key
//!     identifier         sanitised constant identifier
//!     value              raw property value
//! ```

use std::path::Path;

use confgen_core::{
    application::{ApplicationError, ports::ClassRenderer},
    domain::GeneratedClassSpec,
    error::{ConfgenError, ConfgenResult},
};
use handlebars::{Handlebars, Template, handlebars_helper, no_escape};
use serde_json::json;
use tracing::{debug, instrument};

use super::escape::{escape_comment, escape_java_string};

/// Template used when no custom one is configured.
pub const BUILTIN_JAVA_TEMPLATE: &str = include_str!("templates/java_class.hbs");

handlebars_helper!(java_string: |s: str| escape_java_string(s));
handlebars_helper!(comment: |s: str| escape_comment(s));

/// Renders generated classes with a Handlebars template.
pub struct HandlebarsRenderer {
    hbs: Handlebars<'static>,
    template: String,
}

impl HandlebarsRenderer {
    /// Renderer with the built-in Java template.
    pub fn new() -> Self {
        Self::with_source(BUILTIN_JAVA_TEMPLATE.to_string())
    }

    /// Renderer with a custom template, checked for syntax errors up front.
    pub fn from_template(source: impl Into<String>) -> ConfgenResult<Self> {
        let source = source.into();
        Template::compile(&source).map_err(|e| ConfgenError::Configuration {
            message: format!("Invalid template: {}", e),
        })?;
        Ok(Self::with_source(source))
    }

    /// Renderer with a custom template read from `path`.
    pub fn from_template_file(path: &Path) -> ConfgenResult<Self> {
        debug!(path = %path.display(), "Loading custom template");
        let source = std::fs::read_to_string(path).map_err(|e| ConfgenError::Configuration {
            message: format!("Cannot read template {}: {}", path.display(), e),
        })?;
        Self::from_template(source)
    }

    fn with_source(template: String) -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(no_escape);
        hbs.register_helper("java_string", Box::new(java_string));
        hbs.register_helper("comment", Box::new(comment));
        Self { hbs, template }
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRenderer for HandlebarsRenderer {
    #[instrument(skip_all, fields(class = %spec.class_name))]
    fn render(&self, spec: &GeneratedClassSpec) -> ConfgenResult<String> {
        let context = json!({
            "generated_class_name": spec.class_name,
            "package_name": spec.package.as_str(),
            "groups": spec.groups,
        });

        let rendered = self
            .hbs
            .render_template(&self.template, &context)
            .map_err(|e| ApplicationError::RenderingFailed {
                class_name: spec.class_name.clone(),
                reason: e.to_string(),
            })?;

        Ok(rendered.replace("\r\n", "\n"))
    }

    fn file_extension(&self) -> &'static str {
        "java"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confgen_core::domain::{BasePackage, PropertyFile};

    fn spec(class: &str, package: &str, files: &[(&str, &[(&str, &str)])]) -> GeneratedClassSpec {
        let files: Vec<PropertyFile> = files
            .iter()
            .map(|(path, pairs)| {
                PropertyFile::new(
                    *path,
                    pairs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                )
            })
            .collect();
        GeneratedClassSpec::from_files(class, BasePackage::parse(package).unwrap(), &files)
    }

    #[test]
    fn renders_nested_groups_and_constants() {
        let source = HandlebarsRenderer::new()
            .render(&spec(
                "G",
                "gen.config",
                &[("/r/app.properties", &[("db.url", "jdbc:h2:mem"), ("timeout", "30")])],
            ))
            .unwrap();

        assert!(source.trim_start().starts_with("package gen.config;\n"));
        assert!(source.contains("public final class G {"));
        assert!(source.contains("public static final class app {"));
        assert!(source.contains("/** db.url */"));
        assert!(source.contains(r#"public static final String db_url = "jdbc:h2:mem";"#));
        assert!(source.contains(r#"public static final String timeout = "30";"#));
        assert!(!source.contains('\r'));
    }

    #[test]
    fn values_are_not_html_escaped() {
        let source = HandlebarsRenderer::new()
            .render(&spec(
                "C",
                "p",
                &[("/r/W.properties", &[("q", r#"<a href="x">&</a>"#)])],
            ))
            .unwrap();

        assert!(source.contains(r#"q = "<a href=\"x\">&</a>";"#));
    }

    #[test]
    fn default_package_has_no_package_line() {
        let source = HandlebarsRenderer::new().render(&spec("C", "", &[])).unwrap();
        assert!(!source.contains("package "));
        assert!(source.contains("public final class C {"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let spec = spec("G", "a.b", &[("/r/x.properties", &[("k", "v")])]);
        let renderer = HandlebarsRenderer::new();
        assert_eq!(renderer.render(&spec).unwrap(), renderer.render(&spec).unwrap());
    }

    #[test]
    fn custom_template_receives_context() {
        let renderer = HandlebarsRenderer::from_template(
            "{{generated_class_name}}@{{package_name}}:{{#each groups}}{{name}}[{{#each constants}}{{key}}={{value}};{{/each}}]{{/each}}",
        )
        .unwrap();

        let out = renderer
            .render(&spec("C", "x.y", &[("/r/Widget.properties", &[("color", "red")])]))
            .unwrap();
        assert_eq!(out, "C@x.y:Widget[color=red;]");
    }

    #[test]
    fn invalid_custom_template_is_a_configuration_error() {
        let err = HandlebarsRenderer::from_template("{{#each groups}}").err().unwrap();
        assert!(matches!(err, ConfgenError::Configuration { .. }));
    }

    #[test]
    fn missing_variable_fails_in_strict_mode() {
        let renderer = HandlebarsRenderer::from_template("{{nope}}").unwrap();
        let err = renderer.render(&spec("G", "p", &[])).unwrap_err();
        assert!(matches!(
            err,
            ConfgenError::Application(ApplicationError::RenderingFailed { .. })
        ));
    }
}
