//! Named templates rendered with a per-step context.
//!
//! Templates use Jinja-style placeholders (`{{ name }}`) and are rendered by
//! [`tera`]. A placeholder without a matching context key fails the render;
//! rendering is otherwise deterministic.
pub mod embedded;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::error::TemplateError;

/// A single value substituted into a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Plain text (names, paths, versions).
    Text(String),
    /// Flag used in `{% if %}` blocks.
    Flag(bool),
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&Path> for ContextValue {
    fn from(value: &Path) -> Self {
        Self::Text(value.display().to_string())
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Mapping from placeholder name to value, built once per render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<String, ContextValue>,
}

impl TemplateContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<ContextValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace `key`.
    pub fn insert(&mut self, key: &str, value: impl Into<ContextValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    fn to_tera(&self) -> tera::Context {
        let mut ctx = tera::Context::new();
        for (key, value) in &self.values {
            ctx.insert(key.as_str(), value);
        }
        ctx
    }
}

/// Holds every known template and renders them by name.
pub struct TemplateStore {
    tera: tera::Tera,
}

impl std::fmt::Debug for TemplateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateStore")
            .field("templates", &self.tera.get_template_names().count())
            .finish()
    }
}

impl TemplateStore {
    /// Create a store holding the embedded template catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] if an embedded template does not parse.
    pub fn embedded() -> Result<Self, TemplateError> {
        Self::from_sources(embedded::TEMPLATES.iter().copied())
    }

    /// Create a store from explicit `(name, source)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] if a template does not parse.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, TemplateError> {
        let mut tera = tera::Tera::default();
        // Output is configuration text, never HTML
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(sources)
            .map_err(|e| TemplateError::Render {
                name: "<catalogue>".to_string(),
                reason: error_chain(&e),
            })?;
        Ok(Self { tera })
    }

    /// Whether a template named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render template `name` with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotFound`] for an unknown name and
    /// [`TemplateError::Render`] when a placeholder cannot be substituted.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String, TemplateError> {
        if !self.contains(name) {
            return Err(TemplateError::NotFound(name.to_string()));
        }
        tracing::debug!("rendering template {name}");
        self.tera
            .render(name, &context.to_tera())
            .map_err(|e| TemplateError::Render {
                name: name.to_string(),
                reason: error_chain(&e),
            })
    }
}

/// Flatten an engine error and its causes into a single line.
fn error_chain(err: &tera::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalogue_parses() {
        let store = TemplateStore::embedded().unwrap();
        for (name, _) in embedded::TEMPLATES {
            assert!(store.contains(name), "missing {name}");
        }
    }

    #[test]
    fn render_without_placeholders_returns_source() {
        let store = TemplateStore::embedded().unwrap();
        let text = store.render("valves.yaml", &TemplateContext::new()).unwrap();
        assert_eq!(text, embedded::get_embedded("valves.yaml").unwrap());
    }

    #[test]
    fn render_substitutes_context() {
        let store = TemplateStore::embedded().unwrap();
        let ctx = TemplateContext::new()
            .with("general_organization", "NMGRLData")
            .with("general_remote", "{}/Laboratory");
        let text = store.render("general.ini", &ctx).unwrap();
        assert!(text.contains("organization = NMGRLData"));
        assert!(text.contains("remote = {}/Laboratory"));
    }

    #[test]
    fn render_is_deterministic() {
        let store = TemplateStore::embedded().unwrap();
        let ctx = TemplateContext::new()
            .with("github_org", "NMGRLData")
            .with("app_name", "pycrunch")
            .with("app_id", "0")
            .with("use_login", true)
            .with("massspec_db_version", "16")
            .with("edm_envs_root", "/home/test/.edm/envs")
            .with("edm_env", "pychron")
            .with("pychron_path", "/home/test/.pychron.0/pychron");
        let first = store.render("launcher_mac", &ctx).unwrap();
        let second = store.render("launcher_mac", &ctx).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("PYCHRON_USE_LOGIN=1"));
    }

    #[test]
    fn unknown_template_is_not_found() {
        let store = TemplateStore::embedded().unwrap();
        let err = store
            .render("launcher_win", &TemplateContext::new())
            .unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(name) if name == "launcher_win"));
    }

    #[test]
    fn missing_context_key_is_render_error() {
        let store = TemplateStore::embedded().unwrap();
        let err = store
            .render("update.ini", &TemplateContext::new().with("build_repo", "/x"))
            .unwrap_err();
        match err {
            TemplateError::Render { name, reason } => {
                assert_eq!(name, "update.ini");
                assert!(reason.contains("build_remote"), "reason was: {reason}");
            }
            TemplateError::NotFound(_) => panic!("expected a render error"),
        }
    }

    #[test]
    fn xml_values_are_not_escaped() {
        let store = TemplateStore::from_sources([("t.xml", "<a>{{ v }}</a>")]).unwrap();
        let text = store
            .render("t.xml", &TemplateContext::new().with("v", "R&D <lab>"))
            .unwrap();
        assert_eq!(text, "<a>R&D <lab></a>");
    }

    #[test]
    fn invalid_source_is_rejected() {
        let err = TemplateStore::from_sources([("bad", "{{ unclosed")]).unwrap_err();
        assert!(matches!(err, TemplateError::Render { .. }));
    }

    #[test]
    fn path_values_are_displayed() {
        let v: ContextValue = Path::new("/home/test/Pychron").into();
        assert_eq!(v, ContextValue::Text("/home/test/Pychron".to_string()));
    }
}
