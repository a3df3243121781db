//! Token template rendering

use super::sanitize::sanitize;
use crate::domain::{AttributeProvider, ProjectInfo, SheetRef};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Built-in sheet alias for the sheet number
pub const SHEET_NUMBER_TOKEN: &str = "Sheet Number";
/// Built-in sheet alias for the sheet name
pub const SHEET_NAME_TOKEN: &str = "Sheet Name";
/// Built-in project alias for the project number
pub const PROJECT_NUMBER_TOKEN: &str = "Project Number";
/// Built-in project alias for the project name
pub const PROJECT_NAME_TOKEN: &str = "Project Name";

/// Substituted for tokens nothing could resolve
pub const UNKNOWN_TOKEN_VALUE: &str = "Unknown";

/// Label used when a rule is empty or renders to blank output
pub const DEFAULT_FALLBACK_LABEL: &str = "Unnamed";

/// Rule offered when the user has not chosen one yet
pub const DEFAULT_NAMING_RULE: &str = "{Sheet Number}-{Sheet Name}";

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(.*?)\}").expect("token pattern is a valid regex"));

/// Replaces every `{name}` segment with `resolve(name)`
///
/// Segments are matched non-greedily and resolved independently; the
/// output of one token is never scanned again.
///
/// # Example
///
/// ```rust
/// use sheetbatch::core::naming::expand_tokens;
///
/// let out = expand_tokens("--folder={folder}", |name| name.to_uppercase());
/// assert_eq!(out, "--folder=FOLDER");
/// ```
pub fn expand_tokens(template: &str, mut resolve: impl FnMut(&str) -> String) -> String {
    TOKEN_PATTERN
        .replace_all(template, |caps: &Captures| resolve(&caps[1]))
        .into_owned()
}

/// Renders `rule` for a sheet (or for the project only when `sheet` is `None`)
///
/// Returns [`DEFAULT_FALLBACK_LABEL`] for an empty rule or blank output.
pub fn render(rule: &str, sheet: Option<&SheetRef>, project: &ProjectInfo) -> String {
    NamingRule::new(rule).render(sheet, project)
}

/// A naming template plus the label used when it renders blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingRule {
    template: String,
    fallback: String,
}

impl NamingRule {
    /// Creates a rule with the default fallback label
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            fallback: DEFAULT_FALLBACK_LABEL.to_string(),
        }
    }

    /// Replaces the fallback label
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// The raw template
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Token names referenced by the template, in order of appearance
    pub fn tokens(&self) -> Vec<&str> {
        TOKEN_PATTERN
            .captures_iter(&self.template)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Renders the template without sanitizing
    pub fn render(&self, sheet: Option<&SheetRef>, project: &ProjectInfo) -> String {
        if self.template.is_empty() {
            return self.fallback.clone();
        }

        let rendered = expand_tokens(&self.template, |name| resolve_token(name, sheet, project));

        if rendered.trim().is_empty() {
            tracing::debug!(rule = %self.template, "Naming rule rendered blank, using fallback");
            return self.fallback.clone();
        }

        rendered
    }

    /// Renders and sanitizes, yielding a base name safe to use on disk
    pub fn file_base_name(&self, sheet: Option<&SheetRef>, project: &ProjectInfo) -> String {
        sanitize(&self.render(sheet, project))
    }
}

/// Resolution order: sheet attribute, sheet alias, project attribute,
/// project alias, then [`UNKNOWN_TOKEN_VALUE`]
fn resolve_token(name: &str, sheet: Option<&SheetRef>, project: &ProjectInfo) -> String {
    if let Some(sheet) = sheet {
        if let Some(value) = sheet.lookup(name) {
            return value;
        }
        match name {
            SHEET_NUMBER_TOKEN => return sheet.number.clone(),
            SHEET_NAME_TOKEN => return sheet.name.clone(),
            _ => {}
        }
    }

    if let Some(value) = project.lookup(name) {
        return value;
    }

    let alias = match name {
        PROJECT_NUMBER_TOKEN => project.number.as_ref(),
        PROJECT_NAME_TOKEN => project.name.as_ref(),
        _ => None,
    };

    alias
        .cloned()
        .unwrap_or_else(|| UNKNOWN_TOKEN_VALUE.to_string())
}
