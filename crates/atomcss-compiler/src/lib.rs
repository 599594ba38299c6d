//! atomcss Compiler
//!
//! Compiles style namespaces into atomic CSS: every declaration becomes one
//! hashed class and one injectable rule. Also compiles theme variables,
//! theme overrides, constants and keyframes, and renders the final
//! stylesheet.
//!
//! ```text
//! Document → compile() → CompilerOutput { namespaces, styles, css, .. }
//!
//! namespace → validate → flatten (shorthands, conditions) → PreRules
//!           → class names + InjectableStyle → styles table → css
//! ```

pub mod constants;
pub mod css;
pub mod flatten;
pub mod hash;
pub mod keyframes;
pub mod lint;
pub mod namespace;
pub mod normalize;
pub mod options;
pub mod pre_rule;
pub mod priority;
pub mod rtl;
pub mod rule;
pub mod shorthands;
pub mod theme;
pub mod value;

pub use constants::InjectableConstant;
pub use lint::LintWarning;
pub use namespace::{compile_namespaces, CompiledNamespace, CompiledValue};
pub use normalize::ValueCache;
pub use options::{CompilerOptions, StyleResolution};
pub use theme::{CompiledVars, ThemeClass};

use atomcss_lexer::LexerError;
use atomcss_parser::{Document, ValidationError};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// A rule to inject for one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InjectableStyle {
    /// Position in the stylesheet; higher wins.
    pub priority: f64,
    pub ltr: String,
    /// Right-to-left variant, when the rule depends on direction.
    pub rtl: Option<String>,
}

/// Class name (or theme/animation key) → rule, in first-seen order.
pub type StylesTable = IndexMap<String, InjectableStyle>;

/// Everything compiled from one document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOutput {
    pub namespaces: IndexMap<String, CompiledNamespace>,
    /// Animation label → generated animation name.
    pub keyframes: IndexMap<String, String>,
    pub vars: IndexMap<String, CompiledVars>,
    pub themes: IndexMap<String, ThemeClass>,
    pub constants: IndexMap<String, IndexMap<String, String>>,
    pub styles: StylesTable,
    pub injected_constants: IndexMap<String, InjectableConstant>,
    pub warnings: Vec<LintWarning>,
    pub css: String,
}

/// Compilation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("'{property}' is not supported with the '{strategy}' style resolution, use longhand properties instead")]
    UnsupportedShorthand {
        property: String,
        strategy: &'static str,
    },

    #[error("Invalid value for '{property}': '{value}'")]
    InvalidShorthandValue { property: String, value: String },

    #[error("Unclosed function in value '{value}'")]
    UnclosedFunction { value: String },

    #[error(transparent)]
    ValueSyntax(#[from] LexerError),

    #[error("Variable '{variable}' needs a 'default' value")]
    MissingDefault { variable: String },

    #[error("Variable '{variable}' cannot be {found}: use a string, number or conditional object")]
    UnsupportedThemeValue {
        variable: String,
        found: &'static str,
    },

    #[error("Invalid condition '{condition}' for variable '{variable}': only 'default' and at-rules are allowed")]
    InvalidThemeCondition { variable: String, condition: String },

    #[error("Unknown theme '{theme}'")]
    UnknownTheme { theme: String },

    #[error("Theme '{theme}' has no variable '{variable}'")]
    UnknownThemeVariable { theme: String, variable: String },

    #[error("Constant key '{key}' cannot start with '--'")]
    InvalidConstKey { key: String },

    #[error("Constant '{key}' cannot be {found}: use a string or number")]
    InvalidConstValue { key: String, found: &'static str },

    #[error("Invalid keyframes '{name}': {message}")]
    InvalidKeyframes { name: String, message: String },
}

/// State shared by every compilation that uses it: today only the value
/// normalization cache.
#[derive(Debug, Clone, Default)]
pub struct CompilationContext {
    cache: Arc<ValueCache>,
}

impl CompilationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context reusing an existing cache, e.g. one per worker pool.
    pub fn with_cache(cache: Arc<ValueCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &ValueCache {
        &self.cache
    }

    pub fn shared_cache(&self) -> Arc<ValueCache> {
        Arc::clone(&self.cache)
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

/// Compile a document.
pub fn compile(
    doc: &Document,
    options: &CompilerOptions,
    ctx: &CompilationContext,
) -> Result<CompilerOutput, CompileError> {
    tracing::debug!(
        namespaces = doc.create.len(),
        keyframes = doc.keyframes.len(),
        themes = doc.define_vars.len(),
        resolution = %options.style_resolution,
        "compiling document"
    );

    let mut output = CompilerOutput::default();

    output.namespaces =
        namespace::compile_namespaces_into(&doc.create, options, ctx, &mut output.styles)?;

    for (label, frames) in &doc.keyframes {
        let (animation, style) = keyframes::keyframes(label, frames, options, ctx.cache())?;
        output.styles.entry(animation.clone()).or_insert(style);
        output.keyframes.insert(label.clone(), animation);
    }

    for (theme_name, variables) in &doc.define_vars {
        let (vars, styles) = theme::define_vars(theme_name, variables, options)?;
        merge_styles(&mut output.styles, styles);
        output.vars.insert(theme_name.clone(), vars);
    }

    for (name, theme_override) in &doc.create_theme {
        let vars = output
            .vars
            .get(&theme_override.theme)
            .ok_or_else(|| CompileError::UnknownTheme {
                theme: theme_override.theme.clone(),
            })?;
        let (theme, styles) = theme::create_theme(vars, &theme_override.values, options)?;
        merge_styles(&mut output.styles, styles);
        output.themes.insert(name.clone(), theme);
    }

    for (group, values) in &doc.define_consts {
        let (values, injected) = constants::define_consts(group, values, options)?;
        output.injected_constants.extend(injected);
        output.constants.insert(group.clone(), values);
    }

    if let Some(defined) = &options.defined_css_variables {
        let mut known: HashSet<String> = defined.iter().cloned().collect();
        known.extend(
            output
                .vars
                .values()
                .flat_map(|vars| vars.vars.keys().filter_map(move |key| vars.variable_name(key)))
                .map(str::to_string),
        );
        output.warnings = lint::undefined_variables(&doc.create, &known);
        for warning in &output.warnings {
            tracing::warn!("{warning}");
        }
    }

    output.css = css::render_stylesheet(&output.styles, &output.injected_constants);
    Ok(output)
}

/// Add `incoming` to `styles`, keeping existing entries.
fn merge_styles(styles: &mut StylesTable, incoming: StylesTable) {
    for (key, style) in incoming {
        styles.entry(key).or_insert(style);
    }
}
