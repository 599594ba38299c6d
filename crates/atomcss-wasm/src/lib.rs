//! WASM bindings for the atomcss compiler.
//!
//! Exposes `compile()` to JavaScript via wasm-bindgen.
//! Returns a plain JS object mirroring `CompilerOutput` or throws on error.

use atomcss_compiler::{CompilationContext, CompilerOptions, CompilerOutput};
use serde::Serialize;
use wasm_bindgen::prelude::*;

thread_local! {
    // Normalized values are reused across calls from the same host
    static CONTEXT: CompilationContext = CompilationContext::new();
}

/// Compile a JSON document to class names and CSS.
///
/// `options` is an optional JSON string of compiler options
/// (`{ "dev": true, "styleResolution": "property-specificity" }`).
/// Throws a JS error if parsing, validation or compilation fails.
#[wasm_bindgen]
pub fn compile(source: &str, options: Option<String>) -> Result<JsValue, JsError> {
    let output = compile_document(source, options.as_deref())?;

    // Maps must become plain objects, not JS `Map`s
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();

    let js_obj = js_sys::Object::new();
    set_field(&js_obj, "css", &output.css.as_str().into())?;
    set_field(&js_obj, "namespaces", &to_js(&output.namespaces, &serializer)?)?;
    set_field(&js_obj, "keyframes", &to_js(&output.keyframes, &serializer)?)?;
    set_field(&js_obj, "vars", &to_js(&output.vars, &serializer)?)?;
    set_field(&js_obj, "themes", &to_js(&output.themes, &serializer)?)?;
    set_field(&js_obj, "constants", &to_js(&output.constants, &serializer)?)?;
    set_field(&js_obj, "styles", &to_js(&output.styles, &serializer)?)?;
    set_field(
        &js_obj,
        "injectedConstants",
        &to_js(&output.injected_constants, &serializer)?,
    )?;
    set_field(&js_obj, "warnings", &to_js(&output.warnings, &serializer)?)?;

    Ok(js_obj.into())
}

/// Drop every cached normalized value.
#[wasm_bindgen(js_name = clearCache)]
pub fn clear_cache() {
    CONTEXT.with(CompilationContext::clear);
}

/// Get the compiler version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn compile_document(source: &str, options: Option<&str>) -> Result<CompilerOutput, JsError> {
    let options = parse_options(options)?;
    let doc = atomcss_parser::Parser::parse(source).map_err(|e| JsError::new(&e.to_string()))?;
    CONTEXT
        .with(|ctx| atomcss_compiler::compile(&doc, &options, ctx))
        .map_err(|e| JsError::new(&e.to_string()))
}

fn parse_options(options: Option<&str>) -> Result<CompilerOptions, JsError> {
    match options {
        Some(json) if !json.trim().is_empty() => serde_json::from_str(json)
            .map_err(|e| JsError::new(&format!("Invalid compiler options: {e}"))),
        _ => Ok(CompilerOptions::default()),
    }
}

fn to_js<T: Serialize>(
    value: &T,
    serializer: &serde_wasm_bindgen::Serializer,
) -> Result<JsValue, JsError> {
    value
        .serialize(serializer)
        .map_err(|e| JsError::new(&e.to_string()))
}

fn set_field(obj: &js_sys::Object, name: &str, value: &JsValue) -> Result<(), JsError> {
    js_sys::Reflect::set(obj, &name.into(), value)
        .map(|_| ())
        .map_err(|_| JsError::new(&format!("Failed to set {name} property")))
}
