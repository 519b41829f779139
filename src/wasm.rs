use wasm_bindgen::prelude::*;

/// Evaluate one command line for the web front end. Errors come back as
/// their message, like any other output.
#[wasm_bindgen]
pub fn eval_line(code: &str) -> String {
    crate::program::eval_line(code).unwrap_or_else(|err| err.to_string())
}

/// Canonical rendering of a formula, or the error message.
#[wasm_bindgen]
pub fn format_formula(code: &str) -> String {
    crate::parser::parse(code)
        .map(|f| f.to_string())
        .unwrap_or_else(|err| err.to_string())
}
