use jsf_core::{Filter, FilterOptions, Policy, Predicate, filter_value};
use wasm_bindgen::prelude::*;

/// Filter a JSON document by path.
///
/// `mode` is one of `pick`, `ignore`, or `replace`; matched values are
/// replaced with `null` in `replace` mode.
#[wasm_bindgen]
pub fn filter(path: &str, json_str: &str, mode: &str, once: bool) -> Result<String, String> {
    let json: serde_json::Value =
        serde_json::from_str(json_str).map_err(|e| format!("JSON parse error: {}", e))?;

    let policy = match mode {
        "pick" => Policy::Pick,
        "ignore" => Policy::Ignore,
        "replace" => Policy::Replace { allow_empty: false },
        other => return Err(format!("unknown mode: {other}")),
    };
    let options = FilterOptions::new(Predicate::path(path)).once(once);
    let results = filter_value(&json, Filter::new(options, policy)).map_err(|e| e.to_string())?;

    serde_json::to_string_pretty(&results).map_err(|e| format!("Serialization error: {}", e))
}
