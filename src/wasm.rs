use wasm_bindgen::prelude::*;

use crate::{dump, parse_path_with_transform, Transform};

/// Parse path data into an array of primitive objects.
#[wasm_bindgen]
pub fn parse_path(d: &str, transform: Option<String>) -> Result<JsValue, JsValue> {
    let path = parse(d, transform.as_deref())?;
    serde_wasm_bindgen::to_value(&path).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse path data and return the diagnostic dump.
#[wasm_bindgen]
pub fn dump_path(d: &str, precision: usize) -> Result<String, JsValue> {
    let path = parse(d, None)?;
    Ok(dump(&path, precision))
}

fn parse(d: &str, transform: Option<&str>) -> Result<crate::PathData, JsValue> {
    let transform = match transform {
        Some(attr) => Transform::parse(attr)
            .map_err(|e| JsValue::from_str(&format!("Transform parse error: {}", e)))?,
        None => Transform::identity(),
    };
    parse_path_with_transform(d, &transform)
        .map_err(|e| JsValue::from_str(&format!("Path parse error: {}", e)))
}
