use crate::model::{AtlasPackingResult, PackOutput};
use serde_json::{Value, json};

/// Serialize a whole packing run as a JSON object `{ atlases, warnings }`.
/// Suitable for generic tooling; this crate does no file I/O itself.
pub fn to_json(out: &PackOutput) -> Value {
    let atlases: Vec<Value> = out.atlases.iter().map(atlas_to_json).collect();
    let warnings = serde_json::to_value(&out.warnings).unwrap_or(Value::Null);
    json!({
        "atlases": atlases,
        "warnings": warnings,
    })
}

fn atlas_to_json(a: &AtlasPackingResult) -> Value {
    let rects: Vec<Value> = a
        .rects
        .iter()
        .map(|r| json!({"x": r.x, "y": r.y, "w": r.w, "h": r.h}))
        .collect();
    let px_rects: Vec<Value> = a
        .px_rects
        .iter()
        .map(|r| json!({"x": r.x, "y": r.y, "w": r.w, "h": r.h}))
        .collect();
    let padding: Vec<Value> = a
        .padding
        .iter()
        .map(|p| json!({"topBottom": p.top_bottom, "leftRight": p.left_right}))
        .collect();
    json!({
        "width": a.atlas_width,
        "height": a.atlas_height,
        "usedWidth": a.used_width,
        "usedHeight": a.used_height,
        "rects": rects,
        "pixelRects": px_rects,
        "srcImageIndices": a.src_image_indices,
        "padding": padding,
    })
}
