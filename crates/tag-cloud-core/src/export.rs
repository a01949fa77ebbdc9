use crate::model::CloudLayout;
use serde_json::{Value, json};
use tracing::instrument;

/// Serialize a layout as `{ center, rectangles, stats }`.
/// Rectangles keep placement order and use `{x, y, width, height}` with `x,y` top-left.
#[instrument(skip_all, fields(rects = layout.rectangles.len()))]
pub fn to_json(layout: &CloudLayout) -> Value {
    let rects: Vec<Value> = layout
        .rectangles
        .iter()
        .map(|r| json!({"x": r.x, "y": r.y, "width": r.width, "height": r.height}))
        .collect();
    json!({
        "center": {"x": layout.center.x, "y": layout.center.y},
        "rectangles": rects,
        "stats": layout.stats(),
    })
}

/// Compact shape for renderers: `{ center: [x, y], rects: [[x, y, w, h], ...] }`.
pub fn to_json_compact(layout: &CloudLayout) -> Value {
    let rects: Vec<Value> = layout
        .rectangles
        .iter()
        .map(|r| json!([r.x, r.y, r.width, r.height]))
        .collect();
    json!({
        "center": [layout.center.x, layout.center.y],
        "rects": rects,
    })
}
