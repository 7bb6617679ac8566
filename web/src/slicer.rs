use memoria_core::TileRect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};
use yew::AttrValue;

/// Renders each sheet sub-rectangle into a work canvas and snapshots it as
/// a standalone data-URL image, in the order the geometry was produced.
///
/// All rectangles of one sheet share a size, so a single canvas is reused
/// and the sheet is drawn at a negative offset to bring the wanted
/// fragment into frame.
pub(crate) fn chop_tiles(
    sheet: &HtmlImageElement,
    rects: &[TileRect],
) -> Result<Vec<AttrValue>, JsValue> {
    let mut tiles = Vec::with_capacity(rects.len());
    let Some(first) = rects.first() else {
        return Ok(tiles);
    };

    let canvas: HtmlCanvasElement = gloo::utils::document()
        .create_element("canvas")?
        .dyn_into()?;
    canvas.set_width(first.width as u32);
    canvas.set_height(first.height as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d canvas context unavailable"))?
        .dyn_into()?;

    for rect in rects {
        ctx.clear_rect(0.0, 0.0, rect.width, rect.height);
        ctx.draw_image_with_html_image_element(sheet, -rect.x, -rect.y)?;
        tiles.push(AttrValue::from(canvas.to_data_url()?));
    }

    Ok(tiles)
}
