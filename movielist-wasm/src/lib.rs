//! Bridge WASM <-> JavaScript trung lập framework: chuẩn hóa và sắp xếp,
//! không đụng tới DOM.

use movielist_core::{sort_ascending, Field, MovieListError, MovieRecord};
use movielist_data::{parse_movies_str, parse_movies_value};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// Chuẩn hóa danh sách phim lỏng thành bản ghi sạch.
///
/// Đầu vào nhận cả mảng JS lẫn chuỗi JSON.
#[wasm_bindgen]
pub fn normalize_movies(movies: JsValue) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let value = from_value::<serde_json::Value>(movies)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được danh sách phim: {err}")))?;

    let records = match &value {
        serde_json::Value::String(text) => parse_movies_str(text),
        other => parse_movies_value(other),
    }
    .map_err(|err| JsValue::from_str(&format_movielist_error(err)))?;

    to_value(&records)
        .map_err(|err| JsValue::from_str(&format!("Không serialize danh sách: {err}")))
}

/// Một bước sắp xếp tăng dần trên bản ghi đã chuẩn hóa sẵn.
///
/// `field` là tên cột: `id`, `title`, `year` hoặc `imdb`. Trả về mảng mới,
/// không sửa mảng đầu vào.
#[wasm_bindgen]
pub fn sort_movies(movies: JsValue, field: &str) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let records: Vec<MovieRecord> = from_value(movies)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được bản ghi: {err}")))?;

    let field = Field::from_name(field)
        .ok_or_else(|| JsValue::from_str(&format!("Không có cột `{field}`")))?;

    let sorted = sort_ascending(&records, field);

    to_value(&sorted)
        .map_err(|err| JsValue::from_str(&format!("Không serialize danh sách: {err}")))
}

fn format_movielist_error(err: MovieListError) -> String {
    format!("Lỗi danh sách phim: {err}")
}
