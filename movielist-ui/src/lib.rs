//! Widget danh sách phim cho môi trường WebAssembly.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod driver;
#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::cell::RefCell;
    use std::rc::Rc;

    use movielist_core::{ListRenderer, RawMovie, StyleMap};
    use serde::Deserialize;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Window};

    use crate::dom::DomTarget;
    use crate::driver;
    use crate::styles;

    pub use crate::driver::SortCycleHandle;

    /// Ghi đè từng khóa của `StyleMap` từ phía JS; khóa vắng giữ mặc định.
    #[derive(Deserialize, Default)]
    struct JsStyleMap {
        #[serde(default)]
        table: Option<String>,
        #[serde(default)]
        row: Option<String>,
        #[serde(default)]
        headers: Option<String>,
        #[serde(default)]
        cell: Option<String>,
        #[serde(default)]
        up: Option<String>,
        #[serde(default)]
        down: Option<String>,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        year: Option<String>,
        #[serde(default)]
        imdb: Option<String>,
    }

    impl From<JsStyleMap> for StyleMap {
        fn from(overrides: JsStyleMap) -> Self {
            let mut base = StyleMap::default();
            if let Some(table) = overrides.table {
                base.table = table;
            }
            if let Some(row) = overrides.row {
                base.row = row;
            }
            if let Some(headers) = overrides.headers {
                base.headers = headers;
            }
            if let Some(cell) = overrides.cell {
                base.cell = cell;
            }
            if let Some(up) = overrides.up {
                base.up = up;
            }
            if let Some(down) = overrides.down {
                base.down = down;
            }
            if let Some(id) = overrides.id {
                base.id = id;
            }
            if let Some(title) = overrides.title {
                base.title = title;
            }
            if let Some(year) = overrides.year {
                base.year = year;
            }
            if let Some(imdb) = overrides.imdb {
                base.imdb = imdb;
            }
            base
        }
    }

    /// Gắn widget danh sách phim vào trang và khởi động chu kỳ sắp xếp.
    ///
    /// `selector` rỗng nghĩa là gắn thẳng vào `document.body`. `movies` là
    /// mảng bản ghi lỏng; `styles` là object ghi đè lớp CSS tùy chọn. Trả về
    /// tay cầm hủy chu kỳ.
    #[wasm_bindgen]
    pub fn mount_movie_list(
        selector: &str,
        movies: JsValue,
        styles_override: Option<JsValue>,
    ) -> Result<SortCycleHandle, JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        let mount: Element = if selector.is_empty() {
            document
                .body()
                .ok_or_else(|| JsValue::from_str("Document không có body"))?
                .into()
        } else {
            document
                .query_selector(selector)
                .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
                .ok_or_else(|| JsValue::from_str("Không tìm thấy element theo selector"))?
        };

        styles::ensure_styles(&document)?;

        let raw: Vec<RawMovie> = from_value(movies)
            .map_err(|err| JsValue::from_str(&format!("Không đọc được danh sách phim: {err}")))?;

        let style_map = match styles_override {
            Some(js) if !js.is_undefined() && !js.is_null() => {
                let overrides: JsStyleMap = from_value(js)
                    .map_err(|err| JsValue::from_str(&format!("Không đọc được styles: {err}")))?;
                StyleMap::from(overrides)
            }
            _ => StyleMap::default(),
        };

        let target = DomTarget::new(document, mount, style_map.clone());
        let renderer = ListRenderer::new(&raw, style_map, target)
            .map_err(|err| JsValue::from_str(&format!("Lỗi danh sách phim: {err}")))?;

        driver::start(window, Rc::new(RefCell::new(renderer)))
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::{mount_movie_list, SortCycleHandle};

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_movie_list(
    _: &str,
    _: wasm_bindgen::JsValue,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "movielist-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
