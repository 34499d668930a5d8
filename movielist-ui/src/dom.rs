#![cfg(target_arch = "wasm32")]

//! Đích render DOM thật: dựng cây bảng thành element và giữ lại node hàng
//! tiêu đề giữa các lần dựng.

use movielist_core::{
    Direction, Field, MovieListError, RenderTarget, RowView, StyleMap, TableView,
    WELCOME_SELECTOR,
};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

fn target_err(err: JsValue) -> MovieListError {
    MovieListError::Target(format!("{err:?}"))
}

/// `RenderTarget` ghi vào DOM của trang chủ quản.
pub struct DomTarget {
    document: Document,
    mount: Element,
    styles: StyleMap,
    /// Bảng đang gắn, gỡ khỏi cây trước khi gắn bảng mới.
    table: Option<Element>,
    /// Node hàng tiêu đề, dựng một lần rồi chuyển sang bảng mới mỗi lần
    /// dựng lại.
    header: Option<Element>,
    header_cells: Vec<(Field, Element)>,
}

impl DomTarget {
    pub fn new(document: Document, mount: Element, styles: StyleMap) -> Self {
        Self {
            document,
            mount,
            styles,
            table: None,
            header: None,
            header_cells: Vec::new(),
        }
    }

    fn ensure_header(&mut self, header: &RowView) -> Result<Element, MovieListError> {
        if let Some(el) = &self.header {
            return Ok(el.clone());
        }

        let (el, cells) = self.build_row(header)?;
        self.header_cells = cells;
        self.header = Some(el.clone());
        Ok(el)
    }

    fn build_row(&self, row: &RowView) -> Result<(Element, Vec<(Field, Element)>), MovieListError> {
        let row_el = self
            .document
            .create_element("div")
            .map_err(target_err)?;
        row_el.set_class_name(&row.classes.join(" "));
        for (field, value) in &row.data {
            row_el
                .set_attribute(&format!("data-{field}"), value)
                .map_err(target_err)?;
        }

        let mut cells = Vec::with_capacity(row.cells.len());
        for cell in &row.cells {
            let cell_el = self
                .document
                .create_element("div")
                .map_err(target_err)?;
            cell_el.set_class_name(&cell.classes.join(" "));
            cell_el.set_text_content(Some(&cell.text));
            row_el.append_child(&cell_el).map_err(target_err)?;
            cells.push((cell.field, cell_el));
        }

        Ok((row_el, cells))
    }

    /// Gỡ mũi tên khỏi mọi ô tiêu đề rồi đánh dấu lại cột đang sắp xếp.
    fn apply_indicator(
        &self,
        indicator: Option<(Field, Direction)>,
    ) -> Result<(), MovieListError> {
        for (field, cell_el) in &self.header_cells {
            let class_list = cell_el.class_list();
            class_list
                .remove_2(&self.styles.up, &self.styles.down)
                .map_err(target_err)?;
            if let Some((active, direction)) = indicator {
                if *field == active {
                    class_list
                        .add_1(self.styles.indicator_class(direction))
                        .map_err(target_err)?;
                }
            }
        }
        Ok(())
    }
}

impl RenderTarget for DomTarget {
    fn mount_table(&mut self, view: &TableView) -> Result<(), MovieListError> {
        let header = self.ensure_header(&view.header)?;
        self.apply_indicator(view.indicator)?;

        let table = self
            .document
            .create_element("div")
            .map_err(target_err)?;
        table.set_class_name(&view.class);
        table.append_child(&header).map_err(target_err)?;
        for row in &view.rows {
            let (row_el, _) = self.build_row(row)?;
            table.append_child(&row_el).map_err(target_err)?;
        }

        if let Some(previous) = self.table.take() {
            previous.remove();
        }
        self.mount.append_child(&table).map_err(target_err)?;
        self.table = Some(table);
        Ok(())
    }

    fn set_heading(&mut self, text: &str) -> Result<(), MovieListError> {
        let welcome = self
            .document
            .query_selector(WELCOME_SELECTOR)
            .map_err(target_err)?
            .ok_or_else(|| MovieListError::MissingAnchor {
                selector: WELCOME_SELECTOR.to_string(),
            })?;
        welcome.set_text_content(Some(text));
        Ok(())
    }

    fn set_document_title(&mut self, text: &str) -> Result<(), MovieListError> {
        self.document.set_title(text);
        Ok(())
    }
}
