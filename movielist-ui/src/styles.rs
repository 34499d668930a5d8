#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-movielist-ui]";

/// Default CSS for the widget along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --movielist-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --movielist-bg: #ffffff;
  --movielist-border: rgba(148, 163, 184, 0.28);
  --movielist-radius: 12px;
  --movielist-text: #1f2933;
  --movielist-muted: #52606d;
  --movielist-heading: #11181c;
  --movielist-surface: #f8fafc;
  --movielist-stripe: rgba(148, 163, 184, 0.08);
  --movielist-arrow-up: #047857;
  --movielist-arrow-down: #b42318;
}

.movielist-table {
  font-family: var(--movielist-font-family);
  background: var(--movielist-bg);
  color: var(--movielist-text);
  border: 1px solid var(--movielist-border);
  border-radius: var(--movielist-radius);
  display: inline-flex;
  flex-direction: column;
  overflow: hidden;
  margin: 12px 0;
  box-shadow: 0 12px 24px rgba(15, 23, 42, 0.08);
}

.movielist-row {
  display: flex;
}

.movielist-row:nth-child(even) {
  background: var(--movielist-stripe);
}

.movielist-headers {
  background: var(--movielist-surface);
  color: var(--movielist-heading);
  font-weight: 600;
  border-bottom: 1px solid var(--movielist-border);
}

.movielist-cell {
  padding: 8px 14px;
  font-variant-numeric: tabular-nums;
  white-space: nowrap;
}

.movielist-id {
  min-width: 52px;
  text-align: right;
}

.movielist-title {
  min-width: 220px;
}

.movielist-year {
  min-width: 84px;
  color: var(--movielist-muted);
}

.movielist-imdb {
  min-width: 72px;
  text-align: right;
}

.movielist-up::after {
  content: ' \25B2';
  color: var(--movielist-arrow-up);
  font-size: 0.72rem;
}

.movielist-down::after {
  content: ' \25BC';
  color: var(--movielist-arrow-down);
  font-size: 0.72rem;
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-movielist-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
