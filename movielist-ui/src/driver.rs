#![cfg(target_arch = "wasm32")]

//! Hai timer của chu kỳ sắp xếp: interval 4000 ms cho bước tăng dần và
//! timeout 2000 ms nạp lại mỗi vòng cho bước giảm dần.

use std::cell::RefCell;
use std::rc::Rc;

use movielist_core::{ListRenderer, CYCLE_PERIOD, DESCEND_DELAY};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Window};

use crate::dom::DomTarget;

type SharedRenderer = Rc<RefCell<ListRenderer<DomTarget>>>;

/// Tay cầm hủy chu kỳ: drop hoặc gọi `cancel` sẽ dừng interval lẫn timeout
/// đang chờ.
#[wasm_bindgen]
pub struct SortCycleHandle {
    window: Window,
    interval_id: Option<i32>,
    pending_timeout: Rc<RefCell<Option<i32>>>,
    _ascend: Closure<dyn FnMut()>,
    _descend: Rc<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl SortCycleHandle {
    /// Dừng chu kỳ sắp xếp; bảng giữ nguyên thứ tự tại thời điểm dừng.
    pub fn cancel(&mut self) {
        if let Some(id) = self.interval_id.take() {
            self.window.clear_interval_with_handle(id);
        }
        if let Some(id) = self.pending_timeout.borrow_mut().take() {
            self.window.clear_timeout_with_handle(id);
        }
    }
}

impl Drop for SortCycleHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn report_step_error(err: impl std::fmt::Display) {
    console::error_1(&JsValue::from_str(&format!(
        "Bước chu kỳ sắp xếp thất bại: {err}"
    )));
}

/// Nạp hai timer cho renderer dùng chung và trả về tay cầm hủy.
///
/// Callback không bao giờ chồng lên nhau: cả hai chạy trên event loop đơn
/// của trang, và timeout giảm dần luôn bắn xong trước tick interval kế tiếp.
pub fn start(window: Window, renderer: SharedRenderer) -> Result<SortCycleHandle, JsValue> {
    let pending_timeout: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));

    let descend_renderer = Rc::clone(&renderer);
    let descend_pending = Rc::clone(&pending_timeout);
    let descend: Rc<Closure<dyn FnMut()>> = Rc::new(Closure::wrap(Box::new(move || {
        descend_pending.borrow_mut().take();
        if let Err(err) = descend_renderer.borrow_mut().advance() {
            report_step_error(err);
        }
    }) as Box<dyn FnMut()>));

    let ascend_window = window.clone();
    let ascend_renderer = Rc::clone(&renderer);
    let ascend_pending = Rc::clone(&pending_timeout);
    let ascend_descend = Rc::clone(&descend);
    let ascend = Closure::wrap(Box::new(move || {
        if let Err(err) = ascend_renderer.borrow_mut().advance() {
            report_step_error(err);
            return;
        }

        let callback: &Closure<dyn FnMut()> = &ascend_descend;
        match ascend_window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            DESCEND_DELAY.as_millis() as i32,
        ) {
            Ok(id) => {
                ascend_pending.borrow_mut().replace(id);
            }
            Err(err) => console::error_1(&err),
        }
    }) as Box<dyn FnMut()>);

    let interval_id = window.set_interval_with_callback_and_timeout_and_arguments_0(
        ascend.as_ref().unchecked_ref(),
        CYCLE_PERIOD.as_millis() as i32,
    )?;

    Ok(SortCycleHandle {
        window,
        interval_id: Some(interval_id),
        pending_timeout,
        _ascend: ascend,
        _descend: descend,
    })
}
