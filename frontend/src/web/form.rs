//! 表单读取
//!
//! 提交事件 -> `FormData` -> `FormFields`，供 `eventspark::action` 中的表单动作使用。

use eventspark::action::FormFields;
use wasm_bindgen::JsCast;
use web_sys::{FormData, HtmlFormElement, SubmitEvent};

/// 读取提交表单中指定的字段；取不到表单时返回空集合，由动作给出必填提示
pub fn submitted_fields(ev: &SubmitEvent, names: &[&str]) -> FormFields {
    let data = ev
        .target()
        .and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
        .and_then(|form| FormData::new_with_form(&form).ok());

    let Some(data) = data else {
        return FormFields::new();
    };

    names
        .iter()
        .filter_map(|name| data.get(name).as_string().map(|value| (name.to_string(), value)))
        .collect()
}
