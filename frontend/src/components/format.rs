//! 日期展示格式化
//!
//! 复用浏览器自带的 locale 格式化，避免引入日期库。

use wasm_bindgen::JsValue;

/// ISO 时间串 -> "Jan 15, 2025"
pub fn format_date(iso: &str) -> String {
    if iso.is_empty() {
        return "N/A".to_string();
    }
    let date = js_sys::Date::new(&JsValue::from_str(iso));
    if date.get_time().is_nan() {
        return iso.to_string();
    }
    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&options, &"year".into(), &"numeric".into());
    let _ = js_sys::Reflect::set(&options, &"month".into(), &"short".into());
    let _ = js_sys::Reflect::set(&options, &"day".into(), &"numeric".into());
    date.to_locale_date_string("en-US", &options.into()).into()
}

/// ISO 时间串 -> "Jan 15, 2025, 09:30 AM"
pub fn format_date_time(iso: &str) -> String {
    if iso.is_empty() {
        return "N/A".to_string();
    }
    let date = js_sys::Date::new(&JsValue::from_str(iso));
    if date.get_time().is_nan() {
        return iso.to_string();
    }
    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&options, &"year".into(), &"numeric".into());
    let _ = js_sys::Reflect::set(&options, &"month".into(), &"short".into());
    let _ = js_sys::Reflect::set(&options, &"day".into(), &"numeric".into());
    let _ = js_sys::Reflect::set(&options, &"hour".into(), &"2-digit".into());
    let _ = js_sys::Reflect::set(&options, &"minute".into(), &"2-digit".into());
    date.to_locale_string("en-US", &options.into()).into()
}
