//! Console logging shim
//!
//! On wasm32 this forwards to the browser console; elsewhere it writes to
//! stderr so transport and parse failures stay operator-visible in native
//! embeddings and under `cargo test`.

macro_rules! console_error {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        #[cfg(target_arch = "wasm32")]
        web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(&message));
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{message}");
    }};
}

pub(crate) use console_error;
