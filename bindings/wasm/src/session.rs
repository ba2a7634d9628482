use pavemeasure::{KeyValueStore, StoreError};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

/// [`KeyValueStore`] over a browser `Storage` area, `sessionStorage` by default.
///
/// Values are stored as JSON strings. The browser does not report its quota,
/// so a full store surfaces as `QuotaExceeded` with a limit of 0.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Storage,
}

impl SessionStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// The window's `sessionStorage`.
    pub fn session() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Backend("no window object".into()))?;
        let storage = window.session_storage()
            .map_err(|e| backend_error("sessionStorage is not accessible", &e))?
            .ok_or_else(|| StoreError::Backend("sessionStorage is not available".into()))?;
        Ok(Self::new(storage))
    }
}

impl KeyValueStore for SessionStore {
    fn put(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        let text = serde_json::to_string(value)?;
        self.storage.set_item(key, &text).map_err(|e| {
            if is_quota_error(&e) {
                web_sys::console::warn_1(&JsValue::from_str(&format!("[session] quota exceeded writing '{key}'")));
                StoreError::QuotaExceeded { needed: key.len() + text.len(), limit: 0 }
            } else {
                backend_error("setItem failed", &e)
            }
        })
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let text = self.storage.get_item(key).map_err(|e| backend_error("getItem failed", &e))?;
        text.map(|text| serde_json::from_str(&text)).transpose().map_err(StoreError::from)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(|e| backend_error("removeItem failed", &e))
    }
}

fn is_quota_error(e: &JsValue) -> bool {
    e.dyn_ref::<DomException>()
        .is_some_and(|e| e.name() == "QuotaExceededError" || e.code() == DomException::QUOTA_EXCEEDED_ERR)
}

fn backend_error(context: &str, e: &JsValue) -> StoreError {
    StoreError::Backend(format!("{context}: {e:?}"))
}
