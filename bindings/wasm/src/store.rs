use pavemeasure::{
    BoundaryConfig, BoundaryStore, CompressOptions, ExportFormat, GeoPoint, RawBoundaryInput,
    RetrieveOptions, ValidateOptions,
};
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use crate::{common::*, session::SessionStore};

#[wasm_bindgen]
pub struct WasmBoundaryStore {
    inner: BoundaryStore<SessionStore>,
}

#[wasm_bindgen]
impl WasmBoundaryStore {
    /// Open a store over `sessionStorage`.
    /// config: optional `{ store: { keyPrefix, validation, compression, ... } }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmBoundaryStore, JsValue> {
        let config: BoundaryConfig = from_js_or_default(config, "config")?;
        let backend = SessionStore::session().map_err(js_err)?;
        let inner = BoundaryStore::new(backend, config.store).map_err(js_err)?;
        Ok(WasmBoundaryStore { inner })
    }

    /// input: `{ coordinates: [{lat, lng}], area?, perimeter?, imagery? }`.
    /// Returns the stored record.
    #[wasm_bindgen(js_name = "storeBoundary")]
    pub fn store_boundary(&mut self, tool_type: &str, input: JsValue) -> Result<JsValue, JsValue> {
        let input: RawBoundaryInput = from_js(input, "boundary input")?;
        let record = self.inner.store_boundary(tool_type, &input).map_err(js_err)?;
        to_js(&record)
    }

    #[wasm_bindgen(js_name = "retrieveBoundary")]
    pub fn retrieve_boundary(&self, tool_type: &str, revalidate: Option<bool>) -> Result<JsValue, JsValue> {
        let options = RetrieveOptions { revalidate: revalidate.unwrap_or(false) };
        let record = self.inner.retrieve_boundary(tool_type, options).map_err(js_err)?;
        to_js(&record)
    }

    /// Returns `{ data, filename, contentType }` for a download link.
    /// format: "json", "geojson" or "csv".
    #[wasm_bindgen(js_name = "exportBoundary")]
    pub fn export_boundary(&self, tool_type: &str, format: &str) -> Result<JsValue, JsValue> {
        let format: ExportFormat = format.parse().map_err(js_err)?;
        let exported = self.inner.export_boundary(tool_type, format).map_err(js_err)?;
        to_js(&exported)
    }

    #[wasm_bindgen(js_name = "importBoundary")]
    pub fn import_boundary(&mut self, tool_type: &str, data: &str, format: &str) -> Result<JsValue, JsValue> {
        let format: ExportFormat = format.parse().map_err(js_err)?;
        let record = self.inner.import_boundary(tool_type, data, format).map_err(js_err)?;
        to_js(&record)
    }

    /// Returns whether a record existed.
    #[wasm_bindgen(js_name = "removeBoundary")]
    pub fn remove_boundary(&mut self, tool_type: &str) -> Result<bool, JsValue> {
        self.inner.remove_boundary(tool_type).map_err(js_err)
    }

    #[wasm_bindgen(js_name = "listBoundaries")]
    pub fn list_boundaries(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.list_boundaries().map_err(js_err)?)
    }
}

/// Validate `[{lat, lng}]` without storing. Returns the validation result.
#[wasm_bindgen(js_name = "validateCoordinates")]
pub fn validate_coordinates(coordinates: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let points: Vec<GeoPoint> = from_js(coordinates, "coordinates")?;
    let options: ValidateOptions = from_js_or_default(options, "validation options")?;
    options.check().map_err(js_err)?;
    to_js(&pavemeasure::validate_coordinates(&points, &options))
}

/// Simplify a ring. Returns `{ coordinates, originalCount, compressedCount, ... }`.
#[wasm_bindgen(js_name = "compressCoordinates")]
pub fn compress_coordinates(coordinates: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let points: Vec<GeoPoint> = from_js(coordinates, "coordinates")?;
    let options: CompressOptions = from_js_or_default(options, "compression options")?;
    to_js(&pavemeasure::compress(&points, &options).map_err(js_err)?)
}
