//! Persistence of validated boundaries through a key-value backend.
mod file;
mod index;
mod kv;
mod record;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{BoundaryError, BoundaryResult, StoreError},
    geom::{self, GeometryMetrics},
    io::{self, ExportFormat, ExportedBoundary, ThumbnailOptions},
    quality,
    simplify::{self, CompressOptions},
    validate::{validate_coordinates, validate_geometry, GeometryLimits, ValidateOptions, ValidationResult},
};

pub use file::FileStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use record::{
    fingerprint, BoundaryData, BoundaryRecord, ImageryInput, ImageryMetadata, ImageryType,
    RawBoundaryInput, RecordValidation, ThumbnailData,
};
use index::StorageIndex;

static TOOL_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.:-]{1,128}$").expect("static regex")
});

/// Suffix of the key under which the store keeps its index.
const INDEX_SUFFIX: &str = "__index";

/// Bounds on what the store keeps in its backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StorageLimits {
    /// Default 20.
    pub max_records: usize,
    /// Serialized bytes across all records. Default 4 MiB.
    pub max_total_bytes: usize,
}

impl Default for StorageLimits {
    fn default() -> Self {
        Self { max_records: 20, max_total_bytes: 4 * 1024 * 1024 }
    }
}

/// Options for [`BoundaryStore`]. `None` disables compression or thumbnails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StoreOptions {
    pub key_prefix: String,
    pub validation: ValidateOptions,
    pub geometry: GeometryLimits,
    pub compression: Option<CompressOptions>,
    pub thumbnail: Option<ThumbnailOptions>,
    pub limits: StorageLimits,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key_prefix: "boundary_".into(),
            validation: ValidateOptions::default(),
            geometry: GeometryLimits::default(),
            compression: Some(CompressOptions::default()),
            thumbnail: Some(ThumbnailOptions::default()),
            limits: StorageLimits::default(),
        }
    }
}

impl StoreOptions {
    pub fn check(&self) -> BoundaryResult<()> {
        if !self.key_prefix.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')) {
            return Err(BoundaryError::invalid_option("keyPrefix", "may only contain [A-Za-z0-9_.:-]"));
        }
        self.validation.check()?;
        self.geometry.check()?;
        if let Some(compression) = &self.compression { compression.check()? }
        if let Some(thumbnail) = &self.thumbnail { thumbnail.check()? }
        if self.limits.max_records == 0 {
            return Err(BoundaryError::invalid_option("maxRecords", "must be at least 1"));
        }
        if self.limits.max_total_bytes == 0 {
            return Err(BoundaryError::invalid_option("maxTotalBytes", "must be at least 1"));
        }
        Ok(())
    }
}

/// Options for [`BoundaryStore::retrieve_boundary`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetrieveOptions {
    /// Re-run validation and scoring on the stored coordinates.
    pub revalidate: bool,
}

/// Validates, compresses, scores and persists boundaries, one per tool type.
#[derive(Debug)]
pub struct BoundaryStore<S> {
    backend: S,
    options: StoreOptions,
}

impl<S: KeyValueStore> BoundaryStore<S> {
    pub fn new(backend: S, options: StoreOptions) -> BoundaryResult<Self> {
        options.check()?;
        Ok(Self { backend, options })
    }

    pub fn with_defaults(backend: S) -> Self {
        Self { backend, options: StoreOptions::default() }
    }

    #[inline] pub fn options(&self) -> &StoreOptions { &self.options }

    #[inline] pub fn backend(&self) -> &S { &self.backend }

    #[inline] pub fn backend_mut(&mut self) -> &mut S { &mut self.backend }

    #[inline] pub fn into_inner(self) -> S { self.backend }

    /// Run the full pipeline on `input` without persisting anything.
    ///
    /// Fails with [`BoundaryError::Validation`] when the coordinates cannot
    /// be repaired. Geometry issues are recorded in the result's validation
    /// lists but never fail the call.
    pub fn prepare(&self, tool_type: &str, input: &RawBoundaryInput) -> BoundaryResult<BoundaryRecord> {
        check_tool_type(tool_type)?;

        let mut validation = validate_coordinates(&input.coordinates, &self.options.validation);
        if !validation.is_valid {
            return Err(BoundaryError::Validation { issues: validation.errors });
        }
        let ring = validation.coordinates().to_vec();

        let geometry = validate_geometry(&ring, input.area, input.perimeter, &self.options.geometry);
        validation.absorb_geometry(&geometry);

        let compression = self.options.compression.as_ref()
            .map(|options| simplify::compress(&ring, options))
            .transpose()?;
        let coordinates = match &compression {
            Some(result) => result.coordinates.clone(),
            None => ring,
        };

        let score = quality::score(&validation);
        let thumbnail = self.options.thumbnail.as_ref().and_then(|options| {
            io::render_thumbnail(&coordinates, Some(score), options)
                .inspect_err(|e| tracing::warn!(tool_type, error = %e, "skipping boundary thumbnail"))
                .ok()
        });

        tracing::debug!(
            tool_type,
            points = coordinates.len(),
            area = geometry.metrics.area,
            score,
            "prepared boundary record"
        );

        Ok(BoundaryRecord {
            fingerprint: fingerprint(&coordinates),
            boundary: BoundaryData {
                coordinates,
                area: geometry.metrics.area,
                perimeter: geometry.metrics.perimeter,
                units: Default::default(),
            },
            validation: Some(RecordValidation::from_result(validation, score, Some(geometry.metrics))),
            compression,
            thumbnail,
            imagery: ImageryMetadata::from_input(input.imagery.as_ref()),
            timestamp: record::now_millis(),
            tool_type: tool_type.to_string(),
        })
    }

    /// Validate and persist `input` under `tool_type`, replacing any earlier record.
    ///
    /// Nothing is written when validation fails. When the write would break
    /// the storage limits, or the backend reports its quota is full, every
    /// record this store wrote is evicted and the write is retried once.
    pub fn store_boundary(&mut self, tool_type: &str, input: &RawBoundaryInput) -> BoundaryResult<BoundaryRecord> {
        let record = self.prepare(tool_type, input)?;
        let key = self.key(tool_type)?;
        let value = serde_json::to_value(&record)?;
        self.persist(&key, &value)?;

        tracing::info!(
            tool_type,
            points = record.coordinates().len(),
            quality = record.quality_score(),
            "stored boundary"
        );
        Ok(record)
    }

    /// Load the record stored under `tool_type`.
    ///
    /// Records without validation, or all records when `revalidate` is set,
    /// are re-validated and re-scored on the way out. The stored copy is not
    /// modified.
    pub fn retrieve_boundary(&self, tool_type: &str, options: RetrieveOptions) -> BoundaryResult<BoundaryRecord> {
        let key = self.key(tool_type)?;
        let corrupt = |e: serde_json::Error| {
            tracing::warn!(tool_type, error = %e, "stored boundary record is corrupted");
            BoundaryError::CorruptRecord { key: tool_type.to_string(), reason: e.to_string() }
        };
        let value = match self.backend.get(&key) {
            Ok(value) => value.ok_or_else(|| BoundaryError::NotFound(tool_type.to_string()))?,
            Err(StoreError::Json(e)) => return Err(corrupt(e)),
            Err(e) => return Err(e.into()),
        };

        let mut record: BoundaryRecord = serde_json::from_value(value).map_err(corrupt)?;

        if options.revalidate || record.validation.is_none() {
            self.revalidate(&mut record);
        }
        Ok(record)
    }

    /// Delete the record under `tool_type`. Returns whether one existed.
    pub fn remove_boundary(&mut self, tool_type: &str) -> BoundaryResult<bool> {
        let key = self.key(tool_type)?;
        // an unreadable record still counts as present
        let existed = match self.backend.get(&key) {
            Ok(value) => value.is_some(),
            Err(StoreError::Json(_)) => true,
            Err(e) => return Err(e.into()),
        };
        self.backend.remove(&key)?;

        let mut index = self.load_index()?;
        if index.remove(&key) {
            self.save_index(&index)?;
        }

        if existed { tracing::info!(tool_type, "removed boundary") }
        Ok(existed)
    }

    /// Tool types with a record written by this store, in key order.
    pub fn list_boundaries(&self) -> BoundaryResult<Vec<String>> {
        let index = self.load_index()?;
        Ok(index.keys()
            .filter_map(|key| key.strip_prefix(self.options.key_prefix.as_str()))
            .map(str::to_string)
            .collect())
    }

    /// Serialize the record under `tool_type` as a downloadable file.
    pub fn export_boundary(&self, tool_type: &str, format: ExportFormat) -> BoundaryResult<ExportedBoundary> {
        let record = self.retrieve_boundary(tool_type, RetrieveOptions::default())?;
        io::export_record(&record, format)
    }

    /// Parse `data` and store it under `tool_type` through the full pipeline.
    pub fn import_boundary(&mut self, tool_type: &str, data: &str, format: ExportFormat) -> BoundaryResult<BoundaryRecord> {
        check_tool_type(tool_type)?;
        let mut input = io::parse_boundary(data, format)?;
        // exports carry the closing point; a ring at the vertex limit would otherwise be rejected
        let validation = &self.options.validation;
        if input.coordinates.len() > validation.max_vertices
            && geom::is_closed(&input.coordinates, validation.closure_tolerance)
        {
            input.coordinates.pop();
        }
        tracing::debug!(tool_type, %format, points = input.coordinates.len(), "importing boundary");
        self.store_boundary(tool_type, &input)
    }

    fn revalidate(&self, record: &mut BoundaryRecord) {
        let mut validation = validate_coordinates(record.coordinates(), &self.options.validation);
        let metrics = validation.is_valid.then(|| {
            let geometry = validate_geometry(
                validation.coordinates(),
                Some(record.boundary.area),
                Some(record.boundary.perimeter),
                &self.options.geometry,
            );
            validation.absorb_geometry(&geometry);
            geometry.metrics
        });

        let score = quality::score(&validation);
        tracing::debug!(tool_type = %record.tool_type, valid = validation.is_valid, score, "revalidated boundary");
        record.validation = Some(RecordValidation::from_result(validation, score, metrics));
    }

    fn key(&self, tool_type: &str) -> BoundaryResult<String> {
        check_tool_type(tool_type)?;
        Ok(format!("{}{tool_type}", self.options.key_prefix))
    }

    fn index_key(&self) -> String {
        format!("{}{INDEX_SUFFIX}", self.options.key_prefix)
    }

    fn load_index(&self) -> BoundaryResult<StorageIndex> {
        let parsed = match self.backend.get(&self.index_key()) {
            Ok(None) => return Ok(StorageIndex::default()),
            Ok(Some(value)) => serde_json::from_value(value),
            Err(StoreError::Json(e)) => Err(e),
            Err(e) => return Err(e.into()),
        };
        Ok(parsed.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "storage index is corrupted; starting a new one");
            StorageIndex::default()
        }))
    }

    fn save_index(&mut self, index: &StorageIndex) -> BoundaryResult<()> {
        let key = self.index_key();
        self.backend.put(&key, &serde_json::to_value(index)?)?;
        Ok(())
    }

    fn persist(&mut self, key: &str, value: &Value) -> BoundaryResult<()> {
        let bytes = key.len() + serde_json::to_string(value)?.len();
        let limit = self.options.limits.max_total_bytes;
        if bytes > limit {
            return Err(StoreError::QuotaExceeded { needed: bytes, limit }.into());
        }

        let mut index = self.load_index()?;
        if index.would_exceed(key, bytes, &self.options.limits) {
            tracing::warn!(records = index.len(), bytes = index.total_bytes(), "storage limits reached; evicting stored boundaries");
            self.evict_all(&mut index)?;
        }

        match self.backend.put(key, value) {
            Ok(()) => {}
            Err(StoreError::QuotaExceeded { needed, limit }) => {
                tracing::warn!(needed, limit, "backend quota exceeded; evicting stored boundaries and retrying");
                self.evict_all(&mut index)?;
                self.backend.put(key, value)?;
            }
            Err(e) => return Err(e.into()),
        }

        index.insert(key, bytes);
        self.save_index(&index)
    }

    /// Full clear of every indexed record.
    fn evict_all(&mut self, index: &mut StorageIndex) -> BoundaryResult<()> {
        for key in index.keys() {
            self.backend.remove(key)?;
        }
        index.clear();
        self.save_index(index)
    }
}

impl RecordValidation {
    pub fn from_result(validation: ValidationResult, quality_score: u8, geometry: Option<GeometryMetrics>) -> Self {
        Self {
            is_valid: validation.is_valid,
            errors: validation.errors,
            warnings: validation.warnings,
            metadata: validation.metadata,
            quality_score,
            geometry,
        }
    }
}

fn check_tool_type(tool_type: &str) -> BoundaryResult<()> {
    if !TOOL_TYPE.is_match(tool_type) || tool_type == INDEX_SUFFIX {
        return Err(BoundaryError::InvalidKey(tool_type.to_string()));
    }
    Ok(())
}
