//! Per-run generation context shared by every builder.

use time::OffsetDateTime;

use aec_model::models::Versioning;

use crate::ids::IdAllocator;

/// Everything a builder needs besides the catalogue entry and the random source.
///
/// Built once per model (or tenant) and never mutated during generation.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub model_id: String,
    pub tenant_id: Option<String>,
    pub ids: IdAllocator,
    /// Captured once so every document of the run carries the same timestamp.
    pub generated_at: OffsetDateTime,
    /// Adds the variable-size property bag and demolition phase to every asset.
    pub long_tail: bool,
}

impl GenerationContext {
    /// Single-model context using per-type ids.
    pub fn model(model_id: impl Into<String>, generated_at: OffsetDateTime) -> Self {
        Self {
            model_id: model_id.into(),
            tenant_id: None,
            ids: IdAllocator::per_type(),
            generated_at,
            long_tail: false,
        }
    }

    /// Tenant context: tenant-wide ids, shard keys and bitemporal fields.
    pub fn tenant(
        model_id: impl Into<String>,
        tenant_id: impl Into<String>,
        generated_at: OffsetDateTime,
    ) -> Self {
        let tenant_id = tenant_id.into();
        Self {
            model_id: model_id.into(),
            ids: IdAllocator::tenant(tenant_id.clone()),
            tenant_id: Some(tenant_id),
            generated_at,
            long_tail: false,
        }
    }

    pub fn with_long_tail(mut self, enabled: bool) -> Self {
        self.long_tail = enabled;
        self
    }

    /// `{tenantId}:{spaceId}` in tenant mode.
    pub fn shard_key(&self, space_id: &str) -> Option<String> {
        self.tenant_id
            .as_ref()
            .map(|tenant| format!("{tenant}:{space_id}"))
    }

    /// Versioning fields for a document, present only in tenant mode.
    pub fn versioning(&self, revision_of: Option<&str>) -> Option<Versioning> {
        self.tenant_id.as_ref()?;
        Some(Versioning::initial(
            revision_of.map(|id| format!("{id}-rev-1")),
            self.generated_at,
        ))
    }
}
