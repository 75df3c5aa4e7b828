//! Care-data fallback chain.
//!
//! A [`CareDataResolver`] holds an ordered list of [`CareSource`] stages. The
//! first stage that returns a profile wins; when every stage misses, the
//! generic profile is used. Resolution never fails.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::catalog::PlantCatalog;
use crate::models::{CareSourceKind, PlantCareProfile};
use crate::traits::CareSource;

/// Catalog stage of the chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogSource {
    catalog: PlantCatalog,
}

impl CatalogSource {
    pub fn new(catalog: PlantCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CareSource for CatalogSource {
    fn kind(&self) -> CareSourceKind {
        CareSourceKind::Database
    }

    async fn lookup(&self, plant_name: &str) -> Option<PlantCareProfile> {
        self.catalog.lookup(plant_name)
    }
}

/// A resolved profile tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ResolvedCare {
    #[serde(flatten)]
    pub profile: PlantCareProfile,
    pub source: CareSourceKind,
    pub plant_name: String,
}

/// Ordered catalog → AI → default resolution.
#[derive(Clone, Default)]
pub struct CareDataResolver {
    sources: Vec<Arc<dyn CareSource>>,
}

impl CareDataResolver {
    /// A resolver with no stages; every lookup yields the generic profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog first, then the AI stage when one is configured.
    pub fn standard(ai: Option<Arc<dyn CareSource>>) -> Self {
        let mut resolver = Self::new().with_source(Arc::new(CatalogSource::default()));
        if let Some(ai) = ai {
            resolver = resolver.with_source(ai);
        }
        resolver
    }

    /// Append a stage after the existing ones.
    pub fn with_source(mut self, source: Arc<dyn CareSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn stages(&self) -> Vec<CareSourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    pub async fn resolve(&self, plant_name: &str) -> ResolvedCare {
        let name = plant_name.trim();
        let start = Instant::now();

        for source in &self.sources {
            if let Some(profile) = source.lookup(name).await {
                let kind = source.kind();
                info!(
                    subsystem = "core",
                    component = "resolver",
                    op = "resolve",
                    plant_name = %name,
                    source = %kind,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Care profile resolved"
                );
                return ResolvedCare {
                    profile,
                    source: kind,
                    plant_name: name.to_string(),
                };
            }
            debug!(
                subsystem = "core",
                component = "resolver",
                plant_name = %name,
                source = %source.kind(),
                "Care source missed"
            );
        }

        info!(
            subsystem = "core",
            component = "resolver",
            op = "resolve",
            plant_name = %name,
            source = "default",
            duration_ms = start.elapsed().as_millis() as u64,
            "No care source matched, using generic profile"
        );
        ResolvedCare {
            profile: PlantCareProfile::generic(name),
            source: CareSourceKind::Default,
            plant_name: name.to_string(),
        }
    }
}
