//! Summary artifact - the contract plus the default renderer and store.
//!
//! The sync routine regenerates one artifact per run from the full
//! transformed record set. Rendering and persistence sit behind traits
//! so the sync service never touches drawing or the filesystem.

mod generator;
mod store;

pub use generator::SvgSummaryGenerator;
pub use store::FileArtifactStore;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::info;

use crate::countries::NewCountryRecord;
use crate::errors::Result;

/// A rendered summary artifact plus its MIME type.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryArtifact {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Renders an artifact from the transformed record set of one sync run.
pub trait SummaryArtifactGenerator: Send + Sync {
    fn generate(
        &self,
        countries: &[NewCountryRecord],
        refreshed_at: DateTime<Utc>,
    ) -> Result<SummaryArtifact>;
}

/// Persists the most recently generated artifact.
pub trait SummaryArtifactStore: Send + Sync {
    fn save(&self, artifact: &SummaryArtifact) -> Result<()>;
    fn load(&self) -> Result<Option<SummaryArtifact>>;
}

/// Couples a generator with a store.
pub struct SummaryArtifactService {
    generator: Arc<dyn SummaryArtifactGenerator>,
    store: Arc<dyn SummaryArtifactStore>,
}

impl SummaryArtifactService {
    pub fn new(
        generator: Arc<dyn SummaryArtifactGenerator>,
        store: Arc<dyn SummaryArtifactStore>,
    ) -> Self {
        Self { generator, store }
    }

    /// Regenerates and persists the artifact for one sync run.
    pub fn regenerate(
        &self,
        countries: &[NewCountryRecord],
        refreshed_at: DateTime<Utc>,
    ) -> Result<()> {
        let artifact = self.generator.generate(countries, refreshed_at)?;
        self.store.save(&artifact)?;
        info!(
            "summary artifact regenerated ({} bytes)",
            artifact.bytes.len()
        );
        Ok(())
    }

    /// The most recently persisted artifact, if any sync has completed.
    pub fn latest(&self) -> Result<Option<SummaryArtifact>> {
        self.store.load()
    }
}
