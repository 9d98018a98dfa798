//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::CatalogService;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding settings and I/O handles shared by all services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    /// Build a catalog service, seeded from `settings.catalog` when set.
    pub fn catalog_service(&self) -> ApplicationResult<CatalogService> {
        let mut service = CatalogService::new(Arc::clone(&self.fs));
        if let Some(seed) = &self.settings.catalog {
            debug!("catalog_service: seeding from {}", seed.display());
            service.load_seed(seed)?;
        }
        Ok(service)
    }
}
