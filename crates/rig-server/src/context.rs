use std::sync::Arc;

use anyhow::Context;
use rig_auth::TokenIssuer;
use rig_catalog::MirrorManager;
use rig_config::RigConfig;
use rig_db::service::RigService;
use rig_files::{Mirrors, SuiteStore};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: RigService,
    pub config: RigConfig,
    pub tokens: TokenIssuer,
    pub mirrors: MirrorManager,
    pub files: Mirrors,
    pub suites: SuiteStore,
}

pub type SharedContext = Arc<AppContext>;

impl AppContext {
    /// Open the database and wire every component from `config`.
    pub async fn init(config: RigConfig) -> anyhow::Result<Self> {
        let service = RigService::new_local(&config.database.path)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;
        Ok(Self::with_service(service, config))
    }

    #[must_use]
    pub fn with_service(service: RigService, config: RigConfig) -> Self {
        let files = Mirrors::from_config(&config.storage, &config.catalog);
        Self {
            tokens: TokenIssuer::from_config(&config.auth),
            mirrors: MirrorManager::new(&config.storage, &config.catalog),
            suites: SuiteStore::from_config(files.clone(), &config.storage),
            files,
            service,
            config,
        }
    }

    #[must_use]
    pub fn shared(self) -> SharedContext {
        Arc::new(self)
    }
}
