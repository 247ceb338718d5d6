//! Service wiring for the `cinema` binary.

use crate::console::ConsoleNotifier;
use anyhow::{Context, Result};
use cinema_application::{AdminUseCase, AuthUseCase, ChatUseCase, CrawlUseCase, DataManager};
use cinema_core::api::{AuthApi, CatalogApi, ChatApi, CrawlApi};
use cinema_core::config::ClientConfig;
use cinema_core::notify::Notifier;
use cinema_core::store::SessionStore;
use cinema_infrastructure::{
    CinemaPaths, ConfigService, FileSessionStore, HttpApiClient, LocalStorage,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything a command needs, built once per invocation.
pub struct App {
    pub config: ClientConfig,
    pub store: Arc<dyn SessionStore>,
    pub data: Arc<DataManager>,
    pub auth: AuthUseCase,
    pub crawl: CrawlUseCase,
    pub chat: ChatUseCase,
    pub admin: AdminUseCase,
    pub notifier: Arc<dyn Notifier>,
}

impl App {
    /// Loads configuration and connects the HTTP client to the local store.
    pub fn build(data_dir: Option<&Path>, config_file: Option<PathBuf>) -> Result<Self> {
        let paths = CinemaPaths::new(data_dir);

        let mut config_service = ConfigService::new(paths.clone());
        if let Some(path) = config_file {
            config_service = config_service.with_path(path);
        }
        let config = config_service
            .get_config()
            .context("Failed to load configuration")?;

        let storage_dir = paths
            .storage_dir()
            .context("Failed to resolve the storage directory")?;
        tracing::debug!("[App] Storage at {}", storage_dir.display());
        let store: Arc<dyn SessionStore> =
            Arc::new(FileSessionStore::new(LocalStorage::new(storage_dir)));

        let client = Arc::new(
            HttpApiClient::new(&config)
                .context("Failed to create HTTP client")?
                .with_session_store(store.clone()),
        );
        tracing::debug!("[App] API base {}", client.api_base());

        let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
        let catalog: Arc<dyn CatalogApi> = client.clone();
        let auth_api: Arc<dyn AuthApi> = client.clone();
        let crawl_api: Arc<dyn CrawlApi> = client.clone();
        let chat_api: Arc<dyn ChatApi> = client;

        let data = Arc::new(DataManager::new(
            catalog.clone(),
            store.clone(),
            notifier.clone(),
        ));

        Ok(Self {
            auth: AuthUseCase::new(auth_api, data.clone()),
            crawl: CrawlUseCase::new(crawl_api),
            chat: ChatUseCase::new(chat_api, store.clone()),
            admin: AdminUseCase::new(catalog, notifier.clone()),
            config,
            store,
            data,
            notifier,
        })
    }
}
