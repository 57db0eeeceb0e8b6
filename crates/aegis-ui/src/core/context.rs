//! Session services wired together once per app boot.
//!
//! # Design
//! - Build exactly one credential store, coordinator, and pipeline per boot.
//! - Hosts supply the platform capabilities; everything else is shared by `Rc`.

use crate::core::api::AuthApi;
use crate::core::config::ClientConfig;
use crate::core::guard::{GuardDecision, NavigationGuard, SessionSnapshot};
use crate::core::routes::RouteTable;
use crate::core::session::{InvalidationCoordinator, Navigator, Notifier, Scheduler};
use crate::core::storage::{CredentialStore, KeyValueStore};
use crate::core::transport::{HttpBackend, Transport};
use std::rc::Rc;

/// Platform capabilities the session services depend on.
pub struct Platform {
    /// Durable key-value storage for credentials.
    pub storage: Rc<dyn KeyValueStore>,
    /// Wire-level HTTP client.
    pub backend: Rc<dyn HttpBackend>,
    /// Location access.
    pub navigator: Rc<dyn Navigator>,
    /// Transient notice sink.
    pub notifier: Rc<dyn Notifier>,
    /// Timer source.
    pub scheduler: Rc<dyn Scheduler>,
}

/// Shared session services.
#[derive(Clone)]
pub struct SessionCtx {
    /// Credential store shared by every component.
    pub credentials: CredentialStore,
    /// Invalidation coordinator fed by the pipeline.
    pub coordinator: Rc<InvalidationCoordinator>,
    /// Transport pipeline for API wrappers.
    pub transport: Transport,
    /// Auth endpoints.
    pub auth: AuthApi,
    /// Navigation guard.
    pub guard: Rc<NavigationGuard>,
}

impl SessionCtx {
    /// Wire the services over `platform`.
    #[must_use]
    pub fn new(config: ClientConfig, routes: RouteTable, platform: Platform) -> Self {
        let config = Rc::new(config);
        let credentials = CredentialStore::new(platform.storage);
        let coordinator = InvalidationCoordinator::new(
            config.clone(),
            credentials.clone(),
            platform.navigator,
            platform.notifier,
            platform.scheduler,
        );
        let transport = Transport::new(
            config.clone(),
            platform.backend,
            credentials.clone(),
            coordinator.clone(),
        );
        let guard = Rc::new(NavigationGuard::new(routes, (*config).clone()));
        Self {
            auth: AuthApi::new(transport.clone()),
            credentials,
            coordinator,
            transport,
            guard,
        }
    }

    /// Evaluate the guard for `target` against the credentials as stored right now.
    #[must_use]
    pub fn check_navigation(&self, target: &str) -> GuardDecision {
        self.guard
            .evaluate(target, SessionSnapshot::from_store(&self.credentials))
    }
}

impl PartialEq for SessionCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.coordinator, &other.coordinator)
    }
}
