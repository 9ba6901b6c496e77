//! Locale store
//!
//! Holds the available locales, the environment snapshot taken at
//! construction, the current locale and the translation data loaded for it.
//!
//! Locale selection (`set`) commits synchronously: the choice is persisted,
//! made current and mirrored to the environment before `set` returns. Data
//! loading runs afterwards on the tokio runtime. Every load takes a ticket
//! carrying a generation number; a completing load is applied only when its
//! ticket is still the newest and its locale is still current, so a slow
//! response for an abandoned locale can never overwrite newer data.

use super::{LoadOutcome, LoadStatus};
use crate::config::LocaleConfig;
use crate::environment::Environment;
use crate::error::{ConfigError, LocaleError, LocaleResult};
use crate::locale::{self, LocaleTag};
use crate::source::{DataSource, LanguageData};
use crate::storage::Storage;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Shared handle to the locale state of the application
///
/// Construct once at startup and clone the handle into whatever needs it.
#[derive(Clone)]
pub struct LocaleStore {
    shared: Arc<Shared>,
}

struct Shared {
    available: Vec<LocaleTag>,
    default_locale: LocaleTag,
    user_agent_preferred: Option<LocaleTag>,
    storage_key: String,
    environment: Arc<dyn Environment>,
    storage: Arc<dyn Storage>,
    source: Arc<dyn DataSource>,
    state: Mutex<StoreState>,
    status_tx: watch::Sender<LoadStatus>,
}

struct StoreState {
    current: LocaleTag,
    status: LoadStatus,
    data: Option<Arc<LanguageData>>,
    generation: u64,
}

/// Identifies one load so its result can be checked for staleness
#[derive(Debug, Clone)]
struct LoadTicket {
    locale: LocaleTag,
    generation: u64,
}

impl LocaleStore {
    /// Build the store, reading environment signals and persisted storage once
    pub fn new(
        config: &LocaleConfig,
        environment: Arc<dyn Environment>,
        storage: Arc<dyn Storage>,
        source: Arc<dyn DataSource>,
    ) -> LocaleResult<Self> {
        config.validate()?;
        let available = config.available_tags()?;

        let default_locale = resolve_default(config, environment.as_ref(), &available)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "available_locales".to_string(),
                reason: "at least one locale is required".to_string(),
            })?;

        let user_agent_preferred = environment
            .preferred_language()
            .and_then(|tag| match LocaleTag::parse(&tag) {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    log::debug!("Ignoring unparsable preferred language {:?}", tag);
                    None
                }
            });

        let persisted = match storage.get(&config.storage_key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read persisted locale: {}", e);
                None
            }
        };

        let current = persisted
            .as_deref()
            .and_then(|tag| available.iter().find(|a| a.matches_exactly(tag)))
            .cloned()
            .unwrap_or_else(|| default_locale.clone());

        environment.set_document_language(current.as_str());
        log::debug!(
            "Locale store ready: current={}, default={}, persisted={:?}",
            current,
            default_locale,
            persisted
        );

        let (status_tx, _) = watch::channel(LoadStatus::Idle);

        Ok(Self {
            shared: Arc::new(Shared {
                available,
                default_locale,
                user_agent_preferred,
                storage_key: config.storage_key.clone(),
                environment,
                storage,
                source,
                state: Mutex::new(StoreState {
                    current,
                    status: LoadStatus::Idle,
                    data: None,
                    generation: 0,
                }),
                status_tx,
            }),
        })
    }

    /// Locales the application ships, in declared order
    pub fn available(&self) -> &[LocaleTag] {
        &self.shared.available
    }

    /// Document language captured at construction
    pub fn default_locale(&self) -> &LocaleTag {
        &self.shared.default_locale
    }

    /// User agent preference captured at construction
    pub fn user_agent_preferred(&self) -> Option<&LocaleTag> {
        self.shared.user_agent_preferred.as_ref()
    }

    pub fn storage_key(&self) -> &str {
        &self.shared.storage_key
    }

    pub fn current(&self) -> LocaleTag {
        self.lock_state().current.clone()
    }

    pub fn status(&self) -> LoadStatus {
        self.lock_state().status
    }

    /// Translation data for the current locale, if loaded
    pub fn data(&self) -> Option<Arc<LanguageData>> {
        self.lock_state().data.clone()
    }

    /// Best available locale for `tag`, see [`locale::best_match`]
    pub fn best_match(&self, tag: &str) -> Option<LocaleTag> {
        let matched = locale::best_match(&self.shared.available, tag).cloned();
        log::debug!("Best match for {:?}: {:?}", tag, matched);
        matched
    }

    /// Select a locale
    ///
    /// Resolves once the choice is committed and persisted; the data load it
    /// starts runs in the background and is observable through [`status`],
    /// [`subscribe`] and [`wait_until_settled`]. Load failures never surface
    /// here.
    ///
    /// [`status`]: Self::status
    /// [`subscribe`]: Self::subscribe
    /// [`wait_until_settled`]: Self::wait_until_settled
    pub async fn set(&self, tag: &str) -> LocaleResult<LocaleTag> {
        let ticket = self.commit(tag)?;
        let locale = ticket.locale.clone();

        let store = self.clone();
        tokio::spawn(async move {
            let locale = ticket.locale.clone();
            if let Err(e) = store.finish_load(ticket).await {
                log::error!("Failed to load language data for {}: {}", locale, e);
            }
        });

        Ok(locale)
    }

    /// Reload translation data for the current locale and wait for the result
    ///
    /// `tag` must negotiate to the current locale; anything else is rejected
    /// before the store is touched. Use [`set`](Self::set) to switch locales.
    pub async fn load_language_data(&self, tag: &str) -> LocaleResult<LoadOutcome> {
        let locale = self
            .best_match(tag)
            .ok_or_else(|| LocaleError::Unavailable {
                requested: tag.to_string(),
            })?;

        let ticket = {
            let mut state = self.lock_state();
            if state.current != locale {
                return Err(LocaleError::NotCurrent {
                    requested: tag.to_string(),
                    current: state.current.to_string(),
                });
            }
            self.begin_load(&mut state, locale)
        };

        self.finish_load(ticket).await
    }

    /// Receiver notified on every status change
    pub fn subscribe(&self) -> watch::Receiver<LoadStatus> {
        self.shared.status_tx.subscribe()
    }

    /// Wait until no load is in flight and return the resulting status
    ///
    /// Settled means any status other than `Loading`: `Loaded` or `Error`
    /// after a load, or `Idle` when none was ever started.
    pub async fn wait_until_settled(&self) -> LoadStatus {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(LoadStatus::is_settled).await {
            Ok(status) => Some(*status),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| self.status())
    }

    /// Validate, persist and commit `tag`, then open a load ticket for it
    fn commit(&self, tag: &str) -> LocaleResult<LoadTicket> {
        let matched = self
            .best_match(tag)
            .ok_or_else(|| LocaleError::Unavailable {
                requested: tag.to_string(),
            })?;

        let mut state = self.lock_state();

        self.shared
            .storage
            .set(&self.shared.storage_key, matched.as_str())?;
        if state.current != matched {
            log::info!("Locale changed: {} -> {}", state.current, matched);
        }
        state.current = matched.clone();
        self.shared
            .environment
            .set_document_language(matched.as_str());

        Ok(self.begin_load(&mut state, matched))
    }

    fn begin_load(&self, state: &mut StoreState, locale: LocaleTag) -> LoadTicket {
        state.generation += 1;
        state.data = None;
        self.update_status(state, LoadStatus::Loading);
        log::debug!("Loading {} (generation {})", locale, state.generation);

        LoadTicket {
            locale,
            generation: state.generation,
        }
    }

    async fn finish_load(&self, ticket: LoadTicket) -> LocaleResult<LoadOutcome> {
        let result = self.shared.source.fetch(&ticket.locale).await;

        let mut state = self.lock_state();

        if state.generation != ticket.generation || state.current != ticket.locale {
            match &result {
                Ok(_) => log::warn!("Discarding stale data for {}", ticket.locale),
                Err(e) => log::warn!("Ignoring stale load failure for {}: {}", ticket.locale, e),
            }
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(data) => {
                log::debug!("Loaded {} keys for {}", data.len(), ticket.locale);
                state.data = Some(Arc::new(data));
                self.update_status(&mut state, LoadStatus::Loaded);
                Ok(LoadOutcome::Applied)
            }
            Err(e) => {
                state.data = None;
                self.update_status(&mut state, LoadStatus::Error);
                Err(e.into())
            }
        }
    }

    fn update_status(&self, state: &mut StoreState, status: LoadStatus) {
        state.status = status;
        self.shared.status_tx.send_replace(status);
    }

    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Document language, else configured fallback, else first available locale
fn resolve_default(
    config: &LocaleConfig,
    environment: &dyn Environment,
    available: &[LocaleTag],
) -> Option<LocaleTag> {
    let from_document = environment
        .document_language()
        .and_then(|tag| LocaleTag::parse(&tag).ok());

    let from_config = || {
        config
            .fallback_locale
            .as_deref()
            .and_then(|tag| LocaleTag::parse(tag).ok())
    };

    from_document
        .or_else(from_config)
        .or_else(|| available.first().cloned())
}

impl std::fmt::Debug for LocaleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock_state();
        f.debug_struct("LocaleStore")
            .field("available", &self.shared.available)
            .field("current", &state.current)
            .field("status", &state.status)
            .finish_non_exhaustive()
    }
}
