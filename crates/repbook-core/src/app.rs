//! Application state handle.
//!
//! `AppState` owns the store and the in-memory copies of the shared state
//! (plans, settings, logo). Commands receive it explicitly and go through
//! its `update_*` methods, which write through to the store immediately.

use crate::cardio::CardioLog;
use crate::defaults;
use crate::drafts::DraftCache;
use crate::error::Result;
use crate::history::HistoryLog;
use crate::keys::{Namespace, LOGO_KEY, SETTINGS_KEY};
use crate::measurements::Measurements;
use crate::model::{AppSettings, Branding, WorkoutsMap};
use crate::session::WorkoutSession;
use crate::storage::{KeyValueStore, Store};

pub struct AppState<S: KeyValueStore> {
    store: Store<S>,
    namespace: Namespace,
    display_name: String,
    workouts: WorkoutsMap,
    settings: AppSettings,
    logo: String,
}

impl<S: KeyValueStore> AppState<S> {
    /// Load the state of profile `namespace` from `backend`.
    pub fn load(backend: S, namespace: Namespace, display_name: impl Into<String>) -> Self {
        let store = Store::new(backend);
        let mut state = Self {
            store,
            namespace,
            display_name: display_name.into(),
            workouts: WorkoutsMap::new(),
            settings: AppSettings::default(),
            logo: String::new(),
        };
        state.reload();
        state
    }

    /// Re-read plans, settings and logo from the store.
    pub fn reload(&mut self) {
        self.workouts = self
            .store
            .get_or(&self.namespace.workouts_key(), defaults::default_workouts);
        self.settings = self.store.get_or_default(SETTINGS_KEY);
        self.logo = self
            .store
            .raw(LOGO_KEY)
            .filter(|logo| !logo.is_empty())
            .unwrap_or_else(|| defaults::DEFAULT_LOGO_URL.to_string());
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn branding(&self) -> Branding {
        Branding {
            display_name: self.display_name.clone(),
            logo: self.logo.clone(),
        }
    }

    pub fn workouts(&self) -> &WorkoutsMap {
        &self.workouts
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn logo(&self) -> &str {
        &self.logo
    }

    /// Replace the plans and persist them.
    pub fn update_workouts(&mut self, workouts: WorkoutsMap) -> Result<()> {
        self.store.set(&self.namespace.workouts_key(), &workouts)?;
        self.workouts = workouts;
        Ok(())
    }

    /// Edit a copy of the plans; persisted only when `edit` succeeds.
    pub fn edit_workouts<T, F>(&mut self, edit: F) -> Result<T>
    where
        F: FnOnce(&mut WorkoutsMap) -> Result<T>,
    {
        let mut workouts = self.workouts.clone();
        let out = edit(&mut workouts)?;
        self.update_workouts(workouts)?;
        Ok(out)
    }

    /// Persist `settings`, clamping the volume into [0, 1].
    pub fn update_settings(&mut self, settings: AppSettings) -> Result<()> {
        let volume = settings.volume;
        let settings = settings.with_volume(volume);
        self.store.set(SETTINGS_KEY, &settings)?;
        self.settings = settings;
        Ok(())
    }

    /// Store a logo (URL or `data:` URL) verbatim.
    pub fn update_logo(&mut self, logo: impl Into<String>) -> Result<()> {
        let logo = logo.into();
        self.store.set_raw(LOGO_KEY, &logo)?;
        self.logo = logo;
        Ok(())
    }

    pub fn drafts(&self) -> DraftCache<'_, S> {
        DraftCache::new(&self.store, &self.namespace)
    }

    pub fn history(&self) -> HistoryLog<'_, S> {
        HistoryLog::new(&self.store, &self.namespace)
    }

    pub fn measurements(&self) -> Measurements<'_, S> {
        Measurements::new(&self.store, &self.namespace)
    }

    pub fn cardio(&self) -> CardioLog<'_, S> {
        CardioLog::new(&self.store, &self.namespace)
    }

    /// Workout session of `plan_id`; fails for unknown plans.
    pub fn session(&self, plan_id: &str) -> Result<WorkoutSession<'_, S>> {
        WorkoutSession::new(&self.store, &self.namespace, &self.workouts, plan_id)
    }
}
