//! Settings change listener
//!
//! Watches the directories holding the settings files and, once a burst of
//! changes to one of those files settles, re-resolves the configuration, logs
//! it, and tells the user that shortcut changes need a restart.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use ::notify::{Config as NotifyConfig, Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use anyhow::{bail, Context, Result};
use sulog_core::{Configuration, SettingsStore};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::notify::Notifier;

pub const RESTART_NOTICE: &str =
    "Sulog configuration updated. Please restart for keyboard shortcut changes to take effect.";

/// Receives change events for a set of settings files
pub struct ConfigWatcher {
    paths: Vec<PathBuf>,
    /// Kept alive to keep watching
    _watcher: Box<dyn Watcher + Send>,
    events: UnboundedReceiver<PathBuf>,
}

impl std::fmt::Debug for ConfigWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigWatcher")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

/// Forward creations, edits and removals of `targets` to `tx`
fn make_event_handler(
    targets: Arc<[PathBuf]>,
    tx: UnboundedSender<PathBuf>,
) -> impl Fn(::notify::Result<Event>) + Send + 'static {
    move |result: ::notify::Result<Event>| {
        let event = match result {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Settings watcher error");
                return;
            }
        };
        if matches!(event.kind, EventKind::Access(_)) {
            return;
        }

        for path in event.paths.iter().filter(|path| targets.contains(path)) {
            tracing::debug!(path = %path.display(), kind = ?event.kind, "Settings file event");
            if tx.send(path.clone()).is_err() {
                tracing::trace!("Settings watcher closed");
            }
        }
    }
}

impl ConfigWatcher {
    /// Start watching `paths`
    ///
    /// The parent directory of each file is watched, so files that do not
    /// exist yet are picked up once created. A file whose directory is
    /// missing cannot be watched and is skipped. `poll_interval` applies only
    /// when the native backend is unavailable.
    ///
    /// # Errors
    /// Returns an error if no directory can be watched.
    pub fn new(paths: Vec<PathBuf>, poll_interval: Duration) -> Result<Self> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        let mut targets: Vec<PathBuf> = Vec::new();

        for path in &paths {
            let Some(name) = path.file_name() else {
                continue;
            };
            let parent = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));

            match parent.canonicalize() {
                Ok(dir) => {
                    targets.push(dir.join(name));
                    if !dirs.contains(&dir) {
                        dirs.push(dir);
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Settings directory missing, not watching");
                }
            }
        }

        if dirs.is_empty() {
            bail!("None of the settings directories exist");
        }

        let (tx, events) = unbounded_channel();
        let mut watcher = Self::create_watcher(targets.into(), tx, poll_interval)?;
        for dir in &dirs {
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .with_context(|| format!("Failed to watch {}", dir.display()))?;
        }

        Ok(Self {
            paths,
            _watcher: watcher,
            events,
        })
    }

    /// Native backend first, polling when it cannot start
    fn create_watcher(
        targets: Arc<[PathBuf]>,
        tx: UnboundedSender<PathBuf>,
        poll_interval: Duration,
    ) -> Result<Box<dyn Watcher + Send>> {
        let handler = make_event_handler(Arc::clone(&targets), tx.clone());

        match ::notify::recommended_watcher(handler) {
            Ok(watcher) => {
                tracing::debug!("Settings watcher using native backend");
                Ok(Box::new(watcher))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Native file watching unavailable, polling instead");
                let poll_watcher = PollWatcher::new(
                    make_event_handler(targets, tx),
                    NotifyConfig::default().with_poll_interval(poll_interval),
                )
                .context("Failed to create polling watcher")?;
                Ok(Box::new(poll_watcher))
            }
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Wait for the next change to a watched file
    ///
    /// Returns `None` once the backend has shut down.
    pub async fn changed(&mut self) -> Option<PathBuf> {
        self.events.recv().await
    }

    /// Swallow further events until none arrives for `quiet`
    pub async fn settle(&mut self, quiet: Duration) {
        while let Ok(Some(path)) = tokio::time::timeout(quiet, self.events.recv()).await {
            tracing::trace!(path = %path.display(), "Debounced settings event");
        }
    }
}

/// React to a settings change: resolve, log, notify
///
/// Returns the new configuration, or `None` if it could not be resolved.
pub fn reload(settings: &dyn SettingsStore, notifier: &dyn Notifier) -> Option<Configuration> {
    match Configuration::resolve(settings) {
        Ok(config) => {
            config.log_summary();
            notifier.info(RESTART_NOTICE);
            Some(config)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Settings changed but could not be loaded");
            notifier.error(&format!("Error loading sulog configuration: {e}"));
            None
        }
    }
}

/// Reload after each settled burst of changes until `shutdown` resolves
pub async fn watch(
    mut watcher: ConfigWatcher,
    settings: &dyn SettingsStore,
    notifier: &dyn Notifier,
    debounce: Duration,
    shutdown: impl Future<Output = ()>,
) {
    for path in watcher.paths() {
        tracing::info!(path = %path.display(), "Watching settings file");
    }

    tokio::pin!(shutdown);

    loop {
        let next = async {
            let path = watcher.changed().await?;
            watcher.settle(debounce).await;
            Some(path)
        };

        let changed = tokio::select! {
            changed = next => changed,
            () = &mut shutdown => {
                tracing::info!("Stopped watching settings");
                return;
            }
        };

        let Some(path) = changed else {
            tracing::warn!("Settings watcher shut down");
            return;
        };
        tracing::info!(path = %path.display(), "Settings file changed");
        reload(settings, notifier);
    }
}
