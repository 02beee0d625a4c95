use chrono::{DateTime, FixedOffset};
use time_bullet_config::{Config, ConfigStore};

use crate::editing::{DocumentAccess, LineEdit};
use crate::format::TimeFormat;
use crate::keys::{KeyEvent, Trigger};
use crate::rewriter;
use crate::timestamp::{self, Clock, SystemClock};

/// Application context for timestamped bullets.
///
/// Built once at startup and handed to the host's keydown handler and its
/// settings screen. It owns the current [`Config`], the clock, and
/// optionally a [`ConfigStore`] that every settings change is written to.
pub struct TimeBullets<C: Clock = SystemClock> {
    config: Config,
    clock: C,
    store: Option<Box<dyn ConfigStore>>,
}

impl TimeBullets<SystemClock> {
    /// Load settings from `store` (falling back to defaults) and keep the
    /// store for later saves.
    pub fn load(store: Box<dyn ConfigStore>) -> Self {
        let config = store.load_or_default();
        Self::new(config, SystemClock).with_store(store)
    }
}

impl<C: Clock> TimeBullets<C> {
    pub fn new(config: Config, clock: C) -> Self {
        Self {
            config,
            clock,
            store: None,
        }
    }

    pub fn with_store(mut self, store: Box<dyn ConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current time rendered with the configured format.
    pub fn timestamp(&self) -> String {
        timestamp::generate_timestamp(&self.config, &self.clock)
    }

    /// Keydown handler.
    ///
    /// Returns the edit that was applied, if any. When an edit is applied the
    /// event's default action is prevented; otherwise the event is left
    /// untouched for the host to handle.
    pub fn handle_keydown<D>(&self, doc: &mut D, event: &mut KeyEvent) -> Option<LineEdit>
    where
        D: DocumentAccess + ?Sized,
    {
        let trigger = Trigger::classify(event)?;
        let edit = match trigger {
            Trigger::Space => self.space_edit(doc),
            Trigger::Enter => self.enter_edit(doc),
        }?;

        log::debug!(
            "{trigger:?} rewrote line {} to {:?}",
            edit.line,
            edit.new_text
        );
        edit.apply(doc);
        event.prevent_default();

        Some(edit)
    }

    fn space_edit<D>(&self, doc: &D) -> Option<LineEdit>
    where
        D: DocumentAccess + ?Sized,
    {
        let cursor = doc.cursor();
        let line = doc.line(cursor.line)?;
        rewriter::rewrite_on_space(cursor.line, &line, || self.timestamp())
    }

    fn enter_edit<D>(&self, doc: &D) -> Option<LineEdit>
    where
        D: DocumentAccess + ?Sized,
    {
        let cursor = doc.cursor();
        if cursor.line == 0 {
            return None;
        }

        let previous = doc.line(cursor.line - 1)?;
        let now = self.now();
        let format = TimeFormat::parse(self.config.effective_time_format()).ok()?;
        if !rewriter::is_time_bullet(&previous, &format, now.date_naive()) {
            return None;
        }

        let current = doc.line(cursor.line)?;
        rewriter::rewrite_on_enter(cursor.line, &current, cursor.ch, || format.render(&now))
    }

    fn now(&self) -> DateTime<FixedOffset> {
        timestamp::zoned(self.clock.now(), self.config.use_utc)
    }

    /// Settings screen: the time format field changed.
    pub fn set_time_format(&mut self, time_format: impl Into<String>) {
        self.config.time_format = time_format.into();
        self.persist();
    }

    /// Settings screen: the UTC toggle changed.
    pub fn set_use_utc(&mut self, use_utc: bool) {
        self.config.use_utc = use_utc;
        self.persist();
    }

    /// Saving is fire-and-forget: a failure is logged and the in-memory
    /// settings stay in effect.
    fn persist(&self) {
        if let Some(store) = &self.store
            && let Err(e) = store.save(&self.config)
        {
            log::warn!("Failed to save settings: {e}");
        }
    }
}
