//! Sheet use cases - the open character sheet.
//!
//! A session moves `Loading -> Ready` or `Loading -> Redirecting`. It fetches
//! its document once per mount; a failed fetch leaves it loading until the
//! sheet is opened again. While ready, each command replaces the in-memory
//! record synchronously and schedules a debounced write of the whole record.
//! The in-memory record stays the source of truth when a write fails; the
//! failure shows up in the save status.
//!
//! Sessions untouched for [`SESSION_IDLE_TTL`] are evicted on the next open,
//! unless a save is still pending.

mod commands;
mod error;
mod session;

pub use error::SheetError;
pub use session::SessionKey;

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use sheetkeep_domain::{Character, CharacterId};
use sheetkeep_shared::{RedirectTarget, SaveStatusView, SheetCommand, SheetStateView};
use tokio::sync::Mutex;

use crate::infrastructure::ports::{AuthUser, CharacterStore, ClockPort};
use crate::infrastructure::scheduler::PersistScheduler;
use crate::use_cases::auth::AuthContext;
use session::{SheetSession, SheetState};

/// Quiet window between the last edit and the write.
pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(1000);

/// How long an untouched session stays in memory.
pub const SESSION_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

type SharedSession = Arc<Mutex<SheetSession>>;

pub struct SheetUseCases {
    store: Arc<dyn CharacterStore>,
    clock: Arc<dyn ClockPort>,
    scheduler: PersistScheduler<SessionKey>,
    sessions: DashMap<SessionKey, SharedSession>,
    save_delay: Duration,
    idle_ttl: Duration,
}

impl SheetUseCases {
    pub fn new(
        store: Arc<dyn CharacterStore>,
        clock: Arc<dyn ClockPort>,
        save_delay: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            scheduler: PersistScheduler::new(),
            sessions: DashMap::new(),
            save_delay,
            idle_ttl: SESSION_IDLE_TTL,
        }
    }

    pub fn with_idle_ttl(mut self, idle_ttl: Duration) -> Self {
        self.idle_ttl = idle_ttl;
        self
    }

    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Drop sessions untouched for longer than the idle window. A session
    /// that is locked or still has a pending save is kept. Returns how many
    /// were dropped.
    pub async fn evict_idle(&self) -> usize {
        let candidates: Vec<(SessionKey, SharedSession)> = self
            .sessions
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();

        let mut evicted = 0;
        for (key, shared) in candidates {
            let Ok(session) = shared.try_lock() else {
                continue;
            };
            if session.last_touched.elapsed() < self.idle_ttl {
                continue;
            }
            if self.scheduler.is_pending(&key).await {
                continue;
            }
            if self
                .sessions
                .remove_if(&key, |_, current| Arc::ptr_eq(current, &shared))
                .is_some()
            {
                tracing::debug!(character_id = %session.id, "Evicted idle sheet session");
                evicted += 1;
            }
        }
        evicted
    }

    fn session_for(&self, user: &AuthUser, id: &CharacterId) -> (SessionKey, SharedSession) {
        let key = (user.uid.clone(), id.clone());
        let session = self
            .sessions
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(SheetSession::new(id.clone()))))
            .clone();
        (key, session)
    }

    /// Fetch the document if this session has not tried yet.
    async fn ensure_loaded(&self, user: &AuthUser, session: &mut SheetSession) {
        if session.fetch_attempted {
            return;
        }
        session.fetch_attempted = true;

        match self.store.get(&session.id).await {
            Ok(Some(document)) if document.user_id.as_ref() == Some(&user.uid) => {
                match document.backfill() {
                    Ok(backfilled) => {
                        if !backfilled.was_complete() {
                            tracing::debug!(
                                character_id = %session.id,
                                defaulted = ?backfilled.defaulted,
                                "Backfilled missing fields"
                            );
                        }
                        session.ready(backfilled.character);
                    }
                    Err(e) => {
                        tracing::warn!(character_id = %session.id, error = %e, "Failed to read character");
                    }
                }
            }
            Ok(Some(_)) => {
                tracing::info!(character_id = %session.id, uid = %user.uid, "Character belongs to another user");
                session.redirect(RedirectTarget::Roster);
            }
            Ok(None) => {
                tracing::info!(character_id = %session.id, "Character not found");
                session.redirect(RedirectTarget::Roster);
            }
            Err(e) => {
                tracing::warn!(character_id = %session.id, error = %e, "Failed to fetch character");
            }
        }
    }

    /// Mount the sheet if needed and return its current view.
    pub async fn open(&self, ctx: &AuthContext, id: &CharacterId) -> SheetStateView {
        let Some(user) = ctx.user() else {
            return SheetStateView::redirecting(RedirectTarget::Login);
        };

        self.evict_idle().await;
        let (key, session) = self.session_for(user, id);
        let mut session = session.lock().await;
        session.touch();
        // Each open is a fresh mount for a sheet whose last fetch failed.
        if session.is_stuck_loading() {
            session.fetch_attempted = false;
        }
        self.ensure_loaded(user, &mut session).await;

        if session.is_redirecting() {
            self.sessions.remove(&key);
        }
        session.view()
    }

    /// Apply one command to a ready sheet.
    pub async fn apply(
        &self,
        ctx: &AuthContext,
        id: &CharacterId,
        command: SheetCommand,
    ) -> Result<SheetStateView, SheetError> {
        let user = ctx.user().ok_or(SheetError::Unauthenticated)?;
        let (key, shared) = self.session_for(user, id);
        let mut session = shared.lock().await;
        session.touch();
        self.ensure_loaded(user, &mut session).await;

        let SheetState::Ready(sheet) = &mut session.state else {
            if session.is_redirecting() {
                self.sessions.remove(&key);
            }
            return Err(SheetError::NotReady(session.view()));
        };

        let Some(update) = commands::route(sheet, command, self.clock.now())? else {
            return Ok(session.view());
        };

        tracing::debug!(character_id = %id, section = update.section(), "Sheet edited");
        sheet.character.apply(update);
        let snapshot = sheet.character.clone();
        session.revision += 1;
        session.save_status = SaveStatusView::Pending;
        let revision = session.revision;

        // The session lock is held while scheduling, so snapshots are
        // scheduled in revision order.
        self.schedule_persist(key, Arc::clone(&shared), revision, snapshot)
            .await;

        Ok(session.view())
    }

    async fn schedule_persist(
        &self,
        key: SessionKey,
        session: SharedSession,
        revision: u64,
        snapshot: Character,
    ) {
        let store = Arc::clone(&self.store);
        let clock = Arc::clone(&self.clock);
        let id = key.1.clone();

        self.scheduler
            .schedule(key, self.save_delay, move || async move {
                // Only the revision check guards the status. An older job still
                // in flight when a newer one fires can land after it and leave
                // the older snapshot stored.
                {
                    let mut current = session.lock().await;
                    if current.revision == revision {
                        current.save_status = SaveStatusView::Saving;
                    }
                }

                let result = store.update(&id, &snapshot).await;

                let mut session = session.lock().await;
                match result {
                    Ok(()) => {
                        tracing::debug!(character_id = %id, revision, "Character saved");
                        if session.revision == revision {
                            session.save_status = SaveStatusView::Saved { at: clock.now() };
                        }
                    }
                    Err(e) => {
                        tracing::error!(character_id = %id, revision, error = %e, "Failed to save character");
                        if session.revision == revision {
                            session.save_status = SaveStatusView::Failed {
                                error: e.to_string(),
                                at: clock.now(),
                            };
                        }
                    }
                }
            })
            .await;
    }

    /// Write any pending edit now and return the view.
    pub async fn flush(
        &self,
        ctx: &AuthContext,
        id: &CharacterId,
    ) -> Result<SheetStateView, SheetError> {
        let user = ctx.user().ok_or(SheetError::Unauthenticated)?;
        let key = (user.uid.clone(), id.clone());
        self.scheduler.flush(&key).await;

        let session = self.sessions.get(&key).map(|entry| Arc::clone(entry.value()));
        match session {
            Some(session) => {
                let mut session = session.lock().await;
                session.touch();
                Ok(session.view())
            }
            None => Ok(self.open(ctx, id).await),
        }
    }

    /// Flush pending edits and drop the session. Returns whether one was open.
    pub async fn close(&self, ctx: &AuthContext, id: &CharacterId) -> Result<bool, SheetError> {
        let user = ctx.user().ok_or(SheetError::Unauthenticated)?;
        let key = (user.uid.clone(), id.clone());
        self.scheduler.flush(&key).await;
        let closed = self.sessions.remove(&key).is_some();
        if closed {
            tracing::debug!(character_id = %id, "Sheet closed");
        }
        Ok(closed)
    }

    /// Drop the session without writing, for a character about to be deleted.
    pub async fn discard(&self, user: &AuthUser, id: &CharacterId) {
        let key = (user.uid.clone(), id.clone());
        if self.scheduler.cancel(&key).await {
            tracing::debug!(character_id = %id, "Discarded pending save");
        }
        self.sessions.remove(&key);
    }

    /// Write every pending edit. Called on clean shutdown.
    pub async fn shutdown(&self) -> usize {
        let flushed = self.scheduler.flush_all().await;
        self.sessions.clear();
        tracing::info!(flushed, "Sheet sessions closed");
        flushed
    }
}
