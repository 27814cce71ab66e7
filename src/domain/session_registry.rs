//! Session membership storage and fanout.
//!
//! [`SessionRegistry`] maps session ids to the members currently joined,
//! and each member to the [`ConnectionHandle`] frames are enqueued on.
//! A session exists only while it has at least one member.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::ConnectionHandle;

type Members = HashMap<String, ConnectionHandle>;

/// Process-wide map of `session id -> user id -> connection handle`.
///
/// # Concurrency
///
/// The whole map sits behind one [`tokio::sync::RwLock`]. Fanout only
/// takes the read lock and never awaits while holding it, since enqueuing
/// on a handle is synchronous.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Members>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Adds `user_id` to `session_id`, creating the session if needed.
    ///
    /// An existing entry for the same user is overwritten; the previous
    /// handle is dropped from the map but not closed.
    pub async fn add_member(&self, session_id: &str, user_id: &str, handle: ConnectionHandle) {
        let mut map = self.sessions.write().await;
        let previous = map
            .entry(session_id.to_string())
            .or_default()
            .insert(user_id.to_string(), handle);
        if let Some(previous) = previous {
            tracing::debug!(
                session_id,
                user_id,
                connection_id = %previous.id(),
                "member handle superseded"
            );
        }
    }

    /// Removes `user_id` from `session_id`, dropping the session when it
    /// becomes empty.
    ///
    /// Returns `true` if an entry was removed. Unknown sessions or users
    /// are a no-op.
    pub async fn remove_member(&self, session_id: &str, user_id: &str) -> bool {
        let mut map = self.sessions.write().await;
        let Some(members) = map.get_mut(session_id) else {
            return false;
        };
        let removed = members.remove(user_id).is_some();
        if members.is_empty() {
            map.remove(session_id);
            tracing::debug!(session_id, "session closed");
        }
        removed
    }

    /// Enqueues `payload` on every open member of `session_id` except
    /// `exclude_user_id`.
    ///
    /// Returns the number of members the payload was enqueued for.
    pub async fn broadcast(&self, session_id: &str, exclude_user_id: &str, payload: &str) -> usize {
        let mut delivered = 0usize;
        self.for_each_other_member(session_id, exclude_user_id, |user_id, handle| {
            if handle.send(payload) {
                delivered = delivered.saturating_add(1);
            } else {
                tracing::debug!(session_id, user_id, "send raced with connection close");
            }
        })
        .await;
        delivered
    }

    /// Calls `f` for every open member of `session_id` except
    /// `exclude_user_id`. Closed handles are skipped.
    pub async fn for_each_other_member<F>(&self, session_id: &str, exclude_user_id: &str, mut f: F)
    where
        F: FnMut(&str, &ConnectionHandle),
    {
        let map = self.sessions.read().await;
        let Some(members) = map.get(session_id) else {
            return;
        };
        for (user_id, handle) in members {
            if user_id != exclude_user_id && handle.is_open() {
                f(user_id, handle);
            }
        }
    }

    /// Returns `true` if `session_id` has at least one member.
    pub async fn contains_session(&self, session_id: &str) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }

    /// Returns the member ids of `session_id`, sorted. Empty for unknown
    /// sessions.
    pub async fn member_ids(&self, session_id: &str) -> Vec<String> {
        let map = self.sessions.read().await;
        let mut ids: Vec<String> = map
            .get(session_id)
            .map(|members| members.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Returns the number of live sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
