// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory arena of pending updates keyed by single-use token.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::pending::PendingUpdate;

struct Entry {
    update: PendingUpdate,
    created: Instant,
}

/// Holds proposed updates until they are redeemed, declined, or expire.
///
/// Tokens are opaque UUIDs minted server-side; clients echo the token only,
/// never the change itself, so a confirmation can never apply anything other
/// than what the server previewed.
pub struct PendingArena {
    ttl: Duration,
    entries: DashMap<String, Entry>,
}

impl PendingArena {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    /// Parks an update and returns it with its freshly minted token filled in.
    pub fn mint(&self, mut update: PendingUpdate) -> PendingUpdate {
        let token = Uuid::new_v4().to_string();
        update.token = token.clone();
        debug!(%token, room = %update.room_number, field = %update.field, "pending update minted");
        self.entries.insert(
            token,
            Entry {
                update: update.clone(),
                created: Instant::now(),
            },
        );
        update
    }

    /// Removes and returns the update for `token`.
    ///
    /// Returns `None` for unknown tokens and for entries past the TTL; in
    /// both cases the entry is gone afterwards, so a token redeems at most
    /// once.
    pub fn redeem(&self, token: &str) -> Option<PendingUpdate> {
        let (_, entry) = self.entries.remove(token)?;
        if entry.created.elapsed() >= self.ttl {
            debug!(%token, "pending update expired at redeem");
            return None;
        }
        Some(entry.update)
    }

    /// Drops the entry for `token` if present. Idempotent.
    pub fn discard(&self, token: &str) -> bool {
        self.entries.remove(token).is_some()
    }

    /// Sweeps entries past the TTL. Called opportunistically; redeem also
    /// rejects expired entries on its own.
    pub fn purge_expired(&self) {
        self.entries.retain(|_, entry| entry.created.elapsed() < self.ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
