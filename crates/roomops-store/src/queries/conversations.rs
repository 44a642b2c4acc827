// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation CRUD operations.

use roomops_core::{Conversation, OpsError};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

fn conversation_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Conversation> {
    Ok(Conversation {
        id: row.get(0)?,
        title: row.get(1)?,
        owner_id: row.get(2)?,
        created_at: row.get(3)?,
    })
}

/// Insert a new conversation.
pub async fn create_conversation(db: &Database, conversation: &Conversation) -> Result<(), OpsError> {
    let c = conversation.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversations (id, title, owner_id, created_at) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![c.id, c.title, c.owner_id, c.created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn conversation_by_id(db: &Database, id: &str) -> Result<Option<Conversation>, OpsError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, owner_id, created_at FROM conversations WHERE id = ?1",
            )?;
            let mut rows = stmt.query_map(params![id], conversation_from_row)?;
            Ok(rows.next().transpose()?)
        })
        .await
        .map_err(map_tr_err)
}

/// Conversations owned by one principal, newest first.
pub async fn conversations_for_owner(
    db: &Database,
    owner_id: &str,
) -> Result<Vec<Conversation>, OpsError> {
    let owner_id = owner_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, owner_id, created_at FROM conversations \
                 WHERE owner_id = ?1 ORDER BY created_at DESC",
            )?;
            let rows = stmt.query_map(params![owner_id], conversation_from_row)?;
            let mut conversations = Vec::new();
            for row in rows {
                conversations.push(row?);
            }
            Ok(conversations)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a conversation and its messages (messages first, one transaction).
pub async fn delete_conversation(db: &Database, id: &str) -> Result<(), OpsError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM messages WHERE conversation_id = ?1", params![id])?;
            tx.execute("DELETE FROM conversations WHERE id = ?1", params![id])?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::tempdir;

    pub(crate) fn make_conversation(id: &str, owner: &str, created_at: &str) -> Conversation {
        Conversation {
            id: id.to_string(),
            title: "Room status check".to_string(),
            owner_id: owner.to_string(),
            created_at: created_at.to_string(),
        }
    }

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn create_and_fetch_conversation() {
        let (db, _dir) = setup_db().await;
        let c = make_conversation("c1", "user-1", "2026-01-01T00:00:00Z");
        create_conversation(&db, &c).await.unwrap();

        let found = conversation_by_id(&db, "c1").await.unwrap().unwrap();
        assert_eq!(found.title, "Room status check");
        assert_eq!(found.owner_id, "user-1");
        assert!(conversation_by_id(&db, "c2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn owner_listing_is_newest_first() {
        let (db, _dir) = setup_db().await;
        create_conversation(&db, &make_conversation("c1", "user-1", "2026-01-01T00:00:01Z"))
            .await
            .unwrap();
        create_conversation(&db, &make_conversation("c2", "user-1", "2026-01-01T00:00:02Z"))
            .await
            .unwrap();
        create_conversation(&db, &make_conversation("c3", "user-2", "2026-01-01T00:00:03Z"))
            .await
            .unwrap();

        let list = conversations_for_owner(&db, "user-1").await.unwrap();
        let ids: Vec<&str> = list.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2", "c1"]);
    }
}
