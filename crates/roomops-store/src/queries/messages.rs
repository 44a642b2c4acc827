// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message persistence.
//!
//! The `parts` column stores the ordered typed parts as JSON and is the
//! source of truth; `content` is the legacy flattened mirror.

use roomops_core::{ChatMessage, MessagePart, OpsError};
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::queries::column_enum;

fn message_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChatMessage> {
    let parts_json: String = row.get(3)?;
    let parts: Vec<MessagePart> = serde_json::from_str(&parts_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(ChatMessage {
        id: row.get(0)?,
        conversation_id: row.get(1)?,
        role: column_enum(2, row.get::<_, String>(2)?)?,
        parts,
        content: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Insert a new message.
pub async fn insert_message(db: &Database, message: &ChatMessage) -> Result<(), OpsError> {
    let msg = message.clone();
    let parts_json = serde_json::to_string(&msg.parts).map_err(OpsError::persistence)?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO messages (id, conversation_id, role, parts, content, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    msg.id,
                    msg.conversation_id,
                    msg.role.to_string(),
                    parts_json,
                    msg.content,
                    msg.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Messages of a conversation in chronological order.
pub async fn messages_for_conversation(
    db: &Database,
    conversation_id: &str,
) -> Result<Vec<ChatMessage>, OpsError> {
    let conversation_id = conversation_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, conversation_id, role, parts, content, created_at \
                 FROM messages WHERE conversation_id = ?1 \
                 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map(params![conversation_id], message_from_row)?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            Ok(messages)
        })
        .await
        .map_err(map_tr_err)
}
