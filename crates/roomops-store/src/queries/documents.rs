// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document and suggestion persistence.

use roomops_core::{Document, OpsError, Suggestion};
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::queries::column_enum;

/// Insert or replace a document by id.
pub async fn save_document(db: &Database, document: &Document) -> Result<(), OpsError> {
    let d = document.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO documents (id, title, kind, content, owner_id, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![d.id, d.title, d.kind.to_string(), d.content, d.owner_id, d.created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn document_by_id(db: &Database, id: &str) -> Result<Option<Document>, OpsError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, kind, content, owner_id, created_at \
                 FROM documents WHERE id = ?1",
            )?;
            let mut rows = stmt.query_map(params![id], |row| {
                Ok(Document {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    kind: column_enum(2, row.get::<_, String>(2)?)?,
                    content: row.get(3)?,
                    owner_id: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?;
            Ok(rows.next().transpose()?)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a batch of suggestions in one transaction.
pub async fn save_suggestions(db: &Database, suggestions: &[Suggestion]) -> Result<(), OpsError> {
    let suggestions = suggestions.to_vec();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            for s in &suggestions {
                tx.execute(
                    "INSERT INTO suggestions \
                     (id, document_id, original_text, suggested_text, description, created_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        s.id,
                        s.document_id,
                        s.original_text,
                        s.suggested_text,
                        s.description,
                        s.created_at,
                    ],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn suggestions_for_document(
    db: &Database,
    document_id: &str,
) -> Result<Vec<Suggestion>, OpsError> {
    let document_id = document_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, document_id, original_text, suggested_text, description, created_at \
                 FROM suggestions WHERE document_id = ?1 ORDER BY created_at ASC",
            )?;
            let rows = stmt.query_map(params![document_id], |row| {
                Ok(Suggestion {
                    id: row.get(0)?,
                    document_id: row.get(1)?,
                    original_text: row.get(2)?,
                    suggested_text: row.get(3)?,
                    description: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?;
            let mut suggestions = Vec::new();
            for row in rows {
                suggestions.push(row?);
            }
            Ok(suggestions)
        })
        .await
        .map_err(map_tr_err)
}
