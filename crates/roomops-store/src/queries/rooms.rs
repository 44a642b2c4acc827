// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Room CRUD operations.

use roomops_core::{OpsError, Room, RoomType};
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::queries::column_enum;

fn room_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get(0)?,
        room_number: row.get(1)?,
        room_type: column_enum(2, row.get::<_, String>(2)?)?,
        created_at: row.get(3)?,
    })
}

const ROOM_COLUMNS: &str = "id, room_number, room_type, created_at";

/// Insert a new room and return it with its assigned row id.
pub async fn create_room(
    db: &Database,
    room_number: &str,
    room_type: RoomType,
) -> Result<Room, OpsError> {
    let room_number = room_number.to_string();
    let created_at = chrono::Utc::now().to_rfc3339();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO rooms (room_number, room_type, created_at) VALUES (?1, ?2, ?3)",
                params![room_number, room_type.to_string(), created_at],
            )?;
            let id = conn.last_insert_rowid();
            Ok(Room {
                id,
                room_number,
                room_type,
                created_at,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Look up a room by its unique room number.
pub async fn room_by_number(db: &Database, room_number: &str) -> Result<Option<Room>, OpsError> {
    let room_number = room_number.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ROOM_COLUMNS} FROM rooms WHERE room_number = ?1"
            ))?;
            let mut rows = stmt.query_map(params![room_number], room_from_row)?;
            Ok(rows.next().transpose()?)
        })
        .await
        .map_err(map_tr_err)
}

pub async fn room_by_id(db: &Database, id: i64) -> Result<Option<Room>, OpsError> {
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ?1"))?;
            let mut rows = stmt.query_map(params![id], room_from_row)?;
            Ok(rows.next().transpose()?)
        })
        .await
        .map_err(map_tr_err)
}

/// All rooms ordered by room number.
pub async fn list_rooms(db: &Database) -> Result<Vec<Room>, OpsError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ROOM_COLUMNS} FROM rooms ORDER BY room_number"
            ))?;
            let rows = stmt.query_map([], room_from_row)?;
            let mut rooms = Vec::new();
            for row in rows {
                rooms.push(row?);
            }
            Ok(rooms)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a room and its tasks.
///
/// Tasks are deleted first, inside the same transaction, so the
/// deletion-order invariant holds even if the cascade pragma is off.
pub async fn delete_room(db: &Database, id: i64) -> Result<(), OpsError> {
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM tasks WHERE room_id = ?1", params![id])?;
            tx.execute("DELETE FROM rooms WHERE id = ?1", params![id])?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn create_and_lookup_room() {
        let (db, _dir) = setup_db().await;

        let room = create_room(&db, "204", RoomType::Deluxe).await.unwrap();
        assert!(room.id > 0);

        let found = room_by_number(&db, "204").await.unwrap().unwrap();
        assert_eq!(found.id, room.id);
        assert_eq!(found.room_type, RoomType::Deluxe);

        let by_id = room_by_id(&db, room.id).await.unwrap().unwrap();
        assert_eq!(by_id.room_number, "204");

        assert!(room_by_number(&db, "999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn room_numbers_are_unique() {
        let (db, _dir) = setup_db().await;
        create_room(&db, "101", RoomType::Standard).await.unwrap();
        let dup = create_room(&db, "101", RoomType::Suite).await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn list_rooms_ordered() {
        let (db, _dir) = setup_db().await;
        create_room(&db, "301", RoomType::Suite).await.unwrap();
        create_room(&db, "101", RoomType::Standard).await.unwrap();
        create_room(&db, "205", RoomType::Deluxe).await.unwrap();

        let rooms = list_rooms(&db).await.unwrap();
        let numbers: Vec<&str> = rooms.iter().map(|r| r.room_number.as_str()).collect();
        assert_eq!(numbers, vec!["101", "205", "301"]);
    }

    #[tokio::test]
    async fn delete_room_removes_tasks_first() {
        let (db, _dir) = setup_db().await;
        let room = create_room(&db, "102", RoomType::Standard).await.unwrap();
        crate::queries::tasks::create_task(
            &db,
            &crate::queries::tasks::tests::make_task("t1", &room, "2026-01-01T00:00:00Z"),
        )
        .await
        .unwrap();

        delete_room(&db, room.id).await.unwrap();
        assert!(room_by_id(&db, room.id).await.unwrap().is_none());
        let tasks = crate::queries::tasks::tasks_for_room(&db, room.id).await.unwrap();
        assert!(tasks.is_empty());
    }
}
