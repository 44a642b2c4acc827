// SPDX-FileCopyrightText: 2026 Roomops Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task CRUD and the bulk field-propagation write.

use roomops_core::{EditableField, OpsError, Task, TaskFilter, TaskPatch, TaskStatus};
use rusqlite::{ToSql, params};

use crate::database::{Database, map_tr_err};
use crate::queries::column_enum;

const TASK_COLUMNS: &str = "id, room_id, room_number, room_type, name, status, priority, \
     room_status, linen, check_in, check_out, assignee_id, assignee_name, due_date, \
     description, position, created_at";

fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        room_id: row.get(1)?,
        room_number: row.get(2)?,
        room_type: column_enum(3, row.get::<_, String>(3)?)?,
        name: row.get(4)?,
        status: column_enum(5, row.get::<_, String>(5)?)?,
        priority: column_enum(6, row.get::<_, String>(6)?)?,
        room_status: row.get(7)?,
        linen: row.get(8)?,
        check_in: row.get(9)?,
        check_out: row.get(10)?,
        assignee_id: row.get(11)?,
        assignee_name: row.get(12)?,
        due_date: row.get(13)?,
        description: row.get(14)?,
        position: row.get(15)?,
        created_at: row.get(16)?,
    })
}

/// Insert a new task.
pub async fn create_task(db: &Database, task: &Task) -> Result<(), OpsError> {
    let task = task.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                &format!(
                    "INSERT INTO tasks ({TASK_COLUMNS}) VALUES \
                     (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"
                ),
                params![
                    task.id,
                    task.room_id,
                    task.room_number,
                    task.room_type.to_string(),
                    task.name,
                    task.status.to_string(),
                    task.priority.to_string(),
                    task.room_status,
                    task.linen,
                    task.check_in,
                    task.check_out,
                    task.assignee_id,
                    task.assignee_name,
                    task.due_date,
                    task.description,
                    task.position,
                    task.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

pub async fn task_by_id(db: &Database, id: &str) -> Result<Option<Task>, OpsError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"))?;
            let mut rows = stmt.query_map(params![id], task_from_row)?;
            Ok(rows.next().transpose()?)
        })
        .await
        .map_err(map_tr_err)
}

/// Tasks of one room, newest first. The head defines the room's current
/// display attributes.
pub async fn tasks_for_room(db: &Database, room_id: i64) -> Result<Vec<Task>, OpsError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {TASK_COLUMNS} FROM tasks WHERE room_id = ?1 \
                 ORDER BY created_at DESC, id DESC"
            ))?;
            let rows = stmt.query_map(params![room_id], task_from_row)?;
            let mut tasks = Vec::new();
            for row in rows {
                tasks.push(row?);
            }
            Ok(tasks)
        })
        .await
        .map_err(map_tr_err)
}

/// Apply the non-`None` fields of a patch to one task.
pub async fn update_task(db: &Database, id: &str, patch: &TaskPatch) -> Result<(), OpsError> {
    if patch.is_empty() {
        return Ok(());
    }
    let id = id.to_string();
    let patch = patch.clone();
    db.connection()
        .call(move |conn| {
            let mut sets: Vec<String> = Vec::new();
            let mut values: Vec<Box<dyn ToSql + Send>> = Vec::new();

            macro_rules! push_field {
                ($opt:expr, $col:literal) => {
                    if let Some(v) = $opt {
                        sets.push(format!("{} = ?{}", $col, values.len() + 1));
                        values.push(Box::new(v));
                    }
                };
            }

            push_field!(patch.name, "name");
            push_field!(patch.status.map(|s| s.to_string()), "status");
            push_field!(patch.priority.map(|p| p.to_string()), "priority");
            push_field!(patch.assignee_id, "assignee_id");
            push_field!(patch.assignee_name, "assignee_name");
            push_field!(patch.due_date, "due_date");
            push_field!(patch.description, "description");
            push_field!(patch.position, "position");

            let sql = format!(
                "UPDATE tasks SET {} WHERE id = ?{}",
                sets.join(", "),
                values.len() + 1
            );
            values.push(Box::new(id));

            let params: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref() as &dyn ToSql).collect();
            let affected = conn.execute(&sql, params.as_slice())?;
            if affected == 0 {
                return Err(rusqlite::Error::QueryReturnedNoRows);
            }
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Hard delete. Returns the number of rows removed (0 when absent).
pub async fn delete_task(db: &Database, id: &str) -> Result<u64, OpsError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let affected = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            Ok(affected as u64)
        })
        .await
        .map_err(map_tr_err)
}

/// Tasks matching every provided predicate, ordered by status column position.
pub async fn list_tasks(db: &Database, filter: &TaskFilter) -> Result<Vec<Task>, OpsError> {
    let filter = filter.clone();
    db.connection()
        .call(move |conn| {
            let mut clauses: Vec<String> = Vec::new();
            let mut values: Vec<Box<dyn ToSql + Send>> = Vec::new();

            if let Some(room_id) = filter.room_id {
                clauses.push(format!("room_id = ?{}", values.len() + 1));
                values.push(Box::new(room_id));
            }
            if let Some(status) = filter.status {
                clauses.push(format!("status = ?{}", values.len() + 1));
                values.push(Box::new(status.to_string()));
            }
            if let Some(priority) = filter.priority {
                clauses.push(format!("priority = ?{}", values.len() + 1));
                values.push(Box::new(priority.to_string()));
            }
            if let Some(assignee_id) = filter.assignee_id {
                clauses.push(format!("assignee_id = ?{}", values.len() + 1));
                values.push(Box::new(assignee_id));
            }

            let where_clause = if clauses.is_empty() {
                String::new()
            } else {
                format!(" WHERE {}", clauses.join(" AND "))
            };
            let sql = format!(
                "SELECT {TASK_COLUMNS} FROM tasks{where_clause} ORDER BY status, position"
            );

            let params: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref() as &dyn ToSql).collect();
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params.as_slice(), task_from_row)?;
            let mut tasks = Vec::new();
            for row in rows {
                tasks.push(row?);
            }
            Ok(tasks)
        })
        .await
        .map_err(map_tr_err)
}

/// Set `field` on every task of the room inside one transaction.
///
/// Returns the number of rows touched. The column name comes from the
/// closed [`EditableField`] catalogue, never from caller input, so the SQL
/// interpolation is safe.
pub async fn set_field_for_room(
    db: &Database,
    room_id: i64,
    field: EditableField,
    value: &str,
) -> Result<u64, OpsError> {
    let value = value.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let sql = format!("UPDATE tasks SET {} = ?1 WHERE room_id = ?2", field.column());
            let affected = tx.execute(&sql, params![value, room_id])?;
            tx.commit()?;
            Ok(affected as u64)
        })
        .await
        .map_err(map_tr_err)
}

/// Highest `position` within a status column (0 when the column is empty).
pub async fn max_position(db: &Database, status: TaskStatus) -> Result<i64, OpsError> {
    db.connection()
        .call(move |conn| {
            let max: i64 = conn.query_row(
                "SELECT COALESCE(MAX(position), 0) FROM tasks WHERE status = ?1",
                params![status.to_string()],
                |row| row.get(0),
            )?;
            Ok(max)
        })
        .await
        .map_err(map_tr_err)
}
