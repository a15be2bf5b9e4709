// src/db/users.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub hash: String,
    pub created_at: i64,
}

/// Returns `Ok(None)` when the username is taken.
pub fn insert_user(
    conn: &Connection,
    username: &str,
    hash: &str,
    now: i64,
) -> Result<Option<i64>, ServerError> {
    let inserted = conn
        .execute(
            "insert or ignore into users (username, hash, created_at) values (?, ?, ?)",
            params![username, hash, now],
        )
        .map_err(|e| ServerError::DbError(format!("insert user failed: {e}")))?;

    if inserted == 0 {
        return Ok(None);
    }
    Ok(Some(conn.last_insert_rowid()))
}

fn find_user(
    conn: &Connection,
    sql: &str,
    key: &dyn rusqlite::ToSql,
) -> Result<Option<UserRow>, ServerError> {
    conn.query_row(sql, params![key], |r| {
        Ok(UserRow {
            id: r.get(0)?,
            username: r.get(1)?,
            hash: r.get(2)?,
            created_at: r.get(3)?,
        })
    })
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}

pub fn find_user_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<UserRow>, ServerError> {
    find_user(
        conn,
        "select id, username, hash, created_at from users where username = ?",
        &username,
    )
}

pub fn find_user_by_id(
    conn: &Connection,
    user_id: i64,
) -> Result<Option<UserRow>, ServerError> {
    find_user(
        conn,
        "select id, username, hash, created_at from users where id = ?",
        &user_id,
    )
}

pub fn update_password_hash(
    conn: &Connection,
    user_id: i64,
    hash: &str,
) -> Result<(), ServerError> {
    conn.execute(
        "update users set hash = ? where id = ?",
        params![hash, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("update password failed: {e}")))?;
    Ok(())
}

/// Removes the user's dashboard rows, then the user. Cities are shared and stay.
pub fn delete_user(conn: &mut Connection, user_id: i64) -> Result<(), ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    tx.execute("delete from dashboard where user_id = ?", params![user_id])
        .map_err(|e| ServerError::DbError(format!("delete dashboard failed: {e}")))?;
    tx.execute("delete from users where id = ?", params![user_id])
        .map_err(|e| ServerError::DbError(format!("delete user failed: {e}")))?;

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;
    Ok(())
}
