// src/auth/account.rs
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::auth::password::{hash_password, verify_password};
use crate::db::users;
use crate::errors::ServerError;

fn required(value: &str, message: &str) -> Result<(), ServerError> {
    if value.is_empty() {
        return Err(ServerError::BadRequest(message.to_string()));
    }
    Ok(())
}

/// Register a user. Usernames are unique and taken as given.
pub fn create_user(conn: &Connection, username: &str, password: &str) -> Result<i64, ServerError> {
    required(username, "must provide username")?;
    required(password, "must provide password")?;

    let hash = hash_password(password)?;
    let now = OffsetDateTime::now_utc().unix_timestamp();

    users::insert_user(conn, username, &hash, now)?.ok_or_else(|| {
        ServerError::Conflict(format!("the username {username} already exists"))
    })
}

/// The user id when the username exists and the password matches.
pub fn verify_credentials(
    conn: &Connection,
    username: &str,
    password: &str,
) -> Result<Option<i64>, ServerError> {
    let Some(user) = users::find_user_by_username(conn, username)? else {
        return Ok(None);
    };

    if verify_password(password, &user.hash)? {
        Ok(Some(user.id))
    } else {
        Ok(None)
    }
}

pub fn change_password(
    conn: &Connection,
    user_id: i64,
    old: &str,
    new: &str,
    confirmation: &str,
) -> Result<(), ServerError> {
    required(old, "Must enter old password to continue")?;
    required(new, "Must enter a new password to continue")?;
    required(confirmation, "Must enter new password again to confirm")?;

    let user = users::find_user_by_id(conn, user_id)?.ok_or(ServerError::NotFound)?;

    if !verify_password(old, &user.hash)? {
        return Err(ServerError::BadRequest("Current password is incorrect!".into()));
    }
    if new != confirmation {
        return Err(ServerError::BadRequest("New passwords do not match!".into()));
    }
    if verify_password(new, &user.hash)? {
        return Err(ServerError::BadRequest(
            "This password is the same as your old one, please submit a new password".into(),
        ));
    }

    users::update_password_hash(conn, user_id, &hash_password(new)?)?;
    tracing::info!(user_id, "password changed");
    Ok(())
}
