// src/db/dashboard.rs
use rusqlite::{params, Connection};

use crate::db::cities::get_city;
use crate::domain::city::{title_case, CityRecord};
use crate::errors::ServerError;

/// Pin a city to a user's dashboard. Returns the city's display name.
pub fn add_to_dashboard(
    conn: &Connection,
    user_id: i64,
    city_id: i64,
) -> Result<String, ServerError> {
    let city = get_city(conn, city_id)?.ok_or(ServerError::NotFound)?;

    let inserted = conn
        .execute(
            "insert or ignore into dashboard (user_id, city_id) values (?, ?)",
            params![user_id, city_id],
        )
        .map_err(|e| ServerError::DbError(format!("insert dashboard row failed: {e}")))?;

    if inserted == 0 {
        return Err(ServerError::Conflict(
            "this city is already on your dashboard!".into(),
        ));
    }

    Ok(title_case(&city.city_name))
}

/// Unpin a city. Removing a city that isn't pinned is not an error.
pub fn remove_from_dashboard(
    conn: &Connection,
    user_id: i64,
    city_id: i64,
) -> Result<String, ServerError> {
    let city = get_city(conn, city_id)?.ok_or(ServerError::NotFound)?;

    conn.execute(
        "delete from dashboard where user_id = ? and city_id = ?",
        params![user_id, city_id],
    )
    .map_err(|e| ServerError::DbError(format!("delete dashboard row failed: {e}")))?;

    Ok(title_case(&city.city_name))
}

/// Cities on a user's dashboard, in the order they were pinned.
pub fn list_dashboard(conn: &Connection, user_id: i64) -> Result<Vec<CityRecord>, ServerError> {
    let mut stmt = conn
        .prepare(
            "select c.city_id, c.city_name, c.state_code, c.country_code, c.lat, c.lon, c.country
             from dashboard d
             join cities c on c.city_id = d.city_id
             where d.user_id = ?
             order by d.rowid",
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id], |r| {
            Ok(CityRecord {
                city_id: r.get(0)?,
                city_name: r.get(1)?,
                state_code: r.get(2)?,
                country_code: r.get(3)?,
                lat: r.get(4)?,
                lon: r.get(5)?,
                country: r.get(6)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::cities::tests::{apply_schema, new_city};
    use crate::db::cities::{insert_city, InsertOutcome};
    use crate::db::users::{delete_user, insert_user};

    fn setup() -> (Connection, i64, i64, i64) {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);
        let user = insert_user(&conn, "alice", "x", 1000).unwrap().unwrap();

        let InsertOutcome::Inserted(austin) =
            insert_city(&mut conn, &new_city("Austin", 30.25, -97.75)).unwrap()
        else {
            panic!("austin not inserted");
        };
        let InsertOutcome::Inserted(boise) =
            insert_city(&mut conn, &new_city("Boise", 43.625, -116.25)).unwrap()
        else {
            panic!("boise not inserted");
        };
        (conn, user, austin, boise)
    }

    #[test]
    fn add_list_remove() {
        let (conn, user, austin, boise) = setup();

        assert_eq!(add_to_dashboard(&conn, user, boise).unwrap(), "Boise");
        assert_eq!(add_to_dashboard(&conn, user, austin).unwrap(), "Austin");

        let pinned: Vec<i64> = list_dashboard(&conn, user)
            .unwrap()
            .iter()
            .map(|c| c.city_id)
            .collect();
        assert_eq!(pinned, vec![boise, austin]);

        assert_eq!(remove_from_dashboard(&conn, user, boise).unwrap(), "Boise");
        assert_eq!(list_dashboard(&conn, user).unwrap().len(), 1);
    }

    #[test]
    fn adding_twice_is_a_conflict() {
        let (conn, user, austin, _) = setup();

        add_to_dashboard(&conn, user, austin).unwrap();
        let err = add_to_dashboard(&conn, user, austin).unwrap_err();
        assert!(matches!(err, ServerError::Conflict(_)));
    }

    #[test]
    fn unknown_city_is_not_found() {
        let (conn, user, _, _) = setup();
        assert!(matches!(
            add_to_dashboard(&conn, user, 4242),
            Err(ServerError::NotFound)
        ));
    }

    #[test]
    fn deleting_user_clears_dashboard_but_keeps_cities() {
        let (mut conn, user, austin, _) = setup();
        add_to_dashboard(&conn, user, austin).unwrap();

        delete_user(&mut conn, user).unwrap();

        let rows: i64 = conn
            .query_row("select count(*) from dashboard", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 0);
        assert!(get_city(&conn, austin).unwrap().is_some());
    }
}
