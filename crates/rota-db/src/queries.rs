use crate::Database;
use crate::models::{ButtonRow, ScheduleRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Users --

    pub fn create_user(&self, id: &str, username: &str, password_hash: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, password) VALUES (?1, ?2, ?3)",
                (id, username, password_hash),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, username, password FROM users WHERE username = ?1")?;

            let row = stmt
                .query_row([username], |row| {
                    Ok(UserRow {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password: row.get(2)?,
                    })
                })
                .optional()?;

            Ok(row)
        })
    }

    // -- Schedules --

    pub fn create_schedule(&self, id: &str, password: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO schedules (id, password) VALUES (?1, ?2)",
                (id, password),
            )?;
            Ok(())
        })
    }

    pub fn get_schedule_by_id(&self, id: &str) -> Result<Option<ScheduleRow>> {
        self.with_conn(|conn| query_schedule_by_id(conn, id))
    }

    pub fn get_schedule_by_password(&self, password: &str) -> Result<Option<ScheduleRow>> {
        self.with_conn(|conn| query_schedule_by_password(conn, password))
    }

    pub fn rename_schedule_password(&self, id: &str, password: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "UPDATE schedules SET password = ?2 WHERE id = ?1",
                (id, password),
            )?;
            Ok(())
        })
    }

    /// Remove a schedule and everything it owns. Buttons go first so no
    /// button is ever left pointing at a missing schedule row. Deleting an
    /// unknown id is a no-op.
    pub fn delete_schedule(&self, id: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM buttons WHERE schedule_id = ?1", [id])?;
            tx.execute("DELETE FROM schedules WHERE id = ?1", [id])?;
            tx.commit()?;
            Ok(())
        })
    }

    // -- Buttons --

    pub fn insert_button(
        &self,
        id: &str,
        schedule_id: &str,
        particulars: &str,
        participant: &str,
        color: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO buttons (id, schedule_id, particulars, participant, color)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                (id, schedule_id, particulars, participant, color),
            )?;
            Ok(())
        })
    }

    pub fn get_button(&self, id: &str) -> Result<Option<ButtonRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, schedule_id, particulars, participant, color
                 FROM buttons WHERE id = ?1",
            )?;

            let row = stmt.query_row([id], map_button).optional()?;

            Ok(row)
        })
    }

    pub fn update_button(
        &self,
        id: &str,
        particulars: &str,
        participant: &str,
        color: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "UPDATE buttons SET particulars = ?2, participant = ?3, color = ?4 WHERE id = ?1",
                (id, particulars, participant, color),
            )?;
            Ok(())
        })
    }

    /// Deleting an unknown id is a no-op.
    pub fn delete_button(&self, id: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute("DELETE FROM buttons WHERE id = ?1", [id])?;
            Ok(())
        })
    }

    /// Buttons of a schedule in insertion order.
    pub fn list_buttons(&self, schedule_id: &str) -> Result<Vec<ButtonRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, schedule_id, particulars, participant, color
                 FROM buttons WHERE schedule_id = ?1 ORDER BY rowid",
            )?;

            let rows = stmt
                .query_map([schedule_id], map_button)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn query_schedule_by_id(conn: &Connection, id: &str) -> Result<Option<ScheduleRow>> {
    let mut stmt = conn.prepare("SELECT id, password FROM schedules WHERE id = ?1")?;

    let row = stmt.query_row([id], map_schedule).optional()?;

    Ok(row)
}

fn query_schedule_by_password(conn: &Connection, password: &str) -> Result<Option<ScheduleRow>> {
    let mut stmt = conn.prepare("SELECT id, password FROM schedules WHERE password = ?1")?;

    let row = stmt.query_row([password], map_schedule).optional()?;

    Ok(row)
}

fn map_schedule(row: &rusqlite::Row<'_>) -> std::result::Result<ScheduleRow, rusqlite::Error> {
    Ok(ScheduleRow {
        id: row.get(0)?,
        password: row.get(1)?,
    })
}

fn map_button(row: &rusqlite::Row<'_>) -> std::result::Result<ButtonRow, rusqlite::Error> {
    Ok(ButtonRow {
        id: row.get(0)?,
        schedule_id: row.get(1)?,
        particulars: row.get(2)?,
        participant: row.get(3)?,
        color: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::Database;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let db = db();
        db.create_user("u1", "alice", "hash1").unwrap();
        assert!(db.create_user("u2", "alice", "hash2").is_err());

        // The original row survives the failed insert.
        let row = db.get_user_by_username("alice").unwrap().unwrap();
        assert_eq!(row.id, "u1");
        assert_eq!(row.password, "hash1");
    }

    #[test]
    fn schedule_is_found_by_exact_password_only() {
        let db = db();
        db.create_schedule("s1", "secretpass").unwrap();

        let row = db.get_schedule_by_password("secretpass").unwrap().unwrap();
        assert_eq!(row.id, "s1");

        assert!(db.get_schedule_by_password("secretpas").unwrap().is_none());
        assert!(db.get_schedule_by_password("").unwrap().is_none());
    }

    #[test]
    fn duplicate_schedule_password_is_rejected() {
        let db = db();
        db.create_schedule("s1", "shared").unwrap();
        assert!(db.create_schedule("s2", "shared").is_err());
    }

    #[test]
    fn button_requires_existing_schedule() {
        let db = db();
        assert!(
            db.insert_button("b1", "no-such-schedule", "Task A", "", "lightgreen")
                .is_err()
        );
    }

    #[test]
    fn buttons_are_listed_in_insertion_order() {
        let db = db();
        db.create_schedule("s1", "pw").unwrap();
        db.insert_button("b1", "s1", "first", "", "lightgreen")
            .unwrap();
        db.insert_button("b2", "s1", "second", "bob", "pink")
            .unwrap();
        db.insert_button("b3", "s1", "third", "", "lightgreen")
            .unwrap();

        let labels: Vec<String> = db
            .list_buttons("s1")
            .unwrap()
            .into_iter()
            .map(|b| b.particulars)
            .collect();
        assert_eq!(labels, ["first", "second", "third"]);
    }

    #[test]
    fn update_overwrites_all_button_fields() {
        let db = db();
        db.create_schedule("s1", "pw").unwrap();
        db.insert_button("b1", "s1", "Task A", "", "lightgreen")
            .unwrap();

        db.update_button("b1", "Task B", "carol", "pink").unwrap();

        let row = db.get_button("b1").unwrap().unwrap();
        assert_eq!(row.particulars, "Task B");
        assert_eq!(row.participant, "carol");
        assert_eq!(row.color, "pink");
    }

    #[test]
    fn deleting_a_schedule_removes_its_buttons() {
        let db = db();
        db.create_schedule("s1", "pw1").unwrap();
        db.create_schedule("s2", "pw2").unwrap();
        db.insert_button("b1", "s1", "a", "", "lightgreen").unwrap();
        db.insert_button("b2", "s1", "b", "x", "pink").unwrap();
        db.insert_button("b3", "s2", "c", "", "lightgreen").unwrap();

        db.delete_schedule("s1").unwrap();

        assert!(db.get_schedule_by_id("s1").unwrap().is_none());
        assert!(db.get_button("b1").unwrap().is_none());
        assert!(db.get_button("b2").unwrap().is_none());

        // The other schedule is untouched.
        assert!(db.get_schedule_by_id("s2").unwrap().is_some());
        assert_eq!(db.list_buttons("s2").unwrap().len(), 1);
    }

    #[test]
    fn deleting_a_missing_schedule_is_a_noop() {
        let db = db();
        db.create_schedule("s1", "pw").unwrap();

        db.delete_schedule("never-existed").unwrap();

        assert!(db.get_schedule_by_id("s1").unwrap().is_some());
    }

    #[test]
    fn deleting_a_missing_button_is_a_noop() {
        let db = db();
        db.delete_button("never-existed").unwrap();
    }

    #[test]
    fn rename_overwrites_schedule_password() {
        let db = db();
        db.create_schedule("s1", "old").unwrap();

        db.rename_schedule_password("s1", "new").unwrap();

        assert!(db.get_schedule_by_password("old").unwrap().is_none());
        let row = db.get_schedule_by_password("new").unwrap().unwrap();
        assert_eq!(row.id, "s1");
    }
}
