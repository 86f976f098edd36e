/// Database row types that map directly to SQLite rows.
/// Distinct from the rota-types view models to keep the DB layer independent.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
}

pub struct ScheduleRow {
    pub id: String,
    pub password: String,
}

pub struct ButtonRow {
    pub id: String,
    pub schedule_id: String,
    pub particulars: String,
    pub participant: String,
    pub color: String,
}
