//! Database schema and migrations for clubboard.
//!
//! Migrations are applied sequentially when the database is first opened or
//! upgraded; the `schema_version` table tracks which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    username        TEXT NOT NULL UNIQUE,
    password_hash   TEXT NOT NULL,           -- Argon2 PHC string
    is_admin        INTEGER NOT NULL DEFAULT 0,
    created         TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: messages
    r#"
-- name is a snapshot of the author's username at post time, not a foreign key
CREATE TABLE messages (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    body    TEXT NOT NULL,
    posted  TEXT NOT NULL DEFAULT (datetime('now')),
    ip      TEXT,
    club    TEXT NOT NULL
);

CREATE INDEX idx_messages_club ON messages(club);
"#,
];
