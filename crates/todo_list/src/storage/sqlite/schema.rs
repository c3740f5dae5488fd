//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Every read filters on `deleted_at IS NULL`.

/// SQL statement to create the items table.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    completed INTEGER NOT NULL DEFAULT 0,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_items_deleted_at ON items(deleted_at);
"#;

pub const INSERT_ITEM: &str = r#"
INSERT INTO items (completed, description, created_at, updated_at)
VALUES (?1, ?2, ?3, ?3)
"#;

/// Columns are in the order expected by `row_to_item`.
pub const SELECT_ITEM_BY_ID: &str = r#"
SELECT id, completed, description, created_at, updated_at, deleted_at
FROM items
WHERE id = ?1 AND deleted_at IS NULL
"#;

pub const SELECT_ITEMS_PAGE: &str = r#"
SELECT id, completed, description, created_at, updated_at, deleted_at
FROM items
WHERE deleted_at IS NULL
ORDER BY id
LIMIT ?1 OFFSET ?2
"#;

pub const UPDATE_ITEM: &str = r#"
UPDATE items
SET completed = ?2, description = ?3, updated_at = ?4
WHERE id = ?1 AND deleted_at IS NULL
"#;

pub const SOFT_DELETE_ITEM: &str = r#"
UPDATE items
SET deleted_at = ?2, updated_at = ?2
WHERE id = ?1 AND deleted_at IS NULL
"#;

pub const PING: &str = "SELECT 1";
