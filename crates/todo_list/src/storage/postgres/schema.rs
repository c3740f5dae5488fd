//! Postgres schema definitions and SQL query constants.

/// Statements run at startup, in order.
pub const CREATE_TABLES: &[&str] = &[
    r#"
CREATE TABLE IF NOT EXISTS items (
    id BIGSERIAL PRIMARY KEY,
    completed BOOLEAN NOT NULL DEFAULT FALSE,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    deleted_at TIMESTAMPTZ
)
"#,
    "CREATE INDEX IF NOT EXISTS idx_items_deleted_at ON items(deleted_at)",
];

pub const INSERT_ITEM: &str = r#"
INSERT INTO items (completed, description, created_at, updated_at)
VALUES ($1, $2, $3, $3)
RETURNING id
"#;

pub const SELECT_ITEM_BY_ID: &str = r#"
SELECT id, completed, description, created_at, updated_at, deleted_at
FROM items
WHERE id = $1 AND deleted_at IS NULL
"#;

pub const SELECT_ITEMS_PAGE: &str = r#"
SELECT id, completed, description, created_at, updated_at, deleted_at
FROM items
WHERE deleted_at IS NULL
ORDER BY id
LIMIT $1 OFFSET $2
"#;

pub const UPDATE_ITEM: &str = r#"
UPDATE items
SET completed = $2, description = $3, updated_at = $4
WHERE id = $1 AND deleted_at IS NULL
"#;

pub const SOFT_DELETE_ITEM: &str = r#"
UPDATE items
SET deleted_at = $2, updated_at = $2
WHERE id = $1 AND deleted_at IS NULL
"#;

pub const PING: &str = "SELECT 1";
