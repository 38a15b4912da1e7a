//! V001: Initial schema.
//! images, annotation_results.

pub const MIGRATION_SQL: &str = r#"
-- Images: uploaded once, descriptive attributes never mutated afterwards.
CREATE TABLE IF NOT EXISTS images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    storage_path TEXT NOT NULL,
    file_size INTEGER NOT NULL,
    width INTEGER NOT NULL,
    height INTEGER NOT NULL,
    metadata TEXT,
    upload_date INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_images_upload_date
    ON images(upload_date DESC);

-- Annotation results: at most one row per image, enforced by the UNIQUE
-- constraint. An image with no row here is pending.
CREATE TABLE IF NOT EXISTS annotation_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    image_id INTEGER NOT NULL UNIQUE REFERENCES images(id) ON DELETE CASCADE,
    status TEXT NOT NULL,
    confidence_score REAL NOT NULL,
    confidence_level TEXT NOT NULL,
    decision_reason TEXT NOT NULL,
    annotations TEXT,
    processing_time_ms INTEGER NOT NULL,
    processed_at INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_annotation_results_status
    ON annotation_results(status);
CREATE INDEX IF NOT EXISTS idx_annotation_results_processed
    ON annotation_results(processed_at DESC);
"#;
