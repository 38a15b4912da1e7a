//! Connection manager tests: pragma profile, migrations, pooling, concurrency.

use std::sync::{Arc, Barrier};
use std::thread;

use fovea_core::types::NewImage;
use fovea_storage::connection::pragmas;
use fovea_storage::queries::images;
use fovea_storage::{migrations, DatabaseManager};
use tempfile::TempDir;

fn sample_image(name: &str) -> NewImage {
    NewImage {
        filename: name.to_string(),
        storage_path: format!("/uploads/{name}"),
        file_size: 1024,
        width: 800,
        height: 600,
        metadata: None,
    }
}

#[test]
fn pragmas_set_correctly() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("fovea.db");
    let db = DatabaseManager::open(&db_path).unwrap();

    db.with_writer(|conn| {
        let mode: String = conn
            .pragma_query_value(None, "journal_mode", |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal", "journal_mode should be WAL");

        let sync: i64 = conn
            .pragma_query_value(None, "synchronous", |row| row.get(0))
            .unwrap();
        assert_eq!(sync, 1, "synchronous should be NORMAL (1)");

        let fk: i64 = conn
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1, "foreign_keys should be ON");

        let cache: i64 = conn
            .pragma_query_value(None, "cache_size", |row| row.get(0))
            .unwrap();
        assert_eq!(cache, -64000, "cache_size should be -64000 (64MB)");

        let timeout: i64 = conn
            .pragma_query_value(None, "busy_timeout", |row| row.get(0))
            .unwrap();
        assert_eq!(timeout, 5000, "busy_timeout should be 5000ms");

        // Also verify using the dedicated helper.
        let is_wal = pragmas::verify_wal_mode(conn)?;
        assert!(is_wal, "verify_wal_mode should report WAL on a file-backed DB");

        Ok(())
    })
    .unwrap();
}

#[test]
fn migrations_stamp_user_version_and_reopen_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("fovea.db");

    {
        let db = DatabaseManager::open(&db_path).unwrap();
        let version = db
            .with_writer(|conn| migrations::current_version(conn))
            .unwrap();
        assert_eq!(version, 1);
        db.close().unwrap();
    }

    // Reopening must not re-run the migration or disturb the schema.
    let db = DatabaseManager::open(&db_path).unwrap();
    let version = db
        .with_writer(|conn| migrations::current_version(conn))
        .unwrap();
    assert_eq!(version, 1);

    let count = db
        .with_reader(|conn| images::count_images(conn))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn in_memory_reads_see_writes() {
    // No read pool for in-memory databases: reads must go through the
    // writer connection and observe its data.
    let db = DatabaseManager::open_in_memory().unwrap();
    assert!(db.path().is_none());

    // In-memory databases never run in WAL mode.
    let is_wal = db
        .with_writer(|conn| pragmas::verify_wal_mode(conn))
        .unwrap();
    assert!(!is_wal);

    db.with_writer(|conn| images::insert_image(conn, &sample_image("a.jpg")))
        .unwrap();

    let count = db
        .with_reader(|conn| images::count_images(conn))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn writes_are_serialized_across_threads() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("fovea.db");
    let db = Arc::new(DatabaseManager::open(&db_path).unwrap());

    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|thread_id| {
            let db = Arc::clone(&db);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..50 {
                    let image = sample_image(&format!("thread_{thread_id}_file_{i}.jpg"));
                    db.with_writer(|conn| images::insert_image(conn, &image))
                        .unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let count = db
        .with_reader(|conn| images::count_images(conn))
        .unwrap();
    assert_eq!(count, 400, "all 400 rows should be persisted");
}

#[test]
fn read_pool_rejects_writes() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("fovea.db");
    let db = DatabaseManager::open(&db_path).unwrap();

    let result = db.with_reader(|conn| {
        conn.execute("DELETE FROM images", [])
            .map_err(|e| fovea_core::errors::StorageError::SqliteError {
                message: e.to_string(),
            })?;
        Ok(())
    });

    assert!(result.is_err(), "write through read pool should fail");
}

#[test]
fn checkpoint_and_close_succeed() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("fovea.db");
    let db = DatabaseManager::open(&db_path).unwrap();

    db.with_writer(|conn| images::insert_image(conn, &sample_image("a.jpg")))
        .unwrap();

    db.checkpoint().unwrap();
    db.close().unwrap();
}
