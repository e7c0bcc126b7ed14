use chat_db::{DatabaseTarget, connect, run_migrations};

use sqlx::SqlitePool;

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let pool = connect(&DatabaseTarget::InMemory)
        .await
        .expect("Failed to create test pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Inserts a row directly, bypassing the repository
pub async fn insert_raw_message(pool: &SqlitePool, content: &str, received_at: &str) {
    // Use sqlx::query (not query!) to avoid offline mode issues in tests
    sqlx::query("INSERT INTO message (content, received_at) VALUES (?, ?)")
        .bind(content)
        .bind(received_at)
        .execute(pool)
        .await
        .expect("Failed to insert test message");
}
