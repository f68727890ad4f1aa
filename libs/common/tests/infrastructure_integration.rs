//! Integration tests for the infrastructure components
//!
//! These verify that PostgreSQL and Redis are reachable and usable from the
//! application. They need live local instances, so they are ignored by
//! default; run with `cargo test -- --ignored`.

use common::{
    cache::{RedisConfig, RedisPool},
    database::{health_check, init_pool, DatabaseConfig},
};
use sqlx::Row;

#[tokio::test]
#[ignore]
async fn postgres_and_redis_are_usable() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "database health check failed");

    let row = sqlx::query("SELECT 1 as result").fetch_one(&pool).await?;
    let result: i32 = row.get("result");
    assert_eq!(result, 1);

    let redis_config = RedisConfig::from_env()?;
    let redis_pool = RedisPool::new(&redis_config).await?;
    assert!(redis_pool.health_check().await?, "redis health check failed");

    let key = "infrastructure_test_key";
    redis_pool.put_with_expiry(key, "present", 10).await?;
    assert_eq!(redis_pool.fetch(key).await?, Some("present".to_string()));

    assert!(redis_pool.remove(key).await?);
    assert_eq!(redis_pool.fetch(key).await?, None);

    Ok(())
}
