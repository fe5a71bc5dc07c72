//! Common test infrastructure for database integration tests.

#![allow(dead_code)]

use press_config::DatabaseConfig;
use press_repository::{DatabasePool, DatabasePoolInterface, TableNames};
use sqlx::MySqlPool;
use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::mysql::Mysql;

/// Content tables as created by a stock install, with a configurable prefix.
const SCHEMA: &[&str] = &[
    "CREATE TABLE `{p}posts` (
        `ID` BIGINT(20) UNSIGNED NOT NULL AUTO_INCREMENT,
        `post_author` BIGINT(20) UNSIGNED NOT NULL DEFAULT 0,
        `post_date` DATETIME NOT NULL DEFAULT '1970-01-01 00:00:01',
        `post_modified` DATETIME NOT NULL DEFAULT '1970-01-01 00:00:01',
        `post_title` TEXT NOT NULL,
        `post_content` LONGTEXT NOT NULL,
        `post_excerpt` TEXT NOT NULL,
        `post_status` VARCHAR(20) NOT NULL DEFAULT 'publish',
        `post_type` VARCHAR(20) NOT NULL DEFAULT 'post',
        `post_name` VARCHAR(200) NOT NULL DEFAULT '',
        `post_parent` BIGINT(20) UNSIGNED NOT NULL DEFAULT 0,
        `menu_order` INT(11) NOT NULL DEFAULT 0,
        `guid` VARCHAR(255) NOT NULL DEFAULT '',
        PRIMARY KEY (`ID`),
        KEY `post_name` (`post_name`(191)),
        KEY `type_status_date` (`post_type`, `post_status`, `post_date`, `ID`)
    ) DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci",
    "CREATE TABLE `{p}postmeta` (
        `meta_id` BIGINT(20) UNSIGNED NOT NULL AUTO_INCREMENT,
        `post_id` BIGINT(20) UNSIGNED NOT NULL DEFAULT 0,
        `meta_key` VARCHAR(255) DEFAULT NULL,
        `meta_value` LONGTEXT,
        PRIMARY KEY (`meta_id`),
        KEY `post_id` (`post_id`),
        KEY `meta_key` (`meta_key`(191))
    ) DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci",
    "CREATE TABLE `{p}terms` (
        `term_id` BIGINT(20) UNSIGNED NOT NULL AUTO_INCREMENT,
        `name` VARCHAR(200) NOT NULL DEFAULT '',
        `slug` VARCHAR(200) NOT NULL DEFAULT '',
        `term_group` BIGINT(10) NOT NULL DEFAULT 0,
        PRIMARY KEY (`term_id`),
        KEY `slug` (`slug`(191))
    ) DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci",
    "CREATE TABLE `{p}term_taxonomy` (
        `term_taxonomy_id` BIGINT(20) UNSIGNED NOT NULL AUTO_INCREMENT,
        `term_id` BIGINT(20) UNSIGNED NOT NULL DEFAULT 0,
        `taxonomy` VARCHAR(32) NOT NULL DEFAULT '',
        `description` LONGTEXT NOT NULL,
        `parent` BIGINT(20) UNSIGNED NOT NULL DEFAULT 0,
        `count` BIGINT(20) NOT NULL DEFAULT 0,
        PRIMARY KEY (`term_taxonomy_id`),
        UNIQUE KEY `term_id_taxonomy` (`term_id`, `taxonomy`)
    ) DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci",
    "CREATE TABLE `{p}term_relationships` (
        `object_id` BIGINT(20) UNSIGNED NOT NULL DEFAULT 0,
        `term_taxonomy_id` BIGINT(20) UNSIGNED NOT NULL DEFAULT 0,
        `term_order` INT(11) NOT NULL DEFAULT 0,
        PRIMARY KEY (`object_id`, `term_taxonomy_id`)
    ) DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci",
];

/// Test database container wrapper.
///
/// Manages a MySQL testcontainer lifecycle and provides a database pool with
/// the content tables created under `prefix`.
pub struct TestDatabase {
    _container: ContainerAsync<Mysql>,
    pool: Arc<DatabasePool>,
    tables: TableNames,
}

impl TestDatabase {
    /// Creates a new test database with a fresh MySQL container.
    pub async fn new(prefix: &str) -> Self {
        let container = Mysql::default()
            .with_env_var("MYSQL_ROOT_PASSWORD", "testpass")
            .with_env_var("MYSQL_DATABASE", "press_test")
            .with_env_var("MYSQL_USER", "press")
            .with_env_var("MYSQL_PASSWORD", "press")
            .start()
            .await
            .expect("Failed to start MySQL container");

        let port = container
            .get_host_port_ipv4(3306)
            .await
            .expect("Failed to get MySQL port");

        let config = DatabaseConfig {
            name: "press_test".to_string(),
            username: "press".to_string(),
            password: "press".to_string(),
            host: "127.0.0.1".to_string(),
            port,
            wp_prefix: prefix.to_string(),
            max_connections: 5,
            log_queries: true,
            ..DatabaseConfig::default()
        };

        let pool = Self::connect_with_retry(&config, 30).await;

        for statement in SCHEMA {
            sqlx::query(&statement.replace("{p}", prefix))
                .execute(pool.inner())
                .await
                .expect("Failed to create schema");
        }

        Self {
            _container: container,
            pool: Arc::new(pool),
            tables: TableNames::new(prefix).expect("valid prefix"),
        }
    }

    /// Returns the pool as the repositories take it.
    pub fn pool(&self) -> Arc<dyn DatabasePoolInterface> {
        Arc::clone(&self.pool) as Arc<dyn DatabasePoolInterface>
    }

    /// Returns the concrete pool, for health probes.
    pub fn database_pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }

    pub fn tables(&self) -> TableNames {
        self.tables.clone()
    }

    fn raw(&self) -> &MySqlPool {
        self.pool.inner()
    }

    pub async fn insert_post(&self, id: u64, post_type: &str, status: &str, name: &str, title: &str, menu_order: i32) {
        let sql = format!(
            "INSERT INTO {} (ID, post_title, post_content, post_excerpt, post_status, post_type, post_name, menu_order) \
             VALUES (?, ?, '', '', ?, ?, ?, ?)",
            self.tables.posts()
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(title)
            .bind(status)
            .bind(post_type)
            .bind(name)
            .bind(menu_order)
            .execute(self.raw())
            .await
            .expect("Failed to insert post");
    }

    pub async fn insert_meta(&self, meta_id: u64, post_id: u64, key: Option<&str>, value: Option<&str>) {
        let sql = format!(
            "INSERT INTO {} (meta_id, post_id, meta_key, meta_value) VALUES (?, ?, ?, ?)",
            self.tables.postmeta()
        );
        sqlx::query(&sql)
            .bind(meta_id)
            .bind(post_id)
            .bind(key)
            .bind(value)
            .execute(self.raw())
            .await
            .expect("Failed to insert post meta");
    }

    pub async fn insert_term(&self, term_id: u64, name: &str, slug: &str) {
        let sql = format!("INSERT INTO {} (term_id, name, slug) VALUES (?, ?, ?)", self.tables.terms());
        sqlx::query(&sql)
            .bind(term_id)
            .bind(name)
            .bind(slug)
            .execute(self.raw())
            .await
            .expect("Failed to insert term");
    }

    pub async fn insert_term_taxonomy(&self, term_taxonomy_id: u64, term_id: u64, taxonomy: &str) {
        let sql = format!(
            "INSERT INTO {} (term_taxonomy_id, term_id, taxonomy, description) VALUES (?, ?, ?, '')",
            self.tables.term_taxonomy()
        );
        sqlx::query(&sql)
            .bind(term_taxonomy_id)
            .bind(term_id)
            .bind(taxonomy)
            .execute(self.raw())
            .await
            .expect("Failed to insert term taxonomy");
    }

    pub async fn insert_relationship(&self, object_id: u64, term_taxonomy_id: u64) {
        let sql = format!(
            "INSERT INTO {} (object_id, term_taxonomy_id) VALUES (?, ?)",
            self.tables.term_relationships()
        );
        sqlx::query(&sql)
            .bind(object_id)
            .bind(term_taxonomy_id)
            .execute(self.raw())
            .await
            .expect("Failed to insert term relationship");
    }

    /// Connects to the database with retry logic.
    async fn connect_with_retry(config: &DatabaseConfig, max_attempts: u32) -> DatabasePool {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match DatabasePool::new(config).await {
                Ok(pool) => return pool,
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("Failed to connect to database after {} attempts: {}", max_attempts, e);
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}
