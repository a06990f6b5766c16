//! `SQLite` group store.

use std::collections::BTreeSet;
use std::path::Path;

use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::{debug, warn};

use super::GroupStore;
use crate::group::{Group, GroupId, decode_addresses, encode_addresses, validation};
use crate::settings::Settings;
use crate::{Error, Result};

/// Group store backed by the `groups` table of a local `SQLite` database.
///
/// A store opened leniently may have no connection. Reads then return empty
/// results and writes fail with [`Error::ConnectionUnavailable`].
#[derive(Debug, Clone)]
pub struct SqliteGroupStore {
    pool: Option<SqlitePool>,
}

impl SqliteGroupStore {
    /// Connect to the database at the given path.
    ///
    /// Creates the database and table if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn connect(database_path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        initialize(&pool).await?;
        debug!("Opened group database at {}", database_path.display());
        Ok(Self { pool: Some(pool) })
    }

    /// Open the database at the given path, degrading to a disconnected store on failure.
    pub async fn open(database_path: &Path) -> Self {
        match Self::connect(database_path).await {
            Ok(store) => store,
            Err(e) => {
                warn!(
                    "Group database unavailable at {}: {e}",
                    database_path.display()
                );
                Self::disconnected()
            }
        }
    }

    /// Open the database configured by `settings`, creating its directory if needed.
    pub async fn open_default(settings: &Settings) -> Self {
        let path = settings.database_path();
        if let Some(parent) = path.parent()
            && let Err(e) = tokio::fs::create_dir_all(parent).await
        {
            warn!("Failed to create data directory {}: {e}", parent.display());
            return Self::disconnected();
        }
        Self::open(&path).await
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        initialize(&pool).await?;
        Ok(Self { pool: Some(pool) })
    }

    /// A store without a database connection.
    #[must_use]
    pub const fn disconnected() -> Self {
        Self { pool: None }
    }

    /// Returns true if the store holds a database connection.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.pool.is_some()
    }

    /// Close the database connection, waiting for open connections to finish.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }

    fn pool(&self) -> Result<&SqlitePool> {
        self.pool.as_ref().ok_or(Error::ConnectionUnavailable)
    }

    async fn try_fetch_all(&self) -> Result<Vec<Group>> {
        let rows = sqlx::query(r#"SELECT "id", "name", "emailIds" FROM "groups" ORDER BY "id""#)
            .fetch_all(self.pool()?)
            .await?;

        let groups = rows
            .iter()
            .map(row_to_group)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(groups)
    }

    async fn try_all_email_addresses(&self) -> Result<BTreeSet<String>> {
        let rows = sqlx::query(r#"SELECT "emailIds" FROM "groups""#)
            .fetch_all(self.pool()?)
            .await?;

        let mut addresses = BTreeSet::new();
        for row in &rows {
            let encoded: Option<String> = row.try_get("emailIds")?;
            addresses.extend(decode_addresses(encoded.as_deref().unwrap_or_default()));
        }
        Ok(addresses)
    }
}

impl GroupStore for SqliteGroupStore {
    async fn fetch_all(&self) -> Vec<Group> {
        match self.try_fetch_all().await {
            Ok(groups) => groups,
            Err(e) => {
                warn!("Failed to load groups: {e}");
                Vec::new()
            }
        }
    }

    async fn create(&self, name: &str, email_addresses: &[String]) -> Result<Group> {
        validation::ensure_unique_valid(email_addresses)?;

        let result = sqlx::query(r#"INSERT INTO "groups" ("name", "emailIds") VALUES (?, ?)"#)
            .bind(name)
            .bind(encode_addresses(email_addresses))
            .execute(self.pool()?)
            .await?;

        let id = GroupId::new(result.last_insert_rowid());
        debug!("Created group {id} with {} addresses", email_addresses.len());
        Ok(Group::new(id, name, email_addresses.to_vec()))
    }

    async fn update(&self, group: &Group) -> Result<Group> {
        let result =
            sqlx::query(r#"UPDATE "groups" SET "name" = ?, "emailIds" = ? WHERE "id" = ?"#)
                .bind(&group.name)
                .bind(encode_addresses(&group.email_addresses))
                .bind(group.id.0)
                .execute(self.pool()?)
                .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(group.id));
        }

        debug!("Updated group {}", group.id);
        Ok(group.clone())
    }

    async fn all_email_addresses(&self) -> BTreeSet<String> {
        match self.try_all_email_addresses().await {
            Ok(addresses) => addresses,
            Err(e) => {
                warn!("Failed to load email addresses: {e}");
                BTreeSet::new()
            }
        }
    }
}

/// Initialize database schema.
async fn initialize(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS "groups" (
            "id" INTEGER PRIMARY KEY,
            "name" TEXT,
            "emailIds" TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Convert a database row to a Group.
fn row_to_group(row: &SqliteRow) -> std::result::Result<Group, sqlx::Error> {
    let id: i64 = row.try_get("id")?;
    let name: Option<String> = row.try_get("name")?;
    let encoded: Option<String> = row.try_get("emailIds")?;

    Ok(Group::new(
        GroupId::new(id),
        name.unwrap_or_default(),
        decode_addresses(encoded.as_deref().unwrap_or_default()),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn addresses(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_create_and_fetch_group() {
        let store = SqliteGroupStore::in_memory().await.unwrap();

        let created = store
            .create("Team", &addresses(&["a@b.com", "c@d.com"]))
            .await
            .unwrap();
        assert!(created.id.0 >= 0);
        assert_eq!(created.name, "Team");
        assert_eq!(created.email_addresses, addresses(&["a@b.com", "c@d.com"]));

        let groups = store.fetch_all().await;
        assert_eq!(groups, vec![created]);
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_ids() {
        let store = SqliteGroupStore::in_memory().await.unwrap();

        let first = store.create("One", &addresses(&["a@b.com"])).await.unwrap();
        let second = store.create("Two", &addresses(&["a@b.com"])).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_valid_addresses() {
        let store = SqliteGroupStore::in_memory().await.unwrap();

        let result = store
            .create("Team", &addresses(&["a@b.com", "a@b.com"]))
            .await;
        assert!(matches!(result, Err(Error::DuplicateEmail)));
        assert!(store.fetch_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_group() {
        let store = SqliteGroupStore::in_memory().await.unwrap();

        let created = store.create("Team", &addresses(&["a@b.com"])).await.unwrap();
        let changed = created.with_changes("Crew", addresses(&["c@d.com", "e@f.org"]));
        let updated = store.update(&changed).await.unwrap();
        assert_eq!(updated, changed);

        let groups = store.fetch_all().await;
        assert_eq!(groups, vec![changed]);
    }

    #[tokio::test]
    async fn test_update_missing_group() {
        let store = SqliteGroupStore::in_memory().await.unwrap();

        let ghost = Group::new(GroupId::new(42), "Ghost", addresses(&["a@b.com"]));
        let result = store.update(&ghost).await;
        assert!(matches!(result, Err(Error::NotFound(id)) if id == GroupId::new(42)));
    }

    #[tokio::test]
    async fn test_all_email_addresses_deduplicates() {
        let store = SqliteGroupStore::in_memory().await.unwrap();

        store
            .create("One", &addresses(&["a@b.com", "c@d.com"]))
            .await
            .unwrap();
        store
            .create("Two", &addresses(&["c@d.com", "e@f.org"]))
            .await
            .unwrap();

        let all = store.all_email_addresses().await;
        let expected: BTreeSet<String> = addresses(&["a@b.com", "c@d.com", "e@f.org"])
            .into_iter()
            .collect();
        assert_eq!(all, expected);
    }

    #[tokio::test]
    async fn test_reads_trim_stored_whitespace() {
        let store = SqliteGroupStore::in_memory().await.unwrap();

        sqlx::query(r#"INSERT INTO "groups" ("name", "emailIds") VALUES (?, ?)"#)
            .bind("Legacy")
            .bind(" a@b.com , c@d.com")
            .execute(store.pool().unwrap())
            .await
            .unwrap();

        let groups = store.fetch_all().await;
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].email_addresses, addresses(&["a@b.com", "c@d.com"]));
        assert!(store.all_email_addresses().await.contains("a@b.com"));
    }

    #[tokio::test]
    async fn test_disconnected_store() {
        let store = SqliteGroupStore::disconnected();
        assert!(!store.is_connected());

        assert!(store.fetch_all().await.is_empty());
        assert!(store.all_email_addresses().await.is_empty());

        let result = store.create("Team", &addresses(&["a@b.com"])).await;
        assert!(matches!(result, Err(Error::ConnectionUnavailable)));

        let group = Group::new(GroupId::new(1), "Team", addresses(&["a@b.com"]));
        let result = store.update(&group).await;
        assert!(matches!(result, Err(Error::ConnectionUnavailable)));
    }

    #[tokio::test]
    async fn test_open_unreachable_path_degrades() {
        let path = Path::new("/nonexistent-dir/groupmail/db.sqlite3");
        let store = SqliteGroupStore::open(path).await;
        assert!(!store.is_connected());
        assert!(store.fetch_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_open_path_with_url_characters() {
        for dir_name in ["gm?query", "gm space 100%25 dir"] {
            let dir = std::env::temp_dir()
                .join(format!("groupmail-{}", std::process::id()))
                .join(dir_name);
            let _ = std::fs::remove_dir_all(&dir);
            std::fs::create_dir_all(&dir).unwrap();
            let path = dir.join("db.sqlite3");

            let store = SqliteGroupStore::open(&path).await;
            assert!(store.is_connected(), "failed to open {}", path.display());
            store.create("Team", &addresses(&["a@b.com"])).await.unwrap();
            store.close().await;
            assert!(path.exists());

            std::fs::remove_dir_all(&dir).unwrap();
        }
    }

    #[tokio::test]
    async fn test_engine_failure_is_write_error() {
        let store = SqliteGroupStore::in_memory().await.unwrap();
        let group = store.create("Team", &addresses(&["a@b.com"])).await.unwrap();

        store.close().await;

        let result = store.create("Other", &addresses(&["c@d.com"])).await;
        assert!(matches!(result, Err(Error::Write(_))));
        let result = store.update(&group).await;
        assert!(matches!(result, Err(Error::Write(_))));
        assert!(store.fetch_all().await.is_empty());
    }
}
