//! SQLite persistence for captured articles and discovered feeds.
//!
//! One database file holds both tables. The store is insert-only: articles
//! are appended as the crawler produces them, and repeated runs over the
//! same listing simply append again. Reads are keyed by the `source` tag,
//! which is what the non-unique index serves.
//!
//! # Schema
//!
//! Migrations are a plain ordered list applied at open; the statements are
//! idempotent so reopening an existing file is safe.

use crate::error::Result;
use crate::models::{Article, FeedRecord};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;
use std::path::Path;
use tracing::{debug, info};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        link TEXT NOT NULL,
        source TEXT NOT NULL,
        link_content BLOB,
        compressed INTEGER NOT NULL DEFAULT 0,
        language TEXT,
        title TEXT,
        published_time TEXT,
        body_content TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_articles_source ON articles (source)",
    r#"
    CREATE TABLE IF NOT EXISTS feeds (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        url TEXT NOT NULL,
        discovered_on TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_feeds_discovered_on ON feeds (discovered_on)",
    // Add future migrations here
];

/// Handle to the article and feed store.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Open (or create) the database at `path` and apply migrations.
    ///
    /// Missing parent directories are created, so a fresh deployment can
    /// point at a path that does not exist yet.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        for migration in MIGRATIONS {
            sqlx::query(migration).execute(&pool).await?;
        }

        info!(path = %path.display(), "Opened article database");
        Ok(Self { pool })
    }

    /// Append one article.
    ///
    /// # Returns
    ///
    /// The rowid of the inserted article.
    pub async fn insert_article(&self, article: &Article) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO articles
            (link, source, link_content, compressed, language, title, published_time, body_content)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.link)
        .bind(&article.source)
        .bind(article.link_content.as_deref())
        .bind(article.compressed)
        .bind(article.language.as_deref())
        .bind(article.title.as_deref())
        .bind(article.published_time)
        .bind(article.body_content.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Fetch every article captured under `source`, in insertion order.
    pub async fn articles_by_source(&self, source: &str) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            r#"
            SELECT link, source, link_content, compressed, language, title,
                   published_time, body_content
            FROM articles
            WHERE source = ?
            ORDER BY id
            "#,
        )
        .bind(source)
        .fetch_all(&self.pool)
        .await?;

        let articles = rows
            .iter()
            .map(|row| Article {
                link: row.get("link"),
                source: row.get("source"),
                link_content: row.get("link_content"),
                compressed: row.get("compressed"),
                language: row.get("language"),
                title: row.get("title"),
                published_time: row.get("published_time"),
                body_content: row.get("body_content"),
            })
            .collect();
        Ok(articles)
    }

    /// Store one page's discovered feeds as a single batch.
    ///
    /// The batch runs in a transaction, so a page's feeds land together or
    /// not at all.
    ///
    /// # Returns
    ///
    /// The number of feed rows written.
    pub async fn store_feeds(&self, page: &str, feeds: &[String]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        for feed in feeds {
            sqlx::query("INSERT INTO feeds (url, discovered_on) VALUES (?, ?)")
                .bind(feed)
                .bind(page)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        debug!(count = feeds.len(), %page, "Stored feed batch");
        Ok(feeds.len() as u64)
    }

    /// Fetch the feeds discovered on `page`, in insertion order.
    pub async fn feeds_for_page(&self, page: &str) -> Result<Vec<FeedRecord>> {
        let rows =
            sqlx::query("SELECT url, discovered_on FROM feeds WHERE discovered_on = ? ORDER BY id")
                .bind(page)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .iter()
            .map(|row| FeedRecord {
                url: row.get("url"),
                discovered_on: row.get("discovered_on"),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample_article() -> Article {
        let mut article = Article::new("http://br.reuters.com/article/um", "crawler_reuters");
        article.link_content = Some(vec![120, 156, 75, 4, 0]);
        article.compressed = true;
        article.language = Some("por".to_string());
        article.title = Some("Mercado reage a dados do governo".to_string());
        article.published_time = NaiveDate::from_ymd_opt(2015, 2, 10)
            .and_then(|d| d.and_hms_opt(14, 30, 0));
        article.body_content = Some("Texto limpo do artigo.".to_string());
        article
    }

    #[tokio::test]
    async fn test_article_round_trip() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("test.db")).await.unwrap();

        let article = sample_article();
        let id = storage.insert_article(&article).await.unwrap();
        assert!(id > 0);

        let stored = storage.articles_by_source("crawler_reuters").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], article);
    }

    #[tokio::test]
    async fn test_empty_article_round_trip() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("test.db")).await.unwrap();

        let article = Article::new("http://br.reuters.com/article/vazio", "crawler_reuters");
        storage.insert_article(&article).await.unwrap();

        let stored = storage.articles_by_source("crawler_reuters").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], article);
        assert!(stored[0].link_content.is_none());
        assert!(!stored[0].compressed);
    }

    #[tokio::test]
    async fn test_duplicate_inserts_append() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("test.db")).await.unwrap();

        let article = sample_article();
        storage.insert_article(&article).await.unwrap();
        storage.insert_article(&article).await.unwrap();

        let stored = storage.articles_by_source("crawler_reuters").await.unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn test_source_filter() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("test.db")).await.unwrap();

        storage.insert_article(&sample_article()).await.unwrap();
        let other = Article::new("http://example.com/outro", "crawler_other");
        storage.insert_article(&other).await.unwrap();

        let stored = storage.articles_by_source("crawler_reuters").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].source, "crawler_reuters");
    }

    #[tokio::test]
    async fn test_source_index_exists() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("test.db")).await.unwrap();

        let row = sqlx::query(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND name = 'idx_articles_source'",
        )
        .fetch_optional(&storage.pool)
        .await
        .unwrap();
        assert!(row.is_some());
    }

    #[tokio::test]
    async fn test_feed_batch_round_trip() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("test.db")).await.unwrap();

        let feeds = vec![
            "http://example.com/rss.xml".to_string(),
            "http://example.com/atom.xml".to_string(),
        ];
        let written = storage.store_feeds("http://example.com/", &feeds).await.unwrap();
        assert_eq!(written, 2);

        let stored = storage.feeds_for_page("http://example.com/").await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].url, "http://example.com/rss.xml");
        assert_eq!(stored[1].url, "http://example.com/atom.xml");
        assert!(stored.iter().all(|f| f.discovered_on == "http://example.com/"));
    }

    #[tokio::test]
    async fn test_empty_feed_batch_writes_nothing() {
        let dir = tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("test.db")).await.unwrap();

        let written = storage.store_feeds("http://example.com/", &[]).await.unwrap();
        assert_eq!(written, 0);
        assert!(storage.feeds_for_page("http://example.com/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("data").join("news.db");
        let storage = Storage::open(&nested).await.unwrap();

        storage.insert_article(&sample_article()).await.unwrap();
        assert!(nested.exists());
    }
}
