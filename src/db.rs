use std::str::FromStr;

use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{Archetype, EventType, ExternalEvent, Intensity, LocalEvent, RawEvent};

pub const ARCHETYPE_KEY: &str = "archetype";

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid database url: {database_url}"))?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("failed to open the SQLite store")
}

pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Archetype as it was found in the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredArchetype {
    Unset,
    Known(Archetype),
    Unrecognized(String),
}

impl StoredArchetype {
    pub fn from_value(value: Option<String>) -> Self {
        match value {
            None => StoredArchetype::Unset,
            Some(raw) => match Archetype::from_str(&raw) {
                Ok(archetype) => StoredArchetype::Known(archetype),
                Err(_) => StoredArchetype::Unrecognized(raw),
            },
        }
    }

    /// Archetype used for scoring. Unset falls back to Vata; an
    /// unrecognized value selects the neutral path.
    pub fn resolve(&self) -> Option<Archetype> {
        match self {
            StoredArchetype::Unset => Some(Archetype::Vata),
            StoredArchetype::Known(archetype) => Some(*archetype),
            StoredArchetype::Unrecognized(value) => {
                warn!(%value, "stored archetype not recognized; scoring without archetype weights");
                None
            }
        }
    }
}

pub async fn save_setting(pool: &SqlitePool, key: &str, value: &str) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO session (key, value, updated_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT (key) DO UPDATE
        SET value = excluded.value, updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await
    .with_context(|| format!("failed to store session key {key}"))?;

    Ok(())
}

pub async fn load_setting(pool: &SqlitePool, key: &str) -> anyhow::Result<Option<String>> {
    let row = sqlx::query("SELECT value FROM session WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| row.get("value")))
}

pub async fn save_archetype(pool: &SqlitePool, archetype: Archetype) -> anyhow::Result<()> {
    save_setting(pool, ARCHETYPE_KEY, archetype.as_str()).await?;
    info!(%archetype, "archetype saved");
    Ok(())
}

pub async fn load_archetype(pool: &SqlitePool) -> anyhow::Result<StoredArchetype> {
    let value = load_setting(pool, ARCHETYPE_KEY).await?;
    Ok(StoredArchetype::from_value(value))
}

pub async fn insert_local_event(pool: &SqlitePool, event: &LocalEvent) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO events
        (id, source, title, event_type, intensity, duration_minutes, start_at)
        VALUES (?, 'local', ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&event.id)
    .bind(&event.title)
    .bind(event.event_type.map(|value| value.to_db_str()))
    .bind(event.intensity.map(|value| value.as_str()))
    .bind(event.duration_minutes)
    .bind(event.timestamp.map(|value| value.to_rfc3339()))
    .execute(pool)
    .await
    .with_context(|| format!("failed to insert event {}", event.id))?;

    debug!(id = %event.id, "local event stored");
    Ok(())
}

pub fn default_events() -> Vec<LocalEvent> {
    vec![
        LocalEvent {
            id: "1".to_string(),
            title: Some("Deep Work Session".to_string()),
            event_type: Some(EventType::DeepWork),
            intensity: Some(Intensity::High),
            duration_minutes: Some(120),
            timestamp: None,
        },
        LocalEvent {
            id: "2".to_string(),
            title: Some("Team Sync".to_string()),
            event_type: Some(EventType::Meeting),
            intensity: Some(Intensity::High),
            duration_minutes: Some(60),
            timestamp: None,
        },
    ]
}

/// Replaces every stored event with the default demo schedule.
pub async fn reset_events(pool: &SqlitePool) -> anyhow::Result<usize> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM events").execute(&mut *tx).await?;

    let defaults = default_events();
    for event in &defaults {
        sqlx::query(
            r#"
            INSERT INTO events
            (id, source, title, event_type, intensity, duration_minutes)
            VALUES (?, 'local', ?, ?, ?, ?)
            "#,
        )
        .bind(&event.id)
        .bind(&event.title)
        .bind(event.event_type.map(|value| value.to_db_str()))
        .bind(event.intensity.map(|value| value.as_str()))
        .bind(event.duration_minutes)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!(count = defaults.len(), "events reset to defaults");
    Ok(defaults.len())
}

pub async fn fetch_events(pool: &SqlitePool) -> anyhow::Result<Vec<RawEvent>> {
    let rows = sqlx::query(
        "SELECT id, source, title, event_type, intensity, duration_minutes, start_at, end_at \
         FROM events ORDER BY rowid",
    )
    .fetch_all(pool)
    .await?;

    let events = rows
        .iter()
        .map(row_to_event)
        .collect::<anyhow::Result<Vec<RawEvent>>>()?;
    debug!(count = events.len(), "events loaded");
    Ok(events)
}

/// Stored events, or an empty schedule when the store cannot be read.
/// Scoring then degrades to the baseline instead of failing.
pub async fn fetch_events_or_empty(pool: &SqlitePool) -> Vec<RawEvent> {
    match fetch_events(pool).await {
        Ok(events) => events,
        Err(error) => {
            warn!(error = %format!("{error:#}"), "event store unavailable; scoring an empty schedule");
            Vec::new()
        }
    }
}

fn row_to_event(row: &SqliteRow) -> anyhow::Result<RawEvent> {
    let id: String = row.try_get("id").context("event row without an id")?;
    let source: String = row.try_get("source").unwrap_or_default();
    let title: Option<String> = optional_column(row, &id, "title");
    let start_at = parse_timestamp(optional_column(row, &id, "start_at"));

    if source == "external" {
        let end = parse_timestamp(optional_column(row, &id, "end_at"));
        return Ok(RawEvent::External(ExternalEvent {
            id,
            summary: title,
            start: start_at,
            end,
        }));
    }

    let event_type: Option<String> = optional_column(row, &id, "event_type");
    let intensity: Option<String> = optional_column(row, &id, "intensity");
    let duration_minutes: Option<i64> = optional_column(row, &id, "duration_minutes");

    Ok(RawEvent::Local(LocalEvent {
        title,
        event_type: event_type.and_then(|value| EventType::from_str(&value).ok()),
        intensity: intensity.and_then(|value| Intensity::from_str(&value).ok()),
        duration_minutes,
        timestamp: start_at,
        id,
    }))
}

/// Reads a nullable column, treating values of the wrong storage class as
/// missing so the normalizer can fill them in.
fn optional_column<T>(row: &SqliteRow, id: &str, column: &str) -> Option<T>
where
    T: for<'r> sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    match row.try_get::<Option<T>, _>(column) {
        Ok(value) => value,
        Err(error) => {
            warn!(%id, column, %error, "undecodable event column; treating it as missing");
            None
        }
    }
}

fn parse_timestamp(value: Option<String>) -> Option<DateTime<Utc>> {
    let value = value?;
    DateTime::parse_from_rfc3339(value.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok()
}

/// Imports third-party calendar entries (`id,summary,start,end`).
/// Rows without an id get one derived from their contents, so importing
/// the same file twice inserts nothing new; ids already stored are skipped.
pub async fn import_csv(pool: &SqlitePool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        id: Option<String>,
        summary: Option<String>,
        start: Option<String>,
        end: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let id = row
            .id
            .clone()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| content_id(&row.summary, &row.start, &row.end));

        let start = parse_timestamp(row.start.clone());
        let end = parse_timestamp(row.end.clone());
        if row.start.is_some() && start.is_none() {
            warn!(%id, "unparseable start time; duration will fall back to the default");
        }

        let result = sqlx::query(
            r#"
            INSERT INTO events (id, source, title, start_at, end_at)
            VALUES (?, 'external', ?, ?, ?)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&id)
        .bind(&row.summary)
        .bind(start.map(|value| value.to_rfc3339()))
        .bind(end.map(|value| value.to_rfc3339()))
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    info!(inserted, path = %csv_path.display(), "calendar import finished");
    Ok(inserted)
}

fn content_id(summary: &Option<String>, start: &Option<String>, end: &Option<String>) -> String {
    let key = format!(
        "{}|{}|{}",
        summary.as_deref().unwrap_or_default().trim(),
        start.as_deref().unwrap_or_default().trim(),
        end.as_deref().unwrap_or_default().trim()
    );
    format!("import-{}", Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_db(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn archetype_round_trips_and_overwrites() {
        let pool = memory_pool().await;
        assert_eq!(load_archetype(&pool).await.unwrap(), StoredArchetype::Unset);

        save_archetype(&pool, Archetype::Pitta).await.unwrap();
        save_archetype(&pool, Archetype::Kapha).await.unwrap();
        assert_eq!(
            load_archetype(&pool).await.unwrap(),
            StoredArchetype::Known(Archetype::Kapha)
        );
    }

    #[tokio::test]
    async fn unrecognized_archetype_resolves_to_neutral() {
        let pool = memory_pool().await;
        save_setting(&pool, ARCHETYPE_KEY, "Tridosha").await.unwrap();

        let stored = load_archetype(&pool).await.unwrap();
        assert_eq!(stored, StoredArchetype::Unrecognized("Tridosha".to_string()));
        assert_eq!(stored.resolve(), None);
        assert_eq!(StoredArchetype::Unset.resolve(), Some(Archetype::Vata));
    }

    #[tokio::test]
    async fn reset_replaces_existing_events() {
        let pool = memory_pool().await;
        let extra = LocalEvent::quick_add(Some("Lunch".to_string()), Some(EventType::Break), None, None);
        insert_local_event(&pool, &extra).await.unwrap();

        assert_eq!(reset_events(&pool).await.unwrap(), 2);
        let events = fetch_events(&pool).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], RawEvent::Local(default_events()[0].clone()));
    }

    #[tokio::test]
    async fn unknown_stored_type_is_left_for_the_normalizer() {
        let pool = memory_pool().await;
        sqlx::query(
            "INSERT INTO events (id, source, title, event_type, intensity, duration_minutes) \
             VALUES ('x', 'local', 'Standup', 'ritual', 'High', 15)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let events = fetch_events(&pool).await.unwrap();
        match &events[0] {
            RawEvent::Local(event) => {
                assert_eq!(event.event_type, None);
                assert_eq!(event.intensity, Some(Intensity::High));
                assert_eq!(event.duration_minutes, Some(15));
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[tokio::test]
    async fn csv_import_skips_duplicates() {
        let pool = memory_pool().await;
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,summary,start,end").unwrap();
        writeln!(file, "g-1,Team Sync,2026-03-02T09:00:00Z,2026-03-02T09:30:00Z").unwrap();
        writeln!(file, ",Lunch walk,,").unwrap();

        assert_eq!(import_csv(&pool, file.path()).await.unwrap(), 2);
        assert_eq!(import_csv(&pool, file.path()).await.unwrap(), 0);

        let events = fetch_events(&pool).await.unwrap();
        assert_eq!(events.len(), 2);
        match &events[0] {
            RawEvent::External(event) => {
                assert_eq!(event.id, "g-1");
                assert_eq!(event.summary.as_deref(), Some("Team Sync"));
                assert!(event.end.is_some());
            }
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreadable_store_yields_empty_schedule() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        assert!(fetch_events(&pool).await.is_err());
        let events = fetch_events_or_empty(&pool).await;
        assert!(events.is_empty());

        let dashboard = crate::evaluate(&events, Some(Archetype::Vata));
        assert_eq!(dashboard.insights.burnout.percentage, 15);
    }

    #[test]
    fn rows_without_ids_get_stable_distinct_ids() {
        let first = content_id(&Some("Lunch walk".to_string()), &None, &None);
        assert_eq!(first, content_id(&Some("Lunch walk".to_string()), &None, &None));
        assert_ne!(first, content_id(&Some("Gym".to_string()), &None, &None));
        assert!(first.starts_with("import-"));
    }

    #[tokio::test]
    async fn mistyped_columns_decode_as_missing() {
        let pool = memory_pool().await;
        sqlx::query(
            "INSERT INTO events (id, source, title, event_type, intensity, duration_minutes, start_at) \
             VALUES ('bad', 'local', 'Focus block', 'deep_work', 'High', 'ninety', 42)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let events = fetch_events(&pool).await.unwrap();
        match &events[0] {
            RawEvent::Local(event) => {
                assert_eq!(event.title.as_deref(), Some("Focus block"));
                assert_eq!(event.event_type, Some(EventType::DeepWork));
                assert_eq!(event.duration_minutes, None);
                assert_eq!(event.timestamp, None);
            }
            other => panic!("unexpected variant {other:?}"),
        }

        let canonical = crate::normalize::normalize(&events);
        assert_eq!(canonical[0].duration_minutes, 60);
    }
}
