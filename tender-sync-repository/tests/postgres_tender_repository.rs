//! Integration tests for the PostgreSQL tender repository.
//!
//! These tests require a real PostgreSQL database and use SQLx test macros
//! to ensure proper test isolation and cleanup.
//!
//! Run with: `DATABASE_URL=postgres://... cargo test --test postgres_tender_repository -- --ignored`

use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use tender_sync_repository::{PostgresTenderRepository, TenderRepository};
use uuid::Uuid;

async fn insert_base_tender(pool: &PgPool, id: Uuid, source: &str) {
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    sqlx::query(
        r#"INSERT INTO "BaseTender"
           ("TenderID", "Title", "Status", "PublishedDate", "ClosingDate", "DateAppended", "Source", "Description")
           VALUES ($1, $2, 'Open', $3, $3, $3, $4, NULL)"#,
    )
    .bind(id)
    .bind(format!("Tender {}", source))
    .bind(at)
    .bind(source)
    .execute(pool)
    .await
    .unwrap();
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_fetch_tenders_attaches_tags_and_docs(pool: PgPool) {
    let tender_id = Uuid::new_v4();
    let tag_id = Uuid::new_v4();
    insert_base_tender(&pool, tender_id, "SANRAL").await;

    sqlx::query(r#"INSERT INTO "Tag" ("TagID", "TagName") VALUES ($1, 'Roads')"#)
        .bind(tag_id)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(r#"INSERT INTO "Tender_Tag" ("TenderID", "TagID") VALUES ($1, $2)"#)
        .bind(tender_id)
        .bind(tag_id)
        .execute(&pool)
        .await
        .unwrap();
    for name in ["Notice", "Drawings"] {
        sqlx::query(
            r#"INSERT INTO "SupportingDoc" ("SupportingDocID", "TenderID", "Name", "URL")
               VALUES ($1, $2, $3, $4)"#,
        )
        .bind(Uuid::new_v4())
        .bind(tender_id)
        .bind(name)
        .bind(format!("https://example.com/{}.pdf", name))
        .execute(&pool)
        .await
        .unwrap();
    }

    let repository = PostgresTenderRepository::new(pool);
    let tenders = repository.fetch_tenders().await.unwrap();

    assert_eq!(tenders.len(), 1);
    let tender = &tenders[0];
    assert_eq!(tender.tender_id, tender_id);
    assert_eq!(tender.source, "SANRAL");
    assert!(tender.description.is_none());
    assert_eq!(tender.tags.len(), 1);
    assert_eq!(tender.tags[0].tag_name, "Roads");
    assert_eq!(tender.supporting_docs.len(), 2);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_fetch_subtype_tables(pool: PgPool) {
    let sanral_id = Uuid::new_v4();
    let sars_id = Uuid::new_v4();
    insert_base_tender(&pool, sanral_id, "SANRAL").await;
    insert_base_tender(&pool, sars_id, "SARS").await;

    sqlx::query(
        r#"INSERT INTO "SanralTender" ("TenderID", "TenderNumber", "Category")
           VALUES ($1, 'N001-2025', 'Construction')"#,
    )
    .bind(sanral_id)
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        r#"INSERT INTO "SarsTender" ("TenderID", "TenderNumber", "BriefingSession")
           VALUES ($1, 'RFP 01/2025', 'Non-compulsory')"#,
    )
    .bind(sars_id)
    .execute(&pool)
    .await
    .unwrap();

    let repository = PostgresTenderRepository::new(pool);

    let sanral = repository.fetch_sanral_tenders().await.unwrap();
    assert_eq!(sanral.len(), 1);
    assert_eq!(sanral[&sanral_id].category.as_deref(), Some("Construction"));
    assert!(sanral[&sanral_id].location.is_none());

    let sars = repository.fetch_sars_tenders().await.unwrap();
    assert_eq!(sars[&sars_id].briefing_session.as_deref(), Some("Non-compulsory"));

    // Empty tables still load
    assert!(repository.fetch_etenders().await.unwrap().is_empty());
    assert!(repository.fetch_eskom_tenders().await.unwrap().is_empty());
    assert!(repository.fetch_transnet_tenders().await.unwrap().is_empty());
}
