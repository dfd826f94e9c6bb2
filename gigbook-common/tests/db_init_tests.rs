//! Database initialization tests
//!
//! Covers schema creation, idempotence, and foreign key enforcement
//! against a real file-backed database.

use gigbook_common::db::{
    create_schema, init_database, ArtistRepository, NewArtist, NewShow, NewVenue, ShowRepository,
    VenueRepository,
};
use gigbook_common::WriteFailure;
use chrono::Utc;

fn sample_venue() -> NewVenue {
    NewVenue {
        name: "The Dive".to_string(),
        city: "Boise".to_string(),
        state: "ID".to_string(),
        address: "12 River Rd".to_string(),
        genres: "punk".to_string(),
        ..NewVenue::default()
    }
}

fn sample_artist() -> NewArtist {
    NewArtist {
        name: "Quartet".to_string(),
        city: "Boise".to_string(),
        state: "ID".to_string(),
        genres: "jazz".to_string(),
        ..NewArtist::default()
    }
}

#[tokio::test]
async fn init_creates_database_file_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("gigbook.db");

    let pool = init_database(&db_path).await.expect("init should succeed");
    assert!(db_path.exists());

    // All three tables answer a count query
    for table in ["venues", "artists", "shows"] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}

#[tokio::test]
async fn init_is_idempotent_and_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("gigbook.db");

    let pool = init_database(&db_path).await.unwrap();
    let venues = VenueRepository::new(pool.clone());
    let mut tx = pool.begin().await.unwrap();
    let id = venues.insert(&mut tx, &sample_venue()).await.unwrap();
    tx.commit().await.unwrap();
    drop(pool);

    // Re-open the same file; schema statements must not clobber rows
    let pool = init_database(&db_path).await.unwrap();
    create_schema(&pool).await.unwrap();
    let venues = VenueRepository::new(pool);
    let venue = venues.get(id).await.unwrap().expect("row should survive");
    assert_eq!(venue.name, "The Dive");
}

#[tokio::test]
async fn foreign_keys_reject_shows_without_counterparties() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("gigbook.db")).await.unwrap();
    let shows = ShowRepository::new(pool.clone());

    let mut tx = pool.begin().await.unwrap();
    let result = shows
        .insert(
            &mut tx,
            &NewShow {
                artist_id: 999,
                venue_id: 999,
                start_time: Utc::now(),
            },
        )
        .await;

    let err = match result {
        Err(gigbook_common::Error::Database(e)) => e,
        other => panic!("expected database error, got {other:?}"),
    };
    assert_eq!(WriteFailure::classify(&err), WriteFailure::Constraint);
}

#[tokio::test]
async fn foreign_keys_block_deleting_a_referenced_venue() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("gigbook.db")).await.unwrap();

    let venues = VenueRepository::new(pool.clone());
    let artists = ArtistRepository::new(pool.clone());
    let shows = ShowRepository::new(pool.clone());

    let mut tx = pool.begin().await.unwrap();
    let venue_id = venues.insert(&mut tx, &sample_venue()).await.unwrap();
    let artist_id = artists.insert(&mut tx, &sample_artist()).await.unwrap();
    shows
        .insert(
            &mut tx,
            &NewShow {
                artist_id,
                venue_id,
                start_time: Utc::now(),
            },
        )
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let result = venues.delete(&mut tx, venue_id).await;
    let err = match result {
        Err(gigbook_common::Error::Database(e)) => e,
        other => panic!("expected database error, got {other:?}"),
    };
    assert_eq!(WriteFailure::classify(&err), WriteFailure::Constraint);
}
