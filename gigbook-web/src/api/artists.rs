//! Artist pages: browse, search, detail, create, edit, delete

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use chrono::Utc;
use serde::Serialize;

use gigbook_common::db::ArtistRepository;
use gigbook_common::forms::ArtistForm;
use gigbook_common::projection::{ArtistDetail, ArtistFormData, EntitySummary, IndexEntry};

use super::venues::{SearchQuery, SearchResponse};
use super::{is_constraint_failure, log_write_failure, redirect_with_flash, ApiError};
use crate::AppState;

/// Browse response: bare id/name index
#[derive(Debug, Serialize)]
pub struct ArtistsResponse {
    pub artists: Vec<IndexEntry>,
}

/// GET /artists
pub async fn list_artists(
    State(state): State<AppState>,
) -> Result<Json<ArtistsResponse>, ApiError> {
    let repo = ArtistRepository::new(state.db.clone());
    let artists = repo
        .list_all()
        .await?
        .iter()
        .map(IndexEntry::for_artist)
        .collect();

    Ok(Json(ArtistsResponse { artists }))
}

/// POST /artists/search
///
/// Same conjunctive token semantics as the venue search.
pub async fn search_artists(
    State(state): State<AppState>,
    Form(query): Form<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let repo = ArtistRepository::new(state.db.clone());
    let tokens = gigbook_common::db::search_tokens(&query.search_term);
    let now = Utc::now();

    let mut data = Vec::new();
    for artist in repo.search(&tokens).await? {
        let num_upcoming_shows = repo.upcoming_count(artist.id, now).await?;
        data.push(EntitySummary {
            id: artist.id,
            name: artist.name,
            num_upcoming_shows,
        });
    }

    Ok(Json(SearchResponse {
        count: data.len(),
        data,
    }))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ArtistDetail>, ApiError> {
    let repo = ArtistRepository::new(state.db.clone());
    let artist = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Artist", id))?;
    let shows = repo.shows_for_artist(id).await?;

    Ok(Json(ArtistDetail::build(artist, &shows, Utc::now())))
}

/// GET /artists/create
pub async fn create_artist_form() -> Json<ArtistFormData> {
    Json(ArtistFormData::default())
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<AppState>,
    Form(form): Form<ArtistForm>,
) -> Result<Response, ApiError> {
    let record = form.into_record();
    let name = record.name.clone();
    let repo = ArtistRepository::new(state.db.clone());

    let mut tx = state.db.begin().await.map_err(gigbook_common::Error::from)?;
    match repo.insert(&mut tx, &record).await {
        Ok(id) => match tx.commit().await {
            Ok(()) => Ok(redirect_with_flash(
                &format!("/artists/{id}"),
                &format!("Artist {name} was successfully listed!"),
            )),
            Err(err) => {
                log_write_failure("artist create", &err.into());
                Ok(redirect_with_flash(
                    "/",
                    &format!("An error occurred. Artist {name} could not be listed."),
                ))
            }
        },
        Err(err) => {
            log_write_failure("artist create", &err);
            tx.rollback().await.ok();
            Ok(redirect_with_flash(
                "/",
                &format!("An error occurred. Artist {name} could not be listed."),
            ))
        }
    }
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ArtistFormData>, ApiError> {
    let repo = ArtistRepository::new(state.db.clone());
    let artist = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Artist", id))?;

    Ok(Json(ArtistFormData::from_record(&artist)))
}

/// POST /artists/:id/edit
pub async fn edit_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ArtistForm>,
) -> Result<Response, ApiError> {
    let repo = ArtistRepository::new(state.db.clone());
    let mut artist = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Artist", id))?;

    form.apply_to(&mut artist);
    let name = artist.name.clone();

    let mut tx = state.db.begin().await.map_err(gigbook_common::Error::from)?;
    let result = match repo.update(&mut tx, &artist).await {
        Ok(()) => tx.commit().await.map_err(gigbook_common::Error::from),
        Err(err) => {
            tx.rollback().await.ok();
            Err(err)
        }
    };

    match result {
        Ok(()) => Ok(redirect_with_flash(
            &format!("/artists/{id}"),
            &format!("Artist {name} was successfully updated!"),
        )),
        Err(err) => {
            log_write_failure("artist edit", &err);
            Ok(redirect_with_flash(
                &format!("/artists/{id}"),
                &format!("An error occurred. Artist {name} could not be updated."),
            ))
        }
    }
}

/// DELETE /artists/:id
///
/// Same contract as the venue delete: 204 on success, 404 when missing,
/// 409 when shows still reference the artist.
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let repo = ArtistRepository::new(state.db.clone());

    let mut tx = state.db.begin().await.map_err(gigbook_common::Error::from)?;
    match repo.delete(&mut tx, id).await {
        Ok(true) => {
            tx.commit().await.map_err(gigbook_common::Error::from)?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        Ok(false) => {
            tx.rollback().await.ok();
            Err(ApiError::not_found("Artist", id))
        }
        Err(err) => {
            log_write_failure("artist delete", &err);
            tx.rollback().await.ok();
            if is_constraint_failure(&err) {
                Err(ApiError::Conflict(format!(
                    "Artist {id} still has shows booked"
                )))
            } else {
                Err(err.into())
            }
        }
    }
}
