//! Show pages: browse and create

use axum::{
    extract::State,
    response::Response,
    Form, Json,
};
use serde::Serialize;

use gigbook_common::db::ShowRepository;
use gigbook_common::forms::ShowForm;
use gigbook_common::projection::ShowListing;

use super::{log_write_failure, redirect_with_flash, ApiError};
use crate::AppState;

/// Browse response: all booked shows
#[derive(Debug, Serialize)]
pub struct ShowsResponse {
    pub shows: Vec<ShowListing>,
}

/// Blank form data for the show create page
#[derive(Debug, Default, Serialize)]
pub struct ShowFormData {
    pub artist_id: Option<i64>,
    pub venue_id: Option<i64>,
    pub start_time: Option<String>,
}

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> Result<Json<ShowsResponse>, ApiError> {
    let repo = ShowRepository::new(state.db.clone());
    let shows = repo
        .list_all()
        .await?
        .iter()
        .map(ShowListing::from_row)
        .collect();

    Ok(Json(ShowsResponse { shows }))
}

/// GET /shows/create
pub async fn create_show_form() -> Json<ShowFormData> {
    Json(ShowFormData::default())
}

/// POST /shows/create
///
/// Success and failure both redirect home; a show referencing a missing
/// artist or venue fails on the foreign key and rolls back.
pub async fn create_show(
    State(state): State<AppState>,
    Form(form): Form<ShowForm>,
) -> Result<Response, ApiError> {
    let record = match form.into_record() {
        Ok(record) => record,
        Err(err) => {
            log_write_failure("show create", &err);
            return Ok(redirect_with_flash(
                "/",
                "An error occurred. Show could not be listed.",
            ));
        }
    };

    let repo = ShowRepository::new(state.db.clone());
    let mut tx = state.db.begin().await.map_err(gigbook_common::Error::from)?;
    match repo.insert(&mut tx, &record).await {
        Ok(_id) => match tx.commit().await {
            Ok(()) => Ok(redirect_with_flash("/", "Show was successfully listed!")),
            Err(err) => {
                log_write_failure("show create", &err.into());
                Ok(redirect_with_flash(
                    "/",
                    "An error occurred. Show could not be listed.",
                ))
            }
        },
        Err(err) => {
            log_write_failure("show create", &err);
            tx.rollback().await.ok();
            Ok(redirect_with_flash(
                "/",
                "An error occurred. Show could not be listed.",
            ))
        }
    }
}
