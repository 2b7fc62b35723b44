use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    pkg::{
        internal::{
            adaptors::jobs::{
                filter::{JobField, JobFilter},
                spec::{JobEntry, Pagination},
            },
            listing::{self, JobPage},
        },
        server::state::AppState,
    },
    prelude::Result,
};

/// Query string of `GET /jobs`. Everything is optional and lenient.
#[derive(Deserialize, Debug, Default)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub experience: Option<String>,
    pub source: Option<String>,
    pub searched_title: Option<String>,
    pub searched_location: Option<String>,
}

impl ListParams {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(number(&self.page), number(&self.limit))
    }

    pub fn into_filter(self) -> JobFilter {
        JobFilter::from_pairs([
            (JobField::Title, self.title),
            (JobField::Location, self.location),
            (JobField::Company, self.company),
            (JobField::Experience, self.experience),
            (JobField::Source, self.source),
            (JobField::SearchedTitle, self.searched_title),
            (JobField::SearchedLocation, self.searched_location),
        ])
    }
}

fn number(raw: &Option<String>) -> Option<i64> {
    raw.as_deref().and_then(|s| s.trim().parse().ok())
}

pub async fn list(State(state): State<AppState>, Query(params): Query<ListParams>) -> Result<Json<JobPage>> {
    let pagination = params.pagination();
    let filter = params.into_filter();
    Ok(Json(listing::list_jobs(&*state.store, &filter, pagination).await?))
}

pub async fn retrieve(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<JobEntry>> {
    Ok(Json(listing::get_job(&*state.store, &id).await?))
}

pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(listing::searched_titles(&*state.store).await?))
}

pub async fn locations(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(listing::searched_locations(&*state.store).await?))
}
