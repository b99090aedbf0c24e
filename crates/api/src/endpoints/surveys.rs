//! Survey endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use formpulse_common::AppResult;
use formpulse_core::{CreateSurveyInput, QuestionInput};
use formpulse_store::models::{QuestionType, Survey, Theme};
use serde::Deserialize;
use validator::Validate;

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::ApiResponse,
};

/// Create survey request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSurveyRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub questions: Vec<QuestionPayload>,

    #[serde(default)]
    pub theme: Option<ThemePayload>,
}

/// One question in a create request.
#[derive(Debug, Deserialize)]
pub struct QuestionPayload {
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub label: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

/// Theme in a create request.
#[derive(Debug, Deserialize)]
pub struct ThemePayload {
    pub primary: String,
    pub secondary: String,
}

/// Create a survey.
///
/// Works with or without a session; anonymously authored surveys carry
/// an empty owner.
async fn create_survey(
    MaybeAuthUser(maybe_user): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateSurveyRequest>,
) -> AppResult<ApiResponse<Survey>> {
    req.validate()?;

    let owner_id = maybe_user.map(|u| u.id).unwrap_or_default();
    let input = CreateSurveyInput {
        title: req.title,
        description: req.description,
        questions: req
            .questions
            .into_iter()
            .map(|q| QuestionInput {
                kind: q.kind,
                label: q.label,
                options: q.options,
                required: q.required,
            })
            .collect(),
        theme: req.theme.map(|t| Theme {
            primary: t.primary,
            secondary: t.secondary,
        }),
    };

    let survey = state.survey_service.create(&owner_id, input).await?;

    Ok(ApiResponse::ok(survey))
}

/// List the authenticated account's surveys.
async fn list_surveys(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<Survey>>> {
    let surveys = state.survey_service.list_for_owner(&user.id).await?;
    Ok(ApiResponse::ok(surveys))
}

/// Fetch one survey for answering.
///
/// Public: respondents follow a shared link without a session.
async fn get_survey(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Survey>> {
    let survey = state.survey_service.get(&id).await?;
    Ok(ApiResponse::ok(survey))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_survey).get(list_surveys))
        .route("/{id}", get(get_survey))
}
