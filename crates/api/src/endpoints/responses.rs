//! Response submission, listing, analytics, and export endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use formpulse_common::{AppError, AppResult};
use formpulse_core::AnalyticsReport;
use formpulse_store::models::{AnswerMap, Survey, SurveyResponse};
use serde::Deserialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Submit response request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    pub answers: AnswerMap,
}

/// Submit a response to a survey.
///
/// Public: respondents do not need a session. Validation failures are
/// rejected before any document is created.
async fn submit_response(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SubmitResponseRequest>,
) -> AppResult<ApiResponse<SurveyResponse>> {
    let response = state.response_service.submit(&id, req.answers).await?;
    Ok(ApiResponse::ok(response))
}

/// Query parameters for listing responses.
#[derive(Debug, Deserialize)]
pub struct ListResponsesQuery {
    /// Case-insensitive substring filter over answer values.
    pub q: Option<String>,
}

/// Owners only: a survey with a recorded owner is readable by that
/// owner alone, anonymously authored surveys stay open.
fn check_owner(survey: &Survey, user_id: &str) -> AppResult<()> {
    if !survey.owner_id.is_empty() && survey.owner_id != user_id {
        return Err(AppError::Forbidden(
            "Only the survey owner can view its responses".to_string(),
        ));
    }
    Ok(())
}

/// List a survey's raw responses.
async fn list_responses(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ListResponsesQuery>,
) -> AppResult<ApiResponse<Vec<SurveyResponse>>> {
    let survey = state.survey_service.get(&id).await?;
    check_owner(&survey, &user.id)?;

    let responses = state
        .response_service
        .list(&id, query.q.as_deref())
        .await?;
    Ok(ApiResponse::ok(responses))
}

/// Build the analytics report for a survey.
async fn analytics(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<AnalyticsReport>> {
    let survey = state.survey_service.get(&id).await?;
    check_owner(&survey, &user.id)?;

    let report = state.response_service.analytics(&id).await?;
    Ok(ApiResponse::ok(report))
}

/// Download the CSV export of a survey's responses.
async fn export_csv(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let survey = state.survey_service.get(&id).await?;
    check_owner(&survey, &user.id)?;

    let export = state.response_service.export(&id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.content,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/responses", post(submit_response).get(list_responses))
        .route("/{id}/analytics", get(analytics))
        .route("/{id}/export", get(export_csv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use formpulse_store::models::Theme;

    fn survey(owner_id: &str) -> Survey {
        Survey {
            id: "s1".to_string(),
            title: "Test".to_string(),
            description: String::new(),
            questions: vec![],
            theme: Theme::default(),
            owner_id: owner_id.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_may_view_own_survey() {
        assert!(check_owner(&survey("user_1"), "user_1").is_ok());
    }

    #[test]
    fn test_other_accounts_are_forbidden() {
        assert!(matches!(
            check_owner(&survey("user_1"), "user_2"),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_anonymous_surveys_stay_open() {
        assert!(check_owner(&survey(""), "user_2").is_ok());
    }

    #[test]
    fn test_export_disposition_header_is_valid_for_hostile_titles() {
        use axum::http::HeaderValue;
        use formpulse_core::export_filename;

        // A newline in the title must not poison the download header.
        let filename = export_filename("line1\nline2 \"quoted\"");
        let disposition = format!("attachment; filename=\"{filename}\"");
        assert!(HeaderValue::from_str(&disposition).is_ok());
    }
}
