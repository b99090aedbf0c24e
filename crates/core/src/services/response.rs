//! Response service.

use formpulse_common::{AppError, AppResult};
use formpulse_store::{ResponseRepository, SurveyRepository};
use formpulse_store::models::{AnswerMap, AnswerValue, SurveyResponse};

use crate::aggregate::{AnalyticsReport, aggregate};
use crate::capture::validate_answers;
use crate::export::{export_csv, export_filename};

/// A rendered CSV export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested download filename.
    pub filename: String,
    /// The CSV document.
    pub content: String,
}

/// Response service for submission, listing, and analytics.
#[derive(Debug, Clone)]
pub struct ResponseService {
    survey_repo: SurveyRepository,
    response_repo: ResponseRepository,
}

impl ResponseService {
    /// Create a new response service.
    #[must_use]
    pub const fn new(survey_repo: SurveyRepository, response_repo: ResponseRepository) -> Self {
        Self {
            survey_repo,
            response_repo,
        }
    }

    /// Validate and persist a submitted response.
    ///
    /// Validation failures abort before any write; the first failing
    /// question is reported. Answers for question identifiers the survey
    /// does not declare are dropped, keeping the stored keys a subset of
    /// the survey's question ids.
    pub async fn submit(&self, survey_id: &str, answers: AnswerMap) -> AppResult<SurveyResponse> {
        let survey = self.survey_repo.get(survey_id).await?;

        validate_answers(&survey, &answers)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let answers: AnswerMap = answers
            .into_iter()
            .filter(|(question_id, _)| survey.question(question_id).is_some())
            .collect();

        self.response_repo.create(survey_id, &answers).await
    }

    /// List a survey's responses, optionally filtered by a search term.
    pub async fn list(
        &self,
        survey_id: &str,
        filter: Option<&str>,
    ) -> AppResult<Vec<SurveyResponse>> {
        // Resolve the survey first so an unknown ID is a not-found, not
        // an empty list.
        self.survey_repo.get(survey_id).await?;
        let responses = self.response_repo.list_for_survey(survey_id).await?;

        Ok(match filter {
            Some(term) if !term.is_empty() => responses
                .into_iter()
                .filter(|r| matches_filter(r, term))
                .collect(),
            _ => responses,
        })
    }

    /// Build the analytics report for a survey.
    pub async fn analytics(&self, survey_id: &str) -> AppResult<AnalyticsReport> {
        let survey = self.survey_repo.get(survey_id).await?;
        let responses = self.response_repo.list_for_survey(survey_id).await?;
        Ok(aggregate(&survey, &responses))
    }

    /// Render the CSV export for a survey.
    pub async fn export(&self, survey_id: &str) -> AppResult<CsvExport> {
        let survey = self.survey_repo.get(survey_id).await?;
        let responses = self.response_repo.list_for_survey(survey_id).await?;
        Ok(CsvExport {
            filename: export_filename(&survey.title),
            content: export_csv(&survey, &responses),
        })
    }
}

/// Case-insensitive substring match across all of a response's answers.
fn matches_filter(response: &SurveyResponse, term: &str) -> bool {
    let term = term.to_lowercase();
    response.answers.values().any(|answer| match answer {
        AnswerValue::One(value) => value.to_lowercase().contains(&term),
        AnswerValue::Many(values) => values.iter().any(|v| v.to_lowercase().contains(&term)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn response(answers: &[(&str, AnswerValue)]) -> SurveyResponse {
        let mut map = AnswerMap::new();
        for (question_id, value) in answers {
            map.insert((*question_id).to_string(), value.clone());
        }
        SurveyResponse {
            id: "r1".to_string(),
            survey_id: "s1".to_string(),
            answers: map,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_matches_scalar_answers() {
        let response = response(&[("q1", AnswerValue::One("Hello World".to_string()))]);
        assert!(matches_filter(&response, "world"));
        assert!(!matches_filter(&response, "mars"));
    }

    #[test]
    fn test_filter_matches_inside_selections() {
        let response = response(&[(
            "q1",
            AnswerValue::Many(vec!["Cheese".to_string(), "Olives".to_string()]),
        )]);
        assert!(matches_filter(&response, "oliv"));
        assert!(!matches_filter(&response, "pepper"));
    }
}
