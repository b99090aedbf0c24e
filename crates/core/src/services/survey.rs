//! Survey service.

use formpulse_common::{AppError, AppResult, IdGenerator};
use formpulse_store::SurveyRepository;
use formpulse_store::models::{Question, QuestionType, Survey, Theme};

use crate::draft::SurveyDraft;

/// Input for creating a survey.
#[derive(Debug, Clone)]
pub struct CreateSurveyInput {
    /// Survey title.
    pub title: String,
    /// Survey description.
    pub description: String,
    /// Ordered question list.
    pub questions: Vec<QuestionInput>,
    /// Theme; the fixed default palette when omitted.
    pub theme: Option<Theme>,
}

/// One submitted question.
#[derive(Debug, Clone)]
pub struct QuestionInput {
    /// Question type.
    pub kind: QuestionType,
    /// Prompt shown to respondents.
    pub label: String,
    /// Declared options for choice-based types.
    pub options: Vec<String>,
    /// Whether an answer is mandatory.
    pub required: bool,
}

/// Survey service for authoring and lookup.
#[derive(Debug, Clone)]
pub struct SurveyService {
    repo: SurveyRepository,
    id_gen: IdGenerator,
}

impl SurveyService {
    /// Create a new survey service.
    #[must_use]
    pub const fn new(repo: SurveyRepository) -> Self {
        Self {
            repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Validate and persist a new survey.
    ///
    /// Every question receives a fresh immutable identifier here; the
    /// identifiers are what responses key their answers by.
    pub async fn create(&self, owner_id: &str, input: CreateSurveyInput) -> AppResult<Survey> {
        if input.questions.is_empty() {
            return Err(AppError::BadRequest(
                "Survey must have at least one question".to_string(),
            ));
        }

        let questions: Vec<Question> = input
            .questions
            .into_iter()
            .map(|q| Question {
                id: self.id_gen.generate(),
                kind: q.kind,
                label: q.label,
                options: q.options,
                required: q.required,
            })
            .collect();

        for question in &questions {
            if question.kind.is_choice() && question.options.is_empty() {
                return Err(AppError::BadRequest(format!(
                    "Question '{}' needs at least one option",
                    question.label
                )));
            }
        }

        let draft = SurveyDraft {
            title: input.title,
            description: input.description,
            questions,
            theme: input.theme.unwrap_or_default(),
        };

        let survey = draft
            .finish(owner_id)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.repo.create(&survey).await
    }

    /// Fetch a survey by ID.
    pub async fn get(&self, id: &str) -> AppResult<Survey> {
        self.repo.get(id).await
    }

    /// List the surveys owned by an account.
    pub async fn list_for_owner(&self, owner_id: &str) -> AppResult<Vec<Survey>> {
        self.repo.list_for_owner(owner_id).await
    }
}
