//! Domain models shared across the workspace.

pub mod response;
pub mod survey;

pub use response::{AnswerMap, AnswerValue, SurveyResponse, decode_answers, encode_answers};
pub use survey::{
    NewSurvey, Question, QuestionType, Survey, Theme, decode_questions, decode_theme,
    encode_questions, encode_theme,
};
