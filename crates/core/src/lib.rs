//! Core domain logic for formpulse.
//!
//! This crate holds everything that is pure data shaping over the
//! models in `formpulse-store`:
//!
//! - **Validation**: field/step checks via [`validation`]
//! - **Authoring**: the structural-copy [`draft::SurveyDraft`]
//! - **Capture**: respondent answer sets via [`capture::ResponseCapture`]
//! - **Aggregation**: chart-ready analytics via [`aggregate::aggregate`]
//! - **Export**: CSV rendering via [`export`]
//! - **Services**: [`SurveyService`], [`ResponseService`],
//!   [`AccountService`]

pub mod aggregate;
pub mod capture;
pub mod draft;
pub mod export;
pub mod services;
pub mod validation;

pub use aggregate::{AnalyticsReport, DailyCount, OptionCount, QuestionBreakdown, QuestionSummary};
pub use capture::{ResponseCapture, ValidationFailure, validate_answers};
pub use draft::{DraftError, SurveyDraft};
pub use export::{export_csv, export_filename};
pub use services::{
    AccountService, CreateSurveyInput, CsvExport, QuestionInput, ResponseService, SurveyService,
};
pub use validation::{
    FieldError, FieldRule, FieldSpec, FieldValue, ValidationResult, validate_field, validate_step,
};
