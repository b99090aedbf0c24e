//! Business-logic services wired between the API layer and the
//! backend repositories.

pub mod account;
pub mod response;
pub mod survey;

pub use account::AccountService;
pub use response::{CsvExport, ResponseService};
pub use survey::{CreateSurveyInput, QuestionInput, SurveyService};
