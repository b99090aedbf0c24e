//! Repositories translating domain models to and from the backend's
//! flat document representation.

pub mod response;
pub mod survey;

pub use response::ResponseRepository;
pub use survey::SurveyRepository;
