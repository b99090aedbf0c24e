//! Backend-as-a-service access layer for formpulse.
//!
//! This crate owns everything that touches the external backend:
//!
//! - **Client**: HTTP client for the backend API via [`StoreClient`]
//! - **Documents**: the flat document interface (list/get/create)
//! - **Accounts**: identity and session operations
//! - **Models**: the survey/response domain types and their blob codecs
//! - **Repositories**: the persistence adapter mapping models onto
//!   JSON-stringified document fields
//!
//! No call is retried and no result is cached; every operation is one
//! independent round trip.

pub mod accounts;
pub mod client;
pub mod documents;
pub mod models;
pub mod repositories;

pub use accounts::{Account, Session};
pub use client::StoreClient;
pub use documents::{Document, DocumentList};
pub use repositories::{ResponseRepository, SurveyRepository};
