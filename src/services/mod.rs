//! Service layer for business logic
//!
//! Services receive their stores at construction and are shared between
//! the public endpoints and the management API.

mod form_service;
mod link_service;
mod resolution;
mod side_effects;
mod stats_service;
mod submission;
mod templates;

pub use form_service::*;
pub use link_service::*;
pub use resolution::{Resolution, ResolutionService};
pub use stats_service::*;
pub use submission::{SubmissionResult, SubmissionService, missing_required_labels};
pub use templates::{FormTemplate, builtin_templates};
