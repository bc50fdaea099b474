pub mod form;
pub mod link;
pub mod link_event;
pub mod submission;

pub use form::Entity as FormEntity;
pub use link::Entity as LinkEntity;
pub use link_event::Entity as LinkEventEntity;
pub use submission::Entity as SubmissionEntity;
