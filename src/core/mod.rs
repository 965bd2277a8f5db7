pub mod annotate;
pub mod compose;
pub mod conflict;
pub mod note;
pub mod outcome;
pub mod query;
pub mod remove;
pub mod reschedule;
pub mod resolve;
pub mod subscription;
