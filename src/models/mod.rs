pub mod event;
pub mod event_kind;
pub mod note;
pub mod subscription;
pub mod task;
