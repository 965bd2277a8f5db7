pub mod path;
pub mod text;
pub mod time;
