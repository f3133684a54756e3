pub mod fetch;
pub mod show;
