pub mod admin;
pub mod responses;
pub mod sessions;
pub mod survey;
