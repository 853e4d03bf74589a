pub mod admin;
pub mod generate;
pub mod media;
pub mod status;
