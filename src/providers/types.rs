pub mod content;
pub mod response;
