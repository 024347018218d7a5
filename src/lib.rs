pub mod agent;
pub mod booking;
pub mod errors;
pub mod models;
pub mod prompt;
pub mod providers;
pub mod resolver;
pub mod session;
pub mod speech;
pub mod tool;
