pub mod report;
pub mod user_input;
