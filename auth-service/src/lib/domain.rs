pub mod credential;
pub mod token;
