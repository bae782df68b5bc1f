pub mod cookies;
pub mod extractor;
pub mod password;
pub mod token;
