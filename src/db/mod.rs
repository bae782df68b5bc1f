pub mod banners;
pub mod categories;
pub mod password_reset_tokens;
pub mod sessions;
pub mod tags;
pub mod users;
