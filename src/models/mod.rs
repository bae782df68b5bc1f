mod banner;
mod category;
mod password_reset_token;
mod session;
mod tag;
mod user;

pub use banner::Banner;
pub use category::Category;
pub use password_reset_token::PasswordResetToken;
pub use session::Session;
pub use tag::Tag;
pub use user::User;
