pub mod admin;
pub mod category;
pub mod progress;
pub mod quiz;
pub mod sign;
pub mod streak;
pub mod user;

pub use category::Category;
pub use quiz::{Quiz, QuizQuestion};
pub use sign::Sign;
pub use streak::StreakSummary;
pub use user::{User, UserProfile};
