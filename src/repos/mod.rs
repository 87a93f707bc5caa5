pub mod comment_repo;
pub mod country_repo;
pub mod dish_repo;
pub mod error;
pub mod favorite_repo;
pub mod rating_repo;
pub mod user_repo;
