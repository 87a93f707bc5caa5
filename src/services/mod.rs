pub mod auth;
pub mod principal;
pub mod rating;
pub mod token;
