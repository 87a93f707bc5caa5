pub mod auth;
pub mod comments;
pub mod countries;
pub mod dishes;
pub mod health;
pub mod user;
