pub mod admin;
pub mod exam;
pub mod health;
