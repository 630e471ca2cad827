pub mod health;
pub mod register;
