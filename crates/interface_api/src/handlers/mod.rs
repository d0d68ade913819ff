//! Request handlers

pub mod cases;
pub mod health;
pub mod sections;
