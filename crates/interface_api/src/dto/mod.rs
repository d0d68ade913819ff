//! Request and response bodies

pub mod cases;
pub mod sections;
