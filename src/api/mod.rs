pub mod contract;
pub mod error;
pub mod health;
pub mod openapi;
