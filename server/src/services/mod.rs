//! Business logic, one module per concern. Route handlers stay thin and
//! delegate here.

pub mod oauth;
pub mod password;
pub mod token;
pub mod users;
