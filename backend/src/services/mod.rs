//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the injected stores and the token/password primitives.

pub mod auth;
pub mod todo;

pub use auth::AuthService;
pub use todo::TodoService;
