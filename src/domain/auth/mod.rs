pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{Identity, IssuedToken, User, UserProfile};
pub use errors::{AuthError, HashError, TokenError};
pub use services::AuthService;
pub use value_objects::{DisplayName, Email, Password, PasswordHash, UserId};
