//! Authentication use cases
//!
//! Signup and login turn raw request input into value objects before handing
//! off to the domain `AuthService`.

mod get_current_user;
mod login_user;
mod signup_user;

pub use get_current_user::GetCurrentUserUseCase;
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use signup_user::{SignupUserCommand, SignupUserResponse, SignupUserUseCase};
