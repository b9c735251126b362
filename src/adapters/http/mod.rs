pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  AuthResponse, CreateJobRequest, CurrentUserResponse, ErrorResponse, JobResponse, JobsResponse,
  LoginRequest, OkResponse, SignupRequest, UpdateJobRequest, UserDto,
};
pub use errors::{ApiError, AuthErrorKind};
pub use middleware::{AuthMiddleware, AuthenticatedUser, RequestId, RequestIdMiddleware};
pub use routes::{ApiDependencies, configure_routes, cors};
