mod job_repository;
mod user_repository;

pub use job_repository::InMemoryJobRepository;
pub use user_repository::InMemoryUserRepository;
