pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Job, JobChanges, JobDraft};
pub use errors::JobError;
pub use ports::JobRepository;
pub use services::JobService;
pub use value_objects::{JobId, JobStatus};
