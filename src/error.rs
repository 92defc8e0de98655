use thiserror::Error;

/// Domain-specific errors for the scheduler.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("file not found: '{path}'")]
    FileNotFound { path: String },

    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid contents in '{file}': {message}")]
    InvalidContents { file: String, message: String },

    #[error("config missing required key '{key}'")]
    ConfigMissing { key: String },

    #[error("course '{course}' cannot fit another enrollee: all {kind} replicas are at capacity")]
    InsufficientCapacity { course: String, kind: String },

    #[error("no teacher available for course '{course}' (class group {class_group})")]
    InsufficientTeachers { course: String, class_group: u64 },

    #[error("solution does not hold class group {0}")]
    UnknownClassGroup(u64),

    #[error("study plan entries out of order for '{division}': expected ascending (year, semester)")]
    OutOfOrderPlan { division: String },

    #[error("reference to unknown {kind} '{name}' in '{file}'")]
    ReferenceMissing {
        file: String,
        kind: String,
        name: String,
    },
}

/// Use anyhow::Result at application boundaries.
pub type Result<T> = anyhow::Result<T>;
