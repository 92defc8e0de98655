//! School Scheduler - university course timetabling generator.
//!
//! # Pipeline
//!
//! 1. **Catalogue**: load the on-disk JSON/TOML data into a fully-resolved,
//!    read-only bundle of entities.
//! 2. **Preprocessor**: project enrolment onto class-group replicas,
//!    materialize their class sessions, and build the class-conflict
//!    relation.
//! 3. **Teacher Assigner**: greedy least-loaded assignment of teachers to
//!    class groups under per-semester and per-year load caps.
//! 4. **Evolutionary Search**: a steady-state genetic algorithm searches
//!    day/timeslot assignments, minimising a weighted hard/soft cost.
//!
//! # Example
//!
//! ```no_run
//! use school_scheduler::catalogue::Catalogue;
//! use school_scheduler::preprocessor::preprocess;
//! use school_scheduler::search::find_best_solution;
//! use std::path::Path;
//!
//! let catalogue = Catalogue::load(Path::new("./data"), Path::new("./config/app.config")).unwrap();
//! let preprocessed = preprocess(&catalogue).unwrap();
//! let outcome = find_best_solution(&catalogue, &preprocessed).unwrap();
//! println!("Best cost: {:.1}", outcome.best_cost.total);
//! ```

pub mod catalogue;
pub mod cost;
pub mod error;
pub mod parser;
pub mod preprocessor;
pub mod reporter;
pub mod search;
pub mod solution;
pub mod teacher_assigner;
pub mod types;

pub use error::{Result, SchedulerError};
