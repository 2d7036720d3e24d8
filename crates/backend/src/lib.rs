#![forbid(unsafe_code)]

pub mod client;
pub mod http;
pub mod records;

pub use client::{BackendError, InMemoryBackend, WorkoutBackend};
pub use http::{BackendConfig, HttpBackend};
pub use records::{
    CompletionAck, CompletionRecord, ExerciseRecord, SessionBootstrap, SetRecord,
};
