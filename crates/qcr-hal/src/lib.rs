//! qcr backend abstraction
//!
//! This crate defines the execution collaborator for qcr circuits. Nothing
//! here simulates anything; it fixes the contract that simulators implement
//! and the shape of what they return:
//!
//! - A common [`Backend`] trait for job submission and retrieval
//! - [`Capabilities`] describing qubit limits and supported gates
//! - [`Counts`] / [`ExecutionResult`] for measurement frequency tables
//!
//! Backends are always passed explicitly as handles (`&dyn Backend`), never
//! looked up from global state.
//!
//! # Implementing a Backend
//!
//! ```ignore
//! use qcr_hal::{
//!     Backend, BackendAvailability, Capabilities, ExecutionResult, HalResult, JobId, JobStatus,
//! };
//! use qcr_ir::Circuit;
//! use async_trait::async_trait;
//!
//! struct MyBackend {
//!     capabilities: Capabilities,
//! }
//!
//! #[async_trait]
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     async fn availability(&self) -> HalResult<BackendAvailability> {
//!         Ok(BackendAvailability::always_available())
//!     }
//!
//!     async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
//!         # todo!()
//!     }
//!
//!     async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
//!         # todo!()
//!     }
//!
//!     async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
//!         # todo!()
//!     }
//!
//!     async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, DEFAULT_SHOTS, ValidationResult,
    check_shots, validate_circuit,
};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
