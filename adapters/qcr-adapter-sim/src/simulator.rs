//! Stub simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use qcr_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, check_shots,
};
use qcr_ir::Circuit;

use crate::tracer::SymbolicState;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Qubit limit used when none is configured.
pub const DEFAULT_MAX_QUBITS: u32 = 24;

/// Job data for the simulator.
struct StubJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Deterministic stub simulator.
///
/// Tracks each qubit as a symbolic label instead of amplitudes. Circuits
/// whose gates would entangle qubits are rejected with
/// [`HalError::Unsupported`]. Every job samples from a `StdRng` seeded with
/// the backend seed, so identical submissions give identical counts.
pub struct StubSimulator {
    /// Backend configuration.
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Submitted jobs.
    jobs: Arc<Mutex<FxHashMap<String, StubJob>>>,
    /// RNG seed for measurement sampling.
    seed: u64,
}

impl StubSimulator {
    /// Create a stub simulator with default settings.
    pub fn new() -> Self {
        Self::build(BackendConfig::new("stub"), DEFAULT_MAX_QUBITS, DEFAULT_SEED)
    }

    /// Create a stub simulator with a specific seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(BackendConfig::new("stub"), DEFAULT_MAX_QUBITS, seed)
    }

    /// Create a stub simulator with a custom qubit limit.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(BackendConfig::new("stub"), max_qubits, DEFAULT_SEED)
    }

    fn build(config: BackendConfig, max_qubits: u32, seed: u64) -> Self {
        let capabilities = Capabilities::simulator(config.name.clone(), max_qubits)
            .with_feature("symbolic")
            .with_feature("seeded");
        Self {
            config,
            capabilities,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            seed,
        }
    }

    /// The sampling seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Check every operand against the declared register sizes.
    fn check_operands(circuit: &Circuit) -> HalResult<()> {
        let (nq, nc) = (circuit.num_qubits(), circuit.num_clbits());
        for inst in circuit.instructions() {
            if let Some(gate) = inst.as_gate() {
                if inst.num_qubits() != gate.num_qubits() as usize
                    || inst.controls.len() != gate.num_controls() as usize
                {
                    return Err(HalError::InvalidCircuit(format!(
                        "'{inst}' has the wrong number of operands"
                    )));
                }
            }
            if inst.is_measure() && inst.targets.len() != inst.clbits.len() {
                return Err(HalError::InvalidCircuit(format!(
                    "'{inst}' pairs {} qubits with {} clbits",
                    inst.targets.len(),
                    inst.clbits.len()
                )));
            }
            if let Some(q) = inst.qubits().find(|q| q.0 as usize >= nq) {
                return Err(HalError::InvalidCircuit(format!(
                    "'{inst}' uses {q} outside the {nq}-qubit register"
                )));
            }
            if let Some(c) = inst.clbits.iter().find(|c| c.0 as usize >= nc) {
                return Err(HalError::InvalidCircuit(format!(
                    "'{inst}' writes {c} outside the {nc}-bit register"
                )));
            }
        }
        Ok(())
    }

    /// Replay the circuit once per shot.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();
        debug!(
            "Starting simulation: {} qubits, {} shots, seed {}",
            circuit.num_qubits(),
            shots,
            self.seed
        );

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut counts = Counts::new();

        for shot in 0..shots {
            let mut state = SymbolicState::new(circuit.num_qubits(), circuit.num_clbits());
            for inst in circuit.instructions() {
                state.apply(inst, &mut rng)?;
            }
            counts.insert(state.bitstring(), 1);

            if shot > 0 && shot % 1000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        Ok(ExecutionResult::new(counts, shots)
            .with_execution_time(elapsed.as_millis() as u64)
            .with_metadata("backend", self.config.name.clone())
            .with_metadata("seed", self.seed))
    }

    fn lock_jobs(&self) -> std::sync::MutexGuard<'_, FxHashMap<String, StubJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StubSimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for StubSimulator {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        check_shots(&self.capabilities, shots)?;
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but {} only supports {}",
                circuit.num_qubits(),
                self.name(),
                self.capabilities.num_qubits
            )));
        }
        Self::check_operands(circuit)?;

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots).with_backend(self.name());
        self.lock_jobs().insert(
            job_id.0.clone(),
            StubJob { job, result: None },
        );
        debug!("Submitted job: {}", job_id);

        // Runs inline; the job is terminal before submit returns.
        let outcome = self.run_simulation(circuit, shots);

        let mut jobs = self.lock_jobs();
        let Some(stub_job) = jobs.get_mut(&job_id.0) else {
            return Err(HalError::JobNotFound(job_id.0));
        };
        match outcome {
            Ok(result) => {
                stub_job.job.transition(JobStatus::Running);
                stub_job.job.transition(JobStatus::Completed);
                stub_job.result = Some(result);
                Ok(job_id)
            }
            Err(e) => {
                warn!("Job {} failed: {}", job_id, e);
                stub_job.job.transition(JobStatus::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.lock_jobs()
            .get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.lock_jobs();
        let stub_job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        match &stub_job.job.status {
            JobStatus::Cancelled => Err(HalError::JobCancelled),
            JobStatus::Failed(msg) => Err(HalError::JobFailed(msg.clone())),
            _ => stub_job
                .result
                .clone()
                .ok_or_else(|| HalError::JobFailed(format!("job {job_id} has no result"))),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.lock_jobs();
        let stub_job = jobs
            .get_mut(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        if !stub_job.job.transition(JobStatus::Cancelled) {
            debug!("Job {} already {}, cancel ignored", job_id, stub_job.job.status);
        }
        Ok(())
    }
}

impl BackendFactory for StubSimulator {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.get_u64("max_qubits")? {
            Some(v) => u32::try_from(v).map_err(|_| {
                HalError::Configuration(format!("max_qubits {v} is out of range"))
            })?,
            None => DEFAULT_MAX_QUBITS,
        };
        let seed = config.get_u64("seed")?.unwrap_or(DEFAULT_SEED);

        Ok(Self::build(config, max_qubits, seed))
    }
}
