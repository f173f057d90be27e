//! Workload loading and generation.
//!
//! A workload is the validated input of one simulation: the process list
//! plus the timing configuration. It is built from a raw [`WorkloadSpec`],
//! which can come from:
//! - the labelled text format (`processes.txt`):
//!
//! ```text
//! Number of processes: 3
//! Arrival times: 0 1 2
//! CPU bursts: 5 3 1
//! Context switch time (milliseconds): 1
//! Time quantum for Round Robin: 2
//! ```
//!
//! - a JSON document with the same fields (see [`WorkloadSpec`]),
//! - [`WorkloadGenerator`] for seeded random workloads.
//!
//! Raw values are signed so that negative input is reported as a
//! validation error instead of a parse failure.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::Process;
use crate::scheduler::{SimulationConfig, Simulator};
use crate::validation::{
    validate_present_fields, validate_processes, validate_workload, ValidationError,
    ValidationErrorKind,
};

const COUNT_LABEL: &str = "Number of processes:";
const ARRIVALS_LABEL: &str = "Arrival times:";
const BURSTS_LABEL: &str = "CPU bursts:";
const CONTEXT_SWITCH_LABEL: &str = "Context switch time (milliseconds):";
const QUANTUM_LABEL: &str = "Time quantum for Round Robin:";

/// Raw, unvalidated workload description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadSpec {
    /// Number of processes.
    pub process_count: i64,
    /// Arrival tick per process.
    pub arrival_times: Vec<i64>,
    /// CPU burst per process.
    pub burst_times: Vec<i64>,
    /// Context-switch overhead (ticks).
    pub context_switch_time: i64,
    /// Round-Robin quantum (ticks).
    pub time_quantum: i64,
    /// Optional process names. Empty = positional names `P1..Pn`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
}

impl WorkloadSpec {
    /// Name of the process at listing position `index`.
    pub fn name_of(&self, index: usize) -> String {
        self.names
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("P{}", index + 1))
    }
}

/// A validated workload, ready to simulate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    /// Processes in original listing order.
    pub processes: Vec<Process>,
    /// Timing parameters.
    pub config: SimulationConfig,
}

impl Workload {
    /// Creates a workload from typed processes, validating them.
    pub fn new(
        processes: Vec<Process>,
        config: SimulationConfig,
    ) -> Result<Self, Vec<ValidationError>> {
        validate_processes(&processes, &config)?;
        Ok(Self { processes, config })
    }

    /// Validates a raw description and converts it.
    pub fn from_spec(spec: &WorkloadSpec) -> Result<Self, Vec<ValidationError>> {
        validate_workload(spec)?;

        // Validation guarantees non-negative values and matching lengths.
        let processes = spec
            .arrival_times
            .iter()
            .zip(&spec.burst_times)
            .enumerate()
            .map(|(i, (&arrival, &burst))| {
                Process::new(spec.name_of(i), i, arrival as u64, burst as u64)
            })
            .collect();

        Ok(Self {
            processes,
            config: SimulationConfig {
                context_switch_time: spec.context_switch_time as u64,
                time_quantum: spec.time_quantum as u64,
            },
        })
    }

    /// Simulator configured for this workload (FCFS).
    pub fn simulator(&self) -> Simulator {
        Simulator::new(self.config)
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the workload has no processes.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

/// Failure to obtain a valid workload.
#[derive(Debug)]
pub enum LoadError {
    /// The input source could not be read.
    Io { path: PathBuf, source: io::Error },
    /// A line of the text format could not be parsed.
    Parse { line: usize, message: String },
    /// The JSON document is malformed.
    Json(serde_json::Error),
    /// The description parsed but violates workload invariants.
    Invalid(Vec<ValidationError>),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "unable to open input file {}: {source}", path.display())
            }
            Self::Parse { line, message } => write!(f, "line {line}: {message}"),
            Self::Json(e) => write!(f, "invalid JSON workload: {e}"),
            Self::Invalid(errors) => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                write!(f, "invalid workload: {}", messages.join("; "))
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Vec<ValidationError>> for LoadError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Invalid(errors)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Parses the labelled text format into a raw description.
///
/// Lines are matched by label prefix; unrecognised lines are logged and
/// ignored. All five fields are required. When some are missing, the
/// values that were supplied are still checked and reported first.
pub fn parse_text_spec(input: &str) -> Result<WorkloadSpec, LoadError> {
    let mut count = None;
    let mut arrivals = None;
    let mut bursts = None;
    let mut context_switch = None;
    let mut quantum = None;

    for (n, line) in input.lines().enumerate() {
        let line_no = n + 1;
        let line = line.trim();
        if let Some(rest) = line.strip_prefix(COUNT_LABEL) {
            count = Some(parse_scalar(rest, line_no)?);
        } else if let Some(rest) = line.strip_prefix(ARRIVALS_LABEL) {
            arrivals = Some(parse_list(rest, line_no)?);
        } else if let Some(rest) = line.strip_prefix(BURSTS_LABEL) {
            bursts = Some(parse_list(rest, line_no)?);
        } else if let Some(rest) = line.strip_prefix(CONTEXT_SWITCH_LABEL) {
            context_switch = Some(parse_scalar(rest, line_no)?);
        } else if let Some(rest) = line.strip_prefix(QUANTUM_LABEL) {
            quantum = Some(parse_scalar(rest, line_no)?);
        } else if !line.is_empty() {
            warn!(line = line_no, content = line, "ignoring unrecognised input line");
        }
    }

    let mut errors = validate_present_fields(
        count,
        arrivals.as_deref(),
        bursts.as_deref(),
        context_switch,
        quantum,
    );
    for (present, label) in [
        (count.is_some(), COUNT_LABEL),
        (arrivals.is_some(), ARRIVALS_LABEL),
        (bursts.is_some(), BURSTS_LABEL),
        (context_switch.is_some(), CONTEXT_SWITCH_LABEL),
        (quantum.is_some(), QUANTUM_LABEL),
    ] {
        if !present {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingField,
                format!("Missing field: \"{label}\""),
            ));
        }
    }

    match (count, arrivals, bursts, context_switch, quantum) {
        (Some(process_count), Some(arrival_times), Some(burst_times), Some(cs), Some(q)) => {
            Ok(WorkloadSpec {
                process_count,
                arrival_times,
                burst_times,
                context_switch_time: cs,
                time_quantum: q,
                names: Vec::new(),
            })
        }
        _ => Err(LoadError::Invalid(errors)),
    }
}

/// Parses and validates the labelled text format.
pub fn parse_text(input: &str) -> Result<Workload, LoadError> {
    let spec = parse_text_spec(input)?;
    Ok(Workload::from_spec(&spec)?)
}

/// Parses and validates a JSON workload description.
pub fn parse_json(input: &str) -> Result<Workload, LoadError> {
    let spec: WorkloadSpec = serde_json::from_str(input)?;
    Ok(Workload::from_spec(&spec)?)
}

/// Loads a workload file.
///
/// Files with a `.json` extension are read as JSON; everything else uses
/// the labelled text format.
pub fn load_file(path: impl AsRef<Path>) -> Result<Workload, LoadError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    debug!(path = %path.display(), json = is_json, "parsing workload");

    let workload = if is_json {
        parse_json(&input)?
    } else {
        parse_text(&input)?
    };
    info!(
        path = %path.display(),
        processes = workload.len(),
        context_switch = workload.config.context_switch_time,
        "workload loaded"
    );
    Ok(workload)
}

fn parse_scalar(rest: &str, line: usize) -> Result<i64, LoadError> {
    let mut tokens = rest.split_whitespace();
    let value = tokens.next().ok_or_else(|| LoadError::Parse {
        line,
        message: "expected a value".to_string(),
    })?;
    parse_int(value, line)
}

fn parse_list(rest: &str, line: usize) -> Result<Vec<i64>, LoadError> {
    rest.split_whitespace().map(|t| parse_int(t, line)).collect()
}

fn parse_int(token: &str, line: usize) -> Result<i64, LoadError> {
    token.parse().map_err(|_| LoadError::Parse {
        line,
        message: format!("expected an integer, found {token:?}"),
    })
}

/// Random workload generator.
///
/// Produces valid workloads from any `rand::Rng`. With a seeded RNG the
/// output is reproducible.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_cpusched::workload::WorkloadGenerator;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let workload = WorkloadGenerator::default().generate(&mut rng);
/// assert!(!workload.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    /// Minimum number of processes (at least 1 is always generated).
    pub min_processes: usize,
    /// Maximum number of processes.
    pub max_processes: usize,
    /// Latest arrival tick.
    pub max_arrival: u64,
    /// Longest burst (bursts are in `1..=max_burst`).
    pub max_burst: u64,
    /// Largest context-switch overhead.
    pub max_context_switch: u64,
}

impl WorkloadGenerator {
    /// Sets the process count range.
    pub fn with_processes(mut self, min: usize, max: usize) -> Self {
        self.min_processes = min;
        self.max_processes = max;
        self
    }

    /// Sets the latest arrival tick.
    pub fn with_max_arrival(mut self, max_arrival: u64) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the longest burst.
    pub fn with_max_burst(mut self, max_burst: u64) -> Self {
        self.max_burst = max_burst;
        self
    }

    /// Sets the largest context-switch overhead.
    pub fn with_max_context_switch(mut self, max_context_switch: u64) -> Self {
        self.max_context_switch = max_context_switch;
        self
    }

    /// Generates one workload.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Workload {
        let min = self.min_processes.max(1);
        let max = self.max_processes.max(min);
        let count = rng.random_range(min..=max);
        let max_burst = self.max_burst.max(1);

        let processes = (0..count)
            .map(|i| {
                let arrival = rng.random_range(0..=self.max_arrival);
                let burst = rng.random_range(1..=max_burst);
                Process::positional(i, arrival, burst)
            })
            .collect();

        Workload {
            processes,
            config: SimulationConfig {
                context_switch_time: rng.random_range(0..=self.max_context_switch),
                time_quantum: 1,
            },
        }
    }
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self {
            min_processes: 1,
            max_processes: 8,
            max_arrival: 20,
            max_burst: 10,
            max_context_switch: 3,
        }
    }
}
