//! Input validation for simulation workloads.
//!
//! Checks a raw workload description before any simulation starts.
//! Detects:
//! - Non-positive process counts
//! - Arrival/burst lists whose length disagrees with the count
//! - Negative arrival times and non-positive bursts
//! - Negative context-switch times and non-positive quanta
//! - Duplicate process names
//!
//! Every violation is a fatal configuration error; validation reports all
//! of them at once rather than stopping at the first.

use std::collections::HashSet;
use std::fmt;

use crate::models::Process;
use crate::scheduler::SimulationConfig;
use crate::workload::WorkloadSpec;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Process count is zero or negative.
    InvalidProcessCount,
    /// A per-process list does not have `process_count` entries.
    LengthMismatch,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process needs zero or negative CPU time.
    NonPositiveBurst,
    /// Context-switch overhead is negative.
    NegativeContextSwitch,
    /// Time quantum is zero or negative.
    NonPositiveQuantum,
    /// A required field is absent from the input description.
    MissingField,
    /// Two processes share the same name.
    DuplicateName,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a raw workload description.
///
/// Checks:
/// 1. `process_count > 0`
/// 2. `arrival_times`, `burst_times` (and `names`, if given) have `process_count` entries
/// 3. Every arrival time is `>= 0`
/// 4. Every burst time is `> 0`
/// 5. `context_switch_time >= 0`
/// 6. `time_quantum > 0`
/// 7. Process names are unique
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(spec: &WorkloadSpec) -> ValidationResult {
    let mut errors = Vec::new();

    if check_process_count(&mut errors, spec.process_count) {
        let expected = spec.process_count as usize;
        check_length(&mut errors, "arrival times", spec.arrival_times.len(), expected);
        check_length(&mut errors, "CPU bursts", spec.burst_times.len(), expected);
        if !spec.names.is_empty() {
            check_length(&mut errors, "process names", spec.names.len(), expected);
        }
    }

    check_arrivals(&mut errors, &spec.arrival_times, |i| spec.name_of(i));
    check_bursts(&mut errors, &spec.burst_times, |i| spec.name_of(i));
    check_context_switch(&mut errors, spec.context_switch_time);
    check_quantum(&mut errors, spec.time_quantum);
    check_unique_names(&mut errors, spec.names.iter().map(String::as_str));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks whichever fields of an incomplete description were supplied.
///
/// Absent fields are skipped; reporting them is up to the caller. Lengths
/// are not compared since the counterpart list may be missing.
pub fn validate_present_fields(
    process_count: Option<i64>,
    arrival_times: Option<&[i64]>,
    burst_times: Option<&[i64]>,
    context_switch_time: Option<i64>,
    time_quantum: Option<i64>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let positional = |i: usize| format!("P{}", i + 1);

    if let Some(count) = process_count {
        check_process_count(&mut errors, count);
    }
    if let Some(arrivals) = arrival_times {
        check_arrivals(&mut errors, arrivals, positional);
    }
    if let Some(bursts) = burst_times {
        check_bursts(&mut errors, bursts, positional);
    }
    if let Some(cs) = context_switch_time {
        check_context_switch(&mut errors, cs);
    }
    if let Some(quantum) = time_quantum {
        check_quantum(&mut errors, quantum);
    }
    errors
}

/// Validates an already-typed process list and configuration.
///
/// Used for workloads assembled in code rather than loaded from input.
pub fn validate_processes(processes: &[Process], config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();

    for p in processes {
        if p.burst_time == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Invalid CPU burst time for process {}: 0", p.name),
            ));
        }
    }

    if let Err(e) = config.validate() {
        errors.push(e);
    }

    check_unique_names(&mut errors, processes.iter().map(|p| p.name.as_str()));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Returns `true` if the count is usable for length checks.
fn check_process_count(errors: &mut Vec<ValidationError>, count: i64) -> bool {
    if count <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidProcessCount,
            format!("Invalid number of processes: {count}"),
        ));
        return false;
    }
    true
}

fn check_arrivals(
    errors: &mut Vec<ValidationError>,
    arrivals: &[i64],
    name_of: impl Fn(usize) -> String,
) {
    for (i, &arrival) in arrivals.iter().enumerate() {
        if arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Invalid arrival time for process {}: {arrival}", name_of(i)),
            ));
        }
    }
}

fn check_bursts(
    errors: &mut Vec<ValidationError>,
    bursts: &[i64],
    name_of: impl Fn(usize) -> String,
) {
    for (i, &burst) in bursts.iter().enumerate() {
        if burst <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Invalid CPU burst time for process {}: {burst}", name_of(i)),
            ));
        }
    }
}

fn check_context_switch(errors: &mut Vec<ValidationError>, context_switch_time: i64) {
    if context_switch_time < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeContextSwitch,
            format!("Invalid context switch time: {context_switch_time}"),
        ));
    }
}

fn check_quantum(errors: &mut Vec<ValidationError>, time_quantum: i64) {
    if time_quantum <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("Invalid time quantum: {time_quantum}"),
        ));
    }
}

fn check_length(errors: &mut Vec<ValidationError>, field: &str, actual: usize, expected: usize) {
    if actual != expected {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!("Expected {expected} {field}, found {actual}"),
        ));
    }
}

fn check_unique_names<'a>(
    errors: &mut Vec<ValidationError>,
    names: impl Iterator<Item = &'a str>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate process name: {name}"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec() -> WorkloadSpec {
        WorkloadSpec {
            process_count: 3,
            arrival_times: vec![0, 1, 2],
            burst_times: vec![5, 3, 1],
            context_switch_time: 1,
            time_quantum: 2,
            names: Vec::new(),
        }
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_spec() {
        assert!(validate_workload(&sample_spec()).is_ok());
    }

    #[test]
    fn test_zero_context_switch_is_valid() {
        let mut spec = sample_spec();
        spec.context_switch_time = 0;
        assert!(validate_workload(&spec).is_ok());
    }

    #[test]
    fn test_invalid_process_count() {
        let mut spec = sample_spec();
        spec.process_count = 0;
        assert!(kinds(validate_workload(&spec))
            .contains(&ValidationErrorKind::InvalidProcessCount));

        spec.process_count = -2;
        assert!(kinds(validate_workload(&spec))
            .contains(&ValidationErrorKind::InvalidProcessCount));
    }

    #[test]
    fn test_length_mismatch() {
        let mut spec = sample_spec();
        spec.burst_times.pop();
        let errors = validate_workload(&spec).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::LengthMismatch);
        assert!(errors[0].message.contains("CPU bursts"));
    }

    #[test]
    fn test_non_positive_burst() {
        let mut spec = sample_spec();
        spec.burst_times[1] = 0;
        let errors = validate_workload(&spec).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveBurst);
        assert!(errors[0].message.contains("P2"));
    }

    #[test]
    fn test_negative_arrival() {
        let mut spec = sample_spec();
        spec.arrival_times[0] = -1;
        assert_eq!(kinds(validate_workload(&spec)), vec![ValidationErrorKind::NegativeArrival]);
    }

    #[test]
    fn test_negative_context_switch() {
        let mut spec = sample_spec();
        spec.context_switch_time = -1;
        assert_eq!(
            kinds(validate_workload(&spec)),
            vec![ValidationErrorKind::NegativeContextSwitch]
        );
    }

    #[test]
    fn test_non_positive_quantum() {
        let mut spec = sample_spec();
        spec.time_quantum = 0;
        assert_eq!(kinds(validate_workload(&spec)), vec![ValidationErrorKind::NonPositiveQuantum]);
    }

    #[test]
    fn test_duplicate_names() {
        let mut spec = sample_spec();
        spec.names = vec!["A".into(), "B".into(), "A".into()];
        assert_eq!(kinds(validate_workload(&spec)), vec![ValidationErrorKind::DuplicateName]);
    }

    #[test]
    fn test_multiple_errors() {
        let spec = WorkloadSpec {
            process_count: 2,
            arrival_times: vec![0, -3],
            burst_times: vec![0, 4],
            context_switch_time: -1,
            time_quantum: 0,
            names: Vec::new(),
        };
        let errors = validate_workload(&spec).unwrap_err();
        assert!(errors.len() >= 4);
    }

    #[test]
    fn test_present_fields_only() {
        let errors = validate_present_fields(Some(0), None, Some(&[3, -1][..]), None, Some(2));
        let k: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            k,
            vec![
                ValidationErrorKind::InvalidProcessCount,
                ValidationErrorKind::NonPositiveBurst
            ]
        );
        assert!(errors[1].message.contains("P2"));
        assert!(validate_present_fields(None, None, None, None, None).is_empty());
    }

    #[test]
    fn test_validate_processes() {
        let ok = vec![Process::positional(0, 0, 1), Process::positional(1, 0, 2)];
        assert!(validate_processes(&ok, &SimulationConfig::default()).is_ok());

        let bad = vec![Process::new("X", 0, 0, 0), Process::new("X", 1, 0, 1)];
        let config = SimulationConfig {
            context_switch_time: 0,
            time_quantum: 0,
        };
        let k = kinds(validate_processes(&bad, &config));
        assert!(k.contains(&ValidationErrorKind::NonPositiveBurst));
        assert!(k.contains(&ValidationErrorKind::NonPositiveQuantum));
        assert!(k.contains(&ValidationErrorKind::DuplicateName));
    }
}
