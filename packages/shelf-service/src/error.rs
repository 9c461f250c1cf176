pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures reported to callers. Per-record transform failures never reach this type; the sync
/// job logs and skips them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("Query execution failed: {message}")]
	QueryExecution { message: String },
	#[error("Bulk submission failed: {message}")]
	BulkSubmission { message: String },
	#[error("{operation} timed out after {timeout_ms} ms.")]
	Timeout { operation: &'static str, timeout_ms: u64 },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
