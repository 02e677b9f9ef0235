//! User-facing notification texts.

pub const PROCESSING_FILES: &str = "Processing files...";
pub const FILES_PROCESSED: &str = "Files processed successfully!";
pub const PROCESS_FILES_FAILED: &str = "An error occurred while processing files!";

pub const SENDING_QUESTION: &str = "Sending question...";
pub const QUESTION_SENT: &str = "Question sent successfully!";
pub const QUESTION_FAILED: &str = "Failed to send question. Please try again.";
pub const EMPTY_QUESTION: &str = "Please enter a question before sending.";

/// Failure text for an error string reported by the service itself.
pub fn service_error(message: &str) -> String {
    format!("Error: {message}")
}
