use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ClozemarkError {
	#[error("required renderer is unavailable: {0}")]
	#[diagnostic(
		code(clozemark::engine_unavailable),
		help("the markdown, math, and highlight engines must all initialize before a card can render")
	)]
	EngineUnavailable(String),

	#[error("markdown rendering failed: {0}")]
	#[diagnostic(code(clozemark::markdown))]
	Markdown(String),

	#[error("failed to typeset formula `{formula}`: {reason}")]
	#[diagnostic(code(clozemark::math))]
	Math { formula: String, reason: String },
}

pub type ClozemarkResult<T> = Result<T, ClozemarkError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
