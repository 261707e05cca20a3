//! `clozemark_core` renders study-card content that mixes markdown, LaTeX
//! mathematics, and fill-in-the-blank cloze deletions into display HTML,
//! producing different output for the front (question) and back (answer)
//! view of the same source text. A general-purpose markdown renderer would
//! corrupt both cloze markup and LaTeX syntax, so protected regions are
//! shielded from the markdown pass and resolved afterwards.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Raw card HTML
//!   → Cloze protector (cloze spans become %%CLOZE_n%% placeholders)
//!   → Formula protector ($$...$$ then $...$ become %%LATEX_*_n%% placeholders)
//!   → Markdown pass (placeholders survive verbatim)
//!   → Formula resolver (cloze-in-formula visibility, brace repair, typesetting, markers)
//!   → Cloze restorer (in-prose spans restored byte-identical)
//!   → Highlight pass over fenced code blocks
//! ```
//!
//! ## Modules
//!
//! - [`engines`] — The external-collaborator seams (markdown, math,
//!   highlighting) and their concrete comrak/KaTeX/syntect implementations.
//!
//! ## Key Types
//!
//! - [`ClozeSpan`] / [`FormulaSpan`] — Protected regions discovered during
//!   scanning, indexed by placeholder number within one render call.
//! - [`RenderMode`] — Front or back; governs whether an active cloze's
//!   answer is masked or revealed.
//! - [`Engines`] — The renderer bundle passed explicitly into the pipeline,
//!   so a missing dependency is a normal error value.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clozemark_core::ComrakMarkdown;
//! use clozemark_core::Engines;
//! use clozemark_core::KatexMath;
//! use clozemark_core::RenderMode;
//! use clozemark_core::SyntectHighlighter;
//! use clozemark_core::render_side;
//!
//! let math = KatexMath::new().unwrap();
//! let highlighter = SyntectHighlighter::default();
//! let engines = Engines {
//! 	markdown: &ComrakMarkdown,
//! 	math: &math,
//! 	highlighter: &highlighter,
//! };
//!
//! let front = render_side(
//! 	r#"The capital is <span class="cloze">Paris</span>."#,
//! 	RenderMode::Front,
//! 	&engines,
//! )
//! .unwrap();
//! ```

pub use compose::*;
pub use engines::*;
pub use error::*;
pub use pipeline::*;
pub use resolver::*;
pub use scanner::*;
pub use tokens::*;

mod compose;
pub mod engines;
mod error;
mod pipeline;
mod resolver;
mod scanner;
mod tokens;

#[cfg(test)]
mod __fixtures;
