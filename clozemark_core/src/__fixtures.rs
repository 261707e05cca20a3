use crate::ClozemarkError;
use crate::ClozemarkResult;
use crate::FormulaKind;
use crate::engines::CodeHighlighter;
use crate::engines::MarkdownEngine;
use crate::engines::MathEngine;

/// Markdown engine that returns its input unchanged, so pipeline tests can
/// assert on exact protected/restored text without markdown noise.
pub struct PassthroughMarkdown;

impl MarkdownEngine for PassthroughMarkdown {
	fn render(&self, text: &str) -> ClozemarkResult<String> {
		Ok(text.to_string())
	}
}

/// Math engine that wraps the formula in a kind-specific element, for
/// deterministic assertions on resolver output.
pub struct TaggedMath;

impl MathEngine for TaggedMath {
	fn render(&self, formula: &str, kind: FormulaKind) -> ClozemarkResult<String> {
		let tag = match kind {
			FormulaKind::Block => "math-block",
			FormulaKind::Inline => "math-inline",
		};

		Ok(format!("<{tag}>{formula}</{tag}>"))
	}
}

/// Math engine that fails for formulas containing a marker substring and
/// otherwise behaves like [`TaggedMath`].
pub struct FailingMath {
	pub fail_on: &'static str,
}

impl MathEngine for FailingMath {
	fn render(&self, formula: &str, kind: FormulaKind) -> ClozemarkResult<String> {
		if formula.contains(self.fail_on) {
			return Err(ClozemarkError::Math {
				formula: formula.to_string(),
				reason: "induced failure".to_string(),
			});
		}

		TaggedMath.render(formula, kind)
	}
}

/// Math engine that reports itself unavailable.
pub struct MissingMath;

impl MathEngine for MissingMath {
	fn is_available(&self) -> bool {
		false
	}

	fn render(&self, formula: &str, _kind: FormulaKind) -> ClozemarkResult<String> {
		Err(ClozemarkError::Math {
			formula: formula.to_string(),
			reason: "engine is unavailable".to_string(),
		})
	}
}

/// Highlighter that declines every block.
pub struct NoHighlight;

impl CodeHighlighter for NoHighlight {
	fn highlight(&self, _code: &str, _language: Option<&str>) -> Option<String> {
		None
	}
}

/// Highlighter that wraps the decoded code in a marker span when a language
/// is present.
pub struct MarkerHighlight;

impl CodeHighlighter for MarkerHighlight {
	fn highlight(&self, code: &str, language: Option<&str>) -> Option<String> {
		language.map(|_| format!(r#"<span class="hl">{code}</span>"#))
	}
}
