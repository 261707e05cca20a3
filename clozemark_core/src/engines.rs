use std::sync::OnceLock;

use comrak::Options;
use katex::Opts;
use katex::OutputType;
use syntect::html::ClassStyle;
use syntect::html::ClassedHTMLGenerator;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::ClozemarkError;
use crate::ClozemarkResult;
use crate::FormulaKind;

/// Converts the doubly-protected card text to HTML. Placeholder tokens must
/// survive the conversion verbatim; the pipeline guarantees this only by
/// choosing harmless token syntax, so implementations must not rewrite plain
/// alphanumeric-and-percent runs.
pub trait MarkdownEngine {
	fn is_available(&self) -> bool {
		true
	}

	fn render(&self, text: &str) -> ClozemarkResult<String>;
}

/// Typesets a single resolved formula. Implementations should return a
/// best-effort or empty result for malformed input rather than erroring;
/// errors that do surface are isolated per formula by the resolver.
pub trait MathEngine {
	fn is_available(&self) -> bool {
		true
	}

	fn render(&self, formula: &str, kind: FormulaKind) -> ClozemarkResult<String>;
}

/// Highlights one code block. Fire-and-forget: returning `None` (unknown
/// language, internal failure) leaves the block untouched.
pub trait CodeHighlighter {
	fn is_available(&self) -> bool {
		true
	}

	fn highlight(&self, code: &str, language: Option<&str>) -> Option<String>;
}

/// The external renderers a render call depends on, passed explicitly into
/// the pipeline entry point so a missing dependency is a normal error value
/// rather than an ambient-state probe.
pub struct Engines<'a> {
	pub markdown: &'a dyn MarkdownEngine,
	pub math: &'a dyn MathEngine,
	pub highlighter: &'a dyn CodeHighlighter,
}

impl Engines<'_> {
	/// Name of the first unavailable engine, if any.
	pub fn missing(&self) -> Option<&'static str> {
		if !self.markdown.is_available() {
			return Some("markdown");
		}

		if !self.math.is_available() {
			return Some("math");
		}

		if !self.highlighter.is_available() {
			return Some("highlight");
		}

		None
	}
}

/// GitHub-flavored markdown via comrak, configured per the card contract:
/// line breaks become `<br>`, the common cross-flavor extensions are
/// enabled, and raw HTML passes through so restored cloze markup survives.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComrakMarkdown;

impl MarkdownEngine for ComrakMarkdown {
	fn render(&self, text: &str) -> ClozemarkResult<String> {
		let mut options = Options::default();
		options.extension.autolink = true;
		options.extension.strikethrough = true;
		options.extension.table = true;
		options.extension.tasklist = true;
		options.render.hardbreaks = true;
		options.render.unsafe_ = true;

		Ok(comrak::markdown_to_html(text, &options))
	}
}

/// KaTeX typesetting through an embedded JS engine. Configured to never
/// throw on malformed input; availability is a cached one-shot probe since
/// bootstrapping the JS engine can fail at runtime.
pub struct KatexMath {
	block_opts: Opts,
	inline_opts: Opts,
	probe: OnceLock<bool>,
}

impl KatexMath {
	pub fn new() -> ClozemarkResult<Self> {
		Ok(Self {
			block_opts: Self::build_opts(true)?,
			inline_opts: Self::build_opts(false)?,
			probe: OnceLock::new(),
		})
	}

	fn build_opts(display_mode: bool) -> ClozemarkResult<Opts> {
		Opts::builder()
			.display_mode(display_mode)
			.throw_on_error(false)
			.output_type(OutputType::Html)
			.trust(true)
			.build()
			.map_err(|error| ClozemarkError::EngineUnavailable(format!("katex: {error}")))
	}
}

impl MathEngine for KatexMath {
	fn is_available(&self) -> bool {
		*self
			.probe
			.get_or_init(|| katex::render_with_opts("x", &self.inline_opts).is_ok())
	}

	fn render(&self, formula: &str, kind: FormulaKind) -> ClozemarkResult<String> {
		let opts = match kind {
			FormulaKind::Block => &self.block_opts,
			FormulaKind::Inline => &self.inline_opts,
		};

		katex::render_with_opts(formula, opts).map_err(|error| {
			ClozemarkError::Math {
				formula: formula.to_string(),
				reason: error.to_string(),
			}
		})
	}
}

/// Class-based syntax highlighting via syntect. Emits `<span>` elements with
/// scope classes; styling is left to a stylesheet.
pub struct SyntectHighlighter {
	syntaxes: SyntaxSet,
}

impl Default for SyntectHighlighter {
	fn default() -> Self {
		Self {
			syntaxes: SyntaxSet::load_defaults_newlines(),
		}
	}
}

impl CodeHighlighter for SyntectHighlighter {
	fn highlight(&self, code: &str, language: Option<&str>) -> Option<String> {
		let language = language?;
		let syntax = self.syntaxes.find_syntax_by_token(language)?;
		let mut generator =
			ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);

		for line in LinesWithEndings::from(code) {
			generator
				.parse_html_for_line_which_includes_newline(line)
				.ok()?;
		}

		Some(generator.finalize())
	}
}
