use html_escape::encode_text;
use tracing::debug;

use crate::ClozemarkError;
use crate::ClozemarkResult;
use crate::RenderMode;
use crate::compose::highlight_code_blocks;
use crate::engines::Engines;
use crate::resolver::resolve_formulas;
use crate::resolver::restore_clozes;
use crate::scanner::protect_clozes;
use crate::scanner::protect_formulas;

/// Render one side of a card: protect cloze and formula regions, run the
/// markdown pass over the protected text, resolve formulas by mode, restore
/// in-prose cloze markup, and highlight code blocks.
///
/// Each call is self-contained: span collections are allocated fresh and
/// scoped to the call, so sequential or concurrent renders never share token
/// state. Fails only when a required engine is unavailable or the markdown
/// pass itself errors; per-formula typesetting failures are isolated into
/// inline error markup instead.
pub fn render_side(content: &str, mode: RenderMode, engines: &Engines) -> ClozemarkResult<String> {
	if let Some(name) = engines.missing() {
		return Err(ClozemarkError::EngineUnavailable(name.to_string()));
	}

	let (protected, clozes) = protect_clozes(content);
	let (protected, mut formulas) = protect_formulas(&protected);
	debug!(
		%mode,
		clozes = clozes.len(),
		formulas = formulas.len(),
		"protected card content"
	);

	let rendered = engines.markdown.render(&protected)?;
	let resolved = resolve_formulas(&rendered, &mut formulas, &clozes, mode, engines.math);
	let restored = restore_clozes(&resolved, &clozes);

	Ok(highlight_code_blocks(&restored, engines.highlighter))
}

/// Like [`render_side`], but never fails: any error short-circuits into a
/// visible diagnostic followed by the entity-escaped raw content, with no
/// partial pipeline output. This is the worst-case observable failure of a
/// render call.
pub fn render_side_or_fallback(content: &str, mode: RenderMode, engines: &Engines) -> String {
	match render_side(content, mode, engines) {
		Ok(html) => html,
		Err(error) => {
			let raw = encode_text(content);
			format!(
				"<p class=\"clozemark-error\">rendering failed: {error}</p><p>raw \
				 content:</p><pre>{raw}</pre>"
			)
		}
	}
}
