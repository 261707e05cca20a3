use tracing::warn;

use crate::ClozeSpan;
use crate::FormulaKind;
use crate::FormulaSpan;
use crate::RenderMode;
use crate::engines::MathEngine;
use crate::tokens::PlaceholderKind;

/// Substituted in place of an active cloze answer inside a formula on the
/// front side. The answer must never be revealed there, including inside
/// math.
pub const HIDDEN_ANSWER: &str = r"\text{[...]}";

/// Replace every formula placeholder in the rendered HTML with its typeset
/// result, in ascending index order.
///
/// For each formula: embedded cloze placeholders are resolved against the
/// span collection according to mode and activity, the trailing-brace repair
/// is applied, and the math engine is invoked on the trimmed formula. A
/// failure is isolated to its own formula and surfaced as inline error
/// markup carrying the raw formula text; sibling formulas still resolve. On
/// the back side, a formula that revealed an active cloze is wrapped with a
/// visual answer marker.
pub fn resolve_formulas(
	html: &str,
	formulas: &mut [FormulaSpan],
	clozes: &[ClozeSpan],
	mode: RenderMode,
	math: &dyn MathEngine,
) -> String {
	let mut output = html.to_string();

	for formula in formulas.iter_mut() {
		let resolved = resolve_formula(formula, clozes, mode, math);
		output = output.replace(&formula.placeholder().token(), &resolved);
	}

	output
}

fn resolve_formula(
	span: &mut FormulaSpan,
	clozes: &[ClozeSpan],
	mode: RenderMode,
	math: &dyn MathEngine,
) -> String {
	let mut formula = span.raw_formula.clone();

	if formula.contains(PlaceholderKind::Cloze.prefix()) {
		for cloze in clozes {
			let token = cloze.placeholder().token();

			if !formula.contains(&token) {
				continue;
			}

			let replacement = match (mode, cloze.is_active) {
				(RenderMode::Front, true) => HIDDEN_ANSWER.to_string(),
				(RenderMode::Back, true) => {
					span.has_active_cloze = true;
					cloze.display_text()
				}
				(_, false) => cloze.display_text(),
			};

			formula = formula.replace(&token, &replacement);
		}

		formula = trim_excess_closing_braces(formula);
	}

	let rendered = match math.render(formula.trim(), span.kind) {
		Ok(rendered) => rendered,
		Err(error) => {
			warn!(%error, index = span.index, "formula failed to typeset");
			return format!(r#"<span class="katex-error">{}</span>"#, span.raw_formula);
		}
	};

	if span.has_active_cloze && mode == RenderMode::Back {
		match span.kind {
			FormulaKind::Block => {
				format!(r#"{rendered}<span class="cloze-answer-marker"></span>"#)
			}
			FormulaKind::Inline => format!(r#"<span class="cloze-answer">{rendered}</span>"#),
		}
	} else {
		rendered
	}
}

/// When a substituted formula contains more `}` than `{`, trim that many
/// trailing `}` characters from its end. Deletion-group syntax like
/// `{{c1::...}}` leaks its closing braces past the embedded content once it
/// is replaced by shorter display text; this repair removes those leaked
/// closers. The asymmetry is deliberate: excess `{` are left alone, and
/// nothing is ever inserted.
pub fn trim_excess_closing_braces(mut formula: String) -> String {
	let openers = formula.matches('{').count();
	let closers = formula.matches('}').count();

	if closers > openers {
		for _ in 0..closers - openers {
			if formula.ends_with('}') {
				formula.pop();
			} else {
				break;
			}
		}
	}

	formula
}

/// Replace every cloze placeholder remaining after formula resolution (a
/// cloze that occurred outside any formula) with its original raw markup,
/// byte for byte. In-prose clozes keep their host styling this way; clozes
/// inside formulas were already handled by the resolver's marker logic.
pub fn restore_clozes(html: &str, clozes: &[ClozeSpan]) -> String {
	let mut output = html.to_string();

	for cloze in clozes {
		output = output.replace(&cloze.placeholder().token(), &cloze.raw_markup);
	}

	output
}
