use std::ops::Range;

use logos::Logos;

use crate::ClozeSpan;
use crate::FormulaKind;
use crate::FormulaSpan;

/// Raw tokens for the cloze protection pass over the raw card HTML.
#[derive(Logos, Debug, PartialEq)]
enum ClozeToken {
	/// Opening tag of a cloze element: a `span` whose class attribute starts
	/// with `cloze` (the inactive variant is suffixed, e.g. `cloze-inactive`).
	/// Recognition is structural rather than an exact attribute match since
	/// card markup varies slightly across versions.
	#[regex(r#"<span[^>]*class="cloze[^"]*"[^>]*>"#)]
	Open,
	#[token("</span>")]
	Close,
	#[token("<")]
	Angle,
	#[regex(r"[^<]+")]
	Text,
}

/// Raw tokens for the block formula pass.
#[derive(Logos, Debug, PartialEq)]
enum BlockToken {
	#[token("$$")]
	Delimiter,
	#[token("$")]
	Dollar,
	#[regex(r"[^$]+")]
	Text,
}

/// Raw tokens for the inline formula pass. Runs after the block pass, so any
/// remaining `$$` is an unpaired leftover and lexes as two single dollars,
/// matching how an inline delimiter scan would see it.
#[derive(Logos, Debug, PartialEq)]
enum InlineToken {
	#[token("$")]
	Dollar,
	#[token("\n")]
	Newline,
	#[regex(r"[^$\n]+")]
	Text,
}

type Spanned<T> = Vec<(Result<T, ()>, Range<usize>)>;

/// Replace every cloze span in the raw content with a numbered `CLOZE`
/// placeholder, returning the protected content and the discovered spans in
/// first-occurrence order.
///
/// A cloze element ends at the first `</span>` after its opening tag; an
/// opening tag with no close in the rest of the content passes through
/// verbatim. There are no error conditions.
pub fn protect_clozes(content: &str) -> (String, Vec<ClozeSpan>) {
	let tokens: Spanned<ClozeToken> = ClozeToken::lexer(content).spanned().collect();
	let mut output = String::with_capacity(content.len());
	let mut spans: Vec<ClozeSpan> = vec![];
	let mut cursor = 0;

	while cursor < tokens.len() {
		let (token, range) = &tokens[cursor];

		if matches!(token, Ok(ClozeToken::Open)) {
			let close = tokens[cursor + 1..]
				.iter()
				.position(|(token, _)| matches!(token, Ok(ClozeToken::Close)));

			if let Some(offset) = close {
				let close_index = cursor + 1 + offset;
				let end = tokens[close_index].1.end;
				let span = ClozeSpan::new(spans.len(), &content[range.start..end]);

				output.push_str(&span.placeholder().token());
				spans.push(span);
				cursor = close_index + 1;
				continue;
			}
		}

		output.push_str(&content[range.clone()]);
		cursor += 1;
	}

	(output, spans)
}

/// Replace every math region in the cloze-protected content with a numbered
/// `LATEX_BLOCK` or `LATEX_INLINE` placeholder.
///
/// The block pass runs before the inline pass so a `$$...$$` region is never
/// misparsed as two inline delimiters. Indices continue across the two
/// passes: both kinds share one span collection. There are no error
/// conditions.
pub fn protect_formulas(content: &str) -> (String, Vec<FormulaSpan>) {
	let mut spans: Vec<FormulaSpan> = vec![];
	let blocked = protect_block_formulas(content, &mut spans);
	let output = protect_inline_formulas(&blocked, &mut spans);

	(output, spans)
}

/// Non-greedy `$$...$$` matching; the formula may span lines and may be
/// empty. An unpaired `$$` passes through verbatim.
fn protect_block_formulas(content: &str, spans: &mut Vec<FormulaSpan>) -> String {
	let tokens: Spanned<BlockToken> = BlockToken::lexer(content).spanned().collect();
	let mut output = String::with_capacity(content.len());
	let mut cursor = 0;

	while cursor < tokens.len() {
		let (token, range) = &tokens[cursor];

		if matches!(token, Ok(BlockToken::Delimiter)) {
			let close = tokens[cursor + 1..]
				.iter()
				.position(|(token, _)| matches!(token, Ok(BlockToken::Delimiter)));

			if let Some(offset) = close {
				let close_index = cursor + 1 + offset;
				let formula = &content[range.end..tokens[close_index].1.start];
				let span = FormulaSpan::new(spans.len(), FormulaKind::Block, formula);

				output.push_str(&span.placeholder().token());
				spans.push(span);
				cursor = close_index + 1;
				continue;
			}
		}

		output.push_str(&content[range.clone()]);
		cursor += 1;
	}

	output
}

/// Non-greedy `$...$` matching; the formula must not be empty and must not
/// span a line break.
fn protect_inline_formulas(content: &str, spans: &mut Vec<FormulaSpan>) -> String {
	let tokens: Spanned<InlineToken> = InlineToken::lexer(content).spanned().collect();
	let mut output = String::with_capacity(content.len());
	let mut cursor = 0;

	while cursor < tokens.len() {
		let (token, range) = &tokens[cursor];

		// A same-line text run bounded by two dollars. Text tokens are
		// maximal, so the candidate body is always a single token.
		if matches!(token, Ok(InlineToken::Dollar))
			&& cursor + 2 < tokens.len()
			&& matches!(tokens[cursor + 1].0, Ok(InlineToken::Text))
			&& matches!(tokens[cursor + 2].0, Ok(InlineToken::Dollar))
		{
			let formula = &content[tokens[cursor + 1].1.clone()];
			let span = FormulaSpan::new(spans.len(), FormulaKind::Inline, formula);

			output.push_str(&span.placeholder().token());
			spans.push(span);
			cursor += 3;
			continue;
		}

		output.push_str(&content[range.clone()]);
		cursor += 1;
	}

	output
}
