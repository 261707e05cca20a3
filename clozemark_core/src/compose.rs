use html_escape::decode_html_entities;

use crate::engines::CodeHighlighter;

const OPEN: &str = "<pre><code";
const CLOSE: &str = "</code></pre>";

/// Apply syntax highlighting to every fenced code block in the final HTML.
///
/// Each `<pre><code class="language-x">` body is entity-decoded and handed
/// to the highlighter; when it declines (unknown language, no language, any
/// internal failure) or the markup is malformed, the block is left exactly
/// as the markdown engine produced it.
pub fn highlight_code_blocks(html: &str, highlighter: &dyn CodeHighlighter) -> String {
	let mut output = String::with_capacity(html.len());
	let mut cursor = 0;

	while let Some(found) = html[cursor..].find(OPEN) {
		let attrs_start = cursor + found + OPEN.len();

		let Some(tag_end) = html[attrs_start..].find('>') else {
			break;
		};

		let body_start = attrs_start + tag_end + 1;

		let Some(body_len) = html[body_start..].find(CLOSE) else {
			break;
		};

		let attrs = &html[attrs_start..attrs_start + tag_end];
		let body = &html[body_start..body_start + body_len];

		output.push_str(&html[cursor..body_start]);

		let code = decode_html_entities(body);
		match highlighter.highlight(&code, language_of(attrs)) {
			Some(highlighted) => output.push_str(&highlighted),
			None => output.push_str(body),
		}

		cursor = body_start + body_len;
	}

	output.push_str(&html[cursor..]);
	output
}

/// Language hint from a `language-x` class on the code element's attributes.
fn language_of(attrs: &str) -> Option<&str> {
	let start = attrs.find("language-")? + "language-".len();
	let rest = &attrs[start..];
	let end = rest
		.find(|character| character == '"' || character == ' ')
		.unwrap_or(rest.len());

	Some(&rest[..end])
}
