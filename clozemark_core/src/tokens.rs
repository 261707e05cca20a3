use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;

/// Which side of the card is being rendered. Immutable for the duration of
/// one render call; governs whether an active cloze's answer is masked or
/// revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
	/// The question side: active cloze answers are hidden.
	Front,
	/// The answer side: active cloze answers are revealed and marked.
	Back,
}

impl Display for RenderMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			RenderMode::Front => write!(f, "front"),
			RenderMode::Back => write!(f, "back"),
		}
	}
}

/// Layout of a math region: `$$...$$` renders standalone, `$...$` renders
/// inline within text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormulaKind {
	Block,
	Inline,
}

/// The kind of protected region a placeholder token stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
	Cloze,
	LatexBlock,
	LatexInline,
}

impl PlaceholderKind {
	pub(crate) fn prefix(self) -> &'static str {
		match self {
			PlaceholderKind::Cloze => "%%CLOZE_",
			PlaceholderKind::LatexBlock => "%%LATEX_BLOCK_",
			PlaceholderKind::LatexInline => "%%LATEX_INLINE_",
		}
	}
}

impl From<FormulaKind> for PlaceholderKind {
	fn from(kind: FormulaKind) -> Self {
		match kind {
			FormulaKind::Block => PlaceholderKind::LatexBlock,
			FormulaKind::Inline => PlaceholderKind::LatexInline,
		}
	}
}

/// An opaque token substituted for a protected region so the markdown pass
/// does not alter it. The textual form `%%KIND_<index>%%` is plain
/// alphanumeric-plus-percent text that survives markdown rendering verbatim;
/// it is generated only here, at the serialization boundary into and out of
/// the markdown engine. The index is the sole identity, scoped to a single
/// render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
	pub kind: PlaceholderKind,
	pub index: usize,
}

impl Placeholder {
	pub fn new(kind: PlaceholderKind, index: usize) -> Self {
		Self { kind, index }
	}

	/// The textual token as it appears in protected content.
	pub fn token(&self) -> String {
		format!("{}{}%%", self.kind.prefix(), self.index)
	}
}

impl Display for Placeholder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}{}%%", self.kind.prefix(), self.index)
	}
}

/// One occurrence of a cloze deletion discovered in the raw card source.
///
/// Created during protection, consumed either by the formula resolver (when
/// positioned inside a formula) or the cloze restorer (otherwise), and never
/// mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeSpan {
	/// Assigned at discovery; first-occurrence order in the source.
	pub index: usize,
	/// The original span text including its wrapping tags.
	pub raw_markup: String,
	/// True unless the markup's class marks the deletion inactive. An active
	/// deletion is the answer being tested on the current card side.
	pub is_active: bool,
}

impl ClozeSpan {
	pub fn new(index: usize, raw_markup: impl Into<String>) -> Self {
		let raw_markup = raw_markup.into();
		let is_active = !raw_markup.contains("cloze-inactive");

		Self {
			index,
			raw_markup,
			is_active,
		}
	}

	pub fn placeholder(&self) -> Placeholder {
		Placeholder::new(PlaceholderKind::Cloze, self.index)
	}

	/// The text shown when this deletion's content is revealed inside a
	/// formula: the inner text content of the span, or the entity-decoded
	/// `data-cloze` attribute when the inner text is the placeholder glyph
	/// some card versions emit. Unrecognized structure degrades to an empty
	/// string rather than failing.
	pub fn display_text(&self) -> String {
		if let Some(text) = self.inner_text() {
			if text != "[...]" {
				return text.to_string();
			}
		}

		if let Some(value) = attribute_value(&self.raw_markup, "data-cloze") {
			return html_escape::decode_html_entities(value).into_owned();
		}

		String::new()
	}

	/// First non-empty text run between a `>` and a `<` in the raw markup.
	fn inner_text(&self) -> Option<&str> {
		let mut rest = self.raw_markup.as_str();

		while let Some(gt) = rest.find('>') {
			rest = &rest[gt + 1..];
			let lt = rest.find('<')?;

			if lt > 0 {
				return Some(&rest[..lt]);
			}
		}

		None
	}
}

/// One math region discovered in the cloze-protected content.
///
/// The raw formula contains only literal text and cloze placeholder tokens;
/// raw cloze markup never leaks in unresolved because cloze protection runs
/// first. Resolved exactly once per render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaSpan {
	pub index: usize,
	pub kind: FormulaKind,
	/// Formula text between the dollar delimiters, possibly containing cloze
	/// placeholders.
	pub raw_formula: String,
	/// Computed during resolution: true when the back side revealed at least
	/// one active cloze inside this formula.
	pub has_active_cloze: bool,
}

impl FormulaSpan {
	pub fn new(index: usize, kind: FormulaKind, raw_formula: impl Into<String>) -> Self {
		Self {
			index,
			kind,
			raw_formula: raw_formula.into(),
			has_active_cloze: false,
		}
	}

	pub fn placeholder(&self) -> Placeholder {
		Placeholder::new(self.kind.into(), self.index)
	}
}

/// Value of a double-quoted attribute in a raw markup string, if present.
fn attribute_value<'a>(markup: &'a str, name: &str) -> Option<&'a str> {
	let needle = format!("{name}=\"");
	let start = markup.find(&needle)? + needle.len();
	let rest = &markup[start..];
	let end = rest.find('"')?;

	Some(&rest[..end])
}
