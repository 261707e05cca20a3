use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clozemark_core::RenderMode;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Render study-card markdown with LaTeX math and cloze deletions to HTML.",
	long_about = "clozemark renders one side of a study card — markdown prose mixed with \
	              $...$/$$...$$ LaTeX math and cloze-deletion spans — into display HTML.\n\nThe \
	              front side hides the answers being tested; the back side reveals and marks \
	              them.\n\nQuick start:\n  clozemark render --side front card.md\n  clozemark \
	              render --side back card.md\n  clozemark inspect card.md"
)]
pub struct ClozemarkCli {
	#[command(subcommand)]
	pub command: Commands,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render one side of a card to HTML.
	///
	/// Reads the raw card content from the input file (or stdin when omitted)
	/// and writes the rendered HTML to the output file (or stdout). A failed
	/// render never aborts: the output degrades to a visible diagnostic
	/// followed by the escaped raw content.
	Render {
		/// Which side of the card to render. The front hides active cloze
		/// answers; the back reveals and marks them.
		#[arg(long, value_enum, default_value_t = SideArg::Front)]
		side: SideArg,

		/// Input file with the raw card content. Reads stdin when omitted.
		input: Option<PathBuf>,

		/// Write the HTML here instead of stdout.
		#[arg(long, short)]
		output: Option<PathBuf>,

		/// Wrap the rendered fragment in a complete HTML page that links the
		/// KaTeX stylesheet, for previewing outside a card host.
		#[arg(long, default_value_t = false)]
		standalone: bool,
	},
	/// Report the protected regions of a card as JSON.
	///
	/// Runs only the protection passes and prints the discovered cloze spans
	/// and formulas, without invoking the markdown or math engines. Useful for
	/// debugging card markup that renders unexpectedly.
	Inspect {
		/// Input file with the raw card content. Reads stdin when omitted.
		input: Option<PathBuf>,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SideArg {
	/// The question side: active cloze answers are hidden.
	Front,
	/// The answer side: active cloze answers are revealed and marked.
	Back,
}

impl From<SideArg> for RenderMode {
	fn from(side: SideArg) -> Self {
		match side {
			SideArg::Front => RenderMode::Front,
			SideArg::Back => RenderMode::Back,
		}
	}
}
