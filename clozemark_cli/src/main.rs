use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::process;

use clap::Parser;
use clozemark_cli::ClozemarkCli;
use clozemark_cli::Commands;
use clozemark_cli::SideArg;
use clozemark_core::ComrakMarkdown;
use clozemark_core::Engines;
use clozemark_core::KatexMath;
use clozemark_core::SyntectHighlighter;
use clozemark_core::protect_clozes;
use clozemark_core::protect_formulas;
use clozemark_core::render_side_or_fallback;
use tracing_subscriber::EnvFilter;

fn main() {
	let args = ClozemarkCli::parse();

	let default_level = if args.verbose { "debug" } else { "warn" };
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
		)
		.with_writer(std::io::stderr)
		.init();

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(miette::MietteHandlerOpts::new().build())
	}))
	.ok();

	let result = match args.command {
		Commands::Render {
			side,
			input,
			output,
			standalone,
		} => run_render(side, input.as_deref(), output.as_deref(), standalone),
		Commands::Inspect { input } => run_inspect(input.as_deref()),
	};

	if let Err(e) = result {
		match e.downcast::<clozemark_core::ClozemarkError>() {
			Ok(core_err) => {
				let report: miette::Report = (*core_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("error: {e}");
			}
		}
		process::exit(2);
	}
}

/// Raw card content from the input file, or stdin when no file was given.
fn read_content(input: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
	match input {
		Some(path) => Ok(std::fs::read_to_string(path)?),
		None => {
			let mut content = String::new();
			std::io::stdin().read_to_string(&mut content)?;
			Ok(content)
		}
	}
}

fn write_output(output: Option<&Path>, html: &str) -> Result<(), Box<dyn std::error::Error>> {
	match output {
		Some(path) => std::fs::write(path, html)?,
		None => {
			let mut stdout = std::io::stdout().lock();
			stdout.write_all(html.as_bytes())?;
			stdout.write_all(b"\n")?;
		}
	}

	Ok(())
}

fn run_render(
	side: SideArg,
	input: Option<&Path>,
	output: Option<&Path>,
	standalone: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let content = read_content(input)?;
	let math = KatexMath::new()?;
	let highlighter = SyntectHighlighter::default();
	let engines = Engines {
		markdown: &ComrakMarkdown,
		math: &math,
		highlighter: &highlighter,
	};

	let mut html = render_side_or_fallback(&content, side.into(), &engines);
	if standalone {
		html = wrap_standalone(&html);
	}

	write_output(output, &html)
}

fn run_inspect(input: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
	let content = read_content(input)?;
	let (protected, clozes) = protect_clozes(&content);
	let (protected, formulas) = protect_formulas(&protected);

	let report = serde_json::json!({
		"protected": protected,
		"clozes": clozes,
		"formulas": formulas,
	});
	println!("{}", serde_json::to_string_pretty(&report)?);

	Ok(())
}

/// Wrap a rendered fragment in a minimal page that links the KaTeX
/// stylesheet, so typeset math displays correctly outside a card host.
fn wrap_standalone(fragment: &str) -> String {
	format!(
		"<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<link rel=\"stylesheet\" \
		 href=\"https://cdn.jsdelivr.net/npm/katex@0.16.11/dist/katex.min.css\">\n</head>\n<body>\n\
		 {fragment}\n</body>\n</html>\n"
	)
}
