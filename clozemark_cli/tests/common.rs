use assert_cmd::Command;

pub fn clozemark_cmd() -> Command {
	let mut cmd = Command::cargo_bin("clozemark").expect("binary should build");
	cmd.env("NO_COLOR", "1");
	cmd
}
