//! CLI definitions and the run loop.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use fontname_font_naming::CffUpdate;

use crate::{
    error::Result,
    pairs::parse_pairs,
    rename::{RenameOutcome, Renamer},
};

/// Prefix of every diagnostic written to stderr.
pub const PREFIX: &str = "[fontname]";

const USAGE: &str = "Usage: fontname \"Font Family:Weight\" path/to/font.{ttf,otf} ...";

#[derive(Debug, Parser)]
#[command(name = "fontname", version)]
#[command(about = "Rename the family and style of OpenType/TrueType fonts")]
#[command(long_about = "Rewrites name IDs 1, 2, 4, 6 and 16 (and the CFF names of \
    PostScript-outline fonts), then saves each font as <FamilyNoSpaces>-<StyleNoSpaces>.<ext>.\n\n\
    Quote the family and style if they contain spaces.")]
#[command(after_help = "Examples:\n  \
    fontname \"Open Sans:Bold Italic\" OpenSans-BoldItalic.ttf\n  \
    fontname -o dist \"Hack:Regular\" src/Hack.otf \"Hack:Bold\" src/Hack-Bold.otf")]
pub struct Cli {
    /// Directory for the renamed fonts (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
    /// Pairs of "Font Family:Weight" and font path
    #[arg(value_name = "FAMILY:STYLE FONT", allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Run and map the result to a process exit code.
    pub fn run(&self) -> ExitCode {
        self.execute().map_or_else(
            |e| {
                eprintln!("{PREFIX} ERROR: {e}");
                if e.is_usage() {
                    eprintln!("{USAGE}");
                }
                ExitCode::FAILURE
            },
            |_| ExitCode::SUCCESS,
        )
    }

    /// Validate every pair, then rename them in order, stopping at the first fatal error.
    pub fn execute(&self) -> Result<Vec<RenameOutcome>> {
        let pairs = parse_pairs(&self.args)?;
        let renamer = Renamer::new(self.output_dir.clone());

        let mut outcomes = Vec::with_capacity(pairs.len());
        for pair in &pairs {
            let outcome = renamer.rename(&pair.path, &pair.spec)?;
            if let CffUpdate::Failed(e) = &outcome.cff {
                eprintln!("{PREFIX} ERROR: unable to write new names to CFF table: {e}");
            }
            println!(
                "[OK] Saved '{}' with family '{}' and style '{}'",
                outcome.output.display(),
                outcome.names.family,
                outcome.names.style
            );
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from(["fontname", "-o", "dist", "Hack:Bold", "Hack.ttf"]).unwrap();
        assert_eq!(cli.output_dir, Some(PathBuf::from("dist")));
        assert_eq!(cli.args, vec!["Hack:Bold", "Hack.ttf"]);
    }

    #[test]
    fn test_parse_hyphen_led_values() {
        let cli = Cli::try_parse_from(["fontname", "-Foo:Bold", "-x.ttf"]).unwrap();
        assert_eq!(cli.output_dir, None);
        assert_eq!(cli.args, vec!["-Foo:Bold", "-x.ttf"]);

        let cli = Cli::try_parse_from(["fontname", "-o", "dist", "Foo:Bold", "-x.ttf"]).unwrap();
        assert_eq!(cli.output_dir, Some(PathBuf::from("dist")));
        assert_eq!(cli.args, vec!["Foo:Bold", "-x.ttf"]);
    }

    #[test]
    fn test_no_args_is_a_usage_error() {
        let cli = Cli::try_parse_from(["fontname"]).unwrap();
        assert!(cli.execute().unwrap_err().is_usage());
    }
}
