//! CLI argument parsing for th

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::renamer::{ConflictPolicy, RenameOptions};

#[derive(Parser, Debug)]
#[command(name = "th")]
#[command(author, version, about = "Recursively rename .tmpl files to .html", long_about = None)]
#[command(after_help = "Without PATH, th prompts for the directory on standard input.")]
pub struct Cli {
    /// Root directory to walk (prompted for when omitted)
    pub path: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print what would be renamed without renaming anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// What to do when the .html target exists: overwrite, skip, or error
    #[arg(long, value_name = "POLICY")]
    pub on_conflict: Option<ConflictPolicy>,

    /// Log filesystem errors and continue with the remaining files
    #[arg(short, long)]
    pub keep_going: bool,

    /// Follow symbolic links while walking
    #[arg(short = 'L', long)]
    pub follow_links: bool,
}

impl Cli {
    /// Merge flags over the loaded config
    pub fn rename_options(&self, config: &Config) -> RenameOptions {
        let mut options = config.rename_options();
        if let Some(policy) = self.on_conflict {
            options.on_conflict = policy;
        }
        options.keep_going |= self.keep_going;
        options.follow_links |= self.follow_links;
        options.dry_run = self.dry_run;
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_means_prompt() {
        let cli = Cli::try_parse_from(["th"]).unwrap();
        assert!(cli.path.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["th", "site", "--on-conflict", "skip", "-k", "-n"]).unwrap();
        let config = Config {
            on_conflict: ConflictPolicy::Error,
            keep_going: false,
            follow_links: true,
        };

        let options = cli.rename_options(&config);
        assert_eq!(cli.path, Some(PathBuf::from("site")));
        assert_eq!(options.on_conflict, ConflictPolicy::Skip);
        assert!(options.keep_going);
        assert!(options.follow_links);
        assert!(options.dry_run);
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["th", "--on-conflict", "clobber"]).is_err());
    }
}
