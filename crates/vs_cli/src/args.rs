// Offline CLI surface: subcommands, shared output flags, and local-path checks.
//
// - No networked paths: any `scheme://` (http, https, file) is rejected
// - `--format text|json|html`, `--out <file>` for an atomic write instead of stdout
// - `--config <file>` for rule parameters (JSON)
// - Simulation seed: decimal u64 or 0x-hex (1..=16 nybbles)

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use vs_pipeline::simulate::VoterProfile;
use vs_pipeline::templates::Category;
use vs_report::Format;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "votesecure",
    version,
    disable_help_subcommand = true,
    about = "Offline ballot validation, templates, and voter-experience simulation"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write output to this file (atomically) instead of stdout.
    #[arg(long, global = true)]
    pub out: Option<PathBuf>,

    /// Rule parameters JSON, e.g. {"max_contest_title_len": 60}.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only errors on stderr.
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug logging on stderr.
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Validate a ballot file; exits 2 when it has errors.
    Validate { ballot: PathBuf },
    /// List built-in ballot templates.
    Templates {
        /// Case-insensitive match on name or description.
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum, default_value_t = CategoryArg::All)]
        category: CategoryArg,
    },
    /// Replace a ballot's contests with a template's sample contest.
    /// The result is ballot JSON under both `text` and `json`; `html` is rejected.
    ApplyTemplate {
        template: String,
        /// Ballot to start from (empty ballot when omitted).
        ballot: Option<PathBuf>,
    },
    /// Simulate a voting session for one voter profile.
    Simulate {
        #[arg(long, value_enum, default_value_t = ProfileArg::TechSavvy)]
        profile: ProfileArg,
        #[arg(long, value_parser = parse_seed, default_value = "0")]
        seed: u64,
    },
    /// Contest, candidate, and write-in counts.
    Summary { ballot: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Text => Format::Text,
            OutputFormat::Json => Format::Json,
            OutputFormat::Html => Format::Html,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    All,
    Federal,
    State,
    Local,
    Organizational,
}

impl CategoryArg {
    pub fn filter(self) -> Option<Category> {
        match self {
            CategoryArg::All => None,
            CategoryArg::Federal => Some(Category::Federal),
            CategoryArg::State => Some(Category::State),
            CategoryArg::Local => Some(Category::Local),
            CategoryArg::Organizational => Some(Category::Organizational),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    TechSavvy,
    Elderly,
    FirstTime,
    MobileUser,
}

impl From<ProfileArg> for VoterProfile {
    fn from(p: ProfileArg) -> Self {
        match p {
            ProfileArg::TechSavvy => VoterProfile::TechSavvy,
            ProfileArg::Elderly => VoterProfile::Elderly,
            ProfileArg::FirstTime => VoterProfile::FirstTime,
            ProfileArg::MobileUser => VoterProfile::MobileUser,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum CliError {
    NonLocalPath(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Seed parser: decimal u64 or 0x-hex (1..=16 nybbles).
pub fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty seed".into());
    }
    if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if rest.is_empty() || rest.len() > 16 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("hex seed must be 1..16 hex digits".into());
        }
        u64::from_str_radix(rest, 16).map_err(|_| "hex seed out of range".into())
    } else {
        s.parse::<u64>().map_err(|_| "decimal seed must be a valid u64".into())
    }
}

fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    vs_io::looks_like_url(&lower)
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("file:")
}

fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    let s = p.to_string_lossy();
    if has_scheme(&s) {
        return Err(CliError::NonLocalPath(s.into_owned()));
    }
    Ok(())
}

fn iter_all_paths(args: &Args) -> impl Iterator<Item = &Path> {
    let input = match &args.command {
        Command::Validate { ballot } | Command::Summary { ballot } => Some(ballot.as_path()),
        Command::ApplyTemplate { ballot, .. } => ballot.as_deref(),
        Command::Templates { .. } | Command::Simulate { .. } => None,
    };
    [input, args.out.as_deref(), args.config.as_deref()].into_iter().flatten()
}

/// Reject non-local paths on every path-like argument.
pub fn check_paths(args: &Args) -> Result<(), CliError> {
    iter_all_paths(args).try_for_each(ensure_local_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn seed_forms() {
        assert_eq!(parse_seed("42"), Ok(42));
        assert_eq!(parse_seed("0xff"), Ok(255));
        assert!(parse_seed("0x").is_err());
        assert!(parse_seed("0x11112222333344445").is_err());
        assert!(parse_seed("-1").is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let a = parse(&["votesecure", "validate", "b.json", "--format", "json", "--verbose"]);
        assert_eq!(a.format, OutputFormat::Json);
        assert!(a.verbose);
        assert!(matches!(a.command, Command::Validate { .. }));
    }

    #[test]
    fn profiles_and_categories_use_kebab_tokens() {
        let a = parse(&["votesecure", "simulate", "--profile", "mobile-user", "--seed", "0x10"]);
        match a.command {
            Command::Simulate { profile, seed } => {
                assert_eq!(VoterProfile::from(profile), VoterProfile::MobileUser);
                assert_eq!(seed, 16);
            }
            other => panic!("unexpected {other:?}"),
        }
        let a = parse(&["votesecure", "templates", "--category", "organizational"]);
        assert!(matches!(
            a.command,
            Command::Templates { category: CategoryArg::Organizational, .. }
        ));
    }

    #[test]
    fn urls_rejected() {
        let a = parse(&["votesecure", "summary", "https://example.org/b.json"]);
        assert!(matches!(check_paths(&a), Err(CliError::NonLocalPath(_))));
        let a = parse(&["votesecure", "templates", "--out", "file:///tmp/t.json"]);
        assert!(check_paths(&a).is_err());
        let a = parse(&["votesecure", "summary", "./b.json"]);
        assert_eq!(check_paths(&a), Ok(()));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Args::try_parse_from(["votesecure", "--quiet", "--verbose", "summary", "b.json"]).is_err());
    }
}
