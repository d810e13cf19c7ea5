// votesecure: offline ballot validation CLI.
//
// Exit codes: 0 OK, 2 ballot has validation errors, 3 usage/config, 4 I/O.
// Logs go to stderr; stdout carries only rendered output.

mod args;

mod exitcodes {
    pub const OK: u8 = 0;
    pub const INVALID: u8 = 2;
    pub const USAGE: u8 = 3;
    pub const IO: u8 = 4;
}

use std::fmt::Write as _;
use std::path::Path;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use args::{check_paths, Args, Command, OutputFormat};
use vs_core::Ballot;
use vs_pipeline::simulate::{simulate, SimulationResult, VoterProfile, SIMULATION_STEPS};
use vs_pipeline::templates::{self, Template};
use vs_pipeline::{BallotSession, BallotSummary, ValidationEngine};
use vs_rules::RuleParams;

/// Error buckets for exit-code mapping.
#[derive(Debug)]
enum MainError {
    Usage(String),
    Io(String),
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Usage(m) => write!(f, "{m}"),
            MainError::Io(m) => write!(f, "{m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

impl From<vs_report::ReportError> for MainError {
    fn from(e: vs_report::ReportError) -> Self {
        MainError::Render(e.to_string())
    }
}

impl From<std::fmt::Error> for MainError {
    fn from(e: std::fmt::Error) -> Self {
        MainError::Render(e.to_string())
    }
}

impl From<serde_json::Error> for MainError {
    fn from(e: serde_json::Error) -> Self {
        MainError::Render(e.to_string())
    }
}

fn map_error(e: &MainError) -> u8 {
    match e {
        MainError::Usage(_) => exitcodes::USAGE,
        MainError::Io(_) | MainError::Render(_) => exitcodes::IO,
    }
}

/// Unreadable or malformed ballot files exit with the I/O code.
fn map_ballot_err(e: vs_io::IoError) -> MainError {
    MainError::Io(format!("ballot: {e}"))
}

fn map_config_err(e: vs_io::IoError) -> MainError {
    match e {
        vs_io::IoError::Path(m) => MainError::Io(format!("config: {m}")),
        other => MainError::Usage(format!("config: {other}")),
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(a) => a,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::from(exitcodes::OK),
                _ => ExitCode::from(exitcodes::USAGE),
            };
        }
    };
    init_logging(&args);

    if let Err(e) = check_paths(&args) {
        eprintln!("votesecure: error: {e}");
        return ExitCode::from(exitcodes::USAGE);
    }

    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("votesecure: error: {e}");
            ExitCode::from(map_error(&e))
        }
    }
}

fn init_logging(args: &Args) {
    let default = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("VOTESECURE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn run(args: &Args) -> Result<u8, MainError> {
    match &args.command {
        Command::Validate { ballot } => validate(args, ballot),
        Command::Templates { search, category } => {
            let found = templates::search(search, category.filter());
            let out = match args.format {
                OutputFormat::Json => serde_json::to_string_pretty(&found)?,
                OutputFormat::Text => templates_text(&found)?,
                OutputFormat::Html => return Err(html_unsupported("templates")),
            };
            emit(args, &out)
        }
        Command::ApplyTemplate { template, ballot } => apply_template(args, template, ballot.as_deref()),
        Command::Simulate { profile, seed } => {
            let result = simulate(VoterProfile::from(*profile), *seed);
            let out = match args.format {
                OutputFormat::Json => serde_json::to_string_pretty(&result)?,
                OutputFormat::Text => simulation_text(&result)?,
                OutputFormat::Html => return Err(html_unsupported("simulate")),
            };
            emit(args, &out)
        }
        Command::Summary { ballot } => {
            let b = vs_io::load_ballot(ballot).map_err(map_ballot_err)?;
            let summary = BallotSummary::of(&b);
            let out = match args.format {
                OutputFormat::Json => serde_json::to_string_pretty(&summary)?,
                OutputFormat::Text => format!(
                    "contests: {}\ncandidates: {}\nwrite-in contests: {}\n",
                    summary.contests, summary.candidates, summary.write_in_contests
                ),
                OutputFormat::Html => return Err(html_unsupported("summary")),
            };
            emit(args, &out)
        }
    }
}

fn html_unsupported(cmd: &str) -> MainError {
    MainError::Usage(format!("--format html is only available for `validate`, not `{cmd}`"))
}

fn load_params(args: &Args) -> Result<RuleParams, MainError> {
    match &args.config {
        Some(p) => vs_io::load_rule_params(p).map_err(map_config_err),
        None => Ok(RuleParams::default()),
    }
}

fn validate(args: &Args, path: &Path) -> Result<u8, MainError> {
    let params = load_params(args)?;
    let engine = ValidationEngine::new(params).map_err(|e| MainError::Usage(format!("config: {e}")))?;
    let ballot = vs_io::load_ballot(path).map_err(map_ballot_err)?;
    let fingerprint = vs_io::fingerprint(&ballot).map_err(map_ballot_err)?;

    let mut session = BallotSession::new(ballot, engine);
    let report = session.report().clone();
    let model = vs_report::build_model(session.ballot(), &report, Some(fingerprint));
    let out = vs_report::render(&model, args.format.into())?;
    emit(args, &out)?;

    tracing::info!(
        errors = report.errors().len(),
        warnings = report.warnings().len(),
        suggestions = report.suggestions().len(),
        "validated {}",
        path.display()
    );
    Ok(if report.is_valid() { exitcodes::OK } else { exitcodes::INVALID })
}

fn apply_template(args: &Args, id: &str, base: Option<&Path>) -> Result<u8, MainError> {
    if args.format == OutputFormat::Html {
        return Err(html_unsupported("apply-template"));
    }
    let Some(template) = templates::find(id) else {
        return Err(MainError::Usage(format!("unknown template: {id}")));
    };
    let mut ballot = match base {
        Some(p) => vs_io::load_ballot(p).map_err(map_ballot_err)?,
        None => Ballot::new(),
    };
    templates::apply_template(&mut ballot, template).map_err(|e| MainError::Usage(e.to_string()))?;

    match &args.out {
        Some(out) => {
            vs_io::save_ballot(out, &ballot).map_err(|e| MainError::Io(format!("write: {e}")))?;
            Ok(exitcodes::OK)
        }
        None => {
            let mut text = serde_json::to_string_pretty(&ballot)?;
            text.push('\n');
            print!("{text}");
            Ok(exitcodes::OK)
        }
    }
}

fn templates_text(found: &[&Template]) -> Result<String, MainError> {
    let mut s = String::new();
    for t in found {
        writeln!(
            s,
            "{:<16} {} [{}] {} contests, {}, popularity {}% ({:?})",
            t.id,
            t.name,
            t.category.label(),
            t.contests,
            t.estimated_time,
            t.popularity,
            t.popularity_band()
        )?;
        writeln!(s, "    {}", t.description)?;
    }
    if found.is_empty() {
        writeln!(s, "no templates match")?;
    }
    Ok(s)
}

fn simulation_text(r: &SimulationResult) -> Result<String, MainError> {
    let mut s = String::new();
    writeln!(s, "{} (seed {})", r.profile.name(), r.seed)?;
    writeln!(s, "steps: {}", SIMULATION_STEPS.join(" > "))?;
    writeln!(s, "completion time: {} minutes", r.completion_minutes)?;
    writeln!(s, "success rate: {}%", r.success_rate_pct)?;
    writeln!(s, "usability score: {}/100", r.usability_score)?;
    writeln!(s, "issues:")?;
    for i in &r.issues {
        writeln!(s, "  [{:?}] {}", i.severity, i.message)?;
    }
    writeln!(s, "recommendations:")?;
    for rec in &r.recommendations {
        writeln!(s, "  - {rec}")?;
    }
    Ok(s)
}

/// Rendered output goes to `--out` (atomic replace) or stdout.
fn emit(args: &Args, text: &str) -> Result<u8, MainError> {
    match &args.out {
        Some(p) => {
            vs_io::write_atomic(p, text.as_bytes()).map_err(|e| MainError::Io(format!("write: {e}")))?;
            tracing::debug!(path = %p.display(), bytes = text.len(), "output written");
        }
        None => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(exitcodes::OK)
}
