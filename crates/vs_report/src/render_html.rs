//! Self-contained HTML page: validation status, issue lists, and a ballot
//! preview with localized static labels. No external assets; every string
//! that came from the ballot is escaped.

use std::fmt::Write as _;

use crate::labels::{self, Label};
use crate::model::{ContestPreview, IssueSection};
use crate::{ReportError, ReportModel};

/// Escape text for HTML element and attribute content.
fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_html(model: &ReportModel) -> Result<String, ReportError> {
    let lang = model.language.as_str();
    let mut h = String::with_capacity(4096);

    writeln!(h, "<!doctype html>")?;
    writeln!(h, "<html lang=\"{}\"><meta charset=\"utf-8\">", esc(lang))?;
    writeln!(h, "<title>{}</title>", esc(&model.ballot_title))?;
    writeln!(h, "<body>")?;

    let class = if model.status.is_valid { "valid" } else { "invalid" };
    writeln!(h, "<section class=\"status {class}\">")?;
    writeln!(h, "<h1>{}</h1>", esc(&model.status.headline))?;
    writeln!(h, "<p>{}</p>", esc(&model.status.detail))?;
    writeln!(
        h,
        "<p>Contests: {} &middot; Candidates: {} &middot; Write-in contests: {}</p>",
        model.summary.contests, model.summary.candidates, model.summary.write_in_contests
    )?;
    writeln!(h, "</section>")?;

    for section in &model.sections {
        issues_html(&mut h, section)?;
    }

    writeln!(h, "<section class=\"preview\">")?;
    writeln!(h, "<h2>{}</h2>", esc(&model.ballot_title))?;
    writeln!(h, "<p>{}</p>", esc(labels::text(lang, Label::Instructions)))?;
    for contest in &model.preview {
        contest_html(&mut h, contest)?;
    }
    writeln!(
        h,
        "<p><button>{}</button> <button>{}</button></p>",
        esc(labels::text(lang, Label::ReviewChoices)),
        esc(labels::text(lang, Label::SubmitBallot))
    )?;
    writeln!(h, "</section>")?;

    write!(h, "<footer>revision {}", model.integrity.revision)?;
    if let Some(fp) = &model.integrity.fingerprint {
        write!(h, " &middot; sha256 <code>{}</code>", esc(fp))?;
    }
    writeln!(h, " &middot; checked {}</footer>", esc(&model.integrity.last_checked))?;
    writeln!(h, "</body></html>")?;
    Ok(h)
}

fn issues_html(h: &mut String, section: &IssueSection) -> Result<(), ReportError> {
    if section.issues.is_empty() {
        return Ok(());
    }
    writeln!(h, "<section class=\"{}\">", section.severity)?;
    writeln!(h, "<h2>{} ({})</h2>", section.heading, section.issues.len())?;
    writeln!(h, "<ul>")?;
    for issue in &section.issues {
        writeln!(
            h,
            "<li id=\"{}\"><strong>{}</strong><br>{}</li>",
            esc(issue.id),
            esc(&issue.message),
            esc(&issue.suggestion)
        )?;
    }
    writeln!(h, "</ul>")?;
    writeln!(h, "</section>")?;
    Ok(())
}

fn contest_html(h: &mut String, c: &ContestPreview) -> Result<(), ReportError> {
    writeln!(h, "<fieldset id=\"{}\">", esc(&c.id))?;
    writeln!(h, "<legend>{}</legend>", esc(&c.title))?;
    if let Some(d) = &c.description {
        writeln!(h, "<p>{}</p>", esc(d))?;
    }
    writeln!(h, "<p class=\"vote-for\">{} <small>({})</small></p>", esc(c.vote_for), esc(c.kind))?;
    writeln!(h, "<ul>")?;
    for k in &c.candidates {
        write!(h, "<li><strong>{}</strong>", esc(&k.name))?;
        if let Some(p) = &k.party {
            write!(h, "<br>{}", esc(p))?;
        }
        if let Some(d) = &k.description {
            write!(h, "<br><small>{}</small>", esc(d))?;
        }
        writeln!(h, "</li>")?;
    }
    if c.allow_write_in {
        writeln!(h, "<li class=\"write-in\"><input type=\"text\" placeholder=\"Write-in candidate name\"></li>")?;
    }
    writeln!(h, "</ul>")?;
    writeln!(h, "</fieldset>")?;
    Ok(())
}
