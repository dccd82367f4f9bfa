//! Server-rendered HTML.
//!
//! The page has three parts: the submission form, the ranked table and the
//! score-distribution chart. Every user-supplied string is escaped.

pub mod chart;

use leaderboard_application::ScoreDistribution;
use leaderboard_domain::Leaderboard;
use std::fmt::Write;

/// Outcome message shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

/// Everything needed to render the page
#[derive(Debug)]
pub struct PageModel<'a> {
    pub title: &'a str,
    pub leaderboard: &'a Leaderboard,
    pub distribution: &'a ScoreDistribution,
    pub banner: Option<Banner>,
    /// Pre-filled team name after a submission
    pub team_name: &'a str,
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;display:flex;min-height:100vh}\
aside{width:18rem;padding:1.5rem;background:#f4f5f7}\
main{flex:1;padding:1.5rem 2rem}\
label{display:block;margin:.75rem 0 .25rem}\
input[type=text]{width:100%;box-sizing:border-box;padding:.4rem}\
button{margin-top:1rem;padding:.5rem 1.5rem}\
table{border-collapse:collapse;width:100%}\
th,td{text-align:left;padding:.4rem .8rem;border-bottom:1px solid #ddd}\
td.num{font-variant-numeric:tabular-nums}\
.banner{padding:.6rem .8rem;margin-bottom:1rem;border-radius:4px}\
.success{background:#e6f4ea;color:#1e4620}\
.error{background:#fdecea;color:#611a15}\
.muted{color:#666}";

/// Render the full page.
pub fn render_page(model: &PageModel<'_>) -> String {
    let title = escape_html(model.title);
    let mut html = String::with_capacity(8 * 1024);

    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{title}</title><style>{STYLE}</style></head><body>"
    );

    html.push_str("<aside><h2>Submit</h2>");
    if let Some(banner) = &model.banner {
        let (class, text) = match banner {
            Banner::Success(text) => ("success", text),
            Banner::Error(text) => ("error", text),
        };
        let _ = write!(
            html,
            "<div class=\"banner {class}\" role=\"status\">{}</div>",
            escape_html(text)
        );
    }
    let _ = write!(
        html,
        "<form method=\"post\" action=\"/submit\" enctype=\"multipart/form-data\">\
<label for=\"team_name\">Team name</label>\
<input type=\"text\" id=\"team_name\" name=\"team_name\" maxlength=\"100\" value=\"{}\">\
<label for=\"file\">Prediction file (CSV)</label>\
<input type=\"file\" id=\"file\" name=\"file\" accept=\".csv,text/csv\">\
<button type=\"submit\">Submit</button></form></aside>",
        escape_html(model.team_name)
    );

    let _ = write!(html, "<main><h1>{title}</h1><h2>Leaderboard</h2>");
    render_table(&mut html, model.leaderboard);

    if !model.leaderboard.is_empty() {
        html.push_str("<h3>Score distribution</h3>");
        html.push_str(&chart::render_density_svg(model.distribution));
    }

    html.push_str("</main></body></html>");
    html
}

fn render_table(html: &mut String, leaderboard: &Leaderboard) {
    if leaderboard.is_empty() {
        html.push_str("<p class=\"muted\">No submissions yet.</p>");
        return;
    }

    let _ = write!(
        html,
        "<table><thead><tr><th>Rank</th><th>Team</th><th>{}</th><th>Submitted</th></tr></thead><tbody>",
        escape_html(leaderboard.metric.display_name())
    );
    for entry in &leaderboard.entries {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td>{}</td></tr>",
            entry.rank,
            escape_html(&entry.team_name),
            entry.formatted_score(),
            escape_html(&entry.timestamp)
        );
    }
    html.push_str("</tbody></table>");
}
