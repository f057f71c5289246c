//! HTML pages. Every dynamic string goes through [`escape`].

use crate::models::Poll;
use crate::voting::results::PollResults;
use std::fmt::Write;

/// Messages that can be shown after a redirect, carried as `?notice=<code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AlreadyVoted,
    InvalidOption,
    ResetOk,
    ResetDenied,
}

impl Notice {
    pub fn code(self) -> &'static str {
        match self {
            Notice::AlreadyVoted => "already-voted",
            Notice::InvalidOption => "invalid-option",
            Notice::ResetOk => "reset-ok",
            Notice::ResetDenied => "reset-denied",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "already-voted" => Some(Notice::AlreadyVoted),
            "invalid-option" => Some(Notice::InvalidOption),
            "reset-ok" => Some(Notice::ResetOk),
            "reset-denied" => Some(Notice::ResetDenied),
            _ => None,
        }
    }

    fn message(self) -> &'static str {
        match self {
            Notice::AlreadyVoted => "You have already voted. Everyone gets one vote.",
            Notice::InvalidOption => "Please pick one of the listed options.",
            Notice::ResetOk => "The votes have been reset.",
            Notice::ResetDenied => "Wrong token. Nothing was reset.",
        }
    }

    fn class(self) -> &'static str {
        match self {
            Notice::AlreadyVoted => "info",
            Notice::ResetOk => "success",
            Notice::InvalidOption | Notice::ResetDenied => "error",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Nav {
    Poll,
    Results,
    About,
    Restart,
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn layout(title: &str, active: Nav, notice: Option<Notice>, body: &str) -> String {
    let link = |nav: Nav, href: &str, text: &str| {
        let class = if nav == active { " class=\"active\"" } else { "" };
        format!("<a href=\"{href}\"{class}>{text}</a>")
    };

    let notice_html = notice
        .map(|n| format!("<p class=\"notice {}\">{}</p>", n.class(), escape(n.message())))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n<body>\n<nav>{} {} {} {}</nav>\n{notice_html}\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        link(Nav::Poll, "/", "Poll"),
        link(Nav::Results, "/results", "Results"),
        link(Nav::About, "/about", "About"),
        link(Nav::Restart, "/restart", "Restart"),
        title = escape(title),
    )
}

fn results_table(results: &PollResults, voted: Option<&str>) -> String {
    let mut html = String::from("<ul class=\"results\">\n");
    for row in &results.rows {
        let mut classes = Vec::new();
        if row.leading {
            classes.push("leading");
        }
        if voted == Some(row.id.as_str()) {
            classes.push("yours");
        }
        let _ = writeln!(
            html,
            "<li class=\"{}\"><strong>{}</strong> {} <span class=\"count\">{} ({}%)</span></li>",
            classes.join(" "),
            escape(&row.label),
            escape(&row.text),
            row.count,
            row.percent,
        );
    }
    let _ = write!(html, "</ul>\n<p class=\"total\">Total votes: {}</p>", results.total);
    html
}

/// Landing page with the voting form.
pub fn poll_form(poll: &Poll, notice: Option<Notice>) -> String {
    let mut body = format!(
        "<h1>{}</h1>\n<form method=\"post\" action=\"/vote\">\n",
        escape(poll.question())
    );
    for option in poll.options() {
        let id = escape(&option.id);
        let _ = writeln!(
            body,
            "<label><input type=\"radio\" name=\"option\" value=\"{id}\" required> <strong>{}</strong> {}</label><br>",
            escape(&option.label),
            escape(&option.text),
        );
    }
    body.push_str("<button type=\"submit\">Vote</button>\n</form>");

    layout(poll.question(), Nav::Poll, notice, &body)
}

/// Landing page once the visitor has voted. `voted` highlights the option
/// chosen in this request.
pub fn poll_results(
    poll: &Poll,
    results: &PollResults,
    voted: Option<&str>,
    notice: Option<Notice>,
) -> String {
    let thanks = match voted.and_then(|id| poll.find_option(id)) {
        Some(option) => format!(
            "<p class=\"thanks\">Thanks! You voted for {}.</p>\n",
            escape(&option.text)
        ),
        None => String::from(
            "<p class=\"thanks\">You have already voted. Here is how it stands.</p>\n",
        ),
    };
    let body = format!(
        "<h1>{}</h1>\n{thanks}{}",
        escape(poll.question()),
        results_table(results, voted)
    );

    layout(poll.question(), Nav::Poll, notice, &body)
}

pub fn results_page(poll: &Poll, results: &PollResults) -> String {
    let body = format!(
        "<h1>Results</h1>\n<h2>{}</h2>\n{}",
        escape(poll.question()),
        results_table(results, None)
    );
    layout("Results", Nav::Results, None, &body)
}

pub fn about_page(poll: &Poll) -> String {
    let body = format!(
        "<h1>About</h1>\n<p>A one-question poll: <em>{}</em></p>\n\
         <p>Each browser gets a single vote, remembered with a cookie. \
         Results are visible to everyone on the results page.</p>\n\
         <p>The operator can reset the tally from the restart page with the reset token.</p>",
        escape(poll.question())
    );
    layout("About", Nav::About, None, &body)
}

/// Operator form. The token is typed in, never pre-filled.
pub fn restart_page() -> String {
    let body = "<h1>Restart the poll</h1>\n\
                <p>Resetting sets every option back to zero votes.</p>\n\
                <form method=\"post\" action=\"/reset\">\n\
                <label>Reset token <input type=\"password\" name=\"token\" autocomplete=\"off\" required></label>\n\
                <button type=\"submit\">Reset votes</button>\n</form>";
    layout("Restart", Nav::Restart, None, body)
}
