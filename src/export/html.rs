//! Self-contained HTML rendering of a report bundle (images inlined as
//! base64 data URIs).

use crate::core::bundle::{ReportBundle, Section, SessionTable};
use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::export::pdf_report::PROBLEMS_HEADING;
use std::fmt::Write;
use std::fs;
use std::path::Path;

const STYLE: &str = "\
body { font-family: Helvetica, Arial, sans-serif; margin: 2em; }
figure { display: inline-block; margin: 0.5em; }
figcaption { font-size: 0.85em; color: #555; }
.problems { font-family: monospace; font-size: 0.8em; }
.table { border-collapse: collapse; font-size: 0.85em; }
.table-bordered td, .table-bordered th { border: 1px solid #aaa; padding: 2px 6px; }
.table-striped tbody tr:nth-child(odd) { background: #f4f4f4; }
";

pub fn escape(text: &str) -> String {
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

fn write_table(out: &mut String, table: &SessionTable) {
    out.push_str("<h2>Sessions</h2>\n");
    out.push_str("<table class=\"table table-bordered table-striped\">\n<thead><tr>");
    for h in &table.headers {
        let _ = write!(out, "<th>{}</th>", escape(h));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

pub fn render_html(bundle: &ReportBundle) -> String {
    let mut out = String::new();
    let title = escape(&bundle.title);

    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n"
    );

    for (name, section) in bundle.iter() {
        let id = escape(name);
        match section {
            Section::Text(text) => {
                let _ = writeln!(out, "<p id=\"{id}\">{}</p>", escape(text));
            }
            Section::Image { caption, png_base64 } => {
                let caption = escape(caption);
                let _ = writeln!(
                    out,
                    "<figure id=\"{id}\"><img alt=\"{caption}\" \
                     src=\"data:image/png;base64,{png_base64}\"><figcaption>{caption}</figcaption></figure>"
                );
            }
            Section::Lines(lines) => {
                let _ = writeln!(out, "<h2>{}</h2>", escape(PROBLEMS_HEADING));
                if lines.is_empty() {
                    out.push_str("<p>No issues reported for this period.</p>\n");
                } else {
                    let _ = writeln!(out, "<ul id=\"{id}\" class=\"problems\">");
                    for line in lines {
                        let _ = writeln!(out, "<li>{}</li>", escape(line));
                    }
                    out.push_str("</ul>\n");
                }
            }
            Section::Table(table) => write_table(&mut out, table),
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}

pub fn write_report_html(bundle: &ReportBundle, path: &Path) -> AppResult<()> {
    fs::write(path, render_html(bundle))?;
    notify_export_success("HTML report", path);
    Ok(())
}
