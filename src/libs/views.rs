//! Minimal HTML rendering for the generated pages.

use std::fmt::Write;

use crate::descriptor::{FieldKind, RenderKind};
use crate::flash::Flash;
use crate::generator::{FormField, FormPage, ListPage};
use crate::value::Value;

const LONG_TEXT_PREVIEW: usize = 50;

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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body>\n<nav><a href=\"/\">Home</a></nav>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

fn flash_block(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => format!(
            "<div class=\"flash flash-{}\">{}</div>\n",
            flash.level.as_str(),
            escape(&flash.message)
        ),
        None => String::new(),
    }
}

pub fn render_cell(value: Option<&Value>, render: RenderKind) -> String {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return String::new();
    };
    match (render, value) {
        (RenderKind::Money, Value::Decimal(d)) => format!("${d:.2}"),
        (RenderKind::Money, Value::Float(f)) => format!("${f:.2}"),
        (RenderKind::Money, other) => format!("${other}"),
        (RenderKind::TextLong, other) => {
            let text = other.to_string();
            if text.chars().count() > LONG_TEXT_PREVIEW {
                let preview: String = text.chars().take(LONG_TEXT_PREVIEW).collect();
                format!("{preview}...")
            } else {
                text
            }
        }
        (RenderKind::Text, other) => other.to_string(),
    }
}

pub fn list_page(page: &ListPage) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(&page.title));
    body.push_str(&flash_block(page.flash.as_ref()));
    let _ = writeln!(body, "<p><a href=\"{}\">Create new</a></p>", escape(&page.create_path));

    if page.rows.is_empty() {
        body.push_str("<p>No records found.</p>\n");
        return layout(&page.title, &body);
    }

    body.push_str("<table>\n<thead><tr>");
    for column in page.columns {
        let _ = write!(body, "<th>{}</th>", escape(column.label));
    }
    body.push_str("<th>Actions</th></tr></thead>\n<tbody>\n");

    for row in &page.rows {
        let _ = write!(body, "<tr data-id=\"{}\">", escape(&row.record.text(page.id_key)));
        for column in page.columns {
            let cell = render_cell(row.record.get(column.key), column.render);
            let _ = write!(body, "<td>{}</td>", escape(&cell));
        }
        body.push_str("<td>");
        if let Some(update_path) = &row.update_path {
            let _ = write!(body, "<a href=\"{}\">Edit</a> ", escape(update_path));
        }
        let _ = write!(
            body,
            "<form method=\"post\" action=\"{}\" style=\"display:inline\">\
             <button type=\"submit\">Delete</button></form>",
            escape(&row.delete_path)
        );
        body.push_str("</td></tr>\n");
    }
    body.push_str("</tbody>\n</table>\n");
    layout(&page.title, &body)
}

fn field_input(field: &FormField) -> String {
    let d = field.descriptor;
    let name = escape(d.name);
    let required = if d.required { " required" } else { "" };
    let value = field.value.as_deref().unwrap_or_default();

    match d.kind {
        FieldKind::Select => {
            let mut html = format!("<select name=\"{name}\" id=\"{name}\"{required}>");
            html.push_str("<option value=\"\">-- Select --</option>");
            for option in &field.options {
                let selected = if option.value == value { " selected" } else { "" };
                let _ = write!(
                    html,
                    "<option value=\"{}\"{}>{}</option>",
                    escape(&option.value),
                    selected,
                    escape(&option.label)
                );
            }
            html.push_str("</select>");
            html
        }
        FieldKind::Textarea => {
            format!("<textarea name=\"{name}\" id=\"{name}\"{required}>{}</textarea>", escape(value))
        }
        kind => {
            let step = d
                .step
                .map(|s| format!(" step=\"{}\"", escape(s)))
                .unwrap_or_default();
            format!(
                "<input type=\"{}\" name=\"{name}\" id=\"{name}\" value=\"{}\"{step}{required}>",
                kind.input_type(),
                escape(value)
            )
        }
    }
}

pub fn form_page(page: &FormPage) -> String {
    let title = format!("{} {}", page.action.as_str(), page.title);
    let mut body = format!("<h1>{}</h1>\n", escape(&title));
    body.push_str(&flash_block(page.flash.as_ref()));
    let _ = writeln!(body, "<form method=\"post\" action=\"{}\">", escape(&page.submit_path));
    for field in &page.fields {
        let marker = if field.descriptor.required { " *" } else { "" };
        let _ = writeln!(
            body,
            "<div class=\"field\"><label for=\"{}\">{}{}</label>{}</div>",
            escape(field.descriptor.name),
            escape(field.descriptor.label),
            marker,
            field_input(field)
        );
    }
    let _ = writeln!(
        body,
        "<button type=\"submit\">{}</button> <a href=\"{}\">Cancel</a>\n</form>",
        page.action.as_str(),
        escape(&page.list_path)
    );
    layout(&title, &body)
}

/// Landing page linking every table as `(path, display name)`.
pub fn index_page(tables: &[(String, String)]) -> String {
    let mut body = String::from("<h1>Caregivers Platform</h1>\n<ul>\n");
    for (path, name) in tables {
        let _ = writeln!(body, "<li><a href=\"{}\">{}</a></li>", escape(path), escape(name));
    }
    body.push_str("</ul>\n<p><a href=\"/db-test\">Test database connection</a></p>\n");
    layout("Caregivers Platform", &body)
}

/// A status page for the `/db-test` and `/db-init` utilities.
pub fn status_page(heading: &str, lines: &[String], links: &[(&str, &str)]) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(heading));
    for line in lines {
        let _ = writeln!(body, "<p>{}</p>", escape(line));
    }
    let nav: Vec<String> = links
        .iter()
        .map(|(href, label)| format!("<a href=\"{}\">{}</a>", escape(href), escape(label)))
        .collect();
    let _ = writeln!(body, "<p>{}</p>", nav.join(" | "));
    layout(heading, &body)
}

pub fn not_found_page() -> String {
    layout(
        "Not Found",
        "<h1>404 - Page not found</h1>\n<p><a href=\"/\">Back to main page</a></p>",
    )
}

pub fn internal_error_page() -> String {
    layout(
        "Server Error",
        "<h1>500 - Internal server error</h1>\n<p><a href=\"/\">Back to main page</a></p>",
    )
}
