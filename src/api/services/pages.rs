//! HTML pages for the public endpoints
//!
//! Every user-controlled value (titles, labels, placeholders, options) goes
//! through `escape_html`.

use std::fmt::Write;

use crate::storage::{Field, FieldKind, Form, Link};

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;background:#f5f6f8;margin:0;\
padding:2rem 1rem;color:#1f2933}main{max-width:32rem;margin:0 auto;background:#fff;\
border-radius:8px;padding:2rem;box-shadow:0 1px 3px rgba(0,0,0,.1)}\
label{display:block;font-weight:600;margin:1rem 0 .3rem}\
input,select,textarea{width:100%;box-sizing:border-box;padding:.55rem;border:1px solid #cbd2d9;\
border-radius:4px;font:inherit}input[type=checkbox]{width:auto;margin-right:.5rem}\
.check{display:flex;align-items:center;font-weight:600;margin-top:1rem}\
button{margin-top:1.5rem;width:100%;padding:.7rem;border:0;border-radius:4px;\
background:#2563eb;color:#fff;font:inherit;cursor:pointer}.req{color:#c81e1e}";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<meta name=\"robots\" content=\"noindex\">\n<title>{}</title>\n<style>{}</style>\n</head>\n\
<body>\n<main>\n{}</main>\n</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

fn render_field(out: &mut String, field: &Field) {
    let name = escape_html(&field.name);
    let id = format!("f-{}", name);
    let label = escape_html(&field.label);
    let required = if field.required { " required" } else { "" };
    let marker = if field.required {
        " <span class=\"req\">*</span>"
    } else {
        ""
    };
    let placeholder = field
        .placeholder
        .as_deref()
        .map(|p| format!(" placeholder=\"{}\"", escape_html(p)))
        .unwrap_or_default();

    let input_type = match &field.kind {
        FieldKind::ShortText => "text",
        FieldKind::Email => "email",
        FieldKind::Phone => "tel",
        FieldKind::MultiLineText => {
            let _ = writeln!(
                out,
                "<label for=\"{id}\">{label}{marker}</label>\n\
<textarea id=\"{id}\" name=\"{name}\" rows=\"4\"{placeholder}{required}></textarea>"
            );
            return;
        }
        FieldKind::SingleSelect { options } => {
            let _ = writeln!(
                out,
                "<label for=\"{id}\">{label}{marker}</label>\n<select id=\"{id}\" name=\"{name}\"{required}>"
            );
            let _ = writeln!(out, "<option value=\"\">Select...</option>");
            for option in options {
                let _ = writeln!(
                    out,
                    "<option value=\"{}\">{}</option>",
                    escape_html(&option.value),
                    escape_html(&option.label)
                );
            }
            out.push_str("</select>\n");
            return;
        }
        FieldKind::Checkbox => {
            let _ = writeln!(
                out,
                "<label class=\"check\"><input type=\"checkbox\" id=\"{id}\" name=\"{name}\" value=\"yes\"{required}>{label}{marker}</label>"
            );
            return;
        }
    };

    let _ = writeln!(
        out,
        "<label for=\"{id}\">{label}{marker}</label>\n\
<input type=\"{input_type}\" id=\"{id}\" name=\"{name}\"{placeholder}{required}>"
    );
}

/// 表单页，提交到 `action`
pub fn render_form_page(link: &Link, form: &Form, action: &str) -> String {
    let heading = link.title.as_deref().unwrap_or(&form.name);
    let mut body = format!("<h1>{}</h1>\n", escape_html(heading));
    if let Some(description) = link.description.as_deref() {
        let _ = writeln!(body, "<p>{}</p>", escape_html(description));
    }
    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"{}\">",
        escape_html(action)
    );
    for field in &form.fields {
        render_field(&mut body, field);
    }
    body.push_str("<button type=\"submit\">Continue</button>\n</form>\n");
    page(heading, &body)
}

/// 错误页（404 / 410 / 500）
pub fn render_error_page(status: u16, title: &str, message: &str) -> String {
    let body = format!(
        "<h1>{} {}</h1>\n<p>{}</p>\n",
        status,
        escape_html(title),
        escape_html(message)
    );
    page(title, &body)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::storage::{SelectOption, TemplateType};

    fn sample() -> (Link, Form) {
        let now = Utc::now();
        let link = Link {
            id: "l1".into(),
            owner_id: "u1".into(),
            code: "promo".into(),
            is_custom: true,
            destination: "https://example.com".into(),
            form_id: Some("f1".into()),
            title: Some("<script>alert(1)</script>".into()),
            description: None,
            is_active: true,
            expires_at: None,
            click_count: 0,
            lead_count: 0,
            created_at: now,
            updated_at: now,
        };
        let form = Form {
            id: "f1".into(),
            owner_id: "u1".into(),
            name: "Contact".into(),
            fields: vec![
                Field {
                    name: "email".into(),
                    label: "Email".into(),
                    required: true,
                    placeholder: Some("you@\"example\".com".into()),
                    kind: FieldKind::Email,
                },
                Field {
                    name: "plan".into(),
                    label: "Plan".into(),
                    required: false,
                    placeholder: None,
                    kind: FieldKind::SingleSelect {
                        options: vec![SelectOption {
                            value: "pro".into(),
                            label: "Pro & Teams".into(),
                        }],
                    },
                },
            ],
            template_type: TemplateType::Custom,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        (link, form)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_form_page_escapes_user_content() {
        let (link, form) = sample();
        let html = render_form_page(&link, &form, "/submit/promo");

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("placeholder=\"you@&quot;example&quot;.com\""));
        assert!(html.contains("Pro &amp; Teams"));
        assert!(html.contains("action=\"/submit/promo\""));
        assert!(html.contains("type=\"email\" id=\"f-email\" name=\"email\""));
        assert!(html.contains(" required"));
    }
}
