//! Built-in form templates

use serde::Serialize;

use crate::storage::{Field, FieldKind, SelectOption, TemplateType};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub template_type: TemplateType,
    pub fields: Vec<Field>,
}

fn field(name: &str, label: &str, required: bool, placeholder: Option<&str>, kind: FieldKind) -> Field {
    Field {
        name: name.to_string(),
        label: label.to_string(),
        required,
        placeholder: placeholder.map(str::to_string),
        kind,
    }
}

fn select(options: &[(&str, &str)]) -> FieldKind {
    FieldKind::SingleSelect {
        options: options
            .iter()
            .map(|(value, label)| SelectOption {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect(),
    }
}

pub fn builtin_templates() -> Vec<FormTemplate> {
    vec![
        FormTemplate {
            id: "contact-template",
            name: "Contact Form",
            template_type: TemplateType::Contact,
            fields: vec![
                field("name", "Full Name", true, Some("Enter your full name"), FieldKind::ShortText),
                field("email", "Email Address", true, Some("Enter your email"), FieldKind::Email),
                field("company", "Company", false, Some("Your company name"), FieldKind::ShortText),
                field(
                    "message",
                    "Message",
                    true,
                    Some("How can we help you?"),
                    FieldKind::MultiLineText,
                ),
            ],
        },
        FormTemplate {
            id: "newsletter-template",
            name: "Newsletter Signup",
            template_type: TemplateType::Newsletter,
            fields: vec![
                field(
                    "email",
                    "Email Address",
                    true,
                    Some("Enter your email to subscribe"),
                    FieldKind::Email,
                ),
                field(
                    "name",
                    "First Name",
                    false,
                    Some("Your first name (optional)"),
                    FieldKind::ShortText,
                ),
                field(
                    "interests",
                    "Interests",
                    false,
                    None,
                    select(&[
                        ("tech", "Technology"),
                        ("marketing", "Marketing"),
                        ("design", "Design"),
                        ("business", "Business"),
                    ]),
                ),
            ],
        },
        FormTemplate {
            id: "demo-template",
            name: "Demo Request",
            template_type: TemplateType::Demo,
            fields: vec![
                field("name", "Full Name", true, Some("Enter your full name"), FieldKind::ShortText),
                field("email", "Work Email", true, Some("Enter your work email"), FieldKind::Email),
                field("company", "Company Name", true, Some("Your company name"), FieldKind::ShortText),
                field(
                    "role",
                    "Job Role",
                    true,
                    None,
                    select(&[
                        ("ceo", "CEO/Founder"),
                        ("marketing", "Marketing"),
                        ("sales", "Sales"),
                        ("product", "Product"),
                        ("other", "Other"),
                    ]),
                ),
                field(
                    "company_size",
                    "Company Size",
                    true,
                    None,
                    select(&[
                        ("1-10", "1-10 employees"),
                        ("11-50", "11-50 employees"),
                        ("51-200", "51-200 employees"),
                        ("201-1000", "201-1000 employees"),
                        ("1000+", "1000+ employees"),
                    ]),
                ),
            ],
        },
    ]
}
