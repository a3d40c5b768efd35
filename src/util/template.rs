//! Placeholder substitution for invoice mail templates.
//!
//! Placeholders are written as `{key}`. Substitution happens in a single left to right pass,
//! so values containing braces are never expanded again and unknown placeholders are kept
//! verbatim.

/// Subject and body of a stored template
#[derive(Debug, Clone, PartialEq)]
pub struct MailTemplate {
    pub subject: String,
    pub body: String,
}

/// A template with every known placeholder substituted
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

impl From<entity::template::Model> for MailTemplate {
    fn from(model: entity::template::Model) -> Self {
        Self {
            subject: model.subject,
            body: model.body,
        }
    }
}

impl MailTemplate {
    /// Renders a fresh copy of the template, the template itself is never modified
    pub fn render(&self, values: &[(&str, &str)]) -> RenderedMessage {
        RenderedMessage {
            subject: render(&self.subject, values),
            body: render(&self.body, values),
        }
    }
}

pub fn render(source: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let Some(end) = candidate.find('}') else {
            rendered.push_str(candidate);
            return rendered;
        };

        let key = &candidate[1..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => {
                rendered.push_str(value);
                rest = &candidate[end + 1..];
            }
            None => {
                // Not a placeholder, keep the brace and rescan after it
                rendered.push('{');
                rest = &candidate[1..];
            }
        }
    }

    rendered.push_str(rest);
    rendered
}
