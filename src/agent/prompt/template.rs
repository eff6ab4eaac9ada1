//! Placeholder substitution for prompt templates.
//!
//! Templates use `{name}` placeholders. `{{` and `}}` render literal braces,
//! which lets system prompts carry JSON examples. A lone `}` is kept as-is.
//!
//! Rendering is strict: a placeholder with no value is an error, never an
//! empty substitution.

use std::collections::HashMap;
use std::fmt;

/// Error type for template parsing and rendering failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder was found but no value was supplied for it.
    UndefinedVariable { name: String, position: usize },
    /// A placeholder the caller requires does not appear in the template.
    MissingPlaceholder { name: String },
    /// A `{` was found without a matching `}`.
    UnmatchedBrace { position: usize },
    /// An empty placeholder (`{}`).
    EmptyVariableName { position: usize },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedVariable { name, position } => write!(
                f,
                "no value for placeholder '{{{}}}' at position {}",
                name, position
            ),
            TemplateError::MissingPlaceholder { name } => {
                write!(f, "template has no '{{{}}}' placeholder", name)
            }
            TemplateError::UnmatchedBrace { position } => {
                write!(f, "unmatched '{{' at position {} in template", position)
            }
            TemplateError::EmptyVariableName { position } => {
                write!(f, "empty placeholder '{{}}' at position {} in template", position)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(char),
    Placeholder { name: &'a str, position: usize },
}

fn parse(template: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let mut segments = Vec::new();
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                segments.push(Segment::Literal('{'));
            }
            '{' => {
                let start = pos + 1;
                let end = loop {
                    match chars.next() {
                        Some((end, '}')) => break end,
                        Some(_) => {}
                        None => return Err(TemplateError::UnmatchedBrace { position: pos }),
                    }
                };
                let name = template[start..end].trim();
                if name.is_empty() {
                    return Err(TemplateError::EmptyVariableName { position: pos });
                }
                segments.push(Segment::Placeholder {
                    name,
                    position: pos,
                });
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                }
                segments.push(Segment::Literal('}'));
            }
            other => segments.push(Segment::Literal(other)),
        }
    }

    Ok(segments)
}

/// Render a template by substituting every placeholder.
///
/// ```
/// use trendcard::agent::prompt::{render_template, vars};
///
/// let vars = vars([("topic", "Embedded Finance"), ("component", "Economic")]);
/// let prompt = render_template("{topic} / {component}", &vars).unwrap();
/// assert_eq!(prompt, "Embedded Finance / Economic");
/// ```
pub fn render_template(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut rendered = String::with_capacity(template.len());

    for segment in parse(template)? {
        match segment {
            Segment::Literal(ch) => rendered.push(ch),
            Segment::Placeholder { name, position } => match variables.get(name) {
                Some(value) => rendered.push_str(value),
                None => {
                    return Err(TemplateError::UndefinedVariable {
                        name: name.to_string(),
                        position,
                    });
                }
            },
        }
    }

    Ok(rendered)
}

/// Distinct placeholder names in order of first appearance.
pub fn placeholders(template: &str) -> Result<Vec<String>, TemplateError> {
    let mut names: Vec<String> = Vec::new();
    for segment in parse(template)? {
        if let Segment::Placeholder { name, .. } = segment
            && !names.iter().any(|n| n == name)
        {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Fail unless every name in `required` appears as a placeholder.
pub fn require_placeholders(template: &str, required: &[&str]) -> Result<(), TemplateError> {
    let present = placeholders(template)?;
    match required
        .iter()
        .find(|name| !present.iter().any(|p| p == *name))
    {
        Some(missing) => Err(TemplateError::MissingPlaceholder {
            name: missing.to_string(),
        }),
        None => Ok(()),
    }
}

/// Helper to create a variables map from a list of key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
