//! Prompt templates for trend card agents.
//!
//! Generator templates name the card inputs as placeholders:
//!
//! ```text
//! Industry segment: {industry_segment}
//! Topic: {topic}
//! STEEL component: {component}
//! Keep each section under {word_limit} words.
//! ```
//!
//! Use `{{` to escape and render a literal `{`.

mod template;

pub use template::{TemplateError, placeholders, render_template, require_placeholders, vars};
