//! Placeholder substitution for config string fields.
//!
//! A template is plain text with `{{ .Field.Path }}` actions. Actions are
//! evaluated against a `serde_json::Value` holding the whole configuration,
//! with field names matched case-insensitively so `{{.Project}}` reads the
//! `project` key. `{{- ` and ` -}}` trim the whitespace around an action.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

const ACTION_OPEN: &str = "{{";

static ACTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{(?P<ltrim>-\s)?(?P<body>.*?)(?P<rtrim>\s-)?\}\}").unwrap());

static FIELD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\.[A-Za-z_][A-Za-z0-9_]*)+$").unwrap());

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("error parsing template: {0}")]
    Parse(String),

    #[error("error executing template: {0}")]
    Execute(String),
}

#[derive(Debug, PartialEq, Eq)]
enum Node<'a> {
    Text(&'a str),
    Field(Vec<&'a str>),
}

/// Returns true when `input` contains at least one action marker.
pub fn has_placeholder(input: &str) -> bool {
    input.contains(ACTION_OPEN)
}

/// Resolves every action in `input` against `context`.
///
/// Input without an action marker is returned unchanged.
pub fn render(input: &str, context: &Value) -> Result<String, TemplateError> {
    if !has_placeholder(input) {
        return Ok(input.to_string());
    }

    let nodes = parse(input)?;
    let mut out = String::with_capacity(input.len());

    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Field(path) => out.push_str(&evaluate(&path, context)?),
        }
    }

    Ok(out)
}

fn parse(input: &str) -> Result<Vec<Node<'_>>, TemplateError> {
    let mut nodes = Vec::new();
    let mut last = 0;
    let mut trim_next = false;

    for caps in ACTION_REGEX.captures_iter(input) {
        let whole = caps.get(0).expect("group 0 always present");

        let mut text = &input[last..whole.start()];
        if trim_next {
            text = text.trim_start();
        }
        if caps.name("ltrim").is_some() {
            text = text.trim_end();
        }
        if !text.is_empty() {
            nodes.push(Node::Text(text));
        }

        let body = caps.name("body").map(|m| m.as_str().trim()).unwrap_or("");
        nodes.push(parse_action(body)?);

        trim_next = caps.name("rtrim").is_some();
        last = whole.end();
    }

    let mut tail = &input[last..];
    if tail.contains(ACTION_OPEN) {
        return Err(TemplateError::Parse(format!(
            "unclosed action in {:?}",
            tail
        )));
    }
    if trim_next {
        tail = tail.trim_start();
    }
    if !tail.is_empty() {
        nodes.push(Node::Text(tail));
    }

    Ok(nodes)
}

fn parse_action(body: &str) -> Result<Node<'_>, TemplateError> {
    if body.is_empty() {
        return Err(TemplateError::Parse("missing value for command".into()));
    }
    if body == "." {
        return Err(TemplateError::Parse(
            "bare '.' is not supported, name a field such as .Project".into(),
        ));
    }
    if !FIELD_REGEX.is_match(body) {
        return Err(TemplateError::Parse(format!(
            "unsupported action {{{{{}}}}}, only field references are allowed",
            body
        )));
    }

    Ok(Node::Field(body[1..].split('.').collect()))
}

fn evaluate(path: &[&str], context: &Value) -> Result<String, TemplateError> {
    let mut current = context;

    for (depth, segment) in path.iter().enumerate() {
        let Value::Object(map) = current else {
            return Err(TemplateError::Execute(format!(
                "can't evaluate field {} of non-object .{}",
                segment,
                path[..depth].join(".")
            )));
        };

        current = map
            .get(*segment)
            .or_else(|| {
                map.iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(segment))
                    .map(|(_, value)| value)
            })
            .ok_or_else(|| {
                TemplateError::Execute(format!("can't evaluate field {}", segment))
            })?;
    }

    match current {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(TemplateError::Execute(format!(
            "field .{} is not a scalar value",
            path.join(".")
        ))),
    }
}
