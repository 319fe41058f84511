//! Template syntax: `<name>` or `<name:pattern>` placeholders and nestable
//! `[...]` optional segments.
//!
//! A template is parsed once into a tree of [`Node`]s. The matching
//! expression, the generation template and the builder all walk that tree,
//! so the three can never disagree about where a segment starts or ends.

use crate::{PatternError, DEFAULT_CONSTRAINT, SEPARATOR};
use ahash::{AHashMap, AHashSet};
use std::iter::Peekable;
use std::mem;
use std::str::CharIndices;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Literal(String),
    Variable(Placeholder),
    Optional(Vec<Node>),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Placeholder {
    pub name: String,
    /// `None` for `<name>` and `<name:>`
    pub constraint: Option<String>,
}

pub fn parse(template: &str) -> Result<Vec<Node>, PatternError> {
    // one frame per open `[`, holding the nodes collected before it
    let mut frames: Vec<(usize, Vec<Node>)> = Vec::new();
    let mut current = Vec::new();
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '[' => frames.push((position, mem::take(&mut current))),
            ']' => {
                let (_, parent) = frames
                    .pop()
                    .ok_or(PatternError::UnexpectedClose { position })?;
                let group = mem::replace(&mut current, parent);
                current.push(Node::Optional(group));
            }
            '<' => current.push(Node::Variable(placeholder(position, &mut chars)?)),
            _ => push_literal(&mut current, c),
        }
    }

    match frames.last() {
        Some((position, _)) => Err(PatternError::UnclosedOptional {
            position: *position,
        }),
        None => Ok(current),
    }
}

fn push_literal(nodes: &mut Vec<Node>, c: char) {
    match nodes.last_mut() {
        Some(Node::Literal(text)) => text.push(c),
        _ => nodes.push(Node::Literal(c.to_string())),
    }
}

fn placeholder(
    start: usize,
    chars: &mut Peekable<CharIndices>,
) -> Result<Placeholder, PatternError> {
    let mut name = String::new();
    let constraint = loop {
        match chars.next() {
            Some((_, c)) if c.is_ascii_alphanumeric() || c == '_' => name.push(c),
            Some((_, '>')) => break None,
            Some((_, ':')) => {
                let pattern = read_constraint(chars)
                    .ok_or(PatternError::UnterminatedPlaceholder { position: start })?;
                break Some(pattern).filter(|p| !p.is_empty());
            }
            Some(_) => return Err(PatternError::InvalidPlaceholder { position: start }),
            None => return Err(PatternError::UnterminatedPlaceholder { position: start }),
        }
    };

    // same rule the regex crate applies to group names
    match name.chars().next() {
        Some(first) if !first.is_ascii_digit() => Ok(Placeholder { name, constraint }),
        _ => Err(PatternError::InvalidPlaceholder { position: start }),
    }
}

/// Reads up to the `>` closing the placeholder. A `>` inside a group, a
/// character class or behind a backslash belongs to the pattern.
fn read_constraint(chars: &mut Peekable<CharIndices>) -> Option<String> {
    let mut pattern = String::new();
    let mut depth = 0usize;
    let mut in_class = false;

    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => {
                pattern.push(c);
                pattern.push(chars.next()?.1);
                continue;
            }
            '>' if depth == 0 && !in_class => return Some(pattern),
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class => depth += 1,
            ')' if !in_class => depth = depth.saturating_sub(1),
            _ => (),
        }
        pattern.push(c);
    }
    None
}

/// Distinct variable names in order of first appearance.
pub fn variable_names(nodes: &[Node]) -> Vec<String> {
    fn walk(nodes: &[Node], seen: &mut AHashSet<String>, names: &mut Vec<String>) {
        for node in nodes {
            match node {
                Node::Variable(p) => {
                    if seen.insert(p.name.clone()) {
                        names.push(p.name.clone());
                    }
                }
                Node::Optional(children) => walk(children, seen, names),
                Node::Literal(_) => (),
            }
        }
    }

    let mut names = Vec::new();
    walk(nodes, &mut AHashSet::new(), &mut names);
    names
}

/// Inline constraints, the last one given for a name wins.
pub fn inline_constraints(nodes: &[Node], constraints: &mut AHashMap<String, String>) {
    for node in nodes {
        match node {
            Node::Variable(Placeholder {
                name,
                constraint: Some(pattern),
            }) => {
                constraints.insert(name.clone(), pattern.clone());
            }
            Node::Optional(children) => inline_constraints(children, constraints),
            _ => (),
        }
    }
}

pub fn generation_template(nodes: &[Node]) -> String {
    fn write(nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Literal(text) => out.push_str(text),
                Node::Variable(p) => {
                    out.push('<');
                    out.push_str(&p.name);
                    out.push('>');
                }
                Node::Optional(children) => {
                    out.push('[');
                    write(children, out);
                    out.push(']');
                }
            }
        }
    }

    let mut out = String::new();
    write(nodes, &mut out);
    out
}

/// Normalizes the tree to the shape of a match subject: edge separators are
/// dropped and exactly one leading separator is required, unless a leading
/// optional segment brings its own. A leading optional segment followed by
/// nothing or by a separator takes the inserted separator inside, so the
/// empty subject still matches without it.
pub fn anchored(nodes: &[Node]) -> Vec<Node> {
    let mut nodes = nodes.to_vec();

    if let Some(Node::Literal(text)) = nodes.first_mut() {
        let trimmed = text.trim_start_matches(SEPARATOR).to_string();
        *text = trimmed;
    }
    if let Some(Node::Literal(text)) = nodes.last_mut() {
        let trimmed = text.trim_end_matches(SEPARATOR).to_string();
        *text = trimmed;
    }
    nodes.retain(|node| !matches!(node, Node::Literal(text) if text.is_empty()));

    if !nodes.is_empty() && !leading_separator(&nodes) {
        insert_separator(&mut nodes);
    }
    nodes
}

fn insert_separator(nodes: &mut Vec<Node>) {
    if nodes.len() == 1 || leading_separator(&nodes[1..]) {
        if let Some(Node::Optional(children)) = nodes.first_mut() {
            insert_separator(children);
            return;
        }
    }
    nodes.insert(0, Node::Literal(SEPARATOR.to_string()));
}

fn leading_separator(nodes: &[Node]) -> bool {
    match nodes.first() {
        Some(Node::Literal(text)) => text.starts_with(SEPARATOR),
        Some(Node::Optional(children)) => leading_separator(children),
        _ => false,
    }
}

/// Renders the expression body. The first occurrence of a variable owns the
/// named group, repeats only have to match the same constraint.
pub fn write_regex(
    nodes: &[Node],
    constraints: &AHashMap<String, String>,
    captured: &mut AHashSet<String>,
    out: &mut String,
) {
    for node in nodes {
        match node {
            Node::Literal(text) => out.push_str(&regex::escape(text)),
            Node::Variable(p) => {
                let body = constraints
                    .get(&p.name)
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_CONSTRAINT);
                if captured.insert(p.name.clone()) {
                    out.push_str("(?P<");
                    out.push_str(&p.name);
                    out.push('>');
                } else {
                    out.push_str("(?:");
                }
                out.push_str(body);
                out.push(')');
            }
            Node::Optional(children) => {
                out.push_str("(?:");
                write_regex(children, constraints, captured, out);
                out.push_str(")?");
            }
        }
    }
}
