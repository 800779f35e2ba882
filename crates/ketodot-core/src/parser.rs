use crate::tuple::{RelationTuple, Subject};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected input to contain '{separator}'")]
    MissingSeparator { separator: char },
    #[error("malformed subject set '{0}': expected namespace:object#relation")]
    MalformedIndirectSet(String),
}

/// A parse failure attributed to a line of a tuple document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: could not decode '{text}': {source}")]
pub struct DocumentError {
    /// 1-based, counting blank and comment lines.
    pub line: usize,
    pub text: String,
    #[source]
    pub source: ParseError,
}

/// Parses `namespace:object#relation@subject`.
///
/// The subject may be wrapped in one pair of parentheses. It is an indirect
/// set when it contains `#`, otherwise an opaque identifier.
pub fn parse_tuple(line: &str) -> Result<RelationTuple, ParseError> {
    let (namespace, rest) = split_required(line, ':')?;
    let (object, rest) = split_required(rest, '#')?;
    let (relation, subject) = split_required(rest, '@')?;
    let subject = parse_subject(strip_parentheses(subject))?;

    Ok(RelationTuple::new(namespace, object, relation, subject))
}

pub fn parse_subject(input: &str) -> Result<Subject, ParseError> {
    if input.contains('#') {
        parse_indirect_set(input)
    } else {
        Ok(Subject::identifier(input))
    }
}

/// Parses a whole document, skipping blank lines and `//` comments.
///
/// Stops at the first malformed line; no partial list is returned.
pub fn parse_document(input: &str) -> Result<Vec<RelationTuple>, DocumentError> {
    let mut tuples = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        let tuple = parse_tuple(line).map_err(|source| DocumentError {
            line: index + 1,
            text: line.to_string(),
            source,
        })?;
        tuples.push(tuple);
    }

    Ok(tuples)
}

fn split_required(input: &str, separator: char) -> Result<(&str, &str), ParseError> {
    input
        .split_once(separator)
        .ok_or(ParseError::MissingSeparator { separator })
}

fn strip_parentheses(input: &str) -> &str {
    input
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(input)
}

fn parse_indirect_set(input: &str) -> Result<Subject, ParseError> {
    let malformed = || ParseError::MalformedIndirectSet(input.to_string());

    let mut parts = input.split('#');
    let (Some(node), Some(relation), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    let mut node_parts = node.split(':');
    let (Some(namespace), Some(object), None) =
        (node_parts.next(), node_parts.next(), node_parts.next())
    else {
        return Err(malformed());
    };

    Ok(Subject::indirect_set(namespace, object, relation))
}
