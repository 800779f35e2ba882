use std::fmt;
use std::str::FromStr;

use crate::parser::{ParseError, parse_tuple};

/// The subject side of a relation tuple.
///
/// Equality is variant-typed: an identifier never equals an indirect set,
/// whatever their contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    Identifier(String),
    IndirectSet {
        namespace: String,
        object: String,
        relation: String,
    },
}

impl Subject {
    pub fn identifier(id: impl Into<String>) -> Self {
        Self::Identifier(id.into())
    }

    pub fn indirect_set(
        namespace: impl Into<String>,
        object: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self::IndirectSet {
            namespace: namespace.into(),
            object: object.into(),
            relation: relation.into(),
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(id) => Some(id.as_str()),
            Self::IndirectSet { .. } => None,
        }
    }

    pub fn is_indirect_set(&self) -> bool {
        matches!(self, Self::IndirectSet { .. })
    }

    /// Label of the graph node this subject points at. Indirect sets drop
    /// their relation so every set on the same object shares one node.
    pub fn node_label(&self) -> String {
        match self {
            Self::Identifier(id) => id.clone(),
            Self::IndirectSet {
                namespace, object, ..
            } => format!("{namespace}:{object}"),
        }
    }

    /// Key of the permission node an indirect set refers to.
    pub fn set_key(&self) -> Option<String> {
        match self {
            Self::Identifier(_) => None,
            Self::IndirectSet {
                namespace,
                object,
                relation,
            } => Some(node_key(namespace, object, relation)),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(id) => write!(f, "{id}"),
            Self::IndirectSet {
                namespace,
                object,
                relation,
            } => write!(f, "{namespace}:{object}#{relation}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationTuple {
    pub namespace: String,
    pub object: String,
    pub relation: String,
    pub subject: Subject,
    /// Empty until colors are assigned.
    pub color: String,
}

impl RelationTuple {
    pub fn new(
        namespace: impl Into<String>,
        object: impl Into<String>,
        relation: impl Into<String>,
        subject: Subject,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            object: object.into(),
            relation: relation.into(),
            subject,
            color: String::new(),
        }
    }

    /// `namespace:object#relation`, the permission node this tuple defines.
    pub fn left_key(&self) -> String {
        node_key(&self.namespace, &self.object, &self.relation)
    }

    /// The permission node referenced by an indirect-set subject, if any.
    pub fn right_key(&self) -> Option<String> {
        self.subject.set_key()
    }

    pub fn object_label(&self) -> String {
        format!("{}:{}", self.namespace, self.object)
    }
}

impl fmt::Display for RelationTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}@", self.namespace, self.object, self.relation)?;
        if self.subject.is_indirect_set() {
            write!(f, "({})", self.subject)
        } else {
            write!(f, "{}", self.subject)
        }
    }
}

impl FromStr for RelationTuple {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tuple(s)
    }
}

fn node_key(namespace: &str, object: &str, relation: &str) -> String {
    format!("{namespace}:{object}#{relation}")
}
