use std::borrow::Cow;

use crate::tuple::RelationTuple;

/// Renders one edge per tuple, in input order, inside a `digraph` block.
///
/// Edges run from `namespace:object` to the subject's node label and carry
/// the relation as label and the assigned color.
pub fn to_dot(tuples: &[RelationTuple]) -> String {
    let mut out = String::from("digraph {\n");
    for tuple in tuples {
        out.push_str(&format!(
            "  \"{}\" -> \"{}\" [ label=\"{}\", color=\"{}\"];\n",
            escape(&tuple.object_label()),
            escape(&tuple.subject.node_label()),
            escape(&tuple.relation),
            escape(&tuple.color),
        ));
    }
    out.push_str("}\n");
    out
}

/// Escapes `\` and `"` for use inside a quoted DOT string.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '"']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        if matches!(c, '\\' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}
