pub mod color;
pub mod dot;
pub mod parser;
pub mod tuple;

pub use color::{ColorAssigner, ColorError, ColorSummary, DEFAULT_COLORS, Palette, assign_colors};
pub use dot::to_dot;
pub use parser::{DocumentError, ParseError, parse_document, parse_subject, parse_tuple};
pub use tuple::{RelationTuple, Subject};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Parses a tuple document, colors it with `palette` and renders DOT text.
pub fn render_dot(input: &str, palette: Palette) -> Result<String, RenderError> {
    let mut tuples = parse_document(input)?;
    assign_colors(&mut tuples, palette)?;
    Ok(to_dot(&tuples))
}
