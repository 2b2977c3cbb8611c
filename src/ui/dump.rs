//! ui::dump
//!
//! Line dumps of values and descriptors for diagnostics.

use crate::core::descriptor::Type;
use crate::core::value::Value;
use crate::ui::report::{indent, Line, Span, Tone};

/// Pretty-printed JSON view of a value, one line per output line.
///
/// Functions appear as their `<function name/arity>` marker.
pub fn show_value(value: &Value) -> Vec<Line> {
    match serde_json::to_string_pretty(value) {
        Ok(text) => text.lines().map(Line::text).collect(),
        Err(_) => vec![Line::text(format!("<unprintable {}>", value.kind()))],
    }
}

/// Name, description and form of a descriptor.
pub fn show_type(ty: &Type) -> Vec<Line> {
    let mut lines = vec![Line::spans(vec![
        Span::plain("Where "),
        Span::new(Tone::TypeName, ty.name()),
        Span::plain(format!(" is {}:", ty.description())),
    ])];
    lines.extend(indent(vec![Line::text(ty.form())]));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types;

    #[test]
    fn arrays_dump_over_several_lines() {
        let lines = show_value(&Value::array([1, 2]));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].plain_text(), "[");
    }

    #[test]
    fn type_dump_mentions_name_and_form() {
        let lines = show_type(&types::uint8());
        assert!(lines[0].plain_text().contains("Uint8"));
        assert!(lines[1].plain_text().contains("8 bits"));
        assert_eq!(lines[1].depth, 1);
    }
}
