//! Plain-text layout reports
//!
//! [`render_report`] turns a resolved [`StructLayout`] into the fixed-width
//! text block printed by `--print` mode: a summary line, then one row per
//! member with offset, size, declaration, and zero value. Padding gets its
//! own rows so the cost of a bad field order is visible at a glance. Output
//! is deterministic, so it can be pinned in tests and diffed in CI.

use crate::types::StructLayout;

/// Render one struct layout as a text block, ending with a newline.
pub fn render_report(layout: &StructLayout) -> String {
    let mut out = String::new();

    let padding = layout.padding_total();
    out.push_str(&format!(
        "struct {}: size {}, align {}",
        layout.name, layout.size, layout.align
    ));
    if padding > 0 {
        out.push_str(&format!(" ({} bytes padding)", padding));
    } else {
        out.push_str(" (no padding)");
    }
    out.push('\n');

    for member in &layout.members {
        if member.padding_before > 0 {
            out.push_str(&format!(
                "{:>6}  {:>4}  (padding)\n",
                "", member.padding_before
            ));
        }
        out.push_str(&format!(
            "{:>6}  {:>4}  {} = {}\n",
            member.offset,
            member.size,
            member.decl.c_decl(&member.name),
            member.zero
        ));
    }

    if layout.trailing_padding > 0 {
        out.push_str(&format!(
            "{:>6}  {:>4}  (trailing padding)\n",
            "", layout.trailing_padding
        ));
    }

    out
}

/// One-line note when the packed ordering beats the declared one, `None`
/// when the declared order is already as small as the suggestion.
pub fn render_packing_hint(declared: &StructLayout, packed: &StructLayout) -> Option<String> {
    if packed.size < declared.size {
        Some(format!(
            "note: ordering fields by descending alignment shrinks struct {} from {} to {} bytes",
            declared.name, declared.size, packed.size
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;
    use crate::types::StructRegistry;

    fn resolve(source: &str, name: &str) -> (StructLayout, StructLayout) {
        let mut parser = Parser::new(source).unwrap();
        let mut registry = StructRegistry::from_program(parser.parse_program().unwrap()).unwrap();
        let declared = registry.resolve(name).unwrap();
        let packed = registry.resolve_packed(name).unwrap();
        (declared, packed)
    }

    #[test]
    fn test_report_with_padding_rows() {
        let (layout, _) = resolve("struct Mixed { char a; double d; char b; };", "Mixed");

        let expected = concat!(
            "struct Mixed: size 24, align 8 (14 bytes padding)\n",
            "     0     1  char a = '\\x00'\n",
            "           7  (padding)\n",
            "     8     8  double d = 0.0\n",
            "    16     1  char b = '\\x00'\n",
            "           7  (trailing padding)\n",
        );
        assert_eq!(render_report(&layout), expected);
    }

    #[test]
    fn test_report_without_padding() {
        let (layout, _) = resolve("struct Point { int x; int y; };", "Point");

        let expected = concat!(
            "struct Point: size 8, align 4 (no padding)\n",
            "     0     4  int x = 0\n",
            "     4     4  int y = 0\n",
        );
        assert_eq!(render_report(&layout), expected);
    }

    #[test]
    fn test_report_array_and_pointer_members() {
        let (layout, _) = resolve(
            "struct Blob { double values[2]; char *name; bool ok; };",
            "Blob",
        );

        let expected = concat!(
            "struct Blob: size 32, align 8 (7 bytes padding)\n",
            "     0    16  double values[2] = [0.0, 0.0]\n",
            "    16     8  char *name = NULL\n",
            "    24     1  bool ok = false\n",
            "           7  (trailing padding)\n",
        );
        assert_eq!(render_report(&layout), expected);
    }

    #[test]
    fn test_packing_hint_when_smaller() {
        let (declared, packed) = resolve("struct Mixed { char a; double d; char b; };", "Mixed");

        let hint = render_packing_hint(&declared, &packed).unwrap();
        assert_eq!(
            hint,
            "note: ordering fields by descending alignment shrinks struct Mixed from 24 to 16 bytes"
        );
    }

    #[test]
    fn test_no_packing_hint_when_already_tight() {
        let (declared, packed) = resolve("struct Point { int x; int y; };", "Point");
        assert_eq!(render_packing_hint(&declared, &packed), None);
    }
}
