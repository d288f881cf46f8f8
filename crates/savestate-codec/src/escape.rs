//! Nesting-safe quote escaping for wrapped literals.
//!
//! Tuples, sets and object state travel as single JSON strings whose content
//! is itself JSON. Emitted naively, the outer string would terminate at the
//! first inner `"`. Instead, every quote at parenthesis depth zero of a
//! payload becomes [`PLACEHOLDER`] when the literal is wrapped, and is turned
//! back into a quote when the literal is unwrapped. Quotes belonging to
//! deeper, already-wrapped literals sit at depth one or more and are left
//! alone until their own recursive pass.
//!
//! Each transform must run exactly once per nesting level: bottom-up during
//! encode, top-down during decode.

use crate::constants::PLACEHOLDER;

/// Replace `"` with the placeholder in spans where the parenthesis counter
/// is exactly zero. Runs once per literal, at wrap time.
pub fn mask_quotes(payload: &str) -> String {
    substitute(payload, '"', PLACEHOLDER)
}

/// Replace the placeholder with `"` in spans where the parenthesis counter
/// is exactly zero. Runs once per literal, at unwrap time.
pub fn restore_quotes(payload: &str) -> String {
    substitute(payload, PLACEHOLDER, '"')
}

fn substitute(payload: &str, from: char, to: char) -> String {
    let mut out = String::with_capacity(payload.len());
    let mut depth: i32 = 0;
    for ch in payload.chars() {
        match ch {
            '(' => {
                depth += 1;
                out.push(ch);
            }
            ')' => {
                depth -= 1;
                out.push(ch);
            }
            c if c == from && depth == 0 => out.push(to),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_only_depth_zero() {
        assert_eq!(mask_quotes(r#"["a","b"]"#), "[$a$,$b$]");
        assert_eq!(
            mask_quotes(r#"["x","__TUPLE__([$y$])"]"#),
            "[$x$,$__TUPLE__([$y$])$]"
        );
    }

    #[test]
    fn restore_is_inverse_of_mask() {
        let payloads = [
            r#"["a","b"]"#,
            r#"["x","__TUPLE__([$y$,$__TUPLE__([$z$])$])"]"#,
            r#"{"k":"v","n":"__SET__([$1$])"}"#,
        ];
        for payload in payloads {
            assert_eq!(restore_quotes(&mask_quotes(payload)), payload);
        }
    }

    #[test]
    fn parenthesis_bearing_strings_stay_symmetric() {
        // An unbalanced `(` inside string content shifts the depth counter
        // identically for both transforms, so the pair still inverts.
        let payload = r#"["a(b","c)d"]"#;
        assert_eq!(restore_quotes(&mask_quotes(payload)), payload);
    }

    #[test]
    fn escaped_quotes_inside_strings_round_trip() {
        let payload = r#"["a\"b"]"#;
        let masked = mask_quotes(payload);
        assert!(!masked.contains('"'));
        assert_eq!(restore_quotes(&masked), payload);
    }

    #[test]
    fn deep_placeholders_survive_one_restore() {
        // Depth-two placeholders belong to the inner literal and must wait
        // for its own decode pass.
        let masked = "[$__TUPLE__([$__TUPLE__([$a$])$])$]";
        let restored = restore_quotes(masked);
        assert_eq!(restored, r#"["__TUPLE__([$__TUPLE__([$a$])$])"]"#);
    }
}
