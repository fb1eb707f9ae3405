//! Code normalization shared by every index build and every join.
//!
//! Codes are case-insensitive primary keys. All comparisons go through
//! [`normalize_code`] so that `acme`, `Acme` and `ACME` name the same record in
//! every collection.

/// Canonical form of a code: uppercase, otherwise untouched.
pub fn normalize_code(code: &str) -> String {
    code.to_uppercase()
}

/// True when two codes name the same record.
pub fn codes_match(a: &str, b: &str) -> bool {
    a == b || normalize_code(a) == normalize_code(b)
}

/// True when `codes` contains `code` under normalization.
pub fn contains_code<S: AsRef<str>>(codes: &[S], code: &str) -> bool {
    let wanted = normalize_code(code);
    codes.iter().any(|c| normalize_code(c.as_ref()) == wanted)
}
