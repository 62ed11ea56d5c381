//! Detection of tokens assembled at runtime.
//!
//! `bg-[var(--${tone})]` or `'--' + name` cannot be mapped statically;
//! such findings are reported but never rewritten.

/// Characters that only appear in a token built from an expression.
const DYNAMIC_CHARS: [char; 4] = ['$', '{', '}', '+'];

/// Whether the token text itself carries template or concatenation syntax.
pub fn is_dynamic_token(token: &str) -> bool {
    token.contains(DYNAMIC_CHARS)
}

/// Whether `offset` sits inside a `${ ... }` interpolation opened earlier on
/// the same line and not yet closed.
pub fn inside_interpolation(content: &str, offset: usize) -> bool {
    let line_start = content[..offset].rfind('\n').map_or(0, |i| i + 1);
    let bytes = content[line_start..offset].as_bytes();

    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                depth += 1;
                i += 1;
            }
            b'{' if depth > 0 => depth += 1,
            b'}' if depth > 0 => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    depth > 0
}

/// Combined check for one match.
pub fn is_dynamic(content: &str, match_start: usize, token: &str) -> bool {
    is_dynamic_token(token) || inside_interpolation(content, match_start)
}
