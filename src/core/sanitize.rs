// src/core/sanitize.rs

/// Collapse every whitespace run (newlines included) into one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Table cell text: commas become semicolons, whitespace collapsed, trimmed.
pub fn table_field(s: &str) -> String {
    normalize_ws(&s.replace(',', ";"))
}

/// Drop a single leading `<digits>.<whitespace>` marker, but only when
/// non-space content follows it. `"3. Foo"` → `"Foo"`, `"3.   "` unchanged.
pub fn strip_leading_number(s: &str) -> &str {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 { return s; }
    let Some(after_dot) = s[digits..].strip_prefix('.') else { return s };
    let rest = after_dot.trim_start();
    if rest.len() == after_dot.len() || rest.is_empty() {
        return s;
    }
    rest
}

/// List item text: leading whitespace dropped, numbering stripped,
/// whitespace collapsed, trimmed.
pub fn list_item_text(s: &str) -> String {
    normalize_ws(strip_leading_number(s.trim_start()))
}
