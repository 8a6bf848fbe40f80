//! Post body rendering - converts the lightweight markup subset to HTML

/// Render a post body written in the site's markup subset as an HTML
/// fragment.
///
/// Line conventions, applied before block assembly: `### ` and `## `
/// headings, `> ` blockquotes (the `> "quoted"` form keeps its quote
/// marks), `**bold**` spans, `- ` bullets, and `1. ` numbered items
/// (the ordinal is dropped). Blocks are split on blank lines; runs of
/// list items are wrapped in `<ul>`, headings and blockquotes pass
/// through, and everything else becomes a paragraph with internal
/// newlines collapsed to spaces.
///
/// This is a line-oriented best-effort transform, not a Markdown
/// grammar: no nested lists, links, images, code spans, or marker
/// escaping. It is pure and total - content with none of the
/// conventions falls through to plain paragraphs.
pub fn render_html(content: &str) -> String {
    let lines: Vec<String> = content.lines().map(transform_line).collect();
    let transformed = bold_spans(&lines.join("\n"));

    transformed
        .split("\n\n")
        .filter_map(assemble_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn transform_line(line: &str) -> String {
    if let Some(text) = prefixed(line, "### ") {
        return format!("<h3>{}</h3>", text);
    }
    if let Some(text) = prefixed(line, "## ") {
        return format!("<h2>{}</h2>", text);
    }
    if let Some(text) = prefixed(line, "> ") {
        return format!("<blockquote>{}</blockquote>", text);
    }
    if let Some(text) = prefixed(line, "- ") {
        return format!("<li>{}</li>", text);
    }
    if let Some(text) = numbered_item(line) {
        return format!("<li>{}</li>", text);
    }
    line.to_string()
}

/// Marker match requiring at least one character of payload
fn prefixed<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    match line.strip_prefix(marker) {
        Some(rest) if !rest.is_empty() => Some(rest),
        _ => None,
    }
}

/// `<digits>. ` at the start of a line, returning the remainder
fn numbered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix(". ")?;
    (!rest.is_empty()).then_some(rest)
}

/// Replace `**span**` with `<strong>span</strong>`.
///
/// Non-greedy and non-nesting: a span runs to the next `*`, which must
/// open a literal closing `**`; otherwise the opener is left in place.
fn bold_spans(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        match after.find('*') {
            Some(end) if end > 0 && after[end..].starts_with("**") => {
                out.push_str(&rest[..start]);
                out.push_str("<strong>");
                out.push_str(&after[..end]);
                out.push_str("</strong>");
                rest = &after[end + 2..];
            }
            _ => {
                // Unclosed or empty span: keep one character and rescan.
                out.push_str(&rest[..start + 1]);
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn assemble_block(block: &str) -> Option<String> {
    let trimmed = block.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("<h2>")
        || trimmed.starts_with("<h3>")
        || trimmed.starts_with("<blockquote>")
    {
        return Some(trimmed.to_string());
    }
    if trimmed.starts_with("<li>") {
        return Some(format!("<ul>{}</ul>", trimmed.replace('\n', "")));
    }
    Some(format!("<p>{}</p>", trimmed.replace('\n', " ")))
}
