use crate::error::MalformedWireForm;
use tq_model::{NamedNode, Quad, Term};

/// Parses a full N-Triples document, one quad per syntactically valid line.
///
/// Blank lines and `#`-prefixed comment lines are skipped. Any line that
/// does not parse as a well-formed triple is silently skipped as well — the
/// parser never fails on malformed input. Parsed quads are placed in the
/// default graph; the wire form encodes triples, not quads, so callers
/// that need a graph must pair quads with one out-of-band.
pub fn parse(input: &str) -> Vec<Quad> {
    input.lines().filter_map(parse_line).collect()
}

/// Parses a [`BufRead`](std::io::BufRead) of N-Triples, line by line.
pub fn parse_reader(reader: impl std::io::BufRead) -> Vec<Quad> {
    reader
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| parse_line(&line))
        .collect()
}

/// Strict variant of [`parse`]: yields one `Result` per non-blank,
/// non-comment line instead of silently dropping malformed ones, for
/// callers that want to surface [`MalformedWireForm`] rather than tolerate
/// it. The default [`parse`]/[`parse_reader`] entry points never use this.
pub fn parse_strict(input: &str) -> impl Iterator<Item = Result<Quad, MalformedWireForm>> + '_ {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(index, line)| {
            parse_line(line).ok_or_else(|| MalformedWireForm {
                line_number: index + 1,
                line: line.to_owned(),
            })
        })
}

fn parse_line(line: &str) -> Option<Quad> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let body = line.strip_suffix('.')?.trim_end();
    let (subject_tok, rest) = next_token(body)?;
    let (predicate_tok, rest) = next_token(rest)?;
    let (object_tok, rest) = next_token(rest)?;
    if !rest.trim().is_empty() {
        return None;
    }
    let subject = parse_named_or_blank(subject_tok)?;
    let predicate = parse_named_or_blank(predicate_tok)?;
    let object = parse_object(object_tok)?;
    Quad::new(subject, predicate, object).ok()
}

/// Splits the next whitespace-delimited RDF term token off the front of `s`,
/// respecting quoting inside literals. Returns `(token, remainder)`.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    if let Some(rest) = s.strip_prefix('<') {
        let end = rest.find('>')?;
        Some((&s[..end + 2], &rest[end + 1..]))
    } else if let Some(rest) = s.strip_prefix("_:") {
        let end = rest
            .find(|c: char| c.is_whitespace())
            .unwrap_or(rest.len());
        Some((&s[..end + 2], &rest[end..]))
    } else if s.starts_with('"') {
        let end_quote = find_closing_quote(s)?;
        let mut end = end_quote + 1;
        let after = &s[end..];
        if let Some(rest) = after.strip_prefix('@') {
            let lang_end = rest
                .find(|c: char| c.is_whitespace())
                .unwrap_or(rest.len());
            end += 1 + lang_end;
        } else if let Some(rest) = after.strip_prefix("^^") {
            let rest2 = rest.strip_prefix('<')?;
            let iri_end = rest2.find('>')?;
            end += 2 + 1 + iri_end + 1;
        }
        Some((&s[..end], &s[end..]))
    } else {
        None
    }
}

/// Index (into `s`) of the unescaped `"` that closes the literal opened at `s[0]`.
fn find_closing_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 1;
    let mut escaped = false;
    while i < bytes.len() {
        match bytes[i] {
            _ if escaped => escaped = false,
            b'\\' => escaped = true,
            b'"' => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

fn parse_named_or_blank(tok: &str) -> Option<Term> {
    if let Some(iri) = tok.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
        Term::named(unescape(iri)).ok()
    } else if let Some(id) = tok.strip_prefix("_:") {
        Some(Term::blank(Some(id.to_owned())))
    } else {
        None
    }
}

fn parse_object(tok: &str) -> Option<Term> {
    if !tok.starts_with('"') {
        return parse_named_or_blank(tok);
    }
    let end_quote = find_closing_quote(tok)?;
    let lex = unescape(&tok[1..end_quote]);
    let after = &tok[end_quote + 1..];
    if let Some(lang) = after.strip_prefix('@') {
        Term::literal_with(lex, tq_model::LiteralHint::Language(lang.to_owned())).ok()
    } else if let Some(rest) = after.strip_prefix("^^") {
        let iri = rest.strip_prefix('<')?.strip_suffix('>')?;
        let datatype = NamedNode::new(unescape(iri)).ok()?;
        Term::literal_with(lex, tq_model::LiteralHint::Datatype(datatype)).ok()
    } else if after.is_empty() {
        Some(Term::literal(lex))
    } else {
        None
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
