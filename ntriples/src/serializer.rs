use std::io::{self, Write};
use tq_model::Quad;

/// Writes one quad per line in N-Triples form (`<s> <p> <o> .`); the graph
/// position is not encoded — the wire form is triples, not quads.
///
/// Mirrors `oxttl`'s serializer-over-`Write` shape.
#[derive(Default)]
#[must_use]
pub struct Serializer;

impl Serializer {
    pub fn new() -> Self {
        Self
    }

    pub fn write_quad(&self, writer: &mut impl Write, quad: &Quad) -> io::Result<()> {
        writeln!(
            writer,
            "{} {} {} .",
            quad.subject, quad.predicate, quad.object
        )
    }

    pub fn write_all<'a>(
        &self,
        writer: &mut impl Write,
        quads: impl IntoIterator<Item = &'a Quad>,
    ) -> io::Result<()> {
        for quad in quads {
            self.write_quad(writer, quad)?;
        }
        Ok(())
    }
}

/// Convenience wrapper around [`Serializer`] for callers that just want a `String`.
pub fn serialize_to_string<'a>(quads: impl IntoIterator<Item = &'a Quad>) -> String {
    let mut buf = Vec::new();
    Serializer::new()
        .write_all(&mut buf, quads)
        .expect("writing to an in-memory buffer cannot fail");
    String::from_utf8(buf).expect("N-Triples output is always valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tq_model::{LiteralHint, NamedNode, Term};

    #[test]
    fn serializes_plain_triple() {
        let q = Quad::new(
            Term::named("http://example.com/a").unwrap(),
            Term::named("http://example.com/p").unwrap(),
            Term::literal("hi"),
        )
        .unwrap();
        assert_eq!(
            serialize_to_string([&q]),
            "<http://example.com/a> <http://example.com/p> \"hi\" .\n"
        );
    }

    #[test]
    fn serializes_typed_literal_without_xsd_string() {
        let dt = NamedNode::new("http://www.w3.org/2001/XMLSchema#string").unwrap();
        let q = Quad::new(
            Term::named("http://example.com/a").unwrap(),
            Term::named("http://example.com/p").unwrap(),
            Term::literal_with("hi", LiteralHint::Datatype(dt)).unwrap(),
        )
        .unwrap();
        assert_eq!(
            serialize_to_string([&q]),
            "<http://example.com/a> <http://example.com/p> \"hi\" .\n"
        );
    }
}
