use crate::error::ModelError;
use crate::named_node::NamedNode;
use crate::vocab::{rdf, xsd};
use oxilangtag::LanguageTag;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;

/// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#dfn-literal): a
/// lexical value paired with either a language tag or a datatype IRI.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Literal(LiteralContent);

#[derive(Eq, PartialEq, Debug, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
enum LiteralContent {
    Simple(String),
    LanguageTagged { value: String, language: String },
    Typed { value: String, datatype: NamedNode },
}

impl Literal {
    /// Builds a simple literal (datatype `xsd:string`).
    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        Self(LiteralContent::Simple(value.into()))
    }

    /// Builds a language-tagged literal (datatype `rdf:langString`).
    ///
    /// Fails with [`ModelError::InvalidTerm`] if `language` is not a valid
    /// BCP47 tag.
    pub fn new_language_tagged(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let mut language = language.into();
        language.make_ascii_lowercase();
        let language = LanguageTag::parse(language)
            .map_err(|e| ModelError::invalid_term(e.to_string()))?
            .into_inner();
        Ok(Self(LiteralContent::LanguageTagged {
            value: value.into(),
            language,
        }))
    }

    /// Builds a typed literal with an explicit datatype.
    ///
    /// Fails with [`ModelError::InvalidTerm`] if `datatype` is `rdf:langString`
    /// — that datatype is reserved for [`Literal::new_language_tagged`], since
    /// a language-tagged literal without a language tag is not well-formed.
    pub fn new_typed(value: impl Into<String>, datatype: NamedNode) -> Result<Self, ModelError> {
        if datatype == rdf::lang_string() {
            return Err(ModelError::invalid_term(
                "rdf:langString literals must carry a language tag; use new_language_tagged",
            ));
        }
        let value = value.into();
        Ok(if datatype == xsd::string() {
            Self(LiteralContent::Simple(value))
        } else {
            Self(LiteralContent::Typed { value, datatype })
        })
    }

    /// The lexical form.
    #[inline]
    pub fn value(&self) -> &str {
        match &self.0 {
            LiteralContent::Simple(v)
            | LiteralContent::LanguageTagged { value: v, .. }
            | LiteralContent::Typed { value: v, .. } => v,
        }
    }

    /// The BCP47 language tag, if this is a language-tagged literal.
    #[inline]
    pub fn language(&self) -> Option<&str> {
        match &self.0 {
            LiteralContent::LanguageTagged { language, .. } => Some(language),
            _ => None,
        }
    }

    /// The datatype. `rdf:langString` for language-tagged literals,
    /// `xsd:string` for simple literals, the explicit datatype otherwise.
    #[inline]
    pub fn datatype(&self) -> NamedNode {
        match &self.0 {
            LiteralContent::Simple(_) => xsd::string(),
            LiteralContent::LanguageTagged { .. } => rdf::lang_string(),
            LiteralContent::Typed { datatype, .. } => datatype.clone(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for c in self.value().chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '"' => f.write_str("\\\"")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                c => f.write_char(c)?,
            }
        }
        f.write_char('"')?;
        match &self.0 {
            LiteralContent::Simple(_) => Ok(()),
            LiteralContent::LanguageTagged { language, .. } => write!(f, "@{language}"),
            LiteralContent::Typed { datatype, .. } => write!(f, "^^{datatype}"),
        }
    }
}
