use crate::snapshot::TemporalOptions;
use crate::store::{GraphMeta, TemporalStore};
use rustc_hash::FxHashMap;
use tq_model::{Quad, Term};

/// A partial quad for [`TemporalStore::query`]: each position is either
/// bound to a term or left as a wildcard (`None`).
#[derive(Debug, Clone, Default)]
pub struct ScanPattern {
    pub subject: Option<Term>,
    pub predicate: Option<Term>,
    pub object: Option<Term>,
}

impl ScanPattern {
    fn matches(&self, quad: &Quad) -> bool {
        self.subject.as_ref().map_or(true, |t| *t == quad.subject)
            && self
                .predicate
                .as_ref()
                .map_or(true, |t| *t == quad.predicate)
            && self.object.as_ref().map_or(true, |t| *t == quad.object)
    }
}

/// One position of a [`TriplePattern`]: a bound term, a wildcard, or a
/// named variable — a closed three-case tagged variant rather than a
/// nullable term plus a side table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternElement {
    Term(Term),
    Wildcard,
    Variable(String),
}

/// One triple pattern of a [`TemporalStore::select`] basic graph pattern.
#[derive(Debug, Clone)]
pub struct TriplePattern {
    pub subject: PatternElement,
    pub predicate: PatternElement,
    pub object: PatternElement,
}

/// A variable binding produced by [`TemporalStore::select`].
pub type Binding = FxHashMap<String, Term>;

/// The result of a [`TemporalStore::select`] call.
#[derive(Debug, Clone, Default)]
pub struct SelectResult {
    pub bindings: Vec<Binding>,
    /// Every variable name appearing anywhere in the pattern set, in
    /// first-appearance order.
    pub variables: Vec<String>,
}

/// One triple of a [`TemporalStore::construct`] template: a bound term or a
/// variable to substitute (no wildcard — a template position that isn't a
/// fixed term must come from a binding).
#[derive(Debug, Clone)]
pub enum TemplateElement {
    Term(Term),
    Variable(String),
}

#[derive(Debug, Clone)]
pub struct TemplateTriple {
    pub subject: TemplateElement,
    pub predicate: TemplateElement,
    pub object: TemplateElement,
}

fn visible(meta: &GraphMeta, options: &TemporalOptions) -> bool {
    if let Some(version) = options.version {
        if meta.version != version {
            return false;
        }
    }
    if let Some(as_of) = options.as_of {
        let in_range = meta.valid_from <= as_of && meta.valid_to.map_or(true, |vt| as_of < vt);
        if !in_range {
            return false;
        }
    }
    if let Some(as_recorded) = options.as_recorded {
        if meta.transaction_time > as_recorded {
            return false;
        }
    }
    if options.current_only && meta.valid_to.is_some() {
        return false;
    }
    true
}

fn bind_slot(elem: &PatternElement, value: &Term, binding: &mut Binding) -> bool {
    match elem {
        PatternElement::Wildcard => true,
        PatternElement::Term(t) => t == value,
        PatternElement::Variable(name) => match binding.get(name) {
            Some(existing) => existing == value,
            None => {
                binding.insert(name.clone(), value.clone());
                true
            }
        },
    }
}

fn match_triple_pattern(pattern: &TriplePattern, quad: &Quad) -> Option<Binding> {
    let mut binding = Binding::default();
    if bind_slot(&pattern.subject, &quad.subject, &mut binding)
        && bind_slot(&pattern.predicate, &quad.predicate, &mut binding)
        && bind_slot(&pattern.object, &quad.object, &mut binding)
    {
        Some(binding)
    } else {
        None
    }
}

fn substitute_element(elem: &PatternElement, binding: &Binding) -> PatternElement {
    match elem {
        PatternElement::Variable(name) => binding
            .get(name)
            .map_or_else(|| elem.clone(), |t| PatternElement::Term(t.clone())),
        other => other.clone(),
    }
}

fn substitute(pattern: &TriplePattern, binding: &Binding) -> TriplePattern {
    TriplePattern {
        subject: substitute_element(&pattern.subject, binding),
        predicate: substitute_element(&pattern.predicate, binding),
        object: substitute_element(&pattern.object, binding),
    }
}

/// Evaluates a basic graph pattern within a single graph's quads, matching
/// the first pattern and recursing on the rest with its bindings
/// substituted in. There is no cross-graph join; callers concatenate
/// per-graph results in graph-insertion order.
fn eval_in_graph(patterns: &[TriplePattern], quads: &[Quad]) -> Vec<Binding> {
    let Some((first, rest)) = patterns.split_first() else {
        return vec![Binding::default()];
    };
    let mut out = Vec::new();
    for quad in quads {
        let Some(binding) = match_triple_pattern(first, quad) else {
            continue;
        };
        if rest.is_empty() {
            out.push(binding);
            continue;
        }
        let substituted_rest: Vec<TriplePattern> =
            rest.iter().map(|p| substitute(p, &binding)).collect();
        for mut tail in eval_in_graph(&substituted_rest, quads) {
            tail.extend(binding.clone());
            out.push(tail);
        }
    }
    out
}

fn collect_variables(patterns: &[TriplePattern]) -> Vec<String> {
    let mut seen = rustc_hash::FxHashSet::default();
    let mut names = Vec::new();
    for pattern in patterns {
        for elem in [&pattern.subject, &pattern.predicate, &pattern.object] {
            if let PatternElement::Variable(name) = elem {
                if seen.insert(name.clone()) {
                    names.push(name.clone());
                }
            }
        }
    }
    names
}

fn resolve_template_element(elem: &TemplateElement, binding: &Binding) -> Option<Term> {
    match elem {
        TemplateElement::Term(t) => Some(t.clone()),
        TemplateElement::Variable(name) => binding.get(name).cloned(),
    }
}

fn instantiate(template: &TemplateTriple, binding: &Binding) -> Option<Quad> {
    let subject = resolve_template_element(&template.subject, binding)?;
    let predicate = resolve_template_element(&template.predicate, binding)?;
    let object = resolve_template_element(&template.object, binding)?;
    Quad::new(subject, predicate, object).ok()
}

impl TemporalStore {
    /// Single-pattern scan. Graphs are visited in insertion order;
    /// within a graph, quads are returned in insertion order.
    pub fn query(&self, pattern: &ScanPattern, options: &TemporalOptions) -> Vec<Quad> {
        let state = self.read_state();
        let mut result = Vec::new();
        for graph_uri in &state.graph_order {
            let Some(meta) = state.graph_meta.get(graph_uri) else {
                continue;
            };
            if !visible(meta, options) {
                continue;
            }
            if let Some(quads) = state.graphs.get(graph_uri) {
                result.extend(quads.iter().filter(|q| pattern.matches(q)).cloned());
            }
        }
        result
    }

    /// Multi-pattern basic graph pattern join. No cross-graph join:
    /// each surviving graph is evaluated independently and results are
    /// concatenated in graph-insertion order, with no deduplication.
    pub fn select(&self, patterns: &[TriplePattern], options: &TemporalOptions) -> SelectResult {
        let variables = collect_variables(patterns);
        let state = self.read_state();
        let mut bindings = Vec::new();
        for graph_uri in &state.graph_order {
            let Some(meta) = state.graph_meta.get(graph_uri) else {
                continue;
            };
            if !visible(meta, options) {
                continue;
            }
            if let Some(quads) = state.graphs.get(graph_uri) {
                bindings.extend(eval_in_graph(patterns, quads));
            }
        }
        SelectResult {
            bindings,
            variables,
        }
    }

    /// CONSTRUCT projection: evaluates `select(patterns)`, then
    /// instantiates each template triple per binding. A template triple with
    /// an unbound variable, or one whose instantiation is not a legal quad,
    /// is skipped rather than erroring.
    pub fn construct(
        &self,
        template: &[TemplateTriple],
        patterns: &[TriplePattern],
        options: &TemporalOptions,
    ) -> Vec<Quad> {
        let result = self.select(patterns, options);
        let mut quads = Vec::new();
        for binding in &result.bindings {
            for triple in template {
                if let Some(quad) = instantiate(triple, binding) {
                    quads.push(quad);
                }
            }
        }
        quads
    }
}
