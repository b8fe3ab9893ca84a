use crate::error::Result;
use aho_corasick::AhoCorasick;
use fancy_regex::Regex;
use rayon::prelude::*;
use regex_syntax::hir::literal::{ExtractKind, Extractor};

/// Literals shorter than this produce too many false candidates to be worth
/// prefiltering on.
const MIN_LITERAL_LEN: usize = 3;

/// Compile a table pattern as a case-insensitive regex.
pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("(?i){}", pattern))?)
}

struct Rule<T> {
    regex: Regex,
    data: T,
}

/// An ordered list of `(pattern, data)` rules with first-match-wins
/// semantics.
///
/// An Aho-Corasick automaton over literals extracted from each pattern
/// narrows the candidate set before any regex runs. The prefilter never
/// reorders: candidates are confirmed in declaration order, and a rule whose
/// literal set cannot be extracted soundly is checked on every input.
pub(crate) struct RuleList<T> {
    rules: Vec<Rule<T>>,
    prefilter: AhoCorasick,
    /// Automaton pattern index → rule index.
    literal_owners: Vec<usize>,
    /// Rules with no usable literal set, ascending.
    always_candidates: Vec<usize>,
}

impl<T> RuleList<T> {
    pub fn build<'p>(items: impl IntoIterator<Item = (&'p str, T)>) -> Result<Self>
    where
        T: Send,
    {
        let (patterns, data): (Vec<&str>, Vec<T>) = items.into_iter().unzip();

        let regexes: Vec<Regex> = patterns
            .par_iter()
            .map(|p| compile_pattern(p))
            .collect::<Result<Vec<_>>>()?;

        let mut ac_literals: Vec<String> = Vec::new();
        let mut literal_owners: Vec<usize> = Vec::new();
        let mut always_candidates: Vec<usize> = Vec::new();

        for (idx, pattern) in patterns.iter().enumerate() {
            match prefilter_literals(pattern) {
                Some(literals) => {
                    for lit in literals {
                        ac_literals.push(lit);
                        literal_owners.push(idx);
                    }
                }
                None => always_candidates.push(idx),
            }
        }

        let prefilter = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&ac_literals)?;

        let rules = regexes
            .into_iter()
            .zip(data)
            .map(|(regex, data)| Rule { regex, data })
            .collect();

        Ok(Self {
            rules,
            prefilter,
            literal_owners,
            always_candidates,
        })
    }

    /// Data of the first rule, in declaration order, whose regex matches.
    pub fn first_match(&self, input: &str) -> Option<&T> {
        let mut candidates = self.always_candidates.clone();
        for m in self.prefilter.find_overlapping_iter(input) {
            candidates.push(self.literal_owners[m.pattern().as_usize()]);
        }
        candidates.sort_unstable();
        candidates.dedup();

        candidates.into_iter().find_map(|idx| {
            let rule = &self.rules[idx];
            if rule.regex.is_match(input).unwrap_or(false) {
                Some(&rule.data)
            } else {
                None
            }
        })
    }

    #[cfg(test)]
    pub fn always_candidate_count(&self) -> usize {
        self.always_candidates.len()
    }
}

/// Literals every match of `pattern` must contain, or `None` when no sound
/// finite set exists.
///
/// Soundness rule: dropping a single too-short (or non-UTF-8) literal would
/// let a matching input slip past the automaton, so any unusable literal
/// disqualifies the whole set rather than just itself.
fn prefilter_literals(pattern: &str) -> Option<Vec<String>> {
    let hir = regex_syntax::parse(pattern).ok()?;

    let mut extractor = Extractor::new();
    extractor.kind(ExtractKind::Prefix);
    let seq = extractor.extract(&hir);

    let literals = seq.literals()?;
    if literals.is_empty() {
        return None;
    }

    let mut out = Vec::with_capacity(literals.len());
    for lit in literals {
        let s = std::str::from_utf8(lit.as_bytes()).ok()?;
        if s.len() < MIN_LITERAL_LEN {
            return None;
        }
        out.push(s.to_lowercase());
    }
    Some(out)
}
