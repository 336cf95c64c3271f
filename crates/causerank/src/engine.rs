//! Baseline answer engine
//!
//! A deliberately simple token-overlap implementation of the
//! [`AnswerEngine`] seam so the system runs end to end. Page selection
//! uses exact token overlap; sentence scoring applies the `lch`
//! threshold to an LCH-style token similarity where an exact match
//! scores the WordNet-style maximum and a shared stem scores below it.

use causerank_core::{Answer, AnswerEngine, AnswerTask, Index, Query, RankedAnswers, Result};
use std::collections::HashSet;

/// Maximum LCH-style similarity, reached by identical tokens.
const SIM_EXACT: f64 = 3.6889;
/// Similarity credited to tokens sharing a stem.
const SIM_STEM: f64 = 2.5;
/// Minimum shared prefix length for a stem match.
const STEM_PREFIX: usize = 4;

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "did", "do", "does", "for", "how", "in", "is",
    "it", "of", "on", "or", "that", "the", "this", "to", "was", "were", "what", "which", "who",
    "why", "with",
];

/// Token-overlap baseline engine
#[derive(Debug, Default)]
pub struct OverlapEngine;

impl OverlapEngine {
    /// Create a new engine
    pub fn new() -> Self {
        Self
    }
}

/// Lowercase tokens with stopwords removed, in input order.
fn tokenize(text: &str) -> Vec<String> {
    raw_tokens(text)
        .into_iter()
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .collect()
}

/// Lowercase tokens including stopwords, in input order.
fn raw_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Closed-class tag lookup; everything else is tagged NN.
fn tag(token: &str) -> &'static str {
    match token {
        "why" | "how" => "WRB",
        "what" | "which" | "who" => "WP",
        "do" | "does" | "did" => "VBP",
        "be" | "is" | "are" | "was" | "were" => "VB",
        "a" | "an" | "the" => "DT",
        "at" | "by" | "for" | "in" | "of" | "on" | "to" | "with" => "IN",
        "and" | "or" => "CC",
        "not" => "RB",
        _ => "NN",
    }
}

/// Annotated form of the question: `token/TAG` joined by spaces.
fn tag_query(text: &str) -> String {
    raw_tokens(text)
        .iter()
        .map(|t| format!("{}/{}", t, tag(t)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// LCH-style similarity between two tokens.
fn token_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return SIM_EXACT;
    }
    let shared = a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count();
    if shared >= STEM_PREFIX && (shared == a.chars().count() || shared == b.chars().count()) {
        return SIM_STEM;
    }
    0.0
}

/// Split page text into candidate answer sentences.
fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '?', '!'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

impl AnswerEngine for OverlapEngine {
    fn prepare(&self, index: &Index, query: &Query) -> Result<AnswerTask> {
        let ir_query = tokenize(&query.text);
        let terms: HashSet<&str> = ir_query.iter().map(String::as_str).collect();

        // Corpus coverage: pages past the offset sharing a term.
        let num_pages = index
            .pages()
            .iter()
            .skip(query.start)
            .filter(|page| {
                raw_tokens(&page.text)
                    .iter()
                    .any(|t| terms.contains(t.as_str()))
            })
            .count();

        Ok(AnswerTask {
            query_id: query.id.clone(),
            text: query.text.clone(),
            ir_query,
            num_pages,
            start: query.start,
            top: query.top,
            lch: query.lch,
        })
    }

    fn compute(&self, index: &Index, task: &AnswerTask) -> Result<RankedAnswers> {
        let terms: HashSet<&str> = task.ir_query.iter().map(String::as_str).collect();

        // Select the `top` pages by exact term overlap.
        let mut pages: Vec<(usize, &str)> = index
            .pages()
            .iter()
            .skip(task.start)
            .filter_map(|page| {
                let page_terms: HashSet<String> = raw_tokens(&page.text).into_iter().collect();
                let overlap = terms
                    .iter()
                    .filter(|t| page_terms.contains(**t))
                    .count();
                (overlap > 0).then_some((overlap, page.text.as_str()))
            })
            .collect();
        pages.sort_by(|a, b| b.0.cmp(&a.0));
        pages.truncate(task.top);

        // Score every sentence of the selected pages against the
        // query terms with the lch threshold.
        let mut scored: Vec<(usize, f64, Answer)> = Vec::new();
        for (_, text) in &pages {
            for sentence in sentences(text) {
                let sent_tokens = tokenize(sentence);
                let mut matched = 0usize;
                let mut sim_sum = 0.0f64;
                for term in &task.ir_query {
                    let best = sent_tokens
                        .iter()
                        .map(|t| token_similarity(term, t))
                        .fold(0.0f64, f64::max);
                    if best >= task.lch {
                        matched += 1;
                        sim_sum += best;
                    }
                }
                if matched > 0 {
                    let answer = Answer {
                        display: sentence.to_string(),
                        features: vec![matched as f64, sim_sum, sent_tokens.len() as f64],
                    };
                    scored.push((matched, sim_sum, answer));
                }
            }
        }
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.total_cmp(&a.1)));

        Ok(RankedAnswers {
            query_id: task.query_id.clone(),
            answers: scored.into_iter().map(|(_, _, a)| a).collect(),
            tagged_query: tag_query(&task.text),
        })
    }
}
