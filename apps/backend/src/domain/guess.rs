//! Fuzzy matching of free-text guesses against personality names and aliases.

use std::collections::HashSet;

/// A candidate the matcher can score a guess against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub name: String,
}

/// The winning candidate together with its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: String,
    pub name: String,
    pub score: u8,
}

/// Lowercase, strip everything outside `[a-z0-9 ]`, collapse whitespace, trim.
pub fn normalize(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Score a guess against a candidate name, 0..=100.
///
/// Ladder: exact 100, candidate contains input 85, input contains
/// candidate 80, otherwise token-set overlap scaled to 0..=70.
pub fn score_guess(input: &str, candidate: &str) -> u8 {
    let a = normalize(input);
    let b = normalize(candidate);

    if a.is_empty() || b.is_empty() {
        return 0;
    }
    if a == b {
        return 100;
    }
    if b.contains(&a) {
        return 85;
    }
    if a.contains(&b) {
        return 80;
    }

    let ta: HashSet<&str> = a.split_whitespace().collect();
    let tb: HashSet<&str> = b.split_whitespace().collect();
    let overlap = ta.intersection(&tb).count();
    let denom = ta.len().max(tb.len());
    if denom == 0 {
        return 0;
    }
    let ratio = overlap as f64 / denom as f64;
    (ratio * 70.0).round() as u8
}

/// Pick the highest-scoring candidate; first one wins ties. `None` on an
/// empty candidate list.
pub fn best_match(input: &str, candidates: &[Candidate]) -> Option<Match> {
    let mut best: Option<Match> = None;
    for c in candidates {
        let score = score_guess(input, &c.name);
        let better = match &best {
            Some(m) => score > m.score,
            None => true,
        };
        if better {
            best = Some(Match {
                id: c.id.clone(),
                name: c.name.clone(),
                score,
            });
        }
    }
    best
}
