use std::collections::HashSet;

// @module: Similarity scoring between a segment key and a candidate window key

/// Heuristic similarity in [0, 1] between a target key and a candidate key.
///
/// Both keys are expected to be normalized already. Lengths are counted in
/// characters, not bytes.
pub fn match_score(target: &str, candidate: &str) -> f64 {
    if target == candidate {
        return 1.0;
    }

    let target_len = target.chars().count();
    let candidate_len = candidate.chars().count();

    if candidate.contains(target) {
        // candidate is strictly longer here, so candidate_len > 0
        return target_len as f64 / candidate_len as f64;
    }

    if target.contains(candidate) {
        return candidate_len as f64 / target_len as f64;
    }

    if target_len == 0 {
        return 0.0;
    }

    let target_chars: HashSet<char> = target.chars().collect();
    let candidate_chars: HashSet<char> = candidate.chars().collect();
    let common = target_chars.intersection(&candidate_chars).count();

    common as f64 / target_len as f64
}
