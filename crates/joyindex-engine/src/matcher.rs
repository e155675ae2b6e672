//! Tiered device-name matching.
//!
//! Two naming vocabularies meet here: the names we persist from OS
//! enumeration and the model names the external application records. The
//! matcher is deliberately permissive (it trades precision for the common
//! one-of-each-model case) but strictly ordered: identifier equality beats
//! containment beats fuzzy token overlap, and the first hit wins. The tier
//! that fired is part of the result so callers and tests can tell heuristic
//! matches from exact ones.

/// Which tier produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Case-insensitive identifier (GUID / stable key) equality.
    Identifier,
    /// Case-insensitive substring containment after normalization.
    Contains,
    /// Token-overlap heuristic over the normalized names.
    FuzzyToken,
}

/// The thing being looked up.
#[derive(Debug, Clone, Copy)]
pub struct MatchTarget<'a> {
    pub identifier: Option<&'a str>,
    pub name: &'a str,
}

/// One entry in the candidate list.
#[derive(Debug, Clone, Copy)]
pub struct MatchCandidate<'a> {
    pub identifier: Option<&'a str>,
    pub name: &'a str,
}

/// Brand aliases rewritten to a canonical token before comparison. The OS
/// and the external application disagree on how these vendors spell
/// themselves.
const BRAND_ALIASES: &[(&str, &str)] = &[("vkbsim", "vkb"), ("vpc", "virpil")];

/// Trim, lowercase, and canonicalize brand spellings.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = name.trim().to_ascii_lowercase();
    for (alias, canonical) in BRAND_ALIASES {
        if normalized.contains(alias) {
            normalized = normalized.replace(alias, canonical);
        }
    }
    normalized
}

fn contains_either_way(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// Tokens of a normalized name worth matching on: split on space, hyphen and
/// underscore, drop anything 2 characters or shorter.
fn significant_tokens(normalized: &str) -> Vec<&str> {
    normalized
        .split([' ', '-', '_'])
        .filter(|t| t.len() > 2)
        .collect()
}

fn fuzzy_token_match(target_normalized: &str, candidate_normalized: &str) -> bool {
    let tokens = significant_tokens(target_normalized);
    if tokens.is_empty() {
        return false;
    }
    let threshold = tokens.len().div_ceil(2);
    let hits = tokens
        .iter()
        .filter(|t| candidate_normalized.contains(*t))
        .count();
    hits >= threshold
}

/// Heuristic name equivalence (containment or fuzzy-token tier).
pub fn equivalent(name_a: &str, name_b: &str) -> bool {
    let a = normalize_name(name_a);
    let b = normalize_name(name_b);
    contains_either_way(&a, &b) || fuzzy_token_match(&a, &b)
}

/// Find the best candidate for a target, first hit wins within each tier.
///
/// Returns the candidate position and the tier that fired, or `None` when
/// all three tiers miss (not an error).
pub fn best_match(
    target: &MatchTarget<'_>,
    candidates: &[MatchCandidate<'_>],
) -> Option<(usize, MatchTier)> {
    // Tier 1: identifier equality, highest confidence.
    if let Some(target_id) = target.identifier {
        for (i, candidate) in candidates.iter().enumerate() {
            if let Some(candidate_id) = candidate.identifier {
                if target_id.eq_ignore_ascii_case(candidate_id) {
                    return Some((i, MatchTier::Identifier));
                }
            }
        }
    }

    let target_name = normalize_name(target.name);

    // Tier 2: containment either direction.
    for (i, candidate) in candidates.iter().enumerate() {
        if contains_either_way(&target_name, &normalize_name(candidate.name)) {
            return Some((i, MatchTier::Contains));
        }
    }

    // Tier 3: fuzzy token overlap.
    for (i, candidate) in candidates.iter().enumerate() {
        if fuzzy_token_match(&target_name, &normalize_name(candidate.name)) {
            return Some((i, MatchTier::FuzzyToken));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates<'a>(names: &'a [(&'a str, &'a str)]) -> Vec<MatchCandidate<'a>> {
        names
            .iter()
            .map(|(id, name)| MatchCandidate {
                identifier: if id.is_empty() { None } else { Some(*id) },
                name,
            })
            .collect()
    }

    #[test]
    fn identifier_tier_beats_name_tiers() {
        let cands = candidates(&[
            ("guid-a", "Thrustmaster T.16000M"),
            ("guid-b", "Completely Different"),
        ]);
        let target = MatchTarget {
            identifier: Some("GUID-B"),
            name: "Thrustmaster T.16000M",
        };
        assert_eq!(best_match(&target, &cands), Some((1, MatchTier::Identifier)));
    }

    #[test]
    fn containment_fires_without_identifier() {
        let cands = candidates(&[("", "T.16000M"), ("", "TWCS Throttle")]);
        let target = MatchTarget {
            identifier: None,
            name: "Thrustmaster TWCS Throttle HOTAS",
        };
        assert_eq!(best_match(&target, &cands), Some((1, MatchTier::Contains)));
    }

    #[test]
    fn fuzzy_tier_needs_half_the_tokens() {
        let cands = candidates(&[("", "Gladiator NXT EVO Premium")]);
        // Tokens: "vkb", "gladiator", "nxt" -> threshold 2, hits 2.
        let target = MatchTarget {
            identifier: None,
            name: "VKB Gladiator NXT",
        };
        assert_eq!(best_match(&target, &cands), Some((0, MatchTier::FuzzyToken)));
    }

    #[test]
    fn below_threshold_is_no_match() {
        let cands = candidates(&[("", "Saitek X52 Professional")]);
        let target = MatchTarget {
            identifier: None,
            name: "Honeycomb Alpha Yoke Controls",
        };
        assert_eq!(best_match(&target, &cands), None);
    }

    #[test]
    fn first_hit_wins_within_a_tier() {
        let cands = candidates(&[("", "Stick Mk1"), ("", "Stick Mk2")]);
        let target = MatchTarget {
            identifier: None,
            name: "Stick",
        };
        assert_eq!(best_match(&target, &cands), Some((0, MatchTier::Contains)));
    }

    #[test]
    fn brand_aliases_normalize_to_canonical() {
        assert_eq!(normalize_name("VKBsim Gladiator NXT "), "vkb gladiator nxt");
        assert_eq!(normalize_name("VPC Constellation"), "virpil constellation");
        assert!(equivalent("VKBsim Gladiator NXT", "VKB Gladiator NXT"));
    }

    #[test]
    fn equivalence_is_symmetric_for_containment() {
        assert!(equivalent("T.16000M", "Thrustmaster T.16000M Joystick"));
        assert!(equivalent("Thrustmaster T.16000M Joystick", "T.16000M"));
        assert!(!equivalent("", "Thrustmaster"));
    }

    #[test]
    fn short_tokens_are_ignored_by_the_fuzzy_tier() {
        // "x" and "3d" fall below the length cutoff; only "pro" and
        // "extreme" count.
        let cands = candidates(&[("", "Logitech Extreme 3D Pro")]);
        let target = MatchTarget {
            identifier: None,
            name: "extreme-pro x",
        };
        assert_eq!(best_match(&target, &cands), Some((0, MatchTier::FuzzyToken)));
    }
}
