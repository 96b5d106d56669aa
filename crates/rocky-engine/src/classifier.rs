//! Free-text medication and allergy lists, reduced to tokens.
//!
//! Membership is plain substring containment: `"losartan-tadalafil combo"`
//! belongs to the PDE5 inhibitor class. Synonyms and misspellings are not
//! resolved, so an unrecognised name never matches.

use crate::rules::DrugClass;

/// Lowercase, split on `,` and `;`, trim, and drop empty tokens.
/// Input order is preserved.
pub fn normalize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split([',', ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// True when any token contains any member of `class`.
pub fn class_match<S: AsRef<str>>(tokens: &[S], class: &DrugClass) -> bool {
    tokens.iter().any(|token| {
        class
            .members
            .iter()
            .any(|member| token.as_ref().contains(member))
    })
}
