use rocky_core::models::result::Alternative;

const WHEN_BLOCKED: [(&str, f64); 2] = [
    ("Vacuum erection device", 0.65),
    ("Specialist referral", 0.7),
];

const WHEN_ISSUED: [(&str, f64); 3] = [
    ("Sildenafil 25mg on demand", 0.7),
    ("Vardenafil 10mg", 0.65),
    ("Behavioral therapy", 0.6),
];

/// Fixed menu keyed only on whether the primary medication was blocked.
pub fn alternatives(blocked: bool) -> Vec<Alternative> {
    let menu: &[(&str, f64)] = if blocked { &WHEN_BLOCKED } else { &WHEN_ISSUED };
    menu.iter()
        .map(|(option, confidence)| Alternative {
            option: option.to_string(),
            confidence: *confidence,
        })
        .collect()
}
