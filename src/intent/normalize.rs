//! Rewrites common mis-transcriptions into the classifier's vocabulary

/// Literal replacements, applied top to bottom.
///
/// A longer pattern must come before any shorter pattern it contains, so a
/// compound mis-hearing is rewritten once.
const CORRECTIONS: &[(&str, &str)] = &[
    ("sweet room", "suite room"),
    ("sweet", "suite"),
    ("checkout", "check out"),
    ("check-out", "check out"),
    ("check in", "check-in"),
];

/// Normalize a raw utterance before classification
pub fn normalize(raw: &str) -> String {
    let mut text = raw.trim().to_lowercase();
    for (heard, meant) in CORRECTIONS {
        if text.contains(heard) {
            text = text.replace(heard, meant);
        }
    }
    text
}
