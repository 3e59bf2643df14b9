//! Hand-maintained exclusion lists for heuristic candidates

/// Phrases that look like PII to the capitalization and context heuristics
/// but are not. Matched by case-insensitive containment in either direction.
const FALSE_POSITIVES: &[&str] = &[
    // Geographic locations
    "United States",
    "New York",
    "Los Angeles",
    "San Francisco",
    "Las Vegas",
    "San Diego",
    "San Antonio",
    "Fort Worth",
    "New Jersey",
    "North Carolina",
    // Companies and organizations
    "Microsoft Corporation",
    "Apple Inc",
    "Google LLC",
    "Amazon Web",
    "Meta Platforms",
    "Tesla Inc",
    "Netflix Inc",
    "Adobe Systems",
    "Oracle Corporation",
    // Field labels
    "First Name",
    "Last Name",
    "Full Name",
    "User Name",
    "Display Name",
    "Real Name",
    "Given Name",
    "Family Name",
    "Middle Name",
    // Technical terms
    "Data Source",
    "Email Address",
    "Phone Number",
    "Social Security",
    "Credit Card",
    "Bank Account",
    "User Interface",
    "Machine Learning",
    // Days and months
    "Monday Tuesday",
    "January February",
    "Christmas Day",
    "New Year",
    // Salutations
    "Dear Sir",
    "Dear Madam",
    "To Whom",
    "Best Regards",
    "Thank You",
];

/// Function words; a candidate made only of these is rejected
const STOP_WORDS: &[&str] = &[
    "about", "after", "again", "against", "all", "any", "are", "because", "been", "before",
    "being", "below", "between", "both", "but", "can", "did", "does", "doing", "down", "during",
    "each", "few", "for", "from", "further", "had", "has", "have", "having", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "into", "its", "itself", "more", "most",
    "much", "nor", "not", "now", "off", "once", "only", "other", "our", "ours", "ourselves",
    "out", "over", "own", "same", "she", "should", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "too", "under", "until", "very", "was", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Whether `text` matches the false-positive phrase list
pub fn is_common_false_positive(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return true;
    }
    FALSE_POSITIVES.iter().any(|fp| {
        let fp = fp.to_lowercase();
        lower.contains(&fp) || fp.contains(&lower)
    })
}

/// Whether every token of `text` is a stop word
pub fn is_common_word(text: &str) -> bool {
    let lower = text.to_lowercase();
    let mut tokens = lower.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return false;
    }
    tokens.all(|token| STOP_WORDS.contains(&token))
}

/// Whether a heuristic candidate should be discarded
pub fn is_excluded(text: &str) -> bool {
    is_common_false_positive(text) || is_common_word(text)
}
