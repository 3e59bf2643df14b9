//! Payment card and bank account detection

use super::{candidate_at, extract_context, HeuristicDetector};
use crate::deidentify::models::{Detection, DetectionMethod, PiiType};
use once_cell::sync::Lazy;
use regex::Regex;

/// Visa, Mastercard, Amex, Diners and Discover issuer prefixes
static CARD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:4[0-9]{12}(?:[0-9]{3})?|5[1-5][0-9]{14}|3[47][0-9]{13}|3[0-9]{13}|6(?:011|5[0-9]{2})[0-9]{12})\b",
    )
    .unwrap()
});

static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{9,18}\b").unwrap());

static BANK_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:account|bank|routing|deposit|withdrawal|balance)\b").unwrap()
});

const CARD_CONFIDENCE: f64 = 0.95;
const BANK_ACCOUNT_CONFIDENCE: f64 = 0.85;

/// Luhn mod-10 checksum over the digits of `number`
///
/// Non-digit characters are ignored. Fewer than 13 digits never validates.
pub fn is_valid_luhn(number: &str) -> bool {
    let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 13 {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Card numbers and bank account numbers
pub struct FinancialDetector;

impl FinancialDetector {
    fn detect_cards(text: &str, out: &mut Vec<Detection>) {
        for m in CARD_RE.find_iter(text) {
            if is_valid_luhn(m.as_str()) {
                out.push(candidate_at(
                    text,
                    m.start(),
                    m.end(),
                    PiiType::CreditCard,
                    CARD_CONFIDENCE,
                    DetectionMethod::LuhnAlgorithm,
                ));
            }
        }
    }

    fn detect_bank_accounts(text: &str, out: &mut Vec<Detection>) {
        for m in DIGIT_RUN_RE.find_iter(text) {
            let context = extract_context(text, m.start(), m.end());
            if BANK_KEYWORD_RE.is_match(&context) {
                out.push(
                    Detection::new(
                        PiiType::BankAccount,
                        m.as_str(),
                        BANK_ACCOUNT_CONFIDENCE,
                        DetectionMethod::ContextualNumeric,
                    )
                    .with_context(context),
                );
            }
        }
    }
}

impl HeuristicDetector for FinancialDetector {
    fn name(&self) -> &'static str {
        "financial"
    }

    fn detect(&self, text: &str) -> Vec<Detection> {
        let mut detections = Vec::new();
        Self::detect_cards(text, &mut detections);
        Self::detect_bank_accounts(text, &mut detections);
        detections
    }
}
