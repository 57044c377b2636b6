//! Signal document parsing.
//!
//! Documents are JSON (strict) or JSON5 (trailing commas, comments,
//! unquoted keys) describing a titled list of signals. Classification
//! fields arrive as free-form tokens; drivers outside the STEEP list fall
//! back to `Unclassified`, while an unknown maturity is an error because
//! every signal must land on exactly one ring.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::ir::{Driver, MapVariant, Maturity, Polarity, Signal, SignalSet};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid signal document: {0}")]
    Syntax(String),
    #[error("duplicate signal id `{0}`")]
    DuplicateId(String),
    #[error("signal `{0}` has an empty name")]
    EmptyName(String),
    #[error("signal `{id}` has unknown maturity `{token}`")]
    UnknownMaturity { id: String, token: String },
    #[error("signal `{id}` has unknown polarity `{token}`")]
    UnknownPolarity { id: String, token: String },
    #[error("unknown map variant `{0}`")]
    UnknownVariant(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignalDoc {
    title: Option<String>,
    variant: Option<String>,
    #[serde(default)]
    signals: Vec<SignalEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignalEntry {
    id: String,
    name: String,
    maturity: String,
    #[serde(default)]
    driver: Option<String>,
    #[serde(default)]
    polarity: Option<String>,
}

/// Parse a signal document from JSON or JSON5 text.
pub fn parse_signals(input: &str) -> Result<SignalSet, ParseError> {
    let doc: SignalDoc = match serde_json::from_str(input) {
        Ok(doc) => doc,
        // Not strict JSON; retry with the lenient front end and report
        // its error, which covers both syntaxes.
        Err(_) => json5::from_str(input).map_err(|err| ParseError::Syntax(err.to_string()))?,
    };

    let variant = match doc.variant.as_deref() {
        None => MapVariant::Full,
        Some(token) => MapVariant::from_token(token)
            .ok_or_else(|| ParseError::UnknownVariant(token.to_string()))?,
    };

    let mut set = SignalSet::new(variant);
    set.title = doc.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());

    let mut seen: HashSet<String> = HashSet::new();
    for entry in doc.signals {
        let id = entry.id.trim().to_string();
        if !seen.insert(id.clone()) {
            return Err(ParseError::DuplicateId(id));
        }
        let name = entry.name.trim().to_string();
        if name.is_empty() {
            return Err(ParseError::EmptyName(id));
        }
        let maturity = Maturity::from_token(&entry.maturity).ok_or_else(|| {
            ParseError::UnknownMaturity {
                id: id.clone(),
                token: entry.maturity.clone(),
            }
        })?;
        let driver = entry
            .driver
            .as_deref()
            .map(Driver::from_token)
            .unwrap_or(Driver::Unclassified);
        let polarity = match entry.polarity.as_deref() {
            // Split maps without an explicit polarity default to the
            // opportunity half; full maps ignore the axis anyway.
            None => Polarity::Opportunity,
            Some(token) => Polarity::from_token(token).ok_or_else(|| {
                ParseError::UnknownPolarity {
                    id: id.clone(),
                    token: token.to_string(),
                }
            })?,
        };

        set.signals.push(Signal {
            id,
            name,
            maturity,
            driver,
            polarity,
        });
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = r#"{
        "title": "Horizon scan",
        "signals": [
            {"id": "edge-ai", "name": "Edge AI accelerators", "maturity": "emerging", "driver": "technological"},
            {"id": "gig-care", "name": "Gig economy elder care", "maturity": "growing", "driver": "social"}
        ]
    }"#;

    #[test]
    fn parses_strict_json() {
        let set = parse_signals(BASIC).unwrap();
        assert_eq!(set.title.as_deref(), Some("Horizon scan"));
        assert_eq!(set.variant, MapVariant::Full);
        assert_eq!(set.signals.len(), 2);
        assert_eq!(set.signals[0].driver, Driver::Technological);
    }

    #[test]
    fn parses_json5_with_comments_and_trailing_commas() {
        let input = r#"{
            // quarterly sweep
            variant: 'split',
            signals: [
                {id: 'carbon', name: 'Carbon border tariffs', maturity: 'established', driver: 'political', polarity: 'risk'},
            ],
        }"#;
        let set = parse_signals(input).unwrap();
        assert_eq!(set.variant, MapVariant::Split);
        assert_eq!(set.signals[0].polarity, Polarity::Risk);
    }

    #[test]
    fn unknown_driver_token_is_not_an_error() {
        let input = r#"{"signals": [{"id": "x", "name": "X", "maturity": "emerging", "driver": "astral"}]}"#;
        let set = parse_signals(input).unwrap();
        assert_eq!(set.signals[0].driver, Driver::Unclassified);
    }

    #[test]
    fn missing_polarity_defaults_to_opportunity() {
        let input = r#"{"variant": "split", "signals": [{"id": "x", "name": "X", "maturity": "emerging"}]}"#;
        let set = parse_signals(input).unwrap();
        assert_eq!(set.signals[0].polarity, Polarity::Opportunity);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let input = r#"{"signals": [
            {"id": "x", "name": "One", "maturity": "emerging"},
            {"id": "x", "name": "Two", "maturity": "growing"}
        ]}"#;
        assert!(matches!(
            parse_signals(input),
            Err(ParseError::DuplicateId(id)) if id == "x"
        ));
    }

    #[test]
    fn unknown_maturity_is_an_error() {
        let input = r#"{"signals": [{"id": "x", "name": "X", "maturity": "interdimensional"}]}"#;
        assert!(matches!(
            parse_signals(input),
            Err(ParseError::UnknownMaturity { .. })
        ));
    }

    #[test]
    fn garbage_input_reports_syntax() {
        assert!(matches!(
            parse_signals("signals: ["),
            Err(ParseError::Syntax(_))
        ));
    }

    #[test]
    fn empty_document_parses_to_empty_set() {
        let set = parse_signals("{}").unwrap();
        assert!(set.signals.is_empty());
        assert_eq!(set.variant, MapVariant::Full);
    }
}
