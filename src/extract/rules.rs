//! Declarative extraction rules
//!
//! Each target field gets one rule: a primary pattern plus up to two
//! fallback patterns, tried in order against the combined title+description
//! text. Paired rules collect every match and assign the first to the
//! front-axle field and the second to the rear-axle field. One generic
//! evaluator interprets the whole table, so individual rules stay
//! independently testable data.

use crate::extract::record::{Attributes, Field};
use regex::Regex;

/// How a rule's matches map onto fields
#[derive(Debug, Clone, Copy)]
pub enum Target {
    /// First match fills the field
    Single(Field),

    /// All matches collected; first fills `front`, second fills `rear`
    Paired { front: Field, rear: Field },
}

/// Post-match normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalize {
    /// Trim surrounding whitespace (always applied)
    Trim,

    /// Trim, then replace the comma decimal separator with a period
    DecimalComma,
}

/// Static rule descriptor
struct RuleSpec {
    patterns: &'static [&'static str],
    target: Target,
    normalize: Normalize,
}

/// The rule table, in evaluation order
///
/// Patterns deliberately mirror the labels sellers actually type:
/// optional colon, free spacing, Vorderachse/Hinterachse qualifiers on
/// paired attributes.
const RULES: &[RuleSpec] = &[
    RuleSpec {
        patterns: &[
            r"(?i)Felgenhersteller:?\s*([\wäöüÄÖÜß\-\s]+)",
            r"(?i)Felgen\s*:\s*([\wäöüÄÖÜß\-\s]+)",
        ],
        target: Target::Single(Field::Felgenhersteller),
        normalize: Normalize::Trim,
    },
    RuleSpec {
        patterns: &[
            r"(?i)Reifenhersteller:?\s*([\wäöüÄÖÜß\-\s]+)",
            r"(?i)Hersteller:?\s*([\wäöüÄÖÜß\-\s]+)",
        ],
        target: Target::Single(Field::Reifenhersteller),
        normalize: Normalize::Trim,
    },
    RuleSpec {
        patterns: &[
            r"(?i)Farbe:?\s*([A-Za-zäöüÄÖÜß\-\s]+)",
            r"(?i)Pulverbeschichtung in der Farbe\s*([A-Za-zäöüÄÖÜß\-\s]+)",
        ],
        target: Target::Single(Field::Felgenfarbe),
        normalize: Normalize::Trim,
    },
    RuleSpec {
        patterns: &[
            r"(?i)Zoll(?:größe)?\s*:?\s*(\d{1,2})",
            r"(?i)(\d{1,2})\s*Zoll",
        ],
        target: Target::Single(Field::Zollgroesse),
        normalize: Normalize::Trim,
    },
    RuleSpec {
        patterns: &[r"(?i)Lochkreis:?\s*([\d.,/]+)"],
        target: Target::Single(Field::Lochkreis),
        normalize: Normalize::DecimalComma,
    },
    RuleSpec {
        patterns: &[r"(?i)(?:Mittenlochbohrung|Nabendurchmesser):?\s*([\d.,]+)"],
        target: Target::Single(Field::Nabendurchmesser),
        normalize: Normalize::DecimalComma,
    },
    RuleSpec {
        patterns: &[r"(?i)Einpresstiefe(?:\s*(?:Vorderachse|Hinterachse))?\s*:?\s*(\d{1,3})"],
        target: Target::Paired {
            front: Field::EinpresstiefeVorderachse,
            rear: Field::EinpresstiefeHinterachse,
        },
        normalize: Normalize::Trim,
    },
    RuleSpec {
        patterns: &[
            r"(?i)(?:Reifengröße|Maße)(?:\s*(?:Vorderachse|Hinterachse))?\s*:?\s*(\d{3}/\d{2}\s*[Rr]?\s*\d{2})",
        ],
        target: Target::Paired {
            front: Field::ReifengroesseVorderachse,
            rear: Field::ReifengroesseHinterachse,
        },
        normalize: Normalize::Trim,
    },
    RuleSpec {
        patterns: &[r"(?i)(?:Reifensaison|Spezifikation|Saison):?\s*([A-Za-zäöüÄÖÜß\s]+)"],
        target: Target::Single(Field::Reifensaison),
        normalize: Normalize::Trim,
    },
    RuleSpec {
        patterns: &[r"(?i)Profiltiefe(?:\s*(?:Vorderachse|Hinterachse))?\s*:?\s*([\d,.xX\w\s]+)"],
        target: Target::Paired {
            front: Field::ProfiltiefeVorderachse,
            rear: Field::ProfiltiefeHinterachse,
        },
        normalize: Normalize::Trim,
    },
    RuleSpec {
        patterns: &[r"(?i)DOT(?:\s*(?:Vorderachse|Hinterachse))?\s*:?\s*([\d\sxX/]+)"],
        target: Target::Paired {
            front: Field::DotVorderachse,
            rear: Field::DotHinterachse,
        },
        normalize: Normalize::Trim,
    },
];

/// Brand token at the start of a title, optionally preceded by "Original"
///
/// Case-sensitive on purpose: the heuristic keys on a capitalized brand
/// name and is only a last resort when no manufacturer label exists.
const TITLE_BRAND_PATTERN: &str = r"^(?:Original\s+)?([A-ZÄ-Ü][A-Za-zÄ-Üä-ü]+)";

/// A rule with its patterns compiled
struct CompiledRule {
    regexes: Vec<Regex>,
    target: Target,
    normalize: Normalize,
}

/// The compiled rule table
///
/// Construction compiles every pattern once; [`extract`](Ruleset::extract)
/// is a pure function of the input text.
pub struct Ruleset {
    rules: Vec<CompiledRule>,
    title_brand: Regex,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::new()
    }
}

impl Ruleset {
    pub fn new() -> Self {
        let rules = RULES
            .iter()
            .map(|spec| CompiledRule {
                regexes: spec
                    .patterns
                    .iter()
                    .map(|p| Regex::new(p).expect("valid regex"))
                    .collect(),
                target: spec.target,
                normalize: spec.normalize,
            })
            .collect();

        Self {
            rules,
            title_brand: Regex::new(TITLE_BRAND_PATTERN).expect("valid regex"),
        }
    }

    /// Extracts all attribute values from a listing's text
    ///
    /// Title and description are joined into one blob; each rule is
    /// evaluated independently. Fields without a match stay empty. The
    /// tyre-width fields are derived from the resolved size fields and are
    /// never matched directly.
    ///
    /// # Arguments
    ///
    /// * `title` - Listing title
    /// * `description` - Listing description text
    ///
    /// # Returns
    ///
    /// The populated [`Attributes`]
    pub fn extract(&self, title: &str, description: &str) -> Attributes {
        let text = format!("{}\n{}", title, description);
        let mut attrs = Attributes::default();

        for rule in &self.rules {
            match rule.target {
                Target::Single(field) => {
                    if let Some(value) = first_match(&rule.regexes, &text) {
                        attrs.set(field, apply_normalize(&value, rule.normalize));
                    }
                }
                Target::Paired { front, rear } => {
                    let values = all_matches(&rule.regexes[0], &text);
                    if let Some(first) = values.first() {
                        attrs.set(front, apply_normalize(first, rule.normalize));
                    }
                    if let Some(second) = values.get(1) {
                        attrs.set(rear, apply_normalize(second, rule.normalize));
                    }
                }
            }
        }

        // Last-resort manufacturer heuristic: the leading capitalized word
        // of the title, optionally after an "Original" qualifier. May
        // misfire on titles that do not start with a brand.
        if attrs.felgenhersteller.is_empty() {
            if let Some(captures) = self.title_brand.captures(title) {
                attrs.felgenhersteller = captures[1].to_string();
            }
        }

        attrs.reifenbreite_vorderachse = width_from_size(&attrs.reifengroesse_vorderachse);
        attrs.reifenbreite_hinterachse = width_from_size(&attrs.reifengroesse_hinterachse);

        attrs
    }
}

/// Tries patterns in order; the first capturing match wins
fn first_match(regexes: &[Regex], text: &str) -> Option<String> {
    for re in regexes {
        if let Some(captures) = re.captures(text) {
            return Some(captures[1].to_string());
        }
    }
    None
}

/// Collects every non-overlapping match of a paired rule's pattern
fn all_matches(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text).map(|c| c[1].to_string()).collect()
}

fn apply_normalize(value: &str, normalize: Normalize) -> String {
    let trimmed = value.trim();
    match normalize {
        Normalize::Trim => trimmed.to_string(),
        Normalize::DecimalComma => trimmed.replace(',', "."),
    }
}

/// Derives the tyre width from a size like "225/45 R 19": everything
/// before the first slash
fn width_from_size(size: &str) -> String {
    if size.is_empty() {
        return String::new();
    }
    size.split('/').next().unwrap_or("").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(title: &str, description: &str) -> Attributes {
        Ruleset::new().extract(title, description)
    }

    #[test]
    fn test_labelled_manufacturer() {
        let attrs = extract("Alufelgen", "Felgenhersteller: BBS, neuwertig");
        assert_eq!(attrs.felgenhersteller, "BBS");
    }

    #[test]
    fn test_manufacturer_from_title_with_original_qualifier() {
        let attrs = extract("Original BMW Alufelgen", "Sehr guter Zustand.");
        assert_eq!(attrs.felgenhersteller, "BMW");
    }

    #[test]
    fn test_manufacturer_from_title_without_qualifier() {
        let attrs = extract("Borbet Felgen 18 Zoll", "Guter Zustand.");
        assert_eq!(attrs.felgenhersteller, "Borbet");
    }

    #[test]
    fn test_labelled_manufacturer_beats_title_heuristic() {
        let attrs = extract("Original BMW Alufelgen", "Felgenhersteller: BBS, gebraucht");
        assert_eq!(attrs.felgenhersteller, "BBS");
    }

    #[test]
    fn test_tyre_manufacturer_fallback_label() {
        let attrs = extract("Winterreifen", "Hersteller: Continental, wenig gefahren");
        assert_eq!(attrs.reifenhersteller, "Continental");
    }

    #[test]
    fn test_colour() {
        let attrs = extract("Felgen", "Farbe: schwarz matt, Zoll: 19");
        assert_eq!(attrs.felgenfarbe, "schwarz matt");
    }

    #[test]
    fn test_colour_from_powder_coating_phrase() {
        let attrs = extract("Felgen", "Pulverbeschichtung in der Farbe anthrazit, top Zustand");
        assert_eq!(attrs.felgenfarbe, "anthrazit");
    }

    #[test]
    fn test_diameter_labelled_and_from_title() {
        let attrs = extract("Felgen", "Zollgröße: 19, gebraucht");
        assert_eq!(attrs.zollgroesse, "19");

        let attrs = extract("BMW Felgen 18 Zoll", "Guter Zustand.");
        assert_eq!(attrs.zollgroesse, "18");
    }

    #[test]
    fn test_bolt_circle_comma_becomes_period() {
        let attrs = extract("Felgen", "Lochkreis: 5,112");
        assert_eq!(attrs.lochkreis, "5.112");
    }

    #[test]
    fn test_hub_bore_comma_becomes_period() {
        let attrs = extract("Felgen", "Nabendurchmesser: 66,6");
        assert_eq!(attrs.nabendurchmesser, "66.6");

        let attrs = extract("Felgen", "Mittenlochbohrung: 57,1");
        assert_eq!(attrs.nabendurchmesser, "57.1");
    }

    #[test]
    fn test_paired_offset_front_and_rear() {
        let attrs = extract(
            "Felgen",
            "Einpresstiefe: 35\nEinpresstiefe Hinterachse: 42",
        );
        assert_eq!(attrs.einpresstiefe_vorderachse, "35");
        assert_eq!(attrs.einpresstiefe_hinterachse, "42");
    }

    #[test]
    fn test_single_offset_leaves_rear_empty() {
        let attrs = extract("Felgen", "Einpresstiefe: 45");
        assert_eq!(attrs.einpresstiefe_vorderachse, "45");
        assert_eq!(attrs.einpresstiefe_hinterachse, "");
    }

    #[test]
    fn test_paired_sizes_and_derived_widths() {
        let attrs = extract(
            "Kompletträder",
            "Reifengröße Vorderachse: 225/45 R 19\nReifengröße Hinterachse: 255/40 R 19",
        );
        assert_eq!(attrs.reifengroesse_vorderachse, "225/45 R 19");
        assert_eq!(attrs.reifengroesse_hinterachse, "255/40 R 19");
        assert_eq!(attrs.reifenbreite_vorderachse, "225");
        assert_eq!(attrs.reifenbreite_hinterachse, "255");
    }

    #[test]
    fn test_size_from_masse_label() {
        let attrs = extract("Räder", "Maße: 205/55R16");
        assert_eq!(attrs.reifengroesse_vorderachse, "205/55R16");
        assert_eq!(attrs.reifenbreite_vorderachse, "205");
        assert_eq!(attrs.reifenbreite_hinterachse, "");
    }

    #[test]
    fn test_season() {
        let attrs = extract("Räder", "Reifensaison: Winter");
        assert_eq!(attrs.reifensaison, "Winter");
    }

    #[test]
    fn test_paired_tread_depth() {
        let attrs = extract(
            "Räder",
            "Profiltiefe Vorderachse: 7mm; Profiltiefe Hinterachse: 6mm",
        );
        assert_eq!(attrs.profiltiefe_vorderachse, "7mm");
        assert_eq!(attrs.profiltiefe_hinterachse, "6mm");
    }

    #[test]
    fn test_paired_dot_codes() {
        let attrs = extract("Räder", "DOT: 2319, DOT Hinterachse: 1820,");
        assert_eq!(attrs.dot_vorderachse, "2319");
        assert_eq!(attrs.dot_hinterachse, "1820");
    }

    #[test]
    fn test_unmatched_fields_stay_empty() {
        let attrs = extract("irgendwas", "keine technischen Angaben");
        assert_eq!(attrs.lochkreis, "");
        assert_eq!(attrs.einpresstiefe_vorderachse, "");
        assert_eq!(attrs.reifengroesse_vorderachse, "");
        assert_eq!(attrs.dot_hinterachse, "");
    }

    #[test]
    fn test_lowercase_title_defeats_brand_heuristic() {
        let attrs = extract("gebrauchte felgen", "keine Angaben");
        assert_eq!(attrs.felgenhersteller, "");
    }

    #[test]
    fn test_extraction_is_pure() {
        let ruleset = Ruleset::new();
        let a = ruleset.extract("Original BMW Alufelgen", "Lochkreis: 5,112");
        let b = ruleset.extract("Original BMW Alufelgen", "Lochkreis: 5,112");
        assert_eq!(a, b);
    }
}
