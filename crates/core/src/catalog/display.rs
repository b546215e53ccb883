//! Canonical display names for catalog vocabulary.

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Catalog vocabulary whose canonical form the title-casing fallback
    /// cannot reproduce (compound words, acronyms).
    static ref DISPLAY_NAMES: HashMap<&'static str, &'static str> = HashMap::from([
        ("standardrange", "StandardRange"),
        ("standardrangeplus", "StandardRangePlus"),
        ("longrange", "LongRange"),
        ("plaidplus", "PlaidPlus"),
        ("destinationfee", "DestinationFee"),
        ("towhitch", "TowHitch"),
        ("arachnidwheels", "ArachnidWheels"),
        ("sportwheels", "SportWheels"),
        ("turbinewheels", "TurbineWheels"),
        ("inductionwheels", "InductionWheels"),
        ("blackandwhiteinterior", "BlackAndWhiteInterior"),
        ("creaminterior", "CreamInterior"),
        ("sixseatinterior", "SixSeatInterior"),
        ("sevenseatinterior", "SevenSeatInterior"),
        ("enhancedautopilot", "EnhancedAutopilot"),
        ("fsd", "FSD"),
    ]);
}

/// Canonical display form for a catalog token.
///
/// Matching is case-insensitive. Tokens not in the vocabulary table fall
/// back to capitalizing the first letter of each word.
pub fn display_name(input: &str) -> String {
    if let Some(display) = DISPLAY_NAMES.get(input.to_lowercase().as_str()) {
        return (*display).to_string();
    }
    title_case(input)
}

fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
