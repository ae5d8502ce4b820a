use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;
use std::collections::HashMap;

// Language utilities for ISO language code handling
//
// Validates ISO 639-1 (2-letter) and ISO 639-2 (3-letter) codes and maps
// them onto the codes the translation provider expects.

/// Source language value asking the provider to detect the language
pub const AUTO_LANGUAGE: &str = "auto";

/// Provider codes taken as-is (`cht` shadows the extinct ISO Cholón)
static PROVIDER_ONLY_CODES: &[&str] = &["jp", "wyw", "cht"];

/// Provider codes that ISO 639 assigns to another language (`rom` is Romany
/// in ISO but Romanian at the provider)
static AMBIGUOUS_CODES: &[&str] = &["rom"];

/// ISO 639-1 codes that the provider spells differently
static ISO_TO_PROVIDER: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ja", "jp"),
        ("ko", "kor"),
        ("fr", "fra"),
        ("es", "spa"),
        ("ar", "ara"),
        ("bg", "bul"),
        ("et", "est"),
        ("da", "dan"),
        ("fi", "fin"),
        ("ro", "rom"),
        ("sl", "slo"),
        ("sv", "swe"),
        ("vi", "vie"),
    ])
});

/// Regional Chinese tags
static CHINESE_VARIANTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("zh-cn", "zh"),
        ("zh-sg", "zh"),
        ("zh-hans", "zh"),
        ("zh-tw", "cht"),
        ("zh-hk", "cht"),
        ("zh-mo", "cht"),
        ("zh-hant", "cht"),
    ])
});

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"),
        "ger" => Some("deu"),
        "dut" => Some("nld"),
        "gre" => Some("ell"),
        "chi" => Some("zho"),
        "cze" => Some("ces"),
        "ice" => Some("isl"),
        "alb" => Some("sqi"),
        "arm" => Some("hye"),
        "baq" => Some("eus"),
        "bur" => Some("mya"),
        "per" => Some("fas"),
        "geo" => Some("kat"),
        "may" => Some("msa"),
        "mac" => Some("mkd"),
        "rum" => Some("ron"),
        "slo" => Some("slk"),
        "wel" => Some("cym"),
        _ => None,
    }
}

/// Normalize a language code to ISO 639-1 (2-letter) format if possible
/// Falls back to ISO 639-2/T if no ISO 639-1 code exists
pub fn normalize_to_part1_or_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
    } else if normalized_code.len() == 3 {
        let part2t: &str = part2b_to_part2t(&normalized_code).unwrap_or(normalized_code.as_str());

        if let Some(lang) = Language::from_639_3(part2t) {
            if let Some(code_639_1) = lang.to_639_1() {
                return Ok(code_639_1.to_string());
            }
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Map a language code onto the provider's code set.
///
/// Codes are read as ISO 639 first, so `slo` is Slovak and goes out as `sk`.
/// Regional tags such as `zh-TW` or `pt-BR` are reduced, provider-only codes
/// like `jp` pass through, and codes that mean different languages on either
/// side are rejected.
pub fn to_provider_code(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase().replace('_', "-");

    if normalized == AUTO_LANGUAGE {
        return Ok(normalized);
    }

    if let Some(variant) = CHINESE_VARIANTS.get(normalized.as_str()) {
        return Ok(variant.to_string());
    }

    let primary = normalized.split('-').next().unwrap_or_default();

    if AMBIGUOUS_CODES.contains(&primary) {
        return Err(anyhow!("Ambiguous language code: {}", code));
    }
    if PROVIDER_ONLY_CODES.contains(&primary) {
        return Ok(primary.to_string());
    }

    let iso = normalize_to_part1_or_part2t(primary)?;

    Ok(ISO_TO_PROVIDER
        .get(iso.as_str())
        .map(|c| c.to_string())
        .unwrap_or(iso))
}

/// Check that a code can be used as a translation target
pub fn validate_target_language(code: &str) -> Result<()> {
    if code.trim().is_empty() {
        return Err(anyhow!("Target language is empty"));
    }
    if code.trim().eq_ignore_ascii_case(AUTO_LANGUAGE) {
        return Err(anyhow!("'auto' is only valid as a source language"));
    }
    to_provider_code(code).map(|_| ())
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    match code.trim().to_lowercase().as_str() {
        "jp" => return Ok("Japanese".to_string()),
        "cht" => return Ok("Traditional Chinese".to_string()),
        "wyw" => return Ok("Classical Chinese".to_string()),
        _ => {}
    }

    let iso = normalize_to_part1_or_part2t(code)?;
    let lang = if iso.len() == 2 {
        Language::from_639_1(&iso)
    } else {
        Language::from_639_3(&iso)
    };

    lang.map(|l| l.to_name().to_string())
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))
}
