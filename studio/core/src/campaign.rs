//! Campaign Data Model
//!
//! Typed representation of one generated campaign: a business summary, a
//! fixed set of ad creatives, keyword suggestions, and audience segments.
//! These types mirror the wire schema the remote model is constrained to
//! (camelCase field names), so a successful decode is already a validated
//! result; no renaming or repair happens after parsing.
//!
//! Character limits on creatives are advisory: the model is instructed to
//! respect them, but nothing here truncates. Over-length copy is kept
//! verbatim and it is the surface's job to flag it.

use serde::{Deserialize, Serialize};

/// Advisory headline length communicated to the model, in characters.
pub const HEADLINE_SOFT_LIMIT: usize = 30;

/// Advisory description length communicated to the model, in characters.
pub const DESCRIPTION_SOFT_LIMIT: usize = 90;

/// File name used when the surface exports a campaign as JSON.
pub const EXPORT_FILE_NAME: &str = "google-ads-campaign-plan.json";

// =============================================================================
// Keyword Match Types
// =============================================================================

/// Google Ads keyword match type.
///
/// This is a closed set: any other value in a model response is a shape
/// violation and fails the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    /// Matches searches related to the keyword.
    Broad,
    /// Matches searches containing the keyword phrase.
    Phrase,
    /// Matches the exact keyword term only.
    Exact,
}

impl MatchType {
    /// Stable display label, identical to the wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Broad => "Broad",
            Self::Phrase => "Phrase",
            Self::Exact => "Exact",
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Campaign Components
// =============================================================================

/// One piece of ad copy: a headline/description pair.
///
/// `variations` is attached after the fact by the variation flow; creatives
/// returned inside a variation response never carry nested variations of
/// their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdCreative {
    /// Ad headline, advisory limit [`HEADLINE_SOFT_LIMIT`] characters.
    pub headline: String,
    /// Ad description, advisory limit [`DESCRIPTION_SOFT_LIMIT`] characters.
    pub description: String,
    /// Alternate takes on this creative, if the user has requested any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<AdCreative>>,
}

impl AdCreative {
    /// Whether both headline and description respect their advisory limits.
    ///
    /// Counts characters, not bytes, since the limits describe visible copy
    /// length.
    #[must_use]
    pub fn within_soft_limits(&self) -> bool {
        self.headline.chars().count() <= HEADLINE_SOFT_LIMIT
            && self.description.chars().count() <= DESCRIPTION_SOFT_LIMIT
    }
}

/// A suggested keyword with its match type and coarse volume label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSuggestion {
    /// The keyword text itself.
    pub keyword: String,
    /// Recommended match type.
    pub match_type: MatchType,
    /// Estimated volume category, free text (e.g. "High", "Medium", "Low").
    /// The model is not held to a fixed vocabulary here.
    pub search_volume: String,
}

/// The root result of one successful generation call.
///
/// Produced wholesale; never partially populated. After creation the only
/// permitted mutation is replacing one creative's `variations` slot via
/// [`CampaignSuggestion::set_variations`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSuggestion {
    /// Summary of the business behind the submitted URL.
    pub business_summary: String,
    /// Generated ad creatives, ordered as returned (typically 3).
    pub ad_creatives: Vec<AdCreative>,
    /// Keyword suggestions, ordered as returned (typically 10-15).
    pub keywords: Vec<KeywordSuggestion>,
    /// Target audience segment descriptions (typically 3-5).
    pub audience_suggestions: Vec<String>,
}

impl CampaignSuggestion {
    /// Replace the variations of the creative at `index`, leaving every
    /// other field untouched.
    ///
    /// Returns `false` (and changes nothing) when `index` is out of bounds.
    pub fn set_variations(&mut self, index: usize, variations: Vec<AdCreative>) -> bool {
        match self.ad_creatives.get_mut(index) {
            Some(creative) => {
                creative.variations = Some(variations);
                true
            }
            None => false,
        }
    }

    /// Plain-text rendering of all creatives for clipboard use.
    ///
    /// One block per creative, variations indented beneath, blocks separated
    /// by `---` dividers.
    #[must_use]
    pub fn creatives_as_text(&self) -> String {
        self.ad_creatives
            .iter()
            .enumerate()
            .map(|(index, ad)| {
                let mut block = format!(
                    "Ad Creative {}\nHeadline: {}\nDescription: {}",
                    index + 1,
                    ad.headline,
                    ad.description
                );
                if let Some(variations) = &ad.variations {
                    if !variations.is_empty() {
                        let sub = variations
                            .iter()
                            .enumerate()
                            .map(|(v_index, v)| {
                                format!(
                                    "  Variation {}\n  - Headline: {}\n  - Description: {}",
                                    v_index + 1,
                                    v.headline,
                                    v.description
                                )
                            })
                            .collect::<Vec<_>>()
                            .join("\n");
                        block.push_str(&format!("\n\nVariations:\n{sub}"));
                    }
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")
    }

    /// Plain-text rendering of all keywords for clipboard use, one
    /// `keyword (MatchType, Volume: X)` line per suggestion.
    #[must_use]
    pub fn keywords_as_text(&self) -> String {
        self.keywords
            .iter()
            .map(|kw| format!("{} ({}, Volume: {})", kw.keyword, kw.match_type, kw.search_volume))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The full campaign as pretty-printed JSON, as written by the export
    /// action.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the value cannot be rendered, which
    /// does not happen for well-formed campaigns.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_campaign() -> CampaignSuggestion {
        CampaignSuggestion {
            business_summary: "Artisanal coffee roaster with subscriptions.".to_string(),
            ad_creatives: vec![
                AdCreative {
                    headline: "Fresh Roasted Coffee".to_string(),
                    description: "Small-batch beans delivered to your door every week.".to_string(),
                    variations: None,
                },
                AdCreative {
                    headline: "Coffee Subscriptions".to_string(),
                    description: "Never run out again. Pause or cancel anytime.".to_string(),
                    variations: None,
                },
            ],
            keywords: vec![KeywordSuggestion {
                keyword: "fresh coffee beans".to_string(),
                match_type: MatchType::Phrase,
                search_volume: "High".to_string(),
            }],
            audience_suggestions: vec!["Specialty coffee enthusiasts".to_string()],
        }
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let json = serde_json::to_value(sample_campaign()).unwrap();
        assert!(json.get("businessSummary").is_some());
        assert!(json.get("adCreatives").is_some());
        assert!(json.get("audienceSuggestions").is_some());
        let keyword = &json["keywords"][0];
        assert!(keyword.get("matchType").is_some());
        assert!(keyword.get("searchVolume").is_some());
    }

    #[test]
    fn test_decode_from_wire_shape() {
        let payload = r#"{
            "businessSummary": "Online plant shop.",
            "adCreatives": [
                {"headline": "Plants Delivered", "description": "Greenery for every room, shipped with care."}
            ],
            "keywords": [
                {"keyword": "buy houseplants", "matchType": "Exact", "searchVolume": "Medium"}
            ],
            "audienceSuggestions": ["Urban apartment dwellers"]
        }"#;

        let campaign: CampaignSuggestion = serde_json::from_str(payload).unwrap();
        assert_eq!(campaign.business_summary, "Online plant shop.");
        assert_eq!(campaign.ad_creatives.len(), 1);
        assert_eq!(campaign.ad_creatives[0].variations, None);
        assert_eq!(campaign.keywords[0].match_type, MatchType::Exact);
    }

    #[test]
    fn test_unknown_match_type_is_rejected() {
        let payload = r#"{"keyword": "x", "matchType": "Negative", "searchVolume": "Low"}"#;
        let result: Result<KeywordSuggestion, _> = serde_json::from_str(payload);
        assert!(result.is_err());
    }

    #[test]
    fn test_variations_skipped_when_absent() {
        let creative = AdCreative {
            headline: "H".to_string(),
            description: "D".to_string(),
            variations: None,
        };
        let json = serde_json::to_string(&creative).unwrap();
        assert!(!json.contains("variations"));
    }

    #[test]
    fn test_set_variations_touches_only_target_index() {
        let mut campaign = sample_campaign();
        let before = campaign.clone();

        let applied = campaign.set_variations(
            1,
            vec![AdCreative {
                headline: "New Angle".to_string(),
                description: "Same tone, different benefit.".to_string(),
                variations: None,
            }],
        );

        assert!(applied);
        assert_eq!(campaign.business_summary, before.business_summary);
        assert_eq!(campaign.ad_creatives[0], before.ad_creatives[0]);
        assert_eq!(campaign.keywords, before.keywords);
        assert_eq!(campaign.audience_suggestions, before.audience_suggestions);
        assert_eq!(
            campaign.ad_creatives[1].variations.as_ref().map(Vec::len),
            Some(1)
        );
    }

    #[test]
    fn test_set_variations_out_of_bounds_is_a_no_op() {
        let mut campaign = sample_campaign();
        let before = campaign.clone();
        assert!(!campaign.set_variations(7, vec![]));
        assert_eq!(campaign, before);
    }

    #[test]
    fn test_soft_limits_count_characters_not_bytes() {
        let creative = AdCreative {
            // 30 characters, more than 30 bytes
            headline: "Süße Öko-Kaffees für Genießer!".to_string(),
            description: "Kurz.".to_string(),
            variations: None,
        };
        assert!(creative.within_soft_limits());

        let over = AdCreative {
            headline: "This headline is definitely far too long".to_string(),
            description: "Fine.".to_string(),
            variations: None,
        };
        assert!(!over.within_soft_limits());
    }

    #[test]
    fn test_creatives_as_text_layout() {
        let mut campaign = sample_campaign();
        campaign.set_variations(
            0,
            vec![AdCreative {
                headline: "Beans, But Better".to_string(),
                description: "Roasted this week, at your door next.".to_string(),
                variations: None,
            }],
        );

        let text = campaign.creatives_as_text();
        assert!(text.starts_with("Ad Creative 1\nHeadline: Fresh Roasted Coffee"));
        assert!(text.contains("Variations:\n  Variation 1\n  - Headline: Beans, But Better"));
        assert!(text.contains("\n\n---\n\nAd Creative 2"));
    }

    #[test]
    fn test_keywords_as_text_layout() {
        let campaign = sample_campaign();
        assert_eq!(
            campaign.keywords_as_text(),
            "fresh coffee beans (Phrase, Volume: High)"
        );
    }

    #[test]
    fn test_pretty_json_round_trips() {
        let campaign = sample_campaign();
        let json = campaign.to_pretty_json().unwrap();
        let back: CampaignSuggestion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, campaign);
    }
}
