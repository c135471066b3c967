//! Prompt Builder
//!
//! Pure construction of the two model instructions and their output-shape
//! contracts. Nothing here performs I/O, which keeps the shape contracts
//! testable for completeness without live calls.
//!
//! Each operation pairs an instruction text with a response schema in the
//! structured-output dialect the model endpoint understands (uppercase type
//! names, `properties`/`items`/`required` nesting). The gateway sends both
//! with every request; the schema is what makes "no free text outside the
//! payload" enforceable rather than aspirational.

use serde_json::{json, Value};

use crate::campaign::{AdCreative, DESCRIPTION_SOFT_LIMIT, HEADLINE_SOFT_LIMIT};

/// Number of variations the variation prompt asks for. Callers must not
/// assume responses honor this exactly; the decoder accepts any length.
pub const REQUESTED_VARIATIONS: usize = 2;

/// Instruction text for generating a full campaign from a website URL.
///
/// The URL is assumed to be syntactically valid; validation happens at the
/// submit boundary before any prompt is built.
#[must_use]
pub fn campaign_prompt(url: &str) -> String {
    format!(
        "You are an expert AI Google Ads campaign strategist. Your task is to analyze a given \
         website URL and generate a complete starter pack for a Google Ads campaign.\n\
         \n\
         Based on the website URL provided: {url}\n\
         \n\
         Please perform the following actions and provide the output in a structured JSON \
         format:\n\
         \n\
         1. **Website Analysis & Business Summary**: Briefly analyze the likely business, its \
         products/services, and target audience based on the URL. Write a concise summary.\n\
         2. **Ad Creative Generation**: Generate 3 unique and compelling ad creatives. Each \
         creative should have a headline (max {HEADLINE_SOFT_LIMIT} characters) and a \
         description (max {DESCRIPTION_SOFT_LIMIT} characters). The copy should be engaging \
         and tailored to the business.\n\
         3. **Keyword Suggestions**: Provide a list of 10-15 relevant keywords. For each \
         keyword, you must:\n\
            a. Provide the keyword itself.\n\
            b. Categorize it into a match type: 'Broad', 'Phrase', or 'Exact'.\n\
            c. Provide an estimated search volume classification (e.g., 'High', 'Medium', \
         'Low').\n\
         4. **Audience Targeting Suggestions**: Suggest 3-5 target audience segments. Describe \
         them based on demographics, interests, or in-market segments relevant to the \
         business.\n\
         \n\
         Your response MUST conform to the provided JSON schema. Do not include any \
         explanatory text outside of the JSON object itself."
    )
}

/// Output-shape contract for the campaign operation: one object carrying all
/// four top-level fields, with every creative and keyword sub-field required.
#[must_use]
pub fn campaign_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "businessSummary": {
                "type": "STRING",
                "description": "A concise summary of the business, its products/services, and target audience based on the website URL.",
            },
            "adCreatives": {
                "type": "ARRAY",
                "description": "A list of 3 compelling and unique ad creatives.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "headline": {
                            "type": "STRING",
                            "description": format!("A short, engaging headline for the ad (max {HEADLINE_SOFT_LIMIT} characters)."),
                        },
                        "description": {
                            "type": "STRING",
                            "description": format!("A detailed description for the ad (max {DESCRIPTION_SOFT_LIMIT} characters)."),
                        },
                    },
                    "required": ["headline", "description"],
                },
            },
            "keywords": {
                "type": "ARRAY",
                "description": "A list of 10-15 relevant keywords.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "keyword": {
                            "type": "STRING",
                            "description": "The suggested keyword.",
                        },
                        "matchType": {
                            "type": "STRING",
                            "description": "The recommended match type: 'Broad', 'Phrase', or 'Exact'.",
                        },
                        "searchVolume": {
                            "type": "STRING",
                            "description": "An estimated monthly search volume category (e.g., 'High', 'Medium', 'Low').",
                        },
                    },
                    "required": ["keyword", "matchType", "searchVolume"],
                },
            },
            "audienceSuggestions": {
                "type": "ARRAY",
                "description": "A list of 3-5 target audience segments with descriptions.",
                "items": { "type": "STRING" },
            },
        },
        "required": ["businessSummary", "adCreatives", "keywords", "audienceSuggestions"],
    })
}

/// Instruction text for generating variations of one existing creative.
#[must_use]
pub fn variation_prompt(business_summary: &str, original: &AdCreative) -> String {
    format!(
        "You are an expert AI Google Ads copywriter. Your task is to generate creative \
         variations for an existing ad creative, based on a business summary.\n\
         \n\
         Business Summary:\n\
         \"{business_summary}\"\n\
         \n\
         Original Ad Creative:\n\
         - Headline: \"{headline}\"\n\
         - Description: \"{description}\"\n\
         \n\
         Please generate {REQUESTED_VARIATIONS} new, distinct variations of this ad creative. \
         The variations should maintain a similar tone but explore different angles, benefits, \
         or calls-to-action. Adhere strictly to character limits: headlines must be \
         {HEADLINE_SOFT_LIMIT} characters or less, and descriptions must be \
         {DESCRIPTION_SOFT_LIMIT} characters or less.\n\
         \n\
         Your response MUST be a JSON array of ad creative objects, conforming to the provided \
         schema. Do not include any explanatory text outside of the JSON array.",
        headline = original.headline,
        description = original.description,
    )
}

/// Output-shape contract for the variation operation: a bare array of
/// creative objects with no other wrapping structure.
#[must_use]
pub fn variation_schema() -> Value {
    json!({
        "type": "ARRAY",
        "description": format!("A list of {REQUESTED_VARIATIONS} new, distinct ad creative variations."),
        "items": {
            "type": "OBJECT",
            "properties": {
                "headline": {
                    "type": "STRING",
                    "description": format!("A short, engaging headline for the ad (max {HEADLINE_SOFT_LIMIT} characters)."),
                },
                "description": {
                    "type": "STRING",
                    "description": format!("A detailed description for the ad (max {DESCRIPTION_SOFT_LIMIT} characters)."),
                },
            },
            "required": ["headline", "description"],
        },
    })
}
