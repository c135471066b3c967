//! Backend Traits
//!
//! The seam between the state machine and whatever performs the remote
//! generation. The production implementation is [`GeminiBackend`]; tests
//! drive the studio with mock implementations of this trait, which is why
//! the two operations take plain domain values rather than wire types.
//!
//! [`GeminiBackend`]: crate::backend::GeminiBackend

use async_trait::async_trait;

use crate::campaign::{AdCreative, CampaignSuggestion};
use crate::error::GatewayResult;

/// An AI backend able to perform the two remote campaign operations.
///
/// Both operations are one-shot: no automatic retry, no remote mutation, a
/// single failed attempt surfaces immediately as a classified
/// [`GatewayError`](crate::GatewayError). Implementations must check for a
/// missing credential before issuing any request.
#[async_trait]
pub trait CampaignBackend: Send + Sync {
    /// Backend name for log fields.
    fn name(&self) -> &str;

    /// Generate a full campaign for the business behind `url`.
    ///
    /// The URL has already passed absolute-URL validation upstream. The
    /// returned suggestion is exactly what the model produced after shape
    /// validation, with no truncation or repair.
    async fn generate_campaign(&self, url: &str) -> GatewayResult<CampaignSuggestion>;

    /// Generate alternate takes on one creative, given the business context.
    ///
    /// Returns the sequence the model produced. The expected length is
    /// [`REQUESTED_VARIATIONS`](crate::prompt::REQUESTED_VARIATIONS), but
    /// callers must accept whatever length validates.
    async fn generate_variations(
        &self,
        business_summary: &str,
        original: &AdCreative,
    ) -> GatewayResult<Vec<AdCreative>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedBackend;

    #[async_trait]
    impl CampaignBackend for CannedBackend {
        fn name(&self) -> &str {
            "canned"
        }

        async fn generate_campaign(&self, url: &str) -> GatewayResult<CampaignSuggestion> {
            Ok(CampaignSuggestion {
                business_summary: format!("Business at {url}"),
                ad_creatives: vec![],
                keywords: vec![],
                audience_suggestions: vec![],
            })
        }

        async fn generate_variations(
            &self,
            _business_summary: &str,
            original: &AdCreative,
        ) -> GatewayResult<Vec<AdCreative>> {
            Ok(vec![original.clone()])
        }
    }

    #[tokio::test]
    async fn test_trait_usable_through_a_shared_reference() {
        let backend: &dyn CampaignBackend = &CannedBackend;
        let campaign = backend.generate_campaign("https://example.com").await.unwrap();
        assert_eq!(campaign.business_summary, "Business at https://example.com");
        assert_eq!(backend.name(), "canned");
    }
}
