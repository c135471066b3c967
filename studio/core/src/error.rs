//! Error Taxonomy
//!
//! Errors live in two layers. [`GatewayError`] is what the AI gateway
//! produces: configuration, transport, status, parse, and shape failures,
//! each carrying cause text. [`CampaignError`] is what the state machine
//! stores and the surface renders: the gateway failure re-classified by the
//! flow it happened in, with a stable display prefix per class so remediation
//! content can be chosen without string sniffing.
//!
//! The studio never stores a raw or unclassified error. Nothing here is
//! fatal; every class resolves to a retryable state.

use thiserror::Error;

/// Convenience alias for gateway operation outcomes.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Remediation text for a missing API credential.
const CONFIGURATION_ADVICE: &str = "Please make sure your Gemini API key is set up as an \
     environment variable. The application cannot connect to the AI service without it.";

/// Guidance shown for a URL that failed local validation.
const INVALID_URL_ADVICE: &str =
    "Please enter a full, valid URL including http:// or https://.";

// =============================================================================
// Gateway Layer
// =============================================================================

/// A failure raised by the AI gateway while performing a remote operation.
///
/// Variants carry their cause as text so the value stays `Clone` across the
/// completion channel and comparable in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No API credential is available. Detected before any request is sent,
    /// never inferred from a transport failure.
    #[error("Gemini API key is not configured")]
    Configuration,

    /// The HTTP round-trip itself failed (connect, DNS, client timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The model endpoint answered with a non-success status.
    #[error("model endpoint returned {status}: {message}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Message extracted from the error body, or the raw body.
        message: String,
    },

    /// The response payload could not be parsed as JSON.
    #[error("response was not valid JSON: {0}")]
    Json(String),

    /// The response JSON did not satisfy the required output shape.
    #[error("response did not match the expected shape: {0}")]
    Shape(String),
}

// =============================================================================
// Studio Layer
// =============================================================================

/// A classified, display-ready error as stored by the state machine.
///
/// The `Display` form is `"<class prefix>: <detail>"`; [`CampaignError::title`]
/// and [`CampaignError::detail`] expose the two halves separately for
/// surfaces that render them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CampaignError {
    /// The submitted URL failed absolute-URL validation. No remote call was
    /// made; resubmitting with a corrected URL recovers.
    #[error("Invalid URL: {0}")]
    InvalidInput(String),

    /// The API credential is missing. Not recoverable from inside the app;
    /// the user has to supply the credential.
    #[error("API Key Issue: {0}")]
    Configuration(String),

    /// The remote campaign call failed (transport, non-success status,
    /// malformed JSON, or shape mismatch). Resubmitting recovers.
    #[error("Generation Failed: {0}")]
    Generation(String),

    /// A per-creative variation request failed. The displayed campaign is
    /// unaffected; this class is surfaced as a transient notice, never as
    /// the full-page error state.
    #[error("Could not generate variations: {0}")]
    Variation(String),
}

impl CampaignError {
    /// The error stored when a submitted URL fails local validation.
    #[must_use]
    pub fn invalid_url() -> Self {
        Self::InvalidInput(INVALID_URL_ADVICE.to_string())
    }

    /// Classify a gateway failure from the main campaign flow.
    #[must_use]
    pub fn from_campaign_flow(source: &GatewayError) -> Self {
        match source {
            GatewayError::Configuration => Self::Configuration(CONFIGURATION_ADVICE.to_string()),
            other => Self::Generation(other.to_string()),
        }
    }

    /// Classify a gateway failure from the variation flow. Every cause stays
    /// scoped to the variation class so the main result survives.
    #[must_use]
    pub fn from_variation_flow(source: &GatewayError) -> Self {
        Self::Variation(source.to_string())
    }

    /// Short heading for this class, suitable as a panel title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "Invalid URL",
            Self::Configuration(_) => "API Key Issue",
            Self::Generation(_) => "Generation Failed",
            Self::Variation(_) => "Variation Failed",
        }
    }

    /// The detail text without the class prefix.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidInput(detail)
            | Self::Configuration(detail)
            | Self::Generation(detail)
            | Self::Variation(detail) => detail,
        }
    }

    /// Stable lowercase tag for structured log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::Configuration(_) => "configuration",
            Self::Generation(_) => "generation",
            Self::Variation(_) => "variation",
        }
    }

    /// Whether simply resubmitting can recover from this error.
    #[must_use]
    pub fn recoverable_by_resubmit(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_prefixes_identify_the_class() {
        assert!(CampaignError::invalid_url()
            .to_string()
            .starts_with("Invalid URL: "));
        assert!(
            CampaignError::from_campaign_flow(&GatewayError::Configuration)
                .to_string()
                .starts_with("API Key Issue: ")
        );
        assert!(
            CampaignError::from_campaign_flow(&GatewayError::Json("tail garbage".into()))
                .to_string()
                .starts_with("Generation Failed: ")
        );
    }

    #[test]
    fn test_campaign_flow_classification() {
        let config = CampaignError::from_campaign_flow(&GatewayError::Configuration);
        assert!(matches!(config, CampaignError::Configuration(_)));

        let transport =
            CampaignError::from_campaign_flow(&GatewayError::Transport("connect refused".into()));
        assert!(matches!(transport, CampaignError::Generation(_)));
        assert!(transport.detail().contains("connect refused"));

        let status = CampaignError::from_campaign_flow(&GatewayError::Status {
            status: 429,
            message: "quota exceeded".into(),
        });
        assert!(matches!(status, CampaignError::Generation(_)));
        assert!(status.detail().contains("429"));
        assert!(status.detail().contains("quota exceeded"));
    }

    #[test]
    fn test_variation_flow_never_escalates() {
        for source in [
            GatewayError::Configuration,
            GatewayError::Transport("reset".into()),
            GatewayError::Shape("adCreatives missing".into()),
        ] {
            let classified = CampaignError::from_variation_flow(&source);
            assert!(matches!(classified, CampaignError::Variation(_)));
        }
    }

    #[test]
    fn test_variation_detail_keeps_cause_text() {
        let classified = CampaignError::from_variation_flow(&GatewayError::Configuration);
        assert_eq!(classified.detail(), "Gemini API key is not configured");
    }

    #[test]
    fn test_titles_and_kinds() {
        let err = CampaignError::from_campaign_flow(&GatewayError::Configuration);
        assert_eq!(err.title(), "API Key Issue");
        assert_eq!(err.kind(), "configuration");
        assert!(!err.recoverable_by_resubmit());

        let err = CampaignError::invalid_url();
        assert_eq!(err.title(), "Invalid URL");
        assert!(err.recoverable_by_resubmit());
    }
}
