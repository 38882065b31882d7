pub mod conversions;
pub mod convert;
pub mod health;
pub mod image_convert;

/// Lifecycle of one conversion request, recorded on its handler span.
///
/// `Converting` covers extraction and generation; those two steps are
/// recorded as `stage = "extracting"` and `stage = "generating"` on the
/// converter's child spans. Scratch removal runs after the response is sent,
/// outside the handler span, and is logged by the scratch guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestStage {
    Received,
    Validated,
    Stored,
    Converting,
    Delivering,
    Failed,
}

impl RequestStage {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            RequestStage::Received => "received",
            RequestStage::Validated => "validated",
            RequestStage::Stored => "stored",
            RequestStage::Converting => "converting",
            RequestStage::Delivering => "delivering",
            RequestStage::Failed => "failed",
        }
    }

    /// Record this stage on the current handler span.
    pub(crate) fn enter(self) {
        tracing::Span::current().record("stage", self.as_str());
        tracing::debug!(stage = self.as_str(), "Request stage");
    }
}
