use serde_json::Value;

const OFFLINE_SAMPLE: &str = include_str!("../data/offline_sample.json");

/// Static provider-shaped response served when the transport fails and
/// offline fallback is enabled. It goes through the same extraction and
/// formatting path as a live response.
pub fn offline_response() -> Result<Value, serde_json::Error> {
    serde_json::from_str(OFFLINE_SAMPLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor;

    #[test]
    fn test_offline_sample_is_provider_shaped() {
        let raw = offline_response().expect("offline sample must parse");
        let results = extractor::extract(&raw).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["Fare"]["PublishedFare"], 5097);
    }
}
