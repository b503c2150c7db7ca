use super::*;

fn test_client(base_url: &str) -> BenzingaClient {
    BenzingaClient::new("test-key", base_url, 30).expect("client construction should not fail")
}

#[test]
fn transcript_url_appends_call_id_and_token() {
    let client = test_client(DEFAULT_BASE_URL);
    let url = client.transcript_url("12345");
    assert_eq!(
        url.as_str(),
        "https://api.benzinga.com/api/v1/transcripts/calls/12345?token=test-key"
    );
}

#[test]
fn transcript_url_strips_trailing_slash() {
    let client = test_client("https://example.test/calls/");
    let url = client.transcript_url("abc");
    assert_eq!(url.as_str(), "https://example.test/calls/abc?token=test-key");
}

#[test]
fn transcript_url_encodes_call_id_as_one_segment() {
    let client = test_client("https://example.test/calls");
    let url = client.transcript_url("a/b c?d");
    assert_eq!(
        url.path(),
        "/calls/a%2Fb%20c%3Fd",
        "call id must not escape its path segment: {url}"
    );
}

#[test]
fn new_rejects_unusable_base_url() {
    assert!(matches!(
        BenzingaClient::new("k", "not a url", 5),
        Err(BenzingaError::InvalidBaseUrl(_))
    ));
    assert!(matches!(
        BenzingaClient::new("k", "mailto:ir@example.com", 5),
        Err(BenzingaError::InvalidBaseUrl(_))
    ));
}
