//! # Integration Test Flows
//!
//! End-to-end paths through the workspace crates:
//!
//! 1. **Alert → bloom filter**: an alert arriving as JSON answers
//!    `has_address` through its address bloom filter
//! 2. **Encoder → API → alert**: a filter built with `FilterEncoder` survives
//!    the GraphQL response path
//! 3. **Transaction → agent → API**: the starter agent's findings become a
//!    `SendAlerts` mutation
//! 4. **JWT**: the development token decodes and fails verification

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use forta_agent::alerts_api::{AlertQueryOptions, AlertsClient, GraphqlTransport, SendAlertsInput};
    use forta_agent::jwt::{self, ContractCaller, JwtProvider};
    use forta_agent::{Agent, AlertEvent, ApiError, JwtError, RuntimeEnv, TransactionEvent};
    use forta_bloom_filter::FilterEncoder;
    use starter_agent::TetherTransferAgent;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const MEMBER: &str = "0x68f180fcce6836688e9084f035309e29bf0a2095";
    const TETHER_TRANSFER: &str = include_str!("../../../crates/starter-agent/fixtures/tether_transfer.json");

    /// Records request bodies and replays a canned response.
    struct MockTransport {
        response: Value,
        requests: Mutex<Vec<Value>>,
    }

    impl MockTransport {
        fn new(response: Value) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GraphqlTransport for MockTransport {
        async fn post(&self, body: &Value) -> Result<Value, ApiError> {
            self.requests.lock().unwrap().push(body.clone());
            Ok(self.response.clone())
        }
    }

    struct UnreachableCaller;

    #[async_trait]
    impl ContractCaller for UnreachableCaller {
        async fn call(&self, _to: &str, _data: &[u8]) -> Result<Vec<u8>, JwtError> {
            panic!("contract must not be called for rejected tokens");
        }
    }

    struct UnreachableProvider;

    #[async_trait]
    impl JwtProvider for UnreachableProvider {
        async fn create(&self, _claims: Value) -> Result<String, JwtError> {
            panic!("provider must not be called outside production");
        }
    }

    // =============================================================================
    // FLOW 1: ALERT → BLOOM FILTER
    // =============================================================================

    #[test]
    fn test_alert_event_queries_bloom_filter() {
        let json = r#"{"alert": {
            "alertId": "ATTACK-1",
            "hash": "0xalert",
            "addresses": null,
            "addressBloomFilter": {"k": "0xb", "m": "f", "bitset": "AAAAAAAAAA8AAAAAAAAACwAAAAAAAAAPAAAAAAAANtI="}
        }}"#;
        let event: AlertEvent = serde_json::from_str(json).unwrap();

        assert!(event.alert.has_address(MEMBER).unwrap(), "inserted address");
        for absent in ["a", "b", "c"] {
            assert!(!event.alert.has_address(absent).unwrap(), "{absent} was never inserted");
        }
    }

    #[test]
    fn test_alert_without_filter_uses_address_list() {
        let event: AlertEvent = serde_json::from_str(
            r#"{"alert": {"alertId": "A", "addresses": ["0xabc", "0xdef"]}}"#,
        )
        .unwrap();
        assert!(event.alert.has_address("0xdef").unwrap());
        assert!(!event.alert.has_address("0x123").unwrap());

        let bare: AlertEvent = serde_json::from_str(r#"{"alert": {}}"#).unwrap();
        assert!(!bare.alert.has_address("0xabc").unwrap());
    }

    #[test]
    fn test_broken_filter_surfaces_on_query() {
        let event: AlertEvent = serde_json::from_str(
            r#"{"alert": {"addressBloomFilter": {"k": 3, "m": 64, "bitset": "not base64!"}}}"#,
        )
        .unwrap();
        assert!(event.alert.has_address(MEMBER).is_err());
        assert!(event.alert.has_address(MEMBER).is_err(), "failure is reported every time");
    }

    // =============================================================================
    // FLOW 2: ENCODER → API RESPONSE → ALERT
    // =============================================================================

    #[tokio::test]
    async fn test_encoded_filter_round_trips_through_api() {
        let addresses: Vec<String> = (0..200u32).map(|i| format!("0x{i:040x}")).collect();
        let mut encoder = FilterEncoder::with_estimates(addresses.len(), 0.001).unwrap();
        for address in &addresses {
            encoder.insert(address).unwrap();
        }
        let filter = serde_json::to_value(encoder.to_filter().unwrap()).unwrap();

        let transport = MockTransport::new(serde_json::json!({
            "data": {"alerts": {
                "alerts": [{"alertId": "BULK-1", "addressBloomFilter": filter}],
                "pageInfo": {"hasNextPage": false}
            }}
        }));
        let client = AlertsClient::new(transport, false);
        let page = client.get_alerts(&AlertQueryOptions::default()).await.unwrap();

        let alert = &page.alerts[0];
        for address in &addresses {
            assert!(alert.has_address(address).unwrap(), "{address} must be present");
        }
        assert!(!page.page_info.has_next_page);
    }

    // =============================================================================
    // FLOW 3: TRANSACTION → STARTER AGENT → SEND ALERTS
    // =============================================================================

    #[tokio::test]
    async fn test_starter_agent_findings_are_published() {
        let event: TransactionEvent = serde_json::from_str(TETHER_TRANSFER).unwrap();
        let agent = TetherTransferAgent::new();

        let findings = agent.handle_transaction(&event).await.unwrap();
        assert_eq!(findings.len(), 1, "only the 25,000 USDT transfer crosses the threshold");
        let finding = &findings[0];
        assert_eq!(finding.description(), "High amount of USDT transferred: 25000");
        assert_eq!(
            finding.metadata().get("from").map(String::as_str),
            Some("0x28C6c06298d514Db089934071355E5743bf21d60")
        );
        assert_eq!(
            finding.metadata().get("to").map(String::as_str),
            Some("0xF977814e90dA44bFA03b6295A0616a897441aceC")
        );

        let transport = MockTransport::new(serde_json::json!({
            "data": {"sendAlerts": {"alerts": [{"alertHash": "0xpublished"}]}}
        }));
        let client = AlertsClient::new(transport, false);
        let inputs: Vec<SendAlertsInput> = findings
            .into_iter()
            .map(|finding| SendAlertsInput {
                bot_id: "0xbot".into(),
                finding,
            })
            .collect();

        let responses = client.send_alerts(&inputs).await.unwrap();
        assert_eq!(responses[0].alert_hash.as_deref(), Some("0xpublished"));

        let requests = client.transport().requests.lock().unwrap();
        let sent = &requests[0]["variables"]["alerts"][0];
        assert_eq!(sent["botId"], "0xbot");
        let sent = &sent["finding"];
        assert_eq!(sent["severity"], "LOW");
        assert_eq!(sent["type"], "INFO");
        assert_eq!(sent["alertId"], "FORTA-1");
        assert_eq!(sent["private"], false);
        assert!(sent.get("protocol").is_none());
        assert!(sent.get("labels").is_none(), "empty labels are dropped");
        assert!(sent.get("uniqueKey").is_none(), "empty unique key is dropped");
        assert_eq!(sent["metadata"]["to"], "0xF977814e90dA44bFA03b6295A0616a897441aceC");
    }

    // =============================================================================
    // FLOW 4: JWT
    // =============================================================================

    #[tokio::test]
    async fn test_development_jwt_is_rejected() {
        let token = jwt::fetch_jwt(
            &UnreachableProvider,
            &RuntimeEnv::default(),
            serde_json::Map::new(),
            None,
        )
        .await
        .unwrap();

        let decoded = jwt::decode_jwt(&token).unwrap();
        assert_eq!(decoded.payload["sub"], "0x556f8BE42f76c01F960f32CB1936D2e0e0Eb3F4D");

        let verified = jwt::verify_jwt_with(&token, &UnreachableCaller, 1_660_119_400)
            .await
            .unwrap();
        assert!(!verified, "HS256 development token never verifies");
    }
}
