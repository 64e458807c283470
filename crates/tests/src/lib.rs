//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! Covers:
//! - Contract wire shapes
//! - Config file → registry → notifier → transport, without mocks
//! - Registry edits persisted through the config loader

#[cfg(test)]
mod contract_tests {
    use contracts::{DeliveryStatus, DispatchOutcome, NotificationRequest, Payload, TargetOutcome};
    use serde_json::json;

    #[test]
    fn test_payload_wire_shape() {
        let request = NotificationRequest::new("Door open").with_options(json!({ "blink": 3 }));
        let bytes = Payload::from_request(&request).encode().unwrap();
        assert_eq!(&bytes[..], br#"{"msg":"Door open","opt":{"blink":3}}"#);

        let request = NotificationRequest::new("quiet").with_options(json!(false));
        let bytes = Payload::from_request(&request).encode().unwrap();
        assert_eq!(&bytes[..], br#"{"msg":"quiet"}"#);
    }

    #[test]
    fn test_outcome_wire_shape() {
        let outcome: DispatchOutcome = [
            TargetOutcome {
                target: "kitchen".into(),
                topic: Some("home/kitchen".into()),
                status: DeliveryStatus::Delivered,
            },
            TargetOutcome {
                target: "ghost".into(),
                topic: None,
                status: DeliveryStatus::UnknownTarget,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({
                "entries": [
                    { "target": "kitchen", "topic": "home/kitchen", "status": "delivered" },
                    { "target": "ghost", "status": "unknown_target" }
                ]
            })
        );
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::path::Path;
    use std::time::Duration;

    use config_loader::ConfigLoader;
    use contracts::{
        DeliveryStatus, FanOut, NotificationRequest, NotifierConfig, PanelConfig, ServiceCall,
        TargetSelector, TransportKind,
    };
    use dispatcher::create_notifier;
    use dispatcher::transports::Envelope;
    use panel_registry::PanelRegistry;
    use serde_json::json;
    use tempfile::tempdir;
    use tokio::net::UdpSocket;

    fn panel(name: &str, topic: &str) -> PanelConfig {
        PanelConfig {
            name: name.into(),
            topic: topic.into(),
        }
    }

    fn file_config(base: &Path) -> NotifierConfig {
        let mut config = NotifierConfig::default();
        config.transport.kind = TransportKind::File;
        config
            .transport
            .params
            .insert("base_path".into(), base.display().to_string());
        config.panels = vec![
            panel("kitchen", "home/kitchen"),
            panel("office", "home/office"),
            panel("garage", "home/garage"),
        ];
        config
    }

    fn read(base: &Path, topic: &str) -> String {
        std::fs::read_to_string(base.join(format!("{topic}.log"))).unwrap_or_default()
    }

    /// Saved config → reload → notifier → file transport
    #[tokio::test]
    async fn test_e2e_file_transport_from_saved_config() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let config_path = dir.path().join("panelcast.toml");

        ConfigLoader::save_to_path(&config_path, &file_config(&out)).unwrap();
        let config = ConfigLoader::load_from_path(&config_path).unwrap();
        let notifier = create_notifier(&config).await.unwrap();

        let call: ServiceCall = serde_json::from_value(json!({
            "message": "Dinner is ready",
            "data": { "target": ["kitchen", "ghost", "office"], "options": "blink" }
        }))
        .unwrap();
        let outcome = notifier.send_message(call).await;

        let targets: Vec<_> = outcome.iter().map(|e| e.target.to_string()).collect();
        assert_eq!(targets, ["kitchen", "ghost", "office"]);
        assert_eq!(outcome.delivered_count(), 2);
        assert_eq!(outcome.status_of("ghost"), Some(&DeliveryStatus::UnknownTarget));

        let expected = "{\"msg\":\"Dinner is ready\",\"opt\":\"blink\"}\n";
        assert_eq!(read(&out, "home/kitchen"), expected);
        assert_eq!(read(&out, "home/office"), expected);
        assert_eq!(read(&out, "home/garage"), "");
    }

    #[tokio::test]
    async fn test_e2e_broadcast_concurrent_keeps_order() {
        let dir = tempdir().unwrap();
        let mut config = file_config(dir.path());
        config.dispatch.fan_out = FanOut::Concurrent;
        config.dispatch.publish_timeout_ms = Some(2_000);

        let notifier = create_notifier(&config).await.unwrap();
        let outcome = notifier.notify(&NotificationRequest::new("all hands")).await;

        let targets: Vec<_> = outcome.iter().map(|e| e.target.to_string()).collect();
        assert_eq!(targets, ["kitchen", "office", "garage"]);
        assert!(outcome.all_delivered());
        for topic in ["home/kitchen", "home/office", "home/garage"] {
            assert_eq!(read(dir.path(), topic), "{\"msg\":\"all hands\"}\n");
        }
        assert_eq!(notifier.metrics().delivered_count, 3);
    }

    #[tokio::test]
    async fn test_e2e_invalid_topic_is_isolated() {
        let dir = tempdir().unwrap();
        let mut config = file_config(dir.path());
        config.panels.push(panel("broken", "home/../escape"));

        let notifier = create_notifier(&config).await.unwrap();
        let outcome = notifier
            .notify(&NotificationRequest::new("hi").with_target(TargetSelector::many([
                "broken", "kitchen",
            ])))
            .await;

        assert!(matches!(
            outcome.status_of("broken"),
            Some(DeliveryStatus::TransportFailure(_))
        ));
        assert_eq!(outcome.status_of("kitchen"), Some(&DeliveryStatus::Delivered));
        assert_eq!(outcome.failure_count(), 1);
    }

    #[tokio::test]
    async fn test_e2e_network_envelope() {
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = receiver.local_addr().unwrap();

        let mut config = NotifierConfig::default();
        config.transport.kind = TransportKind::Network;
        config.transport.name = "bridge".into();
        config
            .transport
            .params
            .insert("addr".into(), addr.to_string());
        config.panels = vec![panel("hall", "home/hall")];

        let notifier = create_notifier(&config).await.unwrap();
        let outcome = notifier
            .notify(
                &NotificationRequest::new("Doorbell")
                    .with_target(TargetSelector::Single("hall".into())),
            )
            .await;
        assert!(outcome.all_delivered());

        let mut buf = vec![0u8; 65_536];
        let len = tokio::time::timeout(Duration::from_secs(2), receiver.recv(&mut buf))
            .await
            .expect("datagram not received")
            .unwrap();
        let envelope: Envelope = serde_json::from_slice(&buf[..len]).unwrap();
        assert_eq!(
            envelope,
            Envelope {
                topic: "home/hall".into(),
                payload: r#"{"msg":"Doorbell"}"#.into(),
                qos: 1,
                retain: false,
            }
        );
    }

    #[test]
    fn test_registry_edits_round_trip_through_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("panelcast.json");

        let mut config = ConfigLoader::load_or_default(&path).unwrap();
        let registry = PanelRegistry::from_config(&config.panels).unwrap();
        registry.add(" kitchen ", " home/kitchen ").unwrap();
        registry.add("office", "home/office").unwrap();
        assert!(registry.add("kitchen", "elsewhere").is_err());
        registry.remove_by_index(1).unwrap();

        config.panels = registry.to_config();
        ConfigLoader::save_to_path(&path, &config).unwrap();

        let reloaded = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(reloaded.panels, vec![panel("kitchen", "home/kitchen")]);
        assert!(!dir.path().join("panelcast.json.tmp").exists());
    }

    #[test]
    fn test_empty_registry_has_no_targets() {
        let registry = PanelRegistry::new();
        assert!(registry.list().targets().is_none());
        observability::record_registry_size(registry.len());
    }
}
