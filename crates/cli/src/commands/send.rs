//! `send` command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use contracts::{DeliveryStatus, DispatchOutcome, NotificationRequest, ServiceCall, TargetSelector};
use serde_json::Value;
use tracing::info;

use crate::cli::SendArgs;

/// Execute the `send` command
pub async fn run_send(config_path: &Path, args: &SendArgs) -> Result<()> {
    if !config_path.exists() {
        anyhow::bail!("Configuration file not found: {}", config_path.display());
    }

    let config = config_loader::ConfigLoader::load_from_path(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let request = build_request(args)?;
    info!(
        target = ?request.target,
        panels = config.panels.len(),
        transport = %config.transport.name,
        "Sending notification"
    );

    let notifier = dispatcher::create_notifier(&config)
        .await
        .context("Failed to set up notifier")?;
    let outcome = notifier.notify(&request).await;

    if args.json {
        let json =
            serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?;
        println!("{}", json);
    } else {
        print_outcome(&outcome);
    }

    if outcome.all_delivered() {
        Ok(())
    } else {
        anyhow::bail!(
            "{} of {} targets not delivered",
            outcome.len() - outcome.delivered_count(),
            outcome.len()
        )
    }
}

fn build_request(args: &SendArgs) -> Result<NotificationRequest> {
    if let Some(raw) = &args.call {
        let call: ServiceCall =
            serde_json::from_str(raw).context("Failed to parse --call as a service call")?;
        return Ok(call.into_request());
    }

    let target = match args.targets.as_slice() {
        [] => TargetSelector::All,
        [single] => TargetSelector::Single(single.as_str().into()),
        many => TargetSelector::many(many.iter().map(String::as_str)),
    };

    Ok(NotificationRequest {
        message: args.message.clone(),
        target,
        options: args.options.as_deref().map(parse_options),
    })
}

/// JSON when it parses, plain string otherwise
fn parse_options(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn print_outcome(outcome: &DispatchOutcome) {
    if outcome.is_empty() {
        println!("No panels to notify");
        return;
    }

    for entry in outcome {
        match &entry.status {
            DeliveryStatus::Delivered => println!(
                "✓ {} → {}",
                entry.target,
                entry.topic.as_deref().unwrap_or_default()
            ),
            DeliveryStatus::UnknownTarget => println!("✗ {}: unknown panel", entry.target),
            DeliveryStatus::TransportFailure(detail) => {
                println!("✗ {}: {}", entry.target, detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args() -> SendArgs {
        SendArgs {
            message: "hello".into(),
            targets: Vec::new(),
            options: None,
            call: None,
            json: false,
            metrics_port: 0,
        }
    }

    #[test]
    fn test_no_targets_means_all() {
        let request = build_request(&args()).unwrap();
        assert_eq!(request.target, TargetSelector::All);
        assert_eq!(request.options, None);
    }

    #[test]
    fn test_one_target_is_single() {
        let mut args = args();
        args.targets = vec!["kitchen".into()];
        let request = build_request(&args).unwrap();
        assert_eq!(request.target, TargetSelector::Single("kitchen".into()));
    }

    #[test]
    fn test_options_json_or_string() {
        let mut args = args();
        args.options = Some(r#"{"blink":2}"#.into());
        assert_eq!(build_request(&args).unwrap().options, Some(json!({ "blink": 2 })));

        args.options = Some("urgent".into());
        assert_eq!(build_request(&args).unwrap().options, Some(json!("urgent")));
    }

    #[test]
    fn test_raw_call() {
        let mut args = args();
        args.call = Some(r#"{"message":"hi","data":{"target":["a","b"]}}"#.into());
        let request = build_request(&args).unwrap();
        assert_eq!(request.message, "hi");
        assert_eq!(request.target, TargetSelector::many(["a", "b"]));
    }

    #[tokio::test]
    async fn test_send_via_file_transport() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("panelcast.toml");
        let out = dir.path().join("out");
        std::fs::write(
            &config_path,
            format!(
                r#"
[transport]
kind = "file"
[transport.params]
base_path = "{}"

[[panels]]
name = "kitchen"
topic = "home/kitchen"
"#,
                out.display().to_string().replace('\\', "/")
            ),
        )
        .unwrap();

        run_send(&config_path, &args()).await.unwrap();

        let written = std::fs::read_to_string(out.join("home").join("kitchen.log")).unwrap();
        assert_eq!(written, "{\"msg\":\"hello\"}\n");

        let mut ghost = args();
        ghost.targets = vec!["ghost".into()];
        assert!(run_send(&config_path, &ghost).await.is_err());
    }
}
