//! Integration tests for config-driven client wiring.

use stats_client::{
    StatsClient, StatsConfig, TimerEnd, bump_avg, bump_time, build_client, decorate,
    parse_stats_config_toml,
};
use stats_client_testkit::{CallKind, RecordingClient};
use std::error::Error;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("buffer lock")).into_owned()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

const CONFIG: &str = r#"
version = 1
enabled = true
level = "info"
prefixes = ["svc.", "env.prod."]
tags = ["service:api"]
"#;

#[test]
fn decorated_backend_sees_prefixed_keys_with_base_tags() -> Result<(), Box<dyn Error>> {
    let config = parse_stats_config_toml(CONFIG)?;
    let recorder = Arc::new(RecordingClient::new());
    let client = decorate(&config, recorder.clone());

    client.bump_sum("requests", 3.0, &["route:/users"]);

    let calls = recorder.take();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].key, "svc.requests");
    assert_eq!(calls[1].key, "env.prod.requests");
    for call in &calls {
        assert_eq!(call.kind, CallKind::Sum);
        assert_eq!(call.value, Some(3.0));
        assert_eq!(call.tags, vec!["route:/users", "service:api"]);
    }
    Ok(())
}

#[test]
fn decorated_timer_ends_every_prefixed_handle() -> Result<(), Box<dyn Error>> {
    let config = parse_stats_config_toml(CONFIG)?;
    let recorder = Arc::new(RecordingClient::new());
    let client = decorate(&config, recorder.clone());

    let timer: Box<dyn TimerEnd> = bump_time(Some(client.as_ref()), "job", &[]);
    assert_eq!(recorder.ended(), 0);
    timer.end();

    assert_eq!(recorder.keys(), vec!["svc.job", "env.prod.job"]);
    assert_eq!(recorder.ended(), 2);
    Ok(())
}

#[test]
fn plain_config_passes_calls_through() -> Result<(), Box<dyn Error>> {
    let config = StatsConfig::default().validate_and_normalize()?;
    let recorder = Arc::new(RecordingClient::new());
    let client = decorate(&config, recorder.clone());

    bump_avg(Some(client.as_ref()), "latency", 42.5, &["region:us"]);

    let calls = recorder.take();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].key, "latency");
    assert_eq!(calls[0].tags, vec!["region:us"]);
    Ok(())
}

#[test]
fn tracing_backend_emits_prefixed_events() -> Result<(), Box<dyn Error>> {
    let config = parse_stats_config_toml(CONFIG)?;
    let client: Arc<dyn StatsClient> = build_client(&config).ok_or("expected a client")?;

    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("stats=info"))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        client.bump_histogram("payload", 512.0, &[]);
    });

    let output = buffer.contents();
    assert!(output.contains("svc.payload"));
    assert!(output.contains("env.prod.payload"));
    assert!(output.contains("service:api"));
    assert!(output.contains("INFO"));
    Ok(())
}
