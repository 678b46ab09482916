use clap::Parser;
use tracing_subscriber::EnvFilter;

use ocdaemon_client::{
    Aggregation, ClientOptions, DaemonClient, Measure, Measurement, SpanData, TagContext, View,
};

/// oc-daemon example sender
///
/// Walks the whole client surface against a running daemon:
///   1. Initialize the session (REQ_INIT handshake)
///   2. Create a measure and register a distribution view
///   3. Record a few measurements
///   4. Export one span
///   5. Clean shutdown (REQ_SHUTDOWN)
#[derive(Parser, Debug)]
#[command(name = "ocdaemon-example", version, about)]
struct Args {
    /// Daemon socket path
    #[arg(short, long, default_value = "/tmp/oc-daemon.sock")]
    socket: String,

    /// Per-frame send deadline in seconds
    #[arg(long, default_value_t = 0.005)]
    max_send_time: f64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let options = ClientOptions::default()
        .with_socket_path(&args.socket)
        .with_max_send_time(args.max_send_time)
        .with_runtime_version(env!("CARGO_PKG_VERSION"));

    let client = DaemonClient::init(options)?;
    let _guard = client.shutdown_guard();

    let latency = Measure::float("example/latency")
        .with_description("handler latency")
        .with_unit("ms");
    if !client.create_measure(&latency) {
        tracing::warn!("measure create frame was not delivered");
    }

    let view = View::new(
        "example/latency-distribution",
        "example/latency",
        Aggregation::Distribution {
            bounds: vec![1.0, 10.0, 100.0],
        },
    )
    .with_tag_key("route");
    client.register_views(&[view]);
    client.set_reporting_period(10.0);

    let tags = TagContext::new().with_tag("route", "/demo");
    for value in [1.5, 4.0, 12.5] {
        client.record_stats(&[Measurement::new(&latency, value.into())], &tags, &[]);
    }

    let mut span = SpanData::new("0af7651916cd43dd8448eb211c80319c", "b7ad6b7169203331", "demo");
    span.kind = "CLIENT".into();
    span.attributes = serde_json::json!({"route": "/demo"});
    client.export_spans(&[span]);

    tracing::info!("example run complete");
    Ok(())
}
