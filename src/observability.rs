use std::net::SocketAddr;

use crate::wire::Request;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total queries executed. Labels: op, status.
pub const QUERIES_TOTAL: &str = "roomgrid_queries_total";

/// Histogram: query latency in seconds. Labels: op.
pub const QUERY_DURATION_SECONDS: &str = "roomgrid_query_duration_seconds";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: active TCP connections.
pub const CONNECTIONS_ACTIVE: &str = "roomgrid_connections_active";

/// Counter: total connections accepted.
pub const CONNECTIONS_TOTAL: &str = "roomgrid_connections_total";

/// Counter: connections rejected due to limit.
pub const CONNECTIONS_REJECTED_TOTAL: &str = "roomgrid_connections_rejected_total";

/// Gauge: number of active properties (loaded engines).
pub const PROPERTIES_ACTIVE: &str = "roomgrid_properties_active";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map a Request variant to a short label for metrics.
pub fn op_label(req: &Request) -> &'static str {
    match req {
        Request::Use { .. } => "use",
        Request::Cell { .. } => "cell",
        Request::Row { .. } => "row",
        Request::Grid { .. } => "grid",
        Request::Rooms { .. } => "rooms",
        Request::Days { .. } => "days",
        Request::Legend => "legend",
    }
}
