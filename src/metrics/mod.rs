// Private module declaration
mod server;

use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use server::start_metrics_server;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Content commands (create/update/delete outcomes and latency per kind)
// - Newsletter admissions
// - Admin logins
// - Stored uploads
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

/// Central metrics registry for the entire application
pub struct Metrics {
    registry: Registry,

    // Content Metrics
    pub content_commands: IntCounterVec,
    pub content_command_duration: HistogramVec,

    // Subscription Metrics
    pub subscriptions: IntCounterVec,

    // Auth Metrics
    pub login_attempts: IntCounterVec,

    // Upload Metrics
    pub uploads_stored: IntCounter,
    pub upload_bytes: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let content_commands = IntCounterVec::new(
            Opts::new("content_commands_total", "Content commands handled"),
            &["kind", "command", "outcome"],
        )?;
        registry.register(Box::new(content_commands.clone()))?;

        let content_command_duration = HistogramVec::new(
            HistogramOpts::new("content_command_duration_seconds", "Content command duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["kind", "command"],
        )?;
        registry.register(Box::new(content_command_duration.clone()))?;

        let subscriptions = IntCounterVec::new(
            Opts::new("subscriptions_total", "Newsletter subscription decisions"),
            &["outcome"],
        )?;
        registry.register(Box::new(subscriptions.clone()))?;

        let login_attempts = IntCounterVec::new(
            Opts::new("login_attempts_total", "Admin login attempts"),
            &["outcome"],
        )?;
        registry.register(Box::new(login_attempts.clone()))?;

        let uploads_stored = IntCounter::new("uploads_stored_total", "Images written to the upload directory")?;
        registry.register(Box::new(uploads_stored.clone()))?;

        let upload_bytes = IntCounter::new("upload_bytes_total", "Bytes written to the upload directory")?;
        registry.register(Box::new(upload_bytes.clone()))?;

        Ok(Self {
            registry,
            content_commands,
            content_command_duration,
            subscriptions,
            login_attempts,
            uploads_stored,
            upload_bytes,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record a handled content command
    pub fn record_command(&self, kind: &str, command: &str, outcome: &str, duration_secs: f64) {
        self.content_commands.with_label_values(&[kind, command, outcome]).inc();
        self.content_command_duration
            .with_label_values(&[kind, command])
            .observe(duration_secs);
    }

    /// Helper to record a subscription decision
    pub fn record_subscription(&self, outcome: &str) {
        self.subscriptions.with_label_values(&[outcome]).inc();
    }

    /// Helper to record a login attempt
    pub fn record_login(&self, granted: bool) {
        let outcome = if granted { "granted" } else { "denied" };
        self.login_attempts.with_label_values(&[outcome]).inc();
    }

    /// Helper to record a stored upload
    pub fn record_upload(&self, bytes: usize) {
        self.uploads_stored.inc();
        self.upload_bytes.inc_by(bytes as u64);
    }
}
