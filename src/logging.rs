use crate::utils::truncate_str;
use crate::Preview;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt as subscriber_fmt, fmt::format::FmtSpan, layer::SubscriberExt,
    util::SubscriberInitExt, EnvFilter, Layer,
};

#[derive(Debug)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: String,
    pub console_output: bool,
    pub file_output: bool,
    /// Span lifecycle events written by the console layer. `CLOSE` reports
    /// the duration of each fetch and parse span.
    pub span_events: FmtSpan,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".into(),
            log_level: "info".into(),
            console_output: true,
            file_output: true,
            span_events: FmtSpan::CLOSE,
        }
    }
}

const CARD_WIDTH: usize = 70;
const CONTENT_WIDTH: usize = CARD_WIDTH - 12;

fn card_line(label: &str, value: &str) -> String {
    let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
    let value = if value.is_empty() { "N/A".to_string() } else { value };
    format!("║ {:<9} {}", format!("{label}:"), truncate_str(&value, CONTENT_WIDTH))
}

/// Renders the fields of a preview as a boxed card.
pub(crate) fn preview_card(preview: &Preview, link: &str) -> String {
    let mut lines = vec![card_line("Link", link), card_line("Kind", preview.kind())];

    match preview {
        Preview::User(user) => {
            lines.push(card_line("Name", &user.name));
            lines.push(card_line("Username", &user.username));
            lines.push(card_line("Bio", &user.bio));
            lines.push(card_line("Avatar", &user.avatar));
        }
        Preview::Channel(channel) => {
            lines.push(card_line("Title", &channel.title));
            lines.push(card_line("Members", &channel.members.to_string()));
            lines.push(card_line("Desc", &channel.description));
            lines.push(card_line("Avatar", &channel.avatar));
        }
        Preview::Chat(chat) => {
            lines.push(card_line("Title", &chat.title));
            lines.push(card_line("Members", &chat.members.to_string()));
            lines.push(card_line("Online", &chat.online.to_string()));
            lines.push(card_line("Desc", &chat.description));
            lines.push(card_line("Avatar", &chat.avatar));
        }
        Preview::Empty => {}
    }

    let horizontal_line = "═".repeat(CARD_WIDTH - 2);
    format!(
        "\n╔{}╗\n{}\n╚{}╝",
        horizontal_line,
        lines.join("\n"),
        horizontal_line
    )
}

pub fn log_preview_card(preview: &Preview, link: &str) {
    info!("{}", preview_card(preview, link));
}

pub fn log_error_card<E: Display + std::error::Error>(link: &str, error: &E) {
    let top_bottom = "═".repeat(CARD_WIDTH - 2);
    let middle = "─".repeat(CARD_WIDTH - 2);

    let mut error_details = error.to_string();
    if let Some(source) = error.source() {
        error_details = format!("{error_details} (caused by: {source})");
    }

    error!(
        "\n╔{}╗\n{}\n║{}║\n{}\n╚{}╝",
        top_bottom,
        card_line("Link", link),
        middle,
        card_line("Error", &error_details),
        top_bottom,
    );
}

pub fn setup_logging(
    config: LogConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let mut layers = Vec::new();

    if config.console_output {
        let console_layer = subscriber_fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_file(true)
            .with_span_events(config.span_events.clone())
            .pretty();
        layers.push(console_layer.boxed());
    }

    if config.file_output {
        std::fs::create_dir_all(&config.log_dir)?;

        let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "tgme.log");

        let file_layer = subscriber_fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_file(true)
            .with_writer(file_appender);

        layers.push(file_layer.boxed());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()?;

    debug!("Logging system initialized with config: {:?}", config);
    Ok(())
}

/// Scoped subscriber at a fixed level, dropped with the guard.
pub struct LogLevelGuard {
    _guard: tracing::dispatcher::DefaultGuard,
}

impl LogLevelGuard {
    pub fn set_level(level: &str) -> Self {
        let filter = EnvFilter::new(level);
        let subscriber = tracing_subscriber::registry()
            .with(subscriber_fmt::layer())
            .with(filter);

        LogLevelGuard {
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }
}
