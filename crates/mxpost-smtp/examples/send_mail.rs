#![allow(clippy::doc_markdown, clippy::uninlined_format_args)]
//! Example: Deliver one message straight to the recipient's exchange
//!
//! Looks up the MX records of the recipient domain and delivers a short HTML
//! message on port 25. Most residential networks block outbound port 25, so
//! run this from a host that is allowed to send mail directly.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=mxpost_smtp=trace cargo run --package mxpost-smtp --example send_mail -- \
//!     alice@example.com bob@example.org "Hello" "<p>Hi Bob</p>"
//! ```
//!
//! Set `MXPOST_USER` and `MXPOST_PASSWORD` to authenticate if the exchange
//! asks for it.

use anyhow::{Context, bail};
use mxpost_smtp::{Config, Mailer, OutgoingMessage};
use mxpost_mime::domain_of;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mxpost_smtp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [from, to, subject, body] = args.as_slice() else {
        bail!("usage: send_mail <from> <to> <subject> <body>");
    };

    let mut message = OutgoingMessage::new(from, subject, body).to(to);
    if let (Ok(user), Ok(password)) = (
        std::env::var("MXPOST_USER"),
        std::env::var("MXPOST_PASSWORD"),
    ) {
        message = message.credentials(&user, &password);
    }

    let mailer = Mailer::new(Config::default()).context("failed to initialize resolver")?;

    // Look up the recipient's exchanges rather than the sender's.
    let envelope = mailer
        .send(Some(domain_of(to)), message)
        .await
        .context("delivery failed")?;

    println!("Delivered from {} to {}", envelope.from, envelope.to.join(", "));
    Ok(())
}
