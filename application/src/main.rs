use std::{io, sync::OnceLock};

use application::{AsError as _, Args, Config, ListingFile, Service, Wizard};
use itertools::Itertools as _;
use service::{
    domain::promotion::{self, DurationTier, Package},
    flow::{self, Outcome, State, Step},
    infra::Http,
};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args { config, listing } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let (http, service, log) = Config::new(config)
        .map_err(|e| {
            log::error!("failed to load `Config`: {e}");
        })?
        .split();

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let Some(path) = listing else {
        print_price_list();
        return Ok(());
    };
    let file = ListingFile::load(path).map_err(|e| {
        log::error!("{}", e.into_error());
    })?;

    let http = Http::new(http).map_err(|e| {
        log::error!("failed to initialize `Http` client: {e}");
    })?;
    let mut wizard = Wizard::new(Service::new(service, http));
    _ = wizard.load_amenities().await;

    let promotion = file.promotion.clone();
    file.fill(&mut wizard).await.map_err(|e| {
        log::error!("{}", e.into_error());
    })?;
    wizard.submit().map_err(|e| {
        log::error!("{}", e.into_error());
    })?;
    promotion.choose(&mut wizard).map_err(|e| {
        log::error!("{}", e.into_error());
    })?;

    post(&mut wizard).await?;

    if let State::Complete(receipt) = wizard.state() {
        println!(
            "Listing #{} is posted at {}, paid {}",
            receipt.id,
            receipt.completed_at.to_rfc3339(),
            receipt.total,
        );
    }
    Ok(())
}

/// Confirms the chosen promotion, walking through the payment if it's paid,
/// and offering to retry failed backend calls.
async fn post(wizard: &mut Wizard) -> Result<(), ()> {
    let mut outcome = wizard.confirm().await;
    loop {
        match outcome {
            Ok(Outcome::Complete(_)) => return Ok(()),
            Ok(Outcome::AwaitingPayment) => {
                if let (Some(qr), Some(note), Some(total)) =
                    (wizard.qr_code(), wizard.transfer_note(), wizard.total())
                {
                    println!("Transfer {total} with the note `{note}`:");
                    println!("{qr}");
                }
                if !prompt("Press Enter once the transfer is made").await {
                    return Err(());
                }
                outcome = wizard.confirm_paid().await.map(Outcome::Complete);
            }
            Err(e) => {
                let retryable = matches!(
                    e.as_ref(),
                    flow::Error::QrGeneration(_)
                        | flow::Error::Create(_)
                        | flow::Error::Upload(_),
                );
                log::error!("{}", e.into_error());
                if !retryable || !prompt("Press Enter to retry").await {
                    return Err(());
                }
                outcome = if wizard.step() == Step::AwaitingPayment {
                    wizard.confirm_paid().await.map(Outcome::Complete)
                } else {
                    wizard.confirm().await
                };
            }
        }
    }
}

/// Prints the `message` and waits for a line on stdin.
///
/// Returns `false` if stdin is closed.
async fn prompt(message: &str) -> bool {
    println!("{message} (Ctrl+D to abort)");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .is_ok_and(|read| read > 0)
}

/// Prints prices of every paid [`Package`] for every [`DurationTier`].
fn print_price_list() {
    for (package, duration) in Package::ALL
        .iter()
        .filter(|p| !p.is_free())
        .cartesian_product(DurationTier::ALL)
    {
        println!(
            "{:<28} {:>2} days: {}",
            package.plan().name,
            duration.days(),
            promotion::total(*package, *duration),
        );
    }
}
