//! Quotes command handler.
//!
//! Queries simulated price sources concurrently, each with its own random
//! latency, and picks the cheapest quote among those that answered before
//! the deadline. Total wall time tracks the slowest in-deadline source,
//! not the sum of all latencies.

use std::time::{Duration, Instant};

use anyhow::Result;
use futures_util::future::join_all;
use rand::Rng;

use headway_workers::latency::jittered_sleep;

use crate::presentation::{format_price, print_separator};

/// One answered quote.
struct Quote {
    source: u32,
    price_cents: u64,
    latency: Duration,
}

async fn fetch_quote(source: u32, min_ms: u64, max_ms: u64) -> Quote {
    let latency = jittered_sleep(min_ms, max_ms).await;
    // Drawn after the sleep; ThreadRng must not be held across an await.
    let price_cents = rand::thread_rng().gen_range(80_00..=160_00);
    Quote {
        source,
        price_cents,
        latency,
    }
}

/// Execute the quotes command.
///
/// # Errors
///
/// This function will return an error if a quote task panics.
pub async fn execute(
    sources: u32,
    min_ms: u64,
    max_ms: u64,
    timeout_ms: u64,
    json: bool,
) -> Result<()> {
    tracing::debug!(target: "headway.cli", sources, timeout_ms, "running quotes");

    let deadline = Duration::from_millis(timeout_ms);
    let started = Instant::now();

    let tasks: Vec<_> = (0..sources)
        .map(|source| {
            tokio::spawn(async move {
                tokio::time::timeout(deadline, fetch_quote(source, min_ms, max_ms))
                    .await
                    .ok()
            })
        })
        .collect();

    let mut quotes = Vec::new();
    let mut timed_out = 0u32;
    for outcome in join_all(tasks).await {
        match outcome? {
            Some(quote) => quotes.push(quote),
            None => timed_out += 1,
        }
    }
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let best = quotes.iter().min_by_key(|q| q.price_cents);

    if json {
        let value = serde_json::json!({
            "quotes": quotes
                .iter()
                .map(|q| {
                    serde_json::json!({
                        "source": q.source,
                        "price_cents": q.price_cents,
                        "latency_ms": u64::try_from(q.latency.as_millis()).unwrap_or(u64::MAX),
                    })
                })
                .collect::<Vec<_>>(),
            "timed_out": timed_out,
            "best_source": best.map(|q| q.source),
            "elapsed_ms": elapsed_ms,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Queried {} source(s), deadline {} ms:\n", sources, timeout_ms);

    println!("{:<10} {:>10} {:>12}", "Source", "Price", "Latency");
    print_separator(34);
    for quote in &quotes {
        println!(
            "{:<10} {:>10} {:>9} ms",
            quote.source,
            format_price(quote.price_cents),
            quote.latency.as_millis()
        );
    }
    print_separator(34);

    if timed_out > 0 {
        println!("{timed_out} source(s) missed the deadline");
    }
    match best {
        Some(quote) => println!(
            "Best price: {} from source {}",
            format_price(quote.price_cents),
            quote.source
        ),
        None => println!("No source answered in time"),
    }
    println!("Elapsed: {elapsed_ms} ms");

    Ok(())
}
