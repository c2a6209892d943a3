// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Basic redisearch-codec usage example.
//!
//! Demonstrates:
//! 1. Connecting to Redis Stack
//! 2. Creating an index over `book:*` hashes
//! 3. Searching with a query tree, filters and highlighting
//! 4. Aggregating with a cursor
//! 5. Autocomplete suggestions
//! 6. Displaying metrics and dropping the index
//!
//! # Prerequisites
//!
//! ```bash
//! docker run -d -p 6379:6379 redis/redis-stack-server:latest
//! ```
//!
//! # Run
//!
//! ```bash
//! cargo run --example basic_usage
//! ```

use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use redisearch_codec::aggregation::{reducers, SortedField};
use redisearch_codec::search::{intersect, union, values::between, HighlightOptions};
use redisearch_codec::{
    AggregationRequest, Client, ClientConfig, Filter, IndexDefinition, IndexOn, IndexOptions,
    Query, Schema, Suggestion, SuggestionOptions, SuggestionWith,
};

const BOOKS: &[(&str, &str, &str, i64)] = &[
    ("book:1", "Programming Rust", "systems", 2017),
    ("book:2", "Rust in Action", "systems", 2021),
    ("book:3", "Zero To Production In Rust", "web", 2022),
    ("book:4", "Redis in Action", "databases", 2013),
    ("book:5", "Designing Data-Intensive Applications", "databases", 2017),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder.install().expect("failed to install metrics recorder");

    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    println!("\n╔═══════════════════════════════════════════════════════════════╗");
    println!("║          redisearch-codec: Basic Usage Example                ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    // ─────────────────────────────────────────────────────────────────────────
    // 1. Connect
    // ─────────────────────────────────────────────────────────────────────────
    let config = ClientConfig {
        index_name: "idx:books".into(),
        ..Default::default()
    };
    println!("📦 Connecting to {}...", config.redis_url);
    let client = Client::connect(&config).await?;

    // Seed documents with a plain connection; the codec only speaks FT.*
    let mut conn = redis::Client::open(config.redis_url.as_str())?
        .get_multiplexed_async_connection()
        .await?;
    for (key, title, genre, year) in BOOKS {
        redis::cmd("HSET")
            .arg(*key)
            .arg("title")
            .arg(*title)
            .arg("genre")
            .arg(*genre)
            .arg("year")
            .arg(*year)
            .query_async::<()>(&mut conn)
            .await?;
    }
    println!("   ✅ Seeded {} books", BOOKS.len());

    // ─────────────────────────────────────────────────────────────────────────
    // 2. Create the index
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n🏗️  Creating index {}...", client.index_name());
    let schema = Schema::new()
        .text_weighted("title", 2.0)
        .tag("genre")
        .numeric_sortable("year");
    let definition = IndexDefinition::new(IndexOn::Hash).prefixes(["book:"]);
    // Ignore "Index already exists" from a previous run.
    if let Err(e) = client
        .create_index(&schema, Some(&definition), &IndexOptions::default())
        .await
    {
        println!("   └─ {}", e);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 3. Search
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n🔍 Searching...");
    let node = intersect()
        .add_node(union().add("title", ["rust", "redis"]))
        .add("year", [between(2015, 2025)]);
    let query = Query::from_node(&node)
        .with_scores()
        .add_filter(Filter::numeric("year", 2000.0, f64::INFINITY))
        .highlight(HighlightOptions::new().fields(["title"]).tags("<b>", "</b>"))
        .limit(0, 10);
    println!("   └─ Query: {}", query.query_string());
    println!("   └─ Plan:\n{}", client.explain(&query).await?);

    let result = client.search(&query).await?;
    println!("   └─ {} total matches", result.total);
    for doc in &result.documents {
        println!(
            "      └─ {} (score {:.2}) → {}",
            doc.id,
            doc.score,
            doc.get_str("title").unwrap_or("?")
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 4. Aggregate with a cursor
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n📊 Books per genre (cursor, 2 rows per page)...");
    let request = AggregationRequest::default()
        .group_by(
            ["@genre"],
            [reducers::count().alias("books"), reducers::max("@year").alias("latest")],
        )?
        .sort_by([SortedField::desc("@books")])
        .cursor(2, None);

    let mut page = client.aggregate(&request).await?;
    loop {
        for row in &page.rows {
            println!(
                "   └─ {:<10} books={} latest={}",
                row.get_string("genre")?,
                row.get_long("books")?,
                row.get_long("latest")?
            );
        }
        match page.cursor_id {
            Some(id) => page = client.cursor_read(id, None).await?,
            None => break,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 5. Suggestions
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n💡 Autocomplete...");
    for (_, title, _, _) in BOOKS {
        let suggestion = Suggestion::builder().string(*title).score(0.5).build()?;
        client.add_suggestion("ac:titles", &suggestion, false).await?;
    }
    let options = SuggestionOptions {
        fuzzy: true,
        with: SuggestionWith::Scores,
        ..Default::default()
    };
    for suggestion in client.get_suggestions("ac:titles", "rus", &options).await? {
        println!("   └─ {} ({:.3})", suggestion.string(), suggestion.score());
    }
    println!(
        "   └─ Dictionary size: {}",
        client.suggestion_length("ac:titles").await?
    );

    // ─────────────────────────────────────────────────────────────────────────
    // 6. Metrics and cleanup
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n📈 Raw Metrics:");
    dump_metrics(&snapshotter);

    println!("\n🧹 Dropping index (documents kept)...");
    client.drop_index(false).await?;

    println!("\n╔═══════════════════════════════════════════════════════════════╗");
    println!("║                    Example complete!                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    Ok(())
}

/// Dump all captured metrics
fn dump_metrics(snapshotter: &Snapshotter) {
    let mut counters = vec![];
    let mut histograms = vec![];

    for (composite_key, _, _, value) in snapshotter.snapshot().into_vec() {
        let (_, key) = composite_key.into_parts();
        let labels: Vec<_> = key
            .labels()
            .map(|l| format!("{}={}", l.key(), l.value()))
            .collect();
        let name = format!("{}{{{}}}", key.name(), labels.join(","));

        match value {
            DebugValue::Counter(v) => counters.push((name, v)),
            DebugValue::Histogram(samples) => {
                let count = samples.len();
                let sum: f64 = samples.iter().map(|v| v.into_inner()).sum();
                histograms.push((name, count, sum));
            }
            DebugValue::Gauge(_) => {}
        }
    }

    counters.sort();
    histograms.sort_by(|a, b| a.0.cmp(&b.0));

    println!("   ┌─ Counters");
    for (name, value) in &counters {
        println!("   │  └─ {} = {}", name, value);
    }
    println!("   └─ Histograms");
    for (name, count, sum) in &histograms {
        println!("      └─ {} count={} sum={:.4}", name, count, sum);
    }
}
