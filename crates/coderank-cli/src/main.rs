use std::path::PathBuf;

use clap::{Parser, Subcommand};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use coderank_core::{
    catalog::Catalog,
    classify::classify,
    config::{refresh_period, Settings},
    display::resolve_label,
    fetch::LeaderboardClient,
    model::EnrichedModel,
    normalize::normalize,
    pricing::{MatchTier, PriceSource, PricingRecord},
    refresh::{refresh, RefreshReport, RefreshSource},
    serve,
    storage::{data_age, Store},
    subscription::SubscriptionPlan,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Palette ──────────────────────────────────────────────────────────

fn s_header() -> Style { Style::new().color256(252).bold() }  // bright gray, bold
fn s_dim() -> Style    { Style::new().color256(248) }         // light gray
fn s_tree() -> Style   { Style::new().color256(245) }         // mid gray
fn s_hint() -> Style   { Style::new().color256(243) }         // soft gray
fn s_hot() -> Style    { Style::new().color256(114) }         // green
fn s_warm() -> Style   { Style::new().color256(214) }         // amber
fn s_err() -> Style    { Style::new().color256(167) }         // red
fn s_price() -> Style  { Style::new().color256(109) }         // teal
fn s_bold() -> Style   { Style::new().bold() }
fn s_label() -> Style  { Style::new().color256(146) }         // muted lavender

fn sep(width: usize) -> String {
    s_tree().apply_to("\u{2500}".repeat(width)).to_string()
}

fn tier_str(tier: MatchTier) -> String {
    match tier {
        MatchTier::Exact     => format!("{}", s_hot().apply_to("exact")),
        MatchTier::Substring => format!("{}", s_warm().apply_to("substring")),
        MatchTier::Family    => format!("{}", s_warm().apply_to("family")),
        MatchTier::Unmatched => format!("{}", s_err().apply_to("unmatched")),
    }
}

fn fmt_price(p: f64) -> String {
    if p >= 1.0 {
        format!("${p:.2}")
    } else {
        format!("${p:.3}")
    }
}

fn price_cells(r: &PricingRecord) -> (Cell, Cell) {
    if !r.is_known() {
        return (
            Cell::new("N/A").fg(Color::AnsiValue(243)),
            Cell::new("N/A").fg(Color::AnsiValue(243)),
        );
    }
    let color = match r.source {
        PriceSource::Estimated => Color::AnsiValue(214),
        _ => Color::AnsiValue(109),
    };
    (
        Cell::new(fmt_price(r.input_price_per_million)).fg(color),
        Cell::new(fmt_price(r.output_price_per_million)).fg(color),
    )
}

fn plan_summary(plan: Option<&SubscriptionPlan>) -> String {
    let Some(plan) = plan else {
        return "-".to_string();
    };
    match (plan.free_tier(), plan.cheapest_paid()) {
        (_, Some(t)) => format!("{} ${}/mo", t.name, t.monthly_price),
        (Some(_), None) => "free".to_string(),
        (None, None) => "-".to_string(),
    }
}

// ── CLI Args ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "coderank",
    about = "Top coding models from the LMArena leaderboard, with API pricing and subscription plans",
    version,
    after_help = "examples:\n  \
        coderank refresh                        (fetch, rank, price, store)\n  \
        coderank refresh --mock                 (store the built-in leaderboard)\n  \
        coderank refresh --every 24             (keep refreshing once a day)\n  \
        coderank models\n  \
        coderank models --json                  (dashboard payload)\n  \
        coderank resolve claude-opus-4-5-20251101-thinking-32k\n  \
        coderank price \"GPT-4o (OpenAI)\"\n  \
        coderank plans anthropic"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Stored data file (overrides DATA_PATH and the config file).
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug).
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the leaderboard and store the enriched top models.
    Refresh {
        /// Use the built-in leaderboard instead of fetching.
        #[arg(long)]
        mock: bool,
        /// Keep running, refreshing every HOURS.
        #[arg(long, value_name = "HOURS", value_parser = clap::value_parser!(u64).range(1..))]
        every: Option<u64>,
        /// Keep running on the configured interval.
        #[arg(long)]
        watch: bool,
        /// How many models to keep.
        #[arg(long, short)]
        top: Option<usize>,
        /// Leaderboard page to fetch.
        #[arg(long)]
        url: Option<String>,
    },
    /// Show the stored leaderboard.
    Models {
        #[arg(long, short)]
        json: bool,
    },
    /// Stored data availability and age.
    Health {
        #[arg(long, short)]
        json: bool,
    },
    /// Show how a leaderboard label is cleaned, classified and priced.
    Resolve {
        /// Raw label, e.g. claude-opus-4-5-20251101-thinking-32k
        label: String,
    },
    /// Look up API pricing for a model name.
    Price {
        /// Model name, e.g. "GPT-4o (OpenAI)" or deepseek-v3
        name: String,
    },
    /// Subscription plans, for one organization or all.
    Plans {
        /// Organization, e.g. OpenAI or anthropic
        org: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::load()?;
    if let Some(path) = cli.data {
        settings.data_path = path;
    }
    let store = Store::new(&settings.data_path);
    let catalog = Catalog::bundled()?;

    match cli.command {
        Some(Commands::Refresh {
            mock,
            every,
            watch,
            top,
            url,
        }) => {
            settings.use_mock |= mock;
            if let Some(n) = top {
                settings.top_n = n;
            }
            if let Some(url) = url {
                settings.leaderboard_url = url;
            }
            let every = every.or(watch.then_some(settings.refresh_interval_hours));
            match every {
                Some(hours) => cmd_refresh_loop(&settings, &store, &catalog, hours).await?,
                None => cmd_refresh(&settings, &store, &catalog).await?,
            }
        }
        Some(Commands::Models { json }) => cmd_models(&settings, &store, &catalog, json)?,
        Some(Commands::Health { json }) => cmd_health(&store, json)?,
        Some(Commands::Resolve { label }) => cmd_resolve(&catalog, &label),
        Some(Commands::Price { name }) => cmd_price(&catalog, &name),
        Some(Commands::Plans { org }) => cmd_plans(&catalog, org.as_deref())?,
        None => cmd_models(&settings, &store, &catalog, false)?,
    }
    Ok(())
}

// ── Refresh ──────────────────────────────────────────────────────────

async fn run_refresh(
    settings: &Settings,
    store: &Store,
    catalog: &Catalog,
) -> anyhow::Result<RefreshReport> {
    let report = if settings.use_mock {
        refresh(RefreshSource::Mock, store, catalog, settings.top_n).await?
    } else {
        let client = LeaderboardClient::new(settings.leaderboard_url.as_str(), settings.timeout())?;
        refresh(RefreshSource::Live(&client), store, catalog, settings.top_n).await?
    };
    Ok(report)
}

fn print_report(report: &RefreshReport, store: &Store) {
    println!();
    println!(
        "  {}  {}",
        s_hot().apply_to("refreshed"),
        s_dim().apply_to(format!("from {}", report.source_label))
    );
    println!(
        "  {}",
        s_dim().apply_to(format!(
            "pricing coverage: {}/{} models",
            report.priced,
            report.models.len()
        ))
    );
    println!("{}", sep(64));
    for m in &report.models {
        println!(
            "  {:>3}  {:<34} {:<12} {:>6}  {}",
            s_dim().apply_to(m.rank),
            s_bold().apply_to(&m.display_name),
            s_label().apply_to(&m.organization),
            m.score,
            s_price().apply_to(m.pricing.price_label())
        );
    }
    println!("{}", sep(64));
    println!(
        "{}",
        s_hint().apply_to(format!("  saved to {}", store.path().display()))
    );
    println!();
}

async fn cmd_refresh(settings: &Settings, store: &Store, catalog: &Catalog) -> anyhow::Result<()> {
    let term = Term::stderr();
    let what = if settings.use_mock {
        "loading built-in leaderboard...".to_string()
    } else {
        format!("fetching {}...", settings.leaderboard_url)
    };
    term.write_line(&format!("{}", s_dim().apply_to(what)))?;

    let result = run_refresh(settings, store, catalog).await;
    term.clear_last_lines(1)?;

    let report = result?;
    print_report(&report, store);
    Ok(())
}

async fn cmd_refresh_loop(
    settings: &Settings,
    store: &Store,
    catalog: &Catalog,
    hours: u64,
) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(refresh_period(hours)?);
    tracing::info!(hours, "refreshing periodically");
    loop {
        ticker.tick().await;
        match run_refresh(settings, store, catalog).await {
            Ok(report) => print_report(&report, store),
            Err(e) => {
                // A failed pass keeps the stored data; try again next tick.
                tracing::error!(error = %e, "refresh failed");
                eprintln!("  {}  {e}", s_err().apply_to("refresh failed"));
            }
        }
    }
}

// ── Models ───────────────────────────────────────────────────────────

fn models_table(models: &[EnrichedModel]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("  #").fg(Color::AnsiValue(243)),
        Cell::new("Model").fg(Color::AnsiValue(243)),
        Cell::new("Org").fg(Color::AnsiValue(243)),
        Cell::new("Score").fg(Color::AnsiValue(243)),
        Cell::new("In $/M").fg(Color::AnsiValue(243)),
        Cell::new("Out $/M").fg(Color::AnsiValue(243)),
        Cell::new("Plan").fg(Color::AnsiValue(243)),
    ]);

    for m in models {
        let (input, output) = price_cells(&m.pricing);
        table.add_row(vec![
            Cell::new(format!("  {}", m.rank)).fg(Color::AnsiValue(248)),
            Cell::new(&m.display_name).fg(Color::AnsiValue(252)),
            Cell::new(&m.organization).fg(Color::AnsiValue(146)),
            Cell::new(m.score).fg(Color::AnsiValue(248)),
            input,
            output,
            Cell::new(plan_summary(m.subscription.as_ref())).fg(Color::AnsiValue(248)),
        ]);
    }
    table
}

fn cmd_models(
    settings: &Settings,
    store: &Store,
    catalog: &Catalog,
    json: bool,
) -> anyhow::Result<()> {
    let resp = serve::models_response(store, catalog);
    if json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
        return Ok(());
    }

    let Some(data) = resp.data else {
        anyhow::bail!(resp.error.unwrap_or_else(|| serve::LOAD_FAILED.to_string()));
    };

    println!();
    println!(
        "{}  {}",
        s_header().apply_to("top coding models"),
        s_dim().apply_to(format!(
            "{}, {}",
            data.source,
            data_age(data.fetched_at, chrono::Utc::now())
        ))
    );
    println!("{}", sep(72));
    println!("{}", models_table(&data.models));
    println!("{}", sep(72));

    if data.source == coderank_core::refresh::MOCK_SOURCE_LABEL {
        println!(
            "{}",
            s_hint().apply_to("  built-in leaderboard   coderank refresh for live data")
        );
    } else if store.is_stale(settings.stale_after())? {
        println!(
            "{}",
            s_warm().apply_to(format!(
                "  older than {}h   coderank refresh to update",
                settings.stale_after_hours
            ))
        );
    } else {
        println!(
            "{}",
            s_hint().apply_to("  coderank resolve <label> to see how a name was matched")
        );
    }
    println!();
    Ok(())
}

// ── Health ───────────────────────────────────────────────────────────

fn cmd_health(store: &Store, json: bool) -> anyhow::Result<()> {
    let status = serve::health(store);
    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        let state = if status.is_healthy() {
            s_hot().apply_to(status.status)
        } else {
            s_err().apply_to(status.status)
        };
        println!();
        println!("  {:<12} {}", s_label().apply_to("status"), state);
        println!("  {:<12} {}", s_label().apply_to("data"), store.path().display());
        match &status.data_age {
            Some(age) => println!("  {:<12} {}", s_label().apply_to("updated"), age),
            None => println!(
                "  {:<12} {}",
                s_label().apply_to("updated"),
                s_dim().apply_to("never")
            ),
        }
        println!();
    }
    if !status.is_healthy() {
        anyhow::bail!("store at {} is unreadable", store.path().display());
    }
    Ok(())
}

// ── Resolve / Price ──────────────────────────────────────────────────

fn cmd_resolve(catalog: &Catalog, label: &str) {
    let resolved = resolve_label(label);
    let classified = classify(label);
    let m = catalog.pricing.lookup(&resolved.name);

    println!();
    println!("  {:<12} {}", s_label().apply_to("label"), label);
    println!("  {:<12} {}", s_label().apply_to("name"), s_bold().apply_to(&resolved.name));
    println!("  {:<12} {}", s_label().apply_to("org"), resolved.organization);
    if classified.cleaned_name != label.trim() {
        println!(
            "  {:<12} {}",
            s_label().apply_to("prefix"),
            s_dim().apply_to(format!("stripped to {}", classified.cleaned_name))
        );
    }
    println!("  {:<12} {}", s_label().apply_to("key"), normalize(&resolved.name));
    print_match(&m.key, m.tier, &m.record);
    println!(
        "  {:<12} {}",
        s_label().apply_to("plan"),
        plan_summary(catalog.find_subscription(&resolved.organization))
    );
    println!();
}

fn cmd_price(catalog: &Catalog, name: &str) {
    let m = catalog.pricing.lookup(name);
    println!();
    println!("  {:<12} {}", s_label().apply_to("name"), name);
    println!("  {:<12} {}", s_label().apply_to("normalized"), normalize(name));
    print_match(&m.key, m.tier, &m.record);
    println!();
}

fn print_match(key: &Option<String>, tier: MatchTier, record: &PricingRecord) {
    println!(
        "  {:<12} {} {}",
        s_label().apply_to("match"),
        tier_str(tier),
        s_dim().apply_to(key.as_deref().unwrap_or(""))
    );
    if record.is_known() {
        let source = match record.source {
            PriceSource::Official => "official",
            PriceSource::Estimated => "estimated",
            PriceSource::Unknown => "unknown",
        };
        println!(
            "  {:<12} {} in / {} out per 1M tokens  {}",
            s_label().apply_to("price"),
            s_price().apply_to(fmt_price(record.input_price_per_million)),
            s_price().apply_to(fmt_price(record.output_price_per_million)),
            s_hint().apply_to(source)
        );
    } else {
        println!("  {:<12} {}", s_label().apply_to("price"), s_dim().apply_to("N/A"));
    }
}

// ── Plans ────────────────────────────────────────────────────────────

fn print_plan(plan: &SubscriptionPlan) {
    println!(
        "{}  {}",
        s_bold().apply_to(&plan.provider),
        s_dim().apply_to(&plan.web_url)
    );
    for tier in &plan.tiers {
        let price = if tier.monthly_price == 0.0 {
            format!("{}", s_hot().apply_to("free"))
        } else {
            format!("{}", s_price().apply_to(format!("${}/mo", tier.monthly_price)))
        };
        println!(
            "  {:<10} {:<10} {}",
            tier.name,
            price,
            s_dim().apply_to(tier.features.join(", "))
        );
    }
}

fn cmd_plans(catalog: &Catalog, org: Option<&str>) -> anyhow::Result<()> {
    let plans: Vec<&SubscriptionPlan> = match org {
        Some(org) => catalog
            .subscriptions
            .plans()
            .iter()
            .filter(|p| p.provider.eq_ignore_ascii_case(org))
            .collect(),
        None => catalog.subscriptions.plans().iter().collect(),
    };
    if plans.is_empty() {
        anyhow::bail!("no subscription plan for {}", org.unwrap_or("any organization"));
    }

    println!();
    println!("{}", s_header().apply_to("subscription plans"));
    println!("{}", sep(64));
    for plan in &plans {
        print_plan(plan);
    }
    println!("{}", sep(64));
    println!(
        "{}",
        s_hint().apply_to(format!("  {} plans   monthly USD", plans.len()))
    );
    println!();
    Ok(())
}
