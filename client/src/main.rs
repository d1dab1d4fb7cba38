//! Cafe Ledger - headless dashboard
//!
//! Logs in to the business API, loads the full snapshot and prints the
//! month overview, daily totals and alerts. With an export directory
//! configured it also writes the collections out as CSV.

use std::path::Path;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cafe_ledger_client::api::ApiClient;
use cafe_ledger_client::i18n::{text, MessageKey};
use cafe_ledger_client::{export, Config, Store};
use shared::metrics::MonthFilter;
use shared::types::Language;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cafe_ledger=info,cafe_ledger_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    let lang = config.language;

    tracing::info!("Starting Cafe Ledger");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("API: {}", config.api.base_url);

    let api = ApiClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_seconds),
    )?;
    let mut store = Store::new(api);

    let who = store.login(&config.auth.email, &config.auth.password).await?;
    println!("{}: {}", text(lang, MessageKey::LoggedInAs), who);

    store.load_all().await?;

    let months = store.state().months();
    if let Some(current) = months.first() {
        store.set_month(MonthFilter::Month(current.clone()));
    }

    print_overview(&store, lang);
    print_daily_totals(&store, lang);
    print_profit_report(&store, lang);
    print_alerts(&store, lang);

    if let Some(dir) = &config.export.dir {
        export_snapshot(&store, dir, lang)?;
    }

    Ok(())
}

fn print_overview(store: &Store, lang: Language) {
    let state = store.state();
    println!("\n=== {} ===", text(lang, MessageKey::DashboardTitle));
    println!(
        "{}: {}",
        text(lang, MessageKey::Months),
        state.months().join(", ")
    );
}

fn print_daily_totals(store: &Store, lang: Language) {
    println!("\n--- {} ---", text(lang, MessageKey::DailyTotals));
    for total in store.state().daily_totals() {
        println!(
            "{}  {} {}  {} {}  {} {}",
            total.date,
            text(lang, MessageKey::In),
            total.inflow,
            text(lang, MessageKey::Out),
            total.outflow,
            text(lang, MessageKey::Net),
            total.net,
        );
    }
}

fn print_profit_report(store: &Store, lang: Language) {
    let report = store.state().profit_report();
    println!("\n--- {} ---", text(lang, MessageKey::DailyProfit));
    for day in &report.days {
        println!(
            "{}  {} {}  {} {}  {} {}",
            day.date,
            text(lang, MessageKey::Revenue),
            day.revenue,
            text(lang, MessageKey::Cogs),
            day.cogs,
            text(lang, MessageKey::Profit),
            day.profit,
        );
    }
    println!(
        "{}: {} {}  {} {}  {} {}",
        text(lang, MessageKey::Total),
        text(lang, MessageKey::Revenue),
        report.total_revenue,
        text(lang, MessageKey::Cogs),
        report.total_cogs,
        text(lang, MessageKey::Profit),
        report.total_profit,
    );
}

fn print_alerts(store: &Store, lang: Language) {
    let today = chrono::Local::now().date_naive();
    let report = store.state().alerts(today);

    if report.low_stock.is_empty() && report.low_selling.is_empty() {
        println!("\n{}", text(lang, MessageKey::NoAlerts));
        return;
    }

    if !report.low_stock.is_empty() {
        println!("\n--- {} ---", text(lang, MessageKey::LowStockAlerts));
        for alert in &report.low_stock {
            println!(
                "{} ({})  {} {}  {} {}",
                alert.name,
                alert.unit,
                text(lang, MessageKey::Stock),
                alert.stock_qty,
                text(lang, MessageKey::MinStock),
                alert.min_stock_qty,
            );
        }
    }

    if !report.low_selling.is_empty() {
        println!("\n--- {} ---", text(lang, MessageKey::LowSellingProducts));
        for alert in &report.low_selling {
            println!(
                "{}  {} {}  {} {}",
                alert.name,
                text(lang, MessageKey::SoldLast7Days),
                alert.sold_last_7_days,
                text(lang, MessageKey::ExpectedWeekly),
                alert.expected_weekly,
            );
        }
    }
}

fn export_snapshot(store: &Store, dir: &str, lang: Language) -> anyhow::Result<()> {
    let state = store.state();
    let dir = Path::new(dir);
    std::fs::create_dir_all(dir)?;

    let files = [
        ("entries.csv", export::entries_csv(&state.entries)?),
        ("daily-totals.csv", export::daily_totals_csv(&state.daily_totals())?),
        (
            "supplier-invoices.csv",
            export::supplier_invoices_csv(&state.supplier_invoices)?,
        ),
        ("products.csv", export::products_csv(&state.products)?),
        ("ingredients.csv", export::ingredients_csv(&state.ingredients)?),
        ("sales.csv", export::sales_csv(&state.sales_records)?),
        ("profit.csv", export::profit_csv(&state.profit_report())?),
    ];
    for (name, contents) in files {
        std::fs::write(dir.join(name), contents)?;
    }

    println!("\n{}: {}", text(lang, MessageKey::ExportedTo), dir.display());
    Ok(())
}
