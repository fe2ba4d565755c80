use travel_scout::api::{ApiClient, ApiConfig};
use travel_scout::models::ListingKind;
use travel_scout::query::{ListingController, SortKey};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = ApiConfig {
        base_url: std::env::var("TRAVEL_SCOUT_API")
            .unwrap_or_else(|_| ApiConfig::default().base_url),
        locale: std::env::var("TRAVEL_SCOUT_LOCALE")
            .unwrap_or_else(|_| ApiConfig::default().locale),
    };

    info!("Travel Scout - office directory smoke run");
    info!("Backend: {}", config.base_url);

    let locale = config.locale.clone();
    let client = ApiClient::new(config)?;
    let mut offices = ListingController::new(client, ListingKind::Office, 12, locale);

    info!("Fetching first page of offices, cheapest first...");
    offices.set_sort(SortKey::PriceAsc);
    let state = offices.refresh().await;
    info!(
        "View state: {:?} ({} of {} items on page {}/{})",
        state,
        offices.visible_items().len(),
        offices.total_items(),
        offices.current_page(),
        offices.total_pages().max(1),
    );

    for (i, office) in offices.visible_items().iter().enumerate() {
        let price = office
            .price
            .map(|p| format!("{p:.0}"))
            .unwrap_or_else(|| "—".to_string());
        println!("{}. {} ({} SAR)", i + 1, office.name, price);
        if let Some(city) = &office.city {
            println!("   City: {city}");
        }
        if let Some(rating) = office.rating {
            println!("   Rating: {rating:.1}/5");
        }
        println!("   ID: {}", office.id);
        println!();
    }

    Ok(())
}
