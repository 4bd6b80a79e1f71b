use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "grading-cli")]
#[command(about = "Operator CLI for the Card Grading API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, env = "API_SECRET_KEY")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server liveness
    Health,
    /// Dashboard statistics
    Dashboard,
    /// Admin analytics for a period
    Admin {
        #[arg(short, long, default_value = "month")]
        period: String,
        #[arg(short, long)]
        store: Option<String>,
    },
    /// Show one order
    Order { id: String },
    /// Assign cards to an order
    AssignCards {
        id: String,
        #[arg(required = true)]
        cards: Vec<String>,
    },
    /// Show one customer
    Customer { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", HeaderValue::from_str(&cli.key)?);

    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
        Commands::Dashboard => {
            client
                .get(format!("{}/api/analytics/dashboard", base))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Admin { period, store } => {
            let mut query = vec![("period", period)];
            if let Some(store) = store {
                query.push(("storeId", store));
            }
            client
                .get(format!("{}/api/analytics/admin", base))
                .query(&query)
                .headers(headers)
                .send()
                .await?
        }
        Commands::Order { id } => {
            client
                .get(format!("{}/api/orders/{}", base, id))
                .headers(headers)
                .send()
                .await?
        }
        Commands::AssignCards { id, cards } => {
            client
                .post(format!("{}/api/orders/{}/assign-cards", base, id))
                .headers(headers)
                .json(&json!({ "cardIds": cards }))
                .send()
                .await?
        }
        Commands::Customer { id } => {
            client
                .get(format!("{}/api/customers/{}", base, id))
                .headers(headers)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    // Error envelopes are JSON too; print them the same way.
    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", rendered);
    } else {
        eprintln!("Error: API returned status {}", status);
        eprintln!("{}", rendered);
        std::process::exit(1);
    }
    Ok(())
}
