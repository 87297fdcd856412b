use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Command-line client for the Storefront backend API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ping the API
    Hello,
    /// Dump the site configuration document
    Site,
    /// List products, optionally filtered
    Products {
        /// Text to match in name or description
        #[arg(short, long)]
        q: Option<String>,
        /// Exact category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// Show a single product by id
    Product { id: String },
    /// Backend and database reachability
    Diagnostics,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    let request = match cli.command {
        Commands::Hello => client.get(endpoint(&base, &["api", "hello"])?),
        Commands::Site => client.get(endpoint(&base, &["api", "site"])?),
        Commands::Products {
            q,
            category,
            page,
            per_page,
        } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(q) = q {
                query.push(("q", q));
            }
            if let Some(category) = category {
                query.push(("category", category));
            }
            if let Some(page) = page {
                query.push(("page", page.to_string()));
            }
            if let Some(per_page) = per_page {
                query.push(("perPage", per_page.to_string()));
            }
            client.get(endpoint(&base, &["api", "products"])?).query(&query)
        }
        Commands::Product { id } => client.get(endpoint(&base, &["api", "products", id.as_str()])?),
        Commands::Diagnostics => client.get(endpoint(&base, &["test"])?),
    };

    let res = request.send().await?;
    print_response(res).await
}

/// Append `segments` to the base path, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| format!("{base} cannot be used as a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
