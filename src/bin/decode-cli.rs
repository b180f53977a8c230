use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "decode-cli")]
#[command(about = "Command-line client for the vehicle decoder service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a vehicle identification number
    Vin {
        vin: String,
        /// Model year hint
        #[arg(short, long)]
        year: Option<String>,
        /// Print the condensed vehicle summary instead of raw attributes
        #[arg(long)]
        summary: bool,
    },
    /// Decode a license plate
    Plate {
        plate: String,
        /// Issuing state or province
        state: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (path, form) = match cli.command {
        Commands::Vin { vin, year, summary } => {
            let mut form = vec![("vin", vin)];
            if let Some(year) = year {
                form.push(("year", year));
            }
            let path = if summary { "/decode/vehicle" } else { "/decode" };
            (path, form)
        }
        Commands::Plate { plate, state } => ("/decode", vec![("plate", plate), ("state", state)]),
    };

    let res = client
        .post(format!("{}{}", cli.url.trim_end_matches('/'), path))
        .form(&form)
        .send()
        .await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => {
            let failed = json.get("success") == Some(&Value::Bool(false)) || json.get("error").is_some();
            println!("{}", serde_json::to_string_pretty(&json)?);
            if failed || !status.is_success() {
                std::process::exit(1);
            }
        }
        Err(_) => {
            eprintln!("Error: decoder returned status {}", status);
            eprintln!("Response: {}", text);
            std::process::exit(1);
        }
    }
    Ok(())
}
