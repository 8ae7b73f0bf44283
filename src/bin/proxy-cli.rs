use clap::{Parser, Subcommand};
use reqwest::{Client, RequestBuilder};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(name = "proxy-cli")]
#[command(about = "Command-line client for the APS proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3001")]
    url: String,

    /// Bearer token for hub/project/folder commands.
    #[arg(short, long, env = "APS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange client credentials for an access token
    Auth {
        #[arg(long, env = "APS_CLIENT_ID")]
        client_id: String,
        #[arg(long, env = "APS_CLIENT_SECRET", hide_env_values = true)]
        client_secret: String,
    },
    /// List hubs
    Hubs,
    /// List projects in a hub
    Projects { hub_id: String },
    /// List Project Files contents (or every top folder's contents)
    TopFolders { hub_id: String, project_id: String },
    /// Forward a download request; extra fields as key=value
    Download {
        #[arg(long, env = "DOWNLOAD_API_KEY", hide_env_values = true)]
        api_key: String,
        #[arg(value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Auth {
            client_id,
            client_secret,
        } => client.post(format!("{}/auth", base)).json(&serde_json::json!({
            "clientId": client_id,
            "clientSecret": client_secret,
        })),
        Commands::Hubs => authorized(client.get(format!("{}/hubs", base)), &cli.token)?,
        Commands::Projects { hub_id } => authorized(
            client.get(format!("{}/hubs/{}/projects", base, hub_id)),
            &cli.token,
        )?,
        Commands::TopFolders { hub_id, project_id } => authorized(
            client.get(format!(
                "{}/hubs/{}/projects/{}/topFolders",
                base, hub_id, project_id
            )),
            &cli.token,
        )?,
        Commands::Download { api_key, fields } => {
            let mut body: Map<String, Value> = fields
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            body.insert("api_key".to_string(), Value::String(api_key));
            client.post(format!("{}/proxy/download", base)).json(&body)
        }
    };

    print_response(request.send().await?).await
}

fn authorized(
    request: RequestBuilder,
    token: &Option<String>,
) -> Result<RequestBuilder, Box<dyn std::error::Error>> {
    match token {
        Some(token) => Ok(request.bearer_auth(token)),
        None => Err("a bearer token is required (--token or APS_TOKEN)".into()),
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
