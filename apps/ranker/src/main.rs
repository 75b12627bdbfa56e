use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ranker::models::ranking::{DEFAULT_SKILL_VS_EXP_WEIGHT, DEFAULT_TOP_K};
use ranker::presentation::{render_raw, render_response, Submission};
use ranker::{Config, RankRequest, RankingClient, ZipUpload};

const USAGE: &str = "usage:
  ranker health
  ranker rank <resumes.zip> <job_description.txt> [top_k] [skill_vs_exp_weight] [--raw]";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = RankingClient::new(&config).context("Failed to build HTTP client")?;
    info!(
        "Ranker client v{} (service: {})",
        env!("CARGO_PKG_VERSION"),
        client.base_url()
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("health") => {
            let status = client.health_check().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Some("rank") => run_rank(client, &args[1..]).await?,
        _ => bail!("{USAGE}"),
    }

    Ok(())
}

async fn run_rank(client: RankingClient, args: &[String]) -> Result<()> {
    let raw = args.iter().any(|a| a == "--raw");
    let positional: Vec<&String> = args.iter().filter(|a| *a != "--raw").collect();

    let (zip_path, jd_path) = match positional.as_slice() {
        [zip, jd, ..] => (zip.as_str(), jd.as_str()),
        _ => bail!("{USAGE}"),
    };
    let top_k = match positional.get(2) {
        Some(v) => v.parse::<u32>().context("top_k must be a whole number")?,
        None => DEFAULT_TOP_K,
    };
    let weight = match positional.get(3) {
        Some(v) => v
            .parse::<f64>()
            .context("skill_vs_exp_weight must be a number")?,
        None => DEFAULT_SKILL_VS_EXP_WEIGHT,
    };

    let zip = ZipUpload::from_path(zip_path).await?;
    let job_description = tokio::fs::read_to_string(jd_path)
        .await
        .with_context(|| format!("Failed to read job description '{jd_path}'"))?;

    let request = RankRequest::new(zip, job_description)
        .with_top_k(top_k)
        .with_skill_vs_exp_weight(weight);

    let submission = Submission::new(Arc::new(client));
    let response = submission.submit(&request).await?;

    print!("{}", render_response(&response));
    if raw {
        println!("\n{}", render_raw(&response)?);
    }
    Ok(())
}
