use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sha2::{Digest, Sha256};

use provenance_annotator::{AnnotatorConfig, HttpPkiAnnotator};

#[derive(Parser)]
#[command(name = "annotator", about = "Produce signed provenance annotations for HTTP requests")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a deterministic Ed25519 keypair from a seed string.
    ///
    /// The SHA-256 hash of the seed becomes the 32-byte private key; both
    /// halves are written as hex text files.
    Keygen {
        #[clap(long, env = "ANNOTATOR_KEY_SEED")]
        seed: String,
        /// Directory receiving private.key and public.key.
        #[clap(long, default_value = ".")]
        out: PathBuf,
    },
    /// Verify a captured request and print the resulting annotation as JSON.
    Annotate {
        #[clap(long, env = "ANNOTATOR_CONFIG")]
        config: PathBuf,
        /// Captured request: JSON with method, uri and a headers list.
        #[clap(long)]
        request: PathBuf,
        /// Raw payload the annotation will identify by content key.
        #[clap(long)]
        payload: PathBuf,
    },
}

/// On-disk shape of a captured request.
#[derive(serde::Deserialize)]
struct CapturedRequest {
    method: String,
    uri: String,
    #[serde(default)]
    headers: Vec<(String, String)>,
}

impl CapturedRequest {
    fn into_request(self) -> Result<http::Request<()>> {
        let mut builder = http::Request::builder()
            .method(self.method.as_str())
            .uri(self.uri.as_str());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(()).context("assembling captured request")
    }
}

fn main() -> Result<()> {
    match Args::parse().command {
        Command::Keygen { seed, out } => keygen(&seed, &out),
        Command::Annotate {
            config,
            request,
            payload,
        } => annotate(&config, &request, &payload),
    }
}

fn keygen(seed: &str, out: &PathBuf) -> Result<()> {
    let hash = Sha256::digest(seed.as_bytes());
    let signing_key = ed25519_dalek::SigningKey::from_bytes(&hash.into());

    let private_path = out.join("private.key");
    let public_path = out.join("public.key");
    fs::write(&private_path, hex::encode(signing_key.to_bytes()))
        .with_context(|| format!("writing {}", private_path.display()))?;
    fs::write(&public_path, hex::encode(signing_key.verifying_key().to_bytes()))
        .with_context(|| format!("writing {}", public_path.display()))?;

    println!("wrote {} and {}", private_path.display(), public_path.display());
    Ok(())
}

fn annotate(config: &PathBuf, request: &PathBuf, payload: &PathBuf) -> Result<()> {
    let config = AnnotatorConfig::from_file(config)?;
    let annotator = HttpPkiAnnotator::from_config(&config);

    let captured: CapturedRequest = serde_json::from_str(
        &fs::read_to_string(request).with_context(|| format!("reading {}", request.display()))?,
    )
    .context("parsing captured request")?;
    let request = captured.into_request()?;
    let payload =
        fs::read(payload).with_context(|| format!("reading {}", payload.display()))?;

    let annotation = annotator.annotate(&request, &payload)?;
    println!("{}", serde_json::to_string_pretty(&annotation)?);
    Ok(())
}
