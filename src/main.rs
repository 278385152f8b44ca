use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use paycode::application::checkout::CheckoutService;
use paycode::application::decoder::PaymentDecoder;
use paycode::application::resolver::AmountResolver;
use paycode::config::{CheckoutProfile, GatewayConfig, ResolverConfig};
use paycode::domain::payment::PayOutput;
use paycode::infrastructure::emv::EmvMpmDecoder;
use paycode::infrastructure::http::{HttpDocumentSource, HttpPaymentGateway};
use paycode::interfaces::json::output_writer::OutputWriter;
use paycode::interfaces::json::request_reader::RequestReader;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Timeout in seconds for fetching a dynamic charge's amount document
    #[arg(long, env = "PAYCODE_FETCH_TIMEOUT", default_value_t = 10, global = true)]
    fetch_timeout: u64,

    /// Scheme used for amount document URLs
    #[arg(long, default_value = "https", global = true, hide = true)]
    fetch_scheme: String,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Decode an EMV QR (PIX) payload
    Pix {
        code: String,

        /// Create a purchase intention, reserve the limit and bill it
        #[arg(long)]
        checkout: bool,

        /// Base URL of the payment API
        #[arg(long, env = "PAYCODE_GATEWAY_URL")]
        gateway_url: Option<String>,

        /// Bearer token for the payment API
        #[arg(long, env = "AUTH_TOKEN", hide_env_values = true)]
        auth_token: Option<String>,

        /// JSON file with the checkout profile
        #[arg(long)]
        profile: Option<PathBuf>,
    },
    /// Decode a boleto line code
    Boleto { code: String },
    /// Decode JSON Lines requests (`{"bar_code": ...}`) from a file or stdin
    Batch { input: Option<PathBuf> },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();

    let resolver_config = ResolverConfig {
        scheme: cli.fetch_scheme,
        timeout_secs: cli.fetch_timeout,
    };
    let source = HttpDocumentSource::new(&resolver_config).into_diagnostic()?;
    let decoder = PaymentDecoder::new(
        Box::new(EmvMpmDecoder::new()),
        AmountResolver::new(Box::new(source), resolver_config),
    );

    let stdout = io::stdout();
    let mut writer = OutputWriter::new(stdout.lock());

    match cli.command {
        Command::Pix {
            code,
            checkout,
            gateway_url,
            auth_token,
            profile,
        } => {
            let pix = decoder.decode_pix(&code).await.into_diagnostic()?;
            let receipt = if checkout {
                let base_url =
                    gateway_url.ok_or_else(|| miette!("--gateway-url is required for checkout"))?;
                let auth_token =
                    auth_token.ok_or_else(|| miette!("--auth-token is required for checkout"))?;
                let profile = match profile {
                    Some(path) => CheckoutProfile::load(&path).into_diagnostic()?,
                    None => CheckoutProfile::default(),
                };
                let gateway = HttpPaymentGateway::new(GatewayConfig::new(base_url, auth_token))
                    .into_diagnostic()?;
                let service = CheckoutService::new(Box::new(gateway), profile);
                Some(service.checkout(&pix, &code).await.into_diagnostic()?)
            } else {
                None
            };

            let mut output = PayOutput::pix(pix);
            output.checkout = receipt;
            writer.write_output(&output).into_diagnostic()?;
        }
        Command::Boleto { code } => {
            let boleto = decoder.decode_boleto(&code).into_diagnostic()?;
            writer
                .write_output(&PayOutput::boleto(boleto))
                .into_diagnostic()?;
        }
        Command::Batch { input } => {
            let source: Box<dyn Read> = match input {
                Some(path) => Box::new(File::open(path).into_diagnostic()?),
                None => Box::new(io::stdin()),
            };
            for request in RequestReader::new(source).requests() {
                match request {
                    Ok(request) => match decoder.decode(&request).await {
                        Ok(output) => writer.write_output(&output).into_diagnostic()?,
                        Err(e) => eprintln!("Error decoding bar code: {}", e),
                    },
                    Err(e) => eprintln!("Error reading request: {}", e),
                }
            }
        }
    }

    Ok(())
}
