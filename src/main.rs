use anyhow::bail;
use clap::Parser;
use weathersource::{DataKind, LatLon, OutputFormat, Settings, WeatherSource};

/// Fetch point-location weather data and store it as CSV or parquet.
#[derive(Debug, Parser)]
#[command(name = "weathersource", version, about)]
struct Args {
    /// Latitude of the location
    #[arg(long, allow_negative_numbers = true)]
    latitude: f64,

    /// Longitude of the location
    #[arg(long, allow_negative_numbers = true)]
    longitude: f64,

    /// Kind of data to fetch: historical or forecast
    #[arg(long)]
    data_type: DataKind,

    /// Start date in YYYY-MM-DD format
    #[arg(long)]
    start_date: String,

    /// End date in YYYY-MM-DD format
    #[arg(long)]
    end_date: String,

    /// Comma-separated field names (defaults to the API's popular bundle)
    #[arg(long)]
    fields: Option<String>,

    /// Output encoding: csv or parquet
    #[arg(long)]
    file_format: Option<OutputFormat>,

    /// Upload to the configured S3 bucket instead of the local directory
    #[arg(long)]
    use_s3: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if !weathersource::is_calendar_date(&args.start_date)
        || !weathersource::is_calendar_date(&args.end_date)
    {
        bail!("Dates must be in YYYY-MM-DD format");
    }

    let settings = Settings::from_env()?;
    let client = if args.use_s3 {
        WeatherSource::with_s3(settings).await?
    } else {
        WeatherSource::new(settings)?
    };

    let address = client
        .pull()
        .kind(args.data_type)
        .location(LatLon(args.latitude, args.longitude))
        .start_date(&args.start_date)
        .end_date(&args.end_date)
        .maybe_fields(args.fields.as_deref())
        .maybe_format(args.file_format)
        .call()
        .await?;

    println!("{address}");
    Ok(())
}
