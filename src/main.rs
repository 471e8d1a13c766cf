use clap::Parser;
use color_eyre::eyre::eyre;
use media_reconciler::time::structs::DEFAULT_TIMEZONE_HYPOTHESIS;
use media_reconciler::utils::{Recursion, list_media_files};
use futures::TryStreamExt;
use media_reconciler::{
    Album, FileOutcome, ReconcileConfig, ReconcileReport, Reconciler, ReqwestHttpClient,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Lists which local media files still need uploading to a photo album.
#[derive(Parser, Debug)]
#[command(name = "media-reconciler")]
#[command(version)]
struct Args {
    /// Album title, matched case-insensitively
    #[arg(long, required_unless_present_any = ["dry_run", "skip_compare", "list_albums"])]
    album: Option<String>,

    /// Tolerance in minutes for files without an embedded capture time (0 disables)
    #[arg(long = "min", default_value_t = 0)]
    tolerance_minutes: u32,

    /// Timezone assumed for capture times without an offset
    #[arg(long, default_value = DEFAULT_TIMEZONE_HYPOTHESIS)]
    tz: String,

    /// Also search albums not created by this application
    #[arg(long)]
    all_albums: bool,

    /// Fail if several albums share the title
    #[arg(long)]
    strict: bool,

    /// Mark every file for upload without fetching the album
    #[arg(long)]
    skip_compare: bool,

    /// List the files that would be considered and exit
    #[arg(long)]
    dry_run: bool,

    /// File extensions to ignore, comma separated
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// List the albums with their item counts and exit
    #[arg(long)]
    list_albums: bool,

    #[arg(long, value_enum, default_value_t = Recursion::Once)]
    recurse: Recursion,

    /// Path to a specific exiftool executable
    #[arg(long)]
    exiftool: Option<PathBuf>,

    /// OAuth 2.0 access token for the photo library API
    #[arg(long, env = "PHOTOS_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Photo library API base URL
    #[arg(long, env = "PHOTOS_API_BASE_URL")]
    api_base_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Files or directories to reconcile
    #[arg(required_unless_present = "list_albums")]
    paths: Vec<PathBuf>,
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_table(report: &ReconcileReport) {
    for file in &report.files {
        let action = file
            .outcome
            .upload_action()
            .map_or_else(|| "failed".to_string(), |action| action.to_string());
        let detail = match &file.outcome {
            FileOutcome::Verdict(verdict) => verdict
                .deciding_outcome()
                .map(ToString::to_string)
                .unwrap_or_default(),
            FileOutcome::NotCompared => "not compared".to_string(),
            FileOutcome::Failed(reason) => reason.clone(),
        };
        println!("{action:<8} {:<60} {detail}", file.path.display());
    }
    println!(
        "\n{} matched, {} to upload, {} failed",
        report.matched(),
        report.to_upload(),
        report.failed()
    );
}

fn print_albums(albums: &[Album]) {
    println!("{:<40} {:>8} {:>9}", "title", "items", "writeable");
    for album in albums {
        let items = album
            .media_items_count
            .map(|count| count.to_string())
            .unwrap_or_default();
        println!("{:<40} {items:>8} {:>9}", album.title, album.is_writeable);
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(args.json_logs);

    let files = list_media_files(&args.paths, args.recurse, &args.exclude)?;
    info!(files = files.len(), "Found files");

    if args.dry_run && !args.list_albums {
        for file in &files {
            println!("{}", file.display());
        }
        return Ok(());
    }

    let config = ReconcileConfig::builder()
        .album_title(args.album.unwrap_or_default())
        .tolerance_minutes(args.tolerance_minutes)
        .timezone_hypothesis(args.tz)
        .app_created_only(!args.all_albums)
        .strict_album_lookup(args.strict)
        .skip_compare(args.skip_compare)
        .build();

    let access_token = match args.access_token {
        Some(token) => token,
        None if config.skip_compare && !args.list_albums => String::new(),
        None => return Err(eyre!("PHOTOS_ACCESS_TOKEN is not set")),
    };

    let mut reconciler = Reconciler::builder()
        .config(config)
        .http_client(Arc::new(ReqwestHttpClient::new()?))
        .access_token(access_token)
        .maybe_exiftool_path(args.exiftool)
        .maybe_base_url(args.api_base_url)
        .build()?;

    if args.list_albums {
        let albums: Vec<Album> = reconciler
            .photos()
            .list_albums(!args.all_albums)
            .try_collect()
            .await?;
        print_albums(&albums);
        return Ok(());
    }

    let report = reconciler.run(&files).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }

    Ok(())
}
