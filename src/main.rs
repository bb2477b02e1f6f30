use anyhow::Context;
use clap::{Parser, Subcommand};
use hirer::assets::{AssetLoader, BasePath};
use hirer::cart::parse_quantity_input;
use hirer::delivery::{DeliveryHost, DesktopHost, DownloadOutcome, LinkTarget, ShareOutcome, TransientLink};
use hirer::render::{DocumentOptions, OrderRenderer};
use hirer::resource::{FileKeyValueStore, FilesystemAssetSource};
use hirer::traits::AssetSource;
use hirer::types::{CurrencyStyle, format_amount};
use hirer::{HirerConfig, PreviewOutcome, Storefront, builtin_catalog, load_catalog};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the persisted cart
    #[arg(long, env = "HIRER_STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    /// Local directory serving fonts and icons
    #[arg(long)]
    asset_root: Option<PathBuf>,

    /// Deployment base path for asset URLs
    #[arg(long)]
    base_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the catalog by category with current quantities
    List,
    /// Add one of an item
    Add { id: String },
    /// Remove one of an item
    Remove { id: String },
    /// Set an item's quantity; non-digits are ignored, empty means 0
    Set { id: String, qty: String },
    /// Set an item's quantity to 0
    Clear { id: String },
    /// Empty the cart
    ClearAll {
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
    /// Show the badge and the selected lines
    Show,
    /// Generate the order sheet and download it
    Pdf {
        /// Write the PDF here instead of the downloads directory
        #[arg(long)]
        out: Option<PathBuf>,
        /// Open the sheet in the configured viewer
        #[arg(long, default_value_t = false)]
        preview: bool,
    },
    /// Share the order sheet, downloading it when sharing is unavailable
    Share,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = HirerConfig::load().context("loading configuration")?;
    if let Some(dir) = args.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(root) = args.asset_root {
        config.asset_root = root;
    }
    if args.base_path.is_some() {
        config.base_path = args.base_path;
    }

    let catalog = match &config.catalog_file {
        Some(path) => load_catalog(path).with_context(|| format!("loading catalog {}", path.display()))?,
        None => builtin_catalog(),
    };

    let host_document = match &config.host_document {
        Some(path) => Some(tokio::fs::read_to_string(path).await.with_context(|| {
            format!("reading host document {}", path.display())
        })?),
        None => None,
    };
    let base = BasePath::resolve_with_build_default(config.base_path.as_deref(), host_document.as_deref());
    let loader = AssetLoader::install_global(AssetLoader::new(asset_source(&config, &base), base));

    let host = Arc::new(
        DesktopHost::new(&config.downloads_dir)
            .with_viewer(config.viewer_command.clone())
            .with_share_command(config.share_command.clone()),
    );
    let renderer = OrderRenderer::new(DocumentOptions {
        watermark: config.watermark.clone(),
        socials: config.socials.clone(),
        ..Default::default()
    });
    let mut shop = Storefront::new(
        catalog,
        FileKeyValueStore::new(&config.storage_dir),
        loader,
        renderer,
        config.title.clone(),
        host,
    );

    let now = chrono::Utc::now();
    match args.command {
        Command::List => {
            for category in shop.catalog().categories() {
                println!("{}", category);
                for item in shop.catalog().items_in(category) {
                    println!(
                        "  {:<6} {:<28} {:>8}  x{}",
                        item.id,
                        item.name,
                        format_amount(item.price, CurrencyStyle::Symbol),
                        shop.cart().visible_quantity_of(item)
                    );
                }
            }
        }
        Command::Add { id } => {
            let item = shop.item(&id)?;
            shop.cart_mut().increment(&item);
            println!("{}", shop.badge());
        }
        Command::Remove { id } => {
            let item = shop.item(&id)?;
            shop.cart_mut().decrement(&item);
            println!("{}", shop.badge());
        }
        Command::Set { id, qty } => {
            let item = shop.item(&id)?;
            shop.cart_mut().set_quantity(&item, parse_quantity_input(&qty) as i64);
            println!("{}", shop.badge());
        }
        Command::Clear { id } => {
            let item = shop.item(&id)?;
            shop.cart_mut().clear_item(&item);
            println!("{}", shop.badge());
        }
        Command::ClearAll { yes } => {
            let confirmed = yes || confirm("Clear all selected items?").await?;
            if shop.clear_all(confirmed) {
                println!("{}", shop.badge());
            }
        }
        Command::Show => {
            println!("{}", shop.badge());
            for line in &shop.totals().lines {
                println!(
                    "  {:<28} x{:<4} {:>10}",
                    line.item.name,
                    line.qty,
                    format_amount(line.line_total, CurrencyStyle::Symbol)
                );
            }
            let stale = shop.cart().stale_ids();
            if !stale.is_empty() {
                log::warn!("Quantities kept for items no longer in the catalog: {}", stale.join(", "));
            }
        }
        Command::Pdf { out: Some(path), .. } => {
            if let Some(bytes) = shop.export_pdf(now).await? {
                tokio::fs::write(&path, &bytes)
                    .await
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Wrote {}", path.display());
            }
        }
        Command::Pdf { out: None, preview: true } => {
            loader.preload().await;
            match shop.preview_pdf(now).await? {
                PreviewOutcome::Opened(handle) => {
                    let link = TransientLink {
                        href: handle,
                        target: LinkTarget::NewView,
                        download: None,
                    };
                    if let Err(e) = shop.delivery().host().trigger_link(&link) {
                        eprintln!("Could not open the preview: {}", e);
                    }
                    println!("Previewing {}", link.href.as_str());
                    confirm("Close the preview?").await?;
                }
                PreviewOutcome::FontsNotReady => eprintln!("Preview needs the shop fonts; use download instead."),
                PreviewOutcome::Empty => eprintln!("No items selected"),
            }
        }
        Command::Pdf { out: None, preview: false } => {
            if let Some(outcome) = shop.download_pdf(now).await? {
                report_download(&outcome);
                settle().await;
            }
        }
        Command::Share => {
            match shop.share_pdf(now).await? {
                Some(ShareOutcome::Shared) => println!("Shared"),
                Some(ShareOutcome::FellBack(outcome)) => report_download(&outcome),
                None => {}
            }
            settle().await;
        }
    }
    Ok(())
}

fn local_source(config: &HirerConfig, base: &BasePath) -> Arc<dyn AssetSource> {
    Arc::new(FilesystemAssetSource::new(&config.asset_root).with_mount(base.as_str()))
}

#[cfg(feature = "http")]
fn asset_source(config: &HirerConfig, base: &BasePath) -> Arc<dyn AssetSource> {
    match &config.asset_origin {
        Some(origin) => Arc::new(hirer::resource::HttpAssetSource::new(origin.clone())),
        None => local_source(config, base),
    }
}

#[cfg(not(feature = "http"))]
fn asset_source(config: &HirerConfig, base: &BasePath) -> Arc<dyn AssetSource> {
    if config.asset_origin.is_some() {
        log::warn!("asset_origin is set but the http feature is disabled; using {}", config.asset_root.display());
    }
    local_source(config, base)
}

fn report_download(outcome: &DownloadOutcome) {
    match outcome {
        DownloadOutcome::Saved | DownloadOutcome::Triggered { .. } => println!("Order sheet delivered"),
        DownloadOutcome::Failed => {}
    }
}

/// Lets scheduled handle revocations run before the runtime shuts down.
async fn settle() {
    tokio::time::sleep(hirer::delivery::REVOKE_DELAY).await;
}

async fn confirm(question: &str) -> anyhow::Result<bool> {
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{} [y/N] ", question).as_bytes()).await?;
    stdout.flush().await?;
    let mut answer = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut answer).await?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
