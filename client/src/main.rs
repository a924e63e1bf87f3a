//! `farmfresh`: browse the catalog and manage a local cart from the terminal.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use farmfresh_client::api::{CatalogClient, SubmitError};
use farmfresh_client::browser::ProductBrowser;
use farmfresh_client::file_storage::FileStorage;
use farmfresh_common::cart::CartStore;
use farmfresh_common::catalog::{ProductQuery, SortKey};
use farmfresh_common::checkout::PromoCode;
use farmfresh_common::contact::{contact_category, NewContact, CONTACT_CATEGORIES};
use farmfresh_common::currency::format_price;
use farmfresh_common::farmer::{Farmer, FarmerId};
use farmfresh_common::product::{Product, ProductId};
use farmfresh_common::review::NewReview;

#[derive(Parser)]
#[command(name = "farmfresh", about = "Farm Fresh storefront client")]
struct Cli {
    /// Base URL of the catalog server.
    #[arg(
        long,
        env = "FARMFRESH_API_URL",
        default_value = "http://localhost:5000",
        global = true
    )]
    api_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10, global = true)]
    timeout_secs: u64,

    /// Where the cart is kept (default: platform data dir + farmfresh/).
    #[arg(long, env = "FARMFRESH_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List products.
    Products {
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive match on name or description.
        #[arg(long, default_value = "")]
        search: String,
        /// name, price-low, price-high or rating.
        #[arg(long, default_value_t = SortKey::Name)]
        sort: SortKey,
    },
    /// Show one product by slug.
    Product { slug: String },
    Farmers,
    Farmer { id: u32 },
    /// List reviews for a product id.
    Reviews { product_id: u32 },
    /// Post a review.
    Review {
        product_id: u32,
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        rating: i64,
        #[arg(long)]
        comment: String,
    },
    /// Send a message through the contact form.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Topic of the message.
        #[arg(long, value_parser = parse_contact_category)]
        category: String,
        #[arg(long)]
        message: String,
    },
    /// Inspect or change the local cart.
    Cart {
        #[command(subcommand)]
        action: CartCommand,
    },
}

#[derive(Subcommand)]
enum CartCommand {
    Show {
        /// FARM10 or FRESH20.
        #[arg(long)]
        promo: Option<String>,
    },
    Add {
        slug: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    Remove { product_id: u32 },
    /// Set a line's quantity; zero or less removes it.
    Set {
        product_id: u32,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = CatalogClient::new(&cli.api_url, Duration::from_secs(cli.timeout_secs))
        .context("Invalid --api-url")?;

    match cli.command {
        Command::Products {
            category,
            search,
            sort,
        } => {
            let browser = ProductBrowser::new(client);
            browser
                .select_category(category.as_deref())
                .await
                .context("Failed to load products")?;
            let products = browser.visible(&ProductQuery::new(search, sort)).await;
            if products.is_empty() {
                println!("No products found.");
            } else {
                println!("{} products, {}", products.len(), sort.label());
            }
            for product in &products {
                print_product_row(product);
            }
        }
        Command::Product { slug } => {
            let product = client
                .product_by_slug(&slug)
                .await?
                .with_context(|| format!("Product '{slug}' not found"))?;
            print_product(&product);
        }
        Command::Farmers => {
            for farmer in client.farmers().await? {
                print_farmer(&farmer);
            }
        }
        Command::Farmer { id } => {
            let farmer = client
                .farmer(FarmerId(id))
                .await?
                .with_context(|| format!("Farmer {id} not found"))?;
            print_farmer(&farmer);
            println!("  {}", farmer.bio);
        }
        Command::Reviews { product_id } => {
            let reviews = client
                .reviews(ProductId(product_id))
                .await?
                .with_context(|| format!("Product {product_id} not found"))?;
            if reviews.is_empty() {
                println!("No reviews yet.");
            }
            for review in reviews {
                println!(
                    "{} {}/5  {}",
                    review.created_at.format("%Y-%m-%d"),
                    review.rating,
                    review.customer_name
                );
                println!("  {}", review.comment);
            }
        }
        Command::Review {
            product_id,
            name,
            rating,
            comment,
        } => {
            let review = NewReview {
                customer_name: name,
                rating,
                comment,
            };
            let created = client
                .submit_review(ProductId(product_id), &review)
                .await
                .map_err(describe_submit_error)?;
            println!("Thank you! Review #{} was posted.", created.id.0);
        }
        Command::Contact {
            name,
            email,
            category,
            message,
        } => {
            let contact = NewContact {
                name,
                email,
                category,
                message,
            };
            client
                .submit_contact(&contact)
                .await
                .map_err(describe_submit_error)?;
            println!("Message sent! We'll get back to you within 24 hours.");
        }
        Command::Cart { action } => {
            let dir = cli
                .data_dir
                .or_else(FileStorage::default_dir)
                .context("No data directory available, pass --data-dir")?;
            run_cart(&client, FileStorage::new(dir), action).await?;
        }
    }
    Ok(())
}

async fn run_cart(client: &CatalogClient, storage: FileStorage, action: CartCommand) -> Result<()> {
    let mut cart = CartStore::load(storage);

    match action {
        CartCommand::Show { promo } => {
            let promo = match promo.as_deref().map(str::parse::<PromoCode>) {
                None => None,
                Some(Ok(code)) => Some(code),
                Some(Err(_)) => {
                    eprintln!("Invalid promo code, no discount applied.");
                    None
                }
            };
            if cart.is_empty() {
                println!("Your cart is empty.");
                return Ok(());
            }
            for line in cart.lines() {
                println!(
                    "{:>3}  {:<28} {:>3} x {:>8} = {:>9}",
                    line.product.id.0,
                    line.product.name,
                    line.quantity,
                    format_price(line.product.price),
                    format_price(line.line_total()),
                );
            }
            let summary = cart.checkout_summary(promo);
            println!("Items:     {}", cart.cart_count());
            println!("Subtotal:  {}", format_price(summary.subtotal));
            if let Some(code) = summary.promo {
                println!(
                    "Discount:  -{} ({code}, {}%)",
                    format_price(summary.discount),
                    summary.discount_percent()
                );
            }
            println!("Shipping:  Free");
            println!("Total:     {}", format_price(summary.total));
        }
        CartCommand::Add { slug, quantity } => {
            let product = client
                .product_by_slug(&slug)
                .await?
                .with_context(|| format!("Product '{slug}' not found"))?;
            if !product.in_stock {
                bail!("{} is out of stock", product.name);
            }
            cart.add_many(&product, quantity);
        }
        CartCommand::Remove { product_id } => cart.remove_from_cart(ProductId(product_id)),
        CartCommand::Set {
            product_id,
            quantity,
        } => {
            let id = ProductId(product_id);
            if !cart.is_in_cart(id) {
                bail!("Product {product_id} is not in your cart");
            }
            cart.update_quantity(id, quantity);
            println!("Quantity is now {}.", cart.item_quantity(id));
        }
        CartCommand::Clear => cart.clear_cart(),
    }

    for notice in cart.take_notices() {
        println!("{}: {}", notice.title, notice.description);
    }
    Ok(())
}

fn parse_contact_category(value: &str) -> Result<String, String> {
    contact_category(value).map(str::to_string).ok_or_else(|| {
        let choices: Vec<_> = CONTACT_CATEGORIES
            .iter()
            .map(|(key, label)| format!("{key} ({label})"))
            .collect();
        format!("expected one of: {}", choices.join(", "))
    })
}

fn describe_submit_error(err: SubmitError) -> anyhow::Error {
    match err {
        SubmitError::Rejected(message) => anyhow::anyhow!("Rejected: {message}"),
        other => anyhow::Error::new(other),
    }
}

fn print_product_row(product: &Product) {
    println!(
        "{:>3}  {:<28} {:>8}  {:<7} {} ({} reviews){}",
        product.id.0,
        product.name,
        format_price(product.price),
        product.category.as_str(),
        product.rating,
        product.review_count,
        if product.in_stock { "" } else { "  [out of stock]" },
    );
}

fn print_product(product: &Product) {
    println!("{} ({})", product.name, product.slug);
    println!("  {}", product.description);
    println!("  Price:    {}", format_price(product.price));
    println!("  Category: {}", product.category);
    println!(
        "  Rating:   {} from {} reviews",
        product.rating, product.review_count
    );
    println!("  Farmer:   #{}", product.farmer_id);
    println!("  In stock: {}", if product.in_stock { "yes" } else { "no" });
}

fn print_farmer(farmer: &Farmer) {
    println!(
        "{:>3}  {:<16} {:<18} {} years, {} products  ({})",
        farmer.id.0,
        farmer.name,
        farmer.location,
        farmer.years_experience,
        farmer.product_count,
        farmer.specialty,
    );
}
