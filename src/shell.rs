//! Line-oriented terminal front end for the storefront.

use anyhow::{anyhow, bail, Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{info, warn};
use crate::app_system::Storefront;
use crate::clients::WizardClient;
use crate::domain::{CustomerField, Product};
use crate::messages::WizardView;
use crate::wizard::{Stage, WizardError};

/// One shopper command while a wizard is open.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardCommand {
    Next,
    Back,
    /// 1-based position in the product's service list.
    Toggle(usize),
    Set(CustomerField, String),
    /// Validate one field right away.
    Check(CustomerField),
    Book,
    Close,
    Help,
}

pub fn parse_command(line: &str) -> Result<WizardCommand> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        "next" | "n" => WizardCommand::Next,
        "back" | "b" => WizardCommand::Back,
        "toggle" | "t" => {
            let position = rest
                .parse::<usize>()
                .map_err(|_| anyhow!("toggle needs a service number, got '{}'", rest))?;
            WizardCommand::Toggle(position)
        }
        "set" | "s" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            WizardCommand::Set(field.parse()?, value.trim().to_string())
        }
        "check" | "c" => WizardCommand::Check(rest.parse()?),
        "book" => WizardCommand::Book,
        "close" | "q" | "quit" => WizardCommand::Close,
        "help" | "h" | "?" => WizardCommand::Help,
        "" => bail!("empty command, type 'help' for a list"),
        other => bail!("unknown command '{}', type 'help' for a list", other),
    };
    Ok(command)
}

/// Lists the catalog, lets the shopper pick a product and walks them through
/// the wizard. Returns when input ends or the shopper quits.
pub async fn run<R>(storefront: &Storefront, lines: &mut Lines<R>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let catalog = storefront
        .load_catalog()
        .await
        .context("Failed to load accommodations")?;

    if catalog.is_empty() {
        println!("No accommodations available.");
        return Ok(());
    }

    loop {
        print_catalog(&catalog);
        println!("Select a product number, or 'quit':");
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        let choice = line.trim();
        if matches!(choice, "quit" | "q") {
            return Ok(());
        }

        let product = match choice.parse::<usize>().ok().and_then(|n| n.checked_sub(1)).and_then(|i| catalog.get(i)) {
            Some(product) => product.clone(),
            None => {
                println!("'{}' is not a product number.", choice);
                continue;
            }
        };

        let session = storefront.open_wizard(product);
        let outcome = drive_wizard(&session.client, lines).await;
        session.close().await?;
        if !outcome? {
            return Ok(());
        }
    }
}

/// Runs one wizard until the shopper closes it. Returns `false` when input
/// ended while the wizard was open.
async fn drive_wizard<R>(client: &WizardClient, lines: &mut Lines<R>) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let view = client.view().await?;
        print_view(&view);

        let Some(line) = lines.next_line().await? else {
            return Ok(false);
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            WizardCommand::Next => report(client.advance().await),
            WizardCommand::Back => report(client.retreat().await),
            WizardCommand::Toggle(position) => {
                match position.checked_sub(1).and_then(|i| view.product.services.get(i)) {
                    Some(service) => report(client.toggle_service(service.id.clone()).await),
                    None => println!("There is no service number {}.", position),
                }
            }
            WizardCommand::Set(field, value) => {
                report(client.update_customer_field(field, value).await);
                if view.stage == Stage::CustomerInfo {
                    report(client.blur_field(field).await);
                }
            }
            WizardCommand::Check(field) => match client.blur_field(field).await {
                Ok(None) => println!("{} looks good.", field.label()),
                Ok(Some(message)) => println!("{}", message),
                Err(e) => println!("{}", e),
            },
            WizardCommand::Book => {
                println!("Submitting booking...");
                match client.submit_booking().await {
                    Ok(confirmation) => {
                        info!("Booking submitted");
                        println!("Booking confirmed:\n{}", confirmation.pretty());
                    }
                    Err(WizardError::Submission(e)) => {
                        warn!(error = %e, "Booking submission failed");
                        println!("Booking failed: {}. Type 'book' to try again.", e);
                    }
                    Err(e) => println!("{}", e),
                }
            }
            WizardCommand::Close => return Ok(true),
            WizardCommand::Help => print_help(),
        }
    }
}

fn report<T>(result: Result<T, WizardError>) {
    match result {
        Ok(_) => {}
        Err(WizardError::InvalidCustomer(_)) => println!("Please fix the highlighted fields."),
        Err(e) => println!("{}", e),
    }
}

fn print_catalog(catalog: &[Product]) {
    println!();
    for (index, product) in catalog.iter().enumerate() {
        println!("{:>3}. {} - {} €", index + 1, product.name, product.price);
        if !product.description.is_empty() {
            println!("     {}", product.description);
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  next | back                move between stages");
    println!("  toggle <n>                 select or unselect extra service n");
    println!("  set <field> <value>        fill firstName, lastName, email or phone");
    println!("  check <field>              validate one field");
    println!("  book                       submit the booking from the summary");
    println!("  close                      close the wizard");
}

pub fn render_view(view: &WizardView) -> String {
    let mut out = vec![String::new(), format!("== {} ==", view.stage)];

    match view.stage {
        Stage::ProductDetails => {
            out.push(view.product.name.clone());
            if !view.product.description.is_empty() {
                out.push(view.product.description.clone());
            }
            out.push(format!("{} €", view.product.price));
        }
        Stage::ServiceSelection => {
            if view.product.services.is_empty() {
                out.push("No extra services for this product.".to_string());
            }
            for (index, service) in view.product.services.iter().enumerate() {
                let mark = if view.selected.iter().any(|s| s.id == service.id) { "x" } else { " " };
                out.push(format!("[{}] {}. {} ({} €)", mark, index + 1, service.name, service.price));
            }
        }
        Stage::CustomerInfo => {
            for field in CustomerField::ALL {
                out.push(format!("{} *: {}", field.label(), view.customer.get(field)));
                if let Some(message) = view.field_errors.get(&field) {
                    out.push(format!("    ! {}", message));
                }
            }
        }
        Stage::Summary => {
            let summary = &view.summary;
            out.push(summary.product_name.clone());
            out.push(format!("Base price: {} €", summary.base_price));
            if !summary.services.is_empty() {
                out.push("Selected services:".to_string());
                for service in &summary.services {
                    out.push(format!("  - {} ({} €)", service.name, service.price));
                }
                out.push(format!("Total extra services: {} €", summary.total_extra_service_price));
            }
            if let Some(customer) = &summary.customer {
                out.push("Customer Info".to_string());
                out.push(format!("  First Name: {}", customer.first_name));
                out.push(format!("  Last Name: {}", customer.last_name));
                out.push(format!("  Email: {}", customer.email));
                out.push(format!("  Phone: {}", customer.phone));
            }
            out.push(format!("Total price: {} €", summary.total_price));
        }
    }

    if view.submitting {
        out.push("(submission in progress)".to_string());
    }
    out.join("\n")
}

fn print_view(view: &WizardView) {
    println!("{}", render_view(view));
    let hint = match view.stage {
        Stage::ProductDetails => "next | close",
        Stage::ServiceSelection => "toggle <n> | next | back | close",
        Stage::CustomerInfo => "set <field> <value> | next | back | close",
        Stage::Summary => "book | back | close",
    };
    println!("> {}", hint);
}
