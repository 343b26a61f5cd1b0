// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;
use tracing::info;

use split_ledger::{init_logging, AppConfig, Coordinator, FriendId, LogTarget, Payer};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = AppConfig::load()?;

    if args.len() > 1 && args[1] == "demo" {
        init_logging(&config, LogTarget::FileOrStderr)?;
        run_demo(&config)?;
    } else {
        init_logging(&config, LogTarget::FileOnly)?;
        run_ui_mode(&config)?;
    }

    Ok(())
}

fn print_friends(coordinator: &Coordinator, config: &AppConfig) {
    for friend in coordinator.friends() {
        println!(
            "  {:<8} {:>5}  {}",
            friend.name,
            friend.balance,
            friend.balance_message(&config.currency_symbol)
        );
    }
}

fn run_demo(config: &AppConfig) -> Result<()> {
    println!("Split Ledger v{} - demo", split_ledger::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut coordinator = Coordinator::seeded();
    println!("\nStarting balances:");
    print_friends(&coordinator, config);

    // 1. Sarah, you pay 100, your share 40
    println!("\nSplit 100 with Sarah (you paid, your expense 40)...");
    coordinator.handle_select(&FriendId::from("933372"))?;
    let outcome = coordinator.handle_split(100, 40, Payer::User)?.value;
    println!("✓ delta {:+}, Sarah now at {}", outcome.delta, outcome.new_balance);

    // 2. Clark, he pays 50, your share 10
    println!("\nSplit 50 with Clark (Clark paid, your expense 10)...");
    coordinator.handle_select(&FriendId::from("118836"))?;
    let outcome = coordinator.handle_split(50, 10, Payer::Friend)?.value;
    println!("✓ delta {:+}, Clark now at {}", outcome.delta, outcome.new_balance);

    // 3. Splitting with nobody selected is refused
    coordinator.handle_select(&FriendId::from("118836"))?;
    if let Err(e) = coordinator.handle_split(10, 5, Payer::User) {
        println!("\n✓ Refused with no selection: {}", e);
    }

    println!("\nFinal balances:");
    print_friends(&coordinator, config);

    info!("demo finished");
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &AppConfig) -> Result<()> {
    info!(version = split_ledger::VERSION, "starting UI");

    let mut app = ui::App::new(Coordinator::seeded(), config);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &AppConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or run the scripted demo: cargo run -- demo");
    std::process::exit(1);
}
