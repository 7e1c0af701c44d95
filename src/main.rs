//! Menu Board CLI
//!
//! Staff-side command line over the menu client.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use menu_board::calendar::week_range;
use menu_board::config::ClientConfig;
use menu_board::domain::{AllergenMarker, DateKey, Entity, ItemDraft, MealType, MenuDraft};
use menu_board::error::ClientResult;
use menu_board::repository::MenuRepository;
use menu_board::store::{MenuEntry, MenuStore};
use menu_board::{ClientError, MenuClient};

#[derive(Parser)]
#[command(name = "menu-board", about = "Plan and view cafeteria menus")]
struct Cli {
    /// Config file (defaults to the app config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session
    Login { username: String, password: String },
    /// Forget the stored session
    Logout,
    /// Show one day's menu (today by default)
    Day { date: Option<String> },
    /// Show the Monday-to-Sunday week around a date
    Week { date: Option<String> },
    /// Create an empty menu for a date
    Create { date: String },
    /// Add a dish, creating the menu and meal when needed
    AddDish {
        date: String,
        meal: String,
        name: String,
        #[arg(short, long = "allergen")]
        allergens: Vec<String>,
    },
    /// Remove the dish at a position (starting at 0) from a meal
    RemoveDish { date: String, meal: String, index: usize },
    /// Delete the menu for a date
    Delete { date: String },
}

fn parse_date(raw: Option<&str>) -> ClientResult<DateKey> {
    raw.map(DateKey::parse).unwrap_or_else(|| Ok(DateKey::today()))
}

fn print_entry(date: DateKey, entry: Option<&MenuEntry>) {
    let weekday = date.as_naive().format("%A");
    let Some(entry) = entry else {
        println!("{} ({}): no menu", date, weekday);
        return;
    };
    let marker = if entry.is_pending() { " [pending]" } else { "" };
    println!("{} ({}){}", date, weekday, marker);

    let draft = entry.draft();
    for meal_type in MealType::ALL {
        let Some(meal) = draft.meal(meal_type) else { continue };
        println!("  {}", meal_type.label());
        if meal.items.is_empty() {
            println!("    (empty)");
        }
        for (i, item) in meal.items.iter().enumerate() {
            let tags: Vec<String> = item
                .allergens
                .iter()
                .map(|a| match AllergenMarker::for_name(a) {
                    AllergenMarker::Icon(_) => a.to_string(),
                    fallback => format!("{} {}", fallback.as_str(), a),
                })
                .collect();
            if tags.is_empty() {
                println!("    {}. {}", i, item.name);
            } else {
                println!("    {}. {} [{}]", i, item.name, tags.join(", "));
            }
        }
    }
}

async fn load_day(client: &MenuClient, store: &mut MenuStore, date: DateKey) -> ClientResult<()> {
    if let Some(menu) = client.menus.get_by_date(&date.to_string()).await? {
        store.reconcile(menu);
    }
    Ok(())
}

/// Stage the edit, send it, fold the answer back in
async fn save_draft(client: &MenuClient, store: &mut MenuStore, date: DateKey, draft: MenuDraft) -> ClientResult<()> {
    match store.entry_for(date).and_then(MenuEntry::menu_id) {
        Some(menu_id) => {
            let token = store.stage_update(menu_id, draft.clone())?;
            match client.menus.update(menu_id, &draft).await {
                Ok(menu) => store.confirm(token, menu),
                Err(e) => {
                    store.reject(token);
                    return Err(e);
                }
            }
        }
        None => {
            let token = store.stage_create(date, draft.clone())?;
            match client.menus.create(&date.to_string(), &draft).await {
                Ok(menu) => store.confirm(token, menu),
                Err(e) => {
                    store.reject(token);
                    return Err(e);
                }
            }
        }
    }
    Ok(())
}

async fn run(client: &MenuClient, command: Command) -> ClientResult<()> {
    let mut store = MenuStore::new();

    match command {
        Command::Login { username, password } => {
            let creds = client.auth.login(&username, &password).await?;
            println!("Signed in as {}", creds.user.username);
        }
        Command::Logout => {
            client.auth.logout();
            println!("Signed out");
        }
        Command::Day { date } => {
            let date = parse_date(date.as_deref())?;
            load_day(client, &mut store, date).await?;
            print_entry(date, store.entry_for(date));
        }
        Command::Week { date } => {
            let reference = parse_date(date.as_deref())?;
            let (start, end) = week_range(reference);
            let menus = client
                .menus
                .get_range(Some(&start.to_string()), Some(&end.to_string()))
                .await?;
            store.replace_all(menus);
            for (day, entry) in store.week(reference) {
                print_entry(day, entry);
            }
        }
        Command::Create { date } => {
            let date = DateKey::parse(&date)?;
            load_day(client, &mut store, date).await?;
            if store.entry_for(date).is_some() {
                return Err(ClientError::validation(format!("a menu for {} already exists", date)));
            }
            save_draft(client, &mut store, date, MenuDraft::empty()).await?;
            print_entry(date, store.entry_for(date));
        }
        Command::AddDish { date, meal, name, allergens } => {
            let date = DateKey::parse(&date)?;
            let meal_type = MealType::from_str(&meal)?;
            let item = ItemDraft::new(&name, allergens)?;
            load_day(client, &mut store, date).await?;

            let mut draft = store.entry_for(date).map(MenuEntry::draft).unwrap_or_default();
            draft.add_item(meal_type, item)?;
            save_draft(client, &mut store, date, draft).await?;
            print_entry(date, store.entry_for(date));
        }
        Command::RemoveDish { date, meal, index } => {
            let date = DateKey::parse(&date)?;
            let meal_type = MealType::from_str(&meal)?;
            load_day(client, &mut store, date).await?;

            let mut draft = store
                .entry_for(date)
                .map(MenuEntry::draft)
                .ok_or_else(|| ClientError::validation(format!("no menu for {}", date)))?;
            let removed = draft.remove_item(meal_type, index)?;
            save_draft(client, &mut store, date, draft).await?;
            println!("Removed {}", removed.name);
            print_entry(date, store.entry_for(date));
        }
        Command::Delete { date } => {
            let date = DateKey::parse(&date)?;
            load_day(client, &mut store, date).await?;
            match store.menu_for(date).map(|m| m.id()) {
                Some(menu_id) => {
                    client.menus.delete_menu(menu_id).await?;
                    store.remove(menu_id);
                    println!("Deleted menu for {}", date);
                }
                None => println!("No menu for {}", date),
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ClientConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = rolling_logger::init_logger(config.log_dir.clone(), "menu-board") {
        eprintln!("Logging disabled: {}", e);
    }

    let client = match MenuClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(ClientError::SessionExpired) => {
            eprintln!("Session expired. Run `menu-board login <user> <password>` again.");
            ExitCode::FAILURE
        }
        Err(e) => {
            let _ = rolling_logger::error(&format!("Command failed: {}", e));
            eprintln!("{}", e);
            if e.is_retryable() {
                eprintln!("The backend could not be reached; try again.");
            }
            ExitCode::FAILURE
        }
    }
}
