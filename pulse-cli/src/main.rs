use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use pulse_lib::identity::ResolveOutcome;
use pulse_lib::posting::SubmitOutcome;
use pulse_lib::profile::{AccountType, AvatarStyle};
use pulse_lib::quote::{DEFAULT_QUOTE_ENDPOINT, DEFAULT_SYMBOL, QUOTE_HINT};
use pulse_lib::Client;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(long)]
    quote_endpoint: Option<String>,
    #[structopt(parse(from_os_str))]
    db_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    let endpoint = opt
        .quote_endpoint
        .unwrap_or_else(|| DEFAULT_QUOTE_ENDPOINT.to_string());
    let mut client = Client::new(opt.db_path, &endpoint)?;

    println!("Quantum Pulse");
    let theme = ColorfulTheme::default();

    loop {
        let signed_in = client.session().is_some();
        let items: &[&str] = if signed_in {
            &[
                "Post a broadcast",
                "Show feed",
                "Edit profile",
                "Market quote",
                "Logout",
                "Quit",
            ]
        } else {
            &["Enter the network", "Show feed", "Market quote", "Quit"]
        };

        let choice = Select::with_theme(&theme)
            .items(items)
            .default(0)
            .interact()?;

        match items[choice] {
            "Enter the network" => enter(&theme, &mut client)?,
            "Post a broadcast" => post(&theme, &client)?,
            "Show feed" => show_feed(&client)?,
            "Edit profile" => edit_profile(&theme, &client)?,
            "Market quote" => quote(&theme, &client)?,
            "Logout" => client.logout(),
            _ => break,
        }
    }

    Ok(())
}

fn enter(theme: &ColorfulTheme, client: &mut Client) -> anyhow::Result<()> {
    let username: String = Input::with_theme(theme)
        .with_prompt("Choose Username")
        .allow_empty(true)
        .interact_text()?;
    let account_type = Select::with_theme(theme)
        .with_prompt("Account Type")
        .items(&["Individual", "Company"])
        .default(0)
        .interact()?;
    let account_type = if account_type == 1 {
        AccountType::Company
    } else {
        AccountType::Individual
    };

    match client.enter(&username, account_type)? {
        ResolveOutcome::SignedIn(session) => println!("Logged in: @{}", session.username),
        ResolveOutcome::Created => println!("Identity Created! Enter again to log in."),
        ResolveOutcome::EmptyUsername => {}
    }
    Ok(())
}

fn post(theme: &ColorfulTheme, client: &Client) -> anyhow::Result<()> {
    let text: String = Input::with_theme(theme)
        .with_prompt("What's happening?")
        .allow_empty(true)
        .interact_text()?;
    if let SubmitOutcome::Posted = client.post(&text)? {
        println!("Broadcast sent.");
    }
    Ok(())
}

fn show_feed(client: &Client) -> anyhow::Result<()> {
    let feed = client.feed()?;
    if feed.is_empty() {
        println!("Nothing on the network yet.");
    }
    for entry in feed {
        let badge = if entry.verified { " \u{2714}" } else { "" };
        println!("{}{} (@{})", entry.display_name, badge, entry.author);
        println!("  {}", entry.text);
    }
    Ok(())
}

fn edit_profile(theme: &ColorfulTheme, client: &Client) -> anyhow::Result<()> {
    let pfp: String = Input::with_theme(theme)
        .with_prompt("Avatar URL")
        .allow_empty(true)
        .interact_text()?;
    let style = Select::with_theme(theme)
        .with_prompt("Shape")
        .items(&["Circle", "Square"])
        .default(0)
        .interact()?;
    let style = if style == 1 {
        AvatarStyle::Square
    } else {
        AvatarStyle::Circle
    };
    client.update_appearance(&pfp, style)?;
    println!("Identity updated.");
    Ok(())
}

fn quote(theme: &ColorfulTheme, client: &Client) -> anyhow::Result<()> {
    let symbol: String = Input::with_theme(theme)
        .with_prompt("Symbol")
        .default(DEFAULT_SYMBOL.to_string())
        .interact_text()?;
    match client.quote(&symbol) {
        Ok(price) => println!("{} ${:.2}", symbol, price),
        Err(_) => println!("{}", QUOTE_HINT),
    }
    Ok(())
}
