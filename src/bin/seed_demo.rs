/// Seeds two befriended users with a couple of messages into the configured
/// store, then prints the full dump.
///
/// $ cargo run --bin seed_demo -- --settings=settings/dev.toml
///
/// Re-running is safe: existing users and friendships are reported and kept.
use cheeper::app::App;
use cheeper::application_port::GraphError;
use cheeper::console::render_users_table;
use cheeper::domain_model::{DateRange, UserId};
use cheeper::settings::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::new("seed_demo=debug,cheeper=debug");

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let project_settings = parse_settings(cli.settings.as_deref())?;
    let app = App::try_new(&project_settings).await?;
    let service = app.graph_service;

    let ann: UserId = "1".parse()?;
    let bob: UserId = "2".parse()?;

    for (id, name, login) in [(&ann, "Ann", "ann1"), (&bob, "Bob", "bob2")] {
        match service.create_user(id, name, login).await {
            Ok(()) | Err(GraphError::UserAlreadyExists(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    match service.create_friendship(&ann, &bob).await {
        Ok(()) | Err(GraphError::AlreadyFriends(..)) => {}
        Err(e) => return Err(e.into()),
    }
    for text in ["hi", "bye"] {
        let message_id = service.create_message(&ann, text).await?;
        tracing::debug!("message_id: {}", message_id);
    }

    tracing::debug!("friend_count(1): {}", service.friend_count(&ann).await?);
    tracing::debug!("friends(1): {:?}", service.sorted_friend_names(&ann).await?);
    for message in service.messages_for_user(&ann, DateRange::all()).await? {
        tracing::debug!("message: {}", message);
    }

    print!("{}", render_users_table(&service.dump_all_users().await?));
    Ok(())
}
