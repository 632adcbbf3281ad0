use super::{render_users_json, render_users_table};
use crate::application_port::{GraphError, GraphService};
use crate::domain_model::{DateRange, UserId};
use crate::settings::{Command, OutputFormat};
use std::io::Write;

/// Runs one command and writes its outcome to `out`. Domain failures are
/// reported as text; store and I/O failures are returned.
pub async fn run_command<W: Write>(
    service: &dyn GraphService,
    command: Command,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::AddUser { id, name, login } => {
            match service.create_user(&id, &name, &login).await {
                Ok(()) => writeln!(out, "User {name} added.")?,
                Err(e) => report(out, e)?,
            }
        }
        Command::AddMessage { user, text } => match service.create_message(&user, &text).await {
            Ok(message_id) => writeln!(out, "Message {message_id} added for user {user}.")?,
            Err(e) => report(out, e)?,
        },
        Command::AddFriend { user, friend } => {
            match service.create_friendship(&user, &friend).await {
                Ok(()) => writeln!(out, "Users {user} and {friend} are now friends.")?,
                Err(e) => report(out, e)?,
            }
        }
        Command::Messages { user, from, to } => {
            if !user_exists(service, &user, out).await? {
                return Ok(());
            }
            let messages = service
                .messages_for_user(&user, DateRange::new(from, to))
                .await?;
            if messages.is_empty() {
                writeln!(out, "No messages for the given period.")?;
            } else {
                writeln!(out, "Messages:")?;
                for message in &messages {
                    writeln!(out, "- {message}")?;
                }
            }
        }
        Command::Friends { user } => {
            if !user_exists(service, &user, out).await? {
                return Ok(());
            }
            let names = service.sorted_friend_names(&user).await?;
            if names.is_empty() {
                writeln!(out, "No friends.")?;
            }
            for name in &names {
                writeln!(out, "{name}")?;
            }
        }
        Command::FriendCount { user } => {
            if !user_exists(service, &user, out).await? {
                return Ok(());
            }
            let count = service.friend_count(&user).await?;
            writeln!(out, "Friend count: {count}")?;
        }
        Command::Users { format } => {
            let reports = service.dump_all_users().await?;
            match format {
                OutputFormat::Table => write!(out, "{}", render_users_table(&reports))?,
                OutputFormat::Json => writeln!(out, "{}", render_users_json(&reports)?)?,
            }
        }
        Command::Menu => writeln!(out, "The menu only runs interactively.")?,
    }
    Ok(())
}

fn report<W: Write>(out: &mut W, err: GraphError) -> anyhow::Result<()> {
    match err {
        GraphError::Store(_) => Err(err.into()),
        other => {
            writeln!(out, "Error: {other}.")?;
            Ok(())
        }
    }
}

async fn user_exists<W: Write>(
    service: &dyn GraphService,
    user_id: &UserId,
    out: &mut W,
) -> anyhow::Result<bool> {
    if service.get_user(user_id).await?.is_some() {
        return Ok(true);
    }
    writeln!(out, "User {user_id} does not exist.")?;
    Ok(false)
}
