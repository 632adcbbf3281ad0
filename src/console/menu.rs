use super::run_command;
use crate::application_port::GraphService;
use crate::domain_model::{UserId, parse_date};
use crate::settings::{Command, OutputFormat};
use chrono::NaiveDate;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

const ITEMS: [(&str, &str); 8] = [
    ("1", "Add user"),
    ("2", "Add message"),
    ("3", "Add friend"),
    ("4", "Show messages for a period"),
    ("5", "Show sorted friend names"),
    ("6", "Show friend count"),
    ("7", "Show all users"),
    ("8", "Exit"),
];

/// Runs the numbered menu until "8" or end of input.
pub async fn run_menu<R, W>(service: &dyn GraphService, input: R, out: &mut W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut menu = Menu {
        service,
        input: input.lines(),
        out,
    };
    menu.run().await
}

struct Menu<'a, R, W> {
    service: &'a dyn GraphService,
    input: Lines<R>,
    out: &'a mut W,
}

impl<R, W> Menu<'_, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.out, "\nMenu:")?;
            for (key, label) in ITEMS {
                writeln!(self.out, "{key}. {label}")?;
            }
            let Some(choice) = self.prompt("Choose an action: ").await? else {
                return Ok(());
            };

            let command = match choice.trim() {
                "1" => self.add_user().await?,
                "2" => self.add_message().await?,
                "3" => self.add_friend().await?,
                "4" => self.messages().await?,
                "5" => self.user_id("User ID: ").await?.map(|user| Command::Friends { user }),
                "6" => self
                    .user_id("User ID: ")
                    .await?
                    .map(|user| Command::FriendCount { user }),
                "7" => Some(Command::Users {
                    format: OutputFormat::Table,
                }),
                "8" => return Ok(()),
                _ => {
                    writeln!(self.out, "Invalid choice, try again.")?;
                    continue;
                }
            };

            if let Some(command) = command {
                run_command(self.service, command, &mut *self.out).await?;
            }
        }
    }

    async fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        Ok(self.input.next_line().await?)
    }

    async fn user_id(&mut self, label: &str) -> anyhow::Result<Option<UserId>> {
        let Some(line) = self.prompt(label).await? else {
            return Ok(None);
        };
        match line.parse::<UserId>() {
            Ok(user_id) => Ok(Some(user_id)),
            Err(e) => {
                writeln!(self.out, "Error: {e}.")?;
                Ok(None)
            }
        }
    }

    /// `Some(None)` is an empty answer, i.e. no bound. Malformed dates are re-asked.
    async fn date(&mut self, label: &str) -> anyhow::Result<Option<Option<NaiveDate>>> {
        loop {
            let Some(line) = self.prompt(label).await? else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                return Ok(Some(None));
            }
            match parse_date(&line) {
                Ok(date) => return Ok(Some(Some(date))),
                Err(e) => writeln!(self.out, "Error: {e}.")?,
            }
        }
    }

    async fn add_user(&mut self) -> anyhow::Result<Option<Command>> {
        let Some(id) = self.user_id("ID: ").await? else {
            return Ok(None);
        };
        let Some(name) = self.prompt("Name: ").await? else {
            return Ok(None);
        };
        let Some(login) = self.prompt("Login: ").await? else {
            return Ok(None);
        };
        Ok(Some(Command::AddUser { id, name, login }))
    }

    async fn add_message(&mut self) -> anyhow::Result<Option<Command>> {
        let Some(user) = self.user_id("User ID: ").await? else {
            return Ok(None);
        };
        let Some(text) = self.prompt("Message: ").await? else {
            return Ok(None);
        };
        Ok(Some(Command::AddMessage { user, text }))
    }

    async fn add_friend(&mut self) -> anyhow::Result<Option<Command>> {
        let Some(user) = self.user_id("User ID: ").await? else {
            return Ok(None);
        };
        let Some(friend) = self.user_id("Friend ID: ").await? else {
            return Ok(None);
        };
        Ok(Some(Command::AddFriend { user, friend }))
    }

    async fn messages(&mut self) -> anyhow::Result<Option<Command>> {
        let Some(user) = self.user_id("User ID: ").await? else {
            return Ok(None);
        };
        let Some(filter) = self.prompt("Filter by date? (y/n): ").await? else {
            return Ok(None);
        };
        if !filter.trim().eq_ignore_ascii_case("y") {
            return Ok(Some(Command::Messages {
                user,
                from: None,
                to: None,
            }));
        }
        let Some(from) = self.date("Start date (YYYY-MM-DD): ").await? else {
            return Ok(None);
        };
        let Some(to) = self.date("End date (YYYY-MM-DD): ").await? else {
            return Ok(None);
        };
        Ok(Some(Command::Messages { user, from, to }))
    }
}
