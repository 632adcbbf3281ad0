use super::Parser;
use crate::domain_model::{UserId, parse_date};
use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "cheeper", about = "Users, friendships and messages kept in Redis")]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,

    /// Runs the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a user
    AddUser {
        #[arg(long)]
        id: UserId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        login: String,
    },
    /// Post a message as a user
    AddMessage {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        text: String,
    },
    /// Make two users friends
    AddFriend {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        friend: UserId,
    },
    /// List a user's messages, optionally within [from, to]
    Messages {
        #[arg(long)]
        user: UserId,
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// List a user's friends by name
    Friends {
        #[arg(long)]
        user: UserId,
    },
    /// Count a user's friends
    FriendCount {
        #[arg(long)]
        user: UserId,
    },
    /// Dump every user with friends and messages
    Users {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Interactive numbered menu
    Menu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
