//! Rows of the bot's relational store that this crate hands around.
//!
//! Mapping and cascade rules belong to the storage layer; these are plain
//! records.

use serde::{Deserialize, Serialize};

/// A bot user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i32,
    pub discord_user_id: u64,
    /// The Last.fm account linked to this user, if any
    pub user_name_last_fm: Option<String>,
}

/// A Discord server the bot is in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guild {
    pub guild_id: i32,
    pub discord_guild_id: u64,
    pub name: String,
}

/// Membership of a user in a guild.
///
/// `user` and `guild` are the parent rows when the storage layer loaded them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildUser {
    pub user_id: i32,
    pub user: Option<User>,
    pub guild_id: i32,
    pub guild: Option<Guild>,
}

impl GuildUser {
    /// A membership row with unresolved parents.
    pub fn new(user_id: i32, guild_id: i32) -> Self {
        Self {
            user_id,
            user: None,
            guild_id,
            guild: None,
        }
    }

    /// A membership row for two loaded parents; keys are taken from them.
    pub fn between(user: User, guild: Guild) -> Self {
        Self {
            user_id: user.user_id,
            guild_id: guild.guild_id,
            user: Some(user),
            guild: Some(guild),
        }
    }
}
