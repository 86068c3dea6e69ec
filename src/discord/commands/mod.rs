// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::utils::members::parse_member_arg;
use super::utils::permissions::member_is_administrator;
use crate::config::ConfigData;
use miette::{IntoDiagnostic, bail};
use std::sync::Arc;
use tokio::sync::RwLock;
use twilight_http::client::Client;
use twilight_model::gateway::payload::incoming::MessageCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::UserMarker;
use type_map::concurrent::TypeMap;

mod ban;
mod clear;
mod dmall;
mod kick;
mod mute;
mod panel;
mod unmute;

pub const COMMAND_PREFIX: &str = "!";

const ADMINISTRATOR_REQUIRED: &str = "You must be an administrator to use this command.";

/// Splits a prefixed command message into its command name and argument remainder.
/// Returns `None` for anything that isn't a command invocation.
fn parse_command(content: &str) -> Option<(&str, &str)> {
	let invocation = content.strip_prefix(COMMAND_PREFIX)?;
	if invocation.is_empty() || invocation.starts_with(char::is_whitespace) {
		return None;
	}
	match invocation.split_once(char::is_whitespace) {
		Some((name, args)) => Some((name, args.trim())),
		None => Some((invocation, "")),
	}
}

/// Splits a member argument off the front of a command's argument text, leaving the rest for
/// the command to interpret (a reason, a duration).
fn split_member_arg(args: &str) -> Option<(Id<UserMarker>, &str)> {
	let (member_arg, rest) = match args.split_once(char::is_whitespace) {
		Some((member_arg, rest)) => (member_arg, rest.trim_start()),
		None => (args, ""),
	};
	let user_id = parse_member_arg(member_arg)?;
	Some((user_id, rest))
}

pub async fn route_message(
	message: &MessageCreate,
	http_client: &Arc<Client>,
	config: &Arc<ConfigData>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	if message.author.bot {
		return Ok(());
	}
	let Some(guild_id) = message.guild_id else {
		return Ok(());
	};
	if guild_id != config.guild_id {
		return Ok(());
	}
	let Some((command_name, args)) = parse_command(&message.content) else {
		return Ok(());
	};

	match command_name {
		"panel" => panel::handle_command(message, http_client).await,
		"ban" | "clear" | "dmall" | "kick" | "mute" | "unmute" => {
			let Some(member) = &message.member else {
				bail!("Guild command message has no member data: {:?}", message);
			};
			if !member_is_administrator(http_client, guild_id, message.author.id, &member.roles).await? {
				http_client
					.create_message(message.channel_id)
					.content(ADMINISTRATOR_REQUIRED)
					.await
					.into_diagnostic()?;
				return Ok(());
			}
			match command_name {
				"ban" => ban::handle_command(message, args, guild_id, http_client).await,
				"clear" => clear::handle_command(message, args, http_client).await,
				"dmall" => dmall::handle_command(message, args, guild_id, http_client).await,
				"kick" => kick::handle_command(message, args, guild_id, http_client).await,
				"mute" => mute::handle_command(message, args, guild_id, http_client, bot_state).await,
				"unmute" => unmute::handle_command(message, args, guild_id, http_client, bot_state).await,
				_ => Ok(()),
			}
		}
		_ => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use super::{parse_command, split_member_arg};

	#[test]
	fn command_with_args_splits() {
		assert_eq!(parse_command("!clear 10"), Some(("clear", "10")));
	}

	#[test]
	fn command_without_args_has_empty_args() {
		assert_eq!(parse_command("!panel"), Some(("panel", "")));
	}

	#[test]
	fn args_keep_their_inner_spacing() {
		assert_eq!(
			parse_command("!kick <@123> was very rude"),
			Some(("kick", "<@123> was very rude"))
		);
	}

	#[test]
	fn unprefixed_messages_are_not_commands() {
		assert_eq!(parse_command("hello there"), None);
	}

	#[test]
	fn bare_or_spaced_prefix_is_not_a_command() {
		assert_eq!(parse_command("!"), None);
		assert_eq!(parse_command("! kick"), None);
	}

	#[test]
	fn member_arg_splits_off_the_rest() {
		let (user_id, reason) = split_member_arg("<@123> being rude").unwrap();
		assert_eq!(user_id.get(), 123);
		assert_eq!(reason, "being rude");
	}

	#[test]
	fn member_arg_alone_leaves_empty_rest() {
		let (user_id, rest) = split_member_arg("456").unwrap();
		assert_eq!(user_id.get(), 456);
		assert_eq!(rest, "");
	}

	#[test]
	fn missing_member_arg_is_rejected() {
		assert!(split_member_arg("").is_none());
		assert!(split_member_arg("jane being rude").is_none());
	}
}
