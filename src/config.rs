// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::{Result, miette};
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, RoleMarker};

/// Startup configuration for the bot, sourced from the environment.
#[derive(Debug)]
pub struct ConfigData {
	pub bot_token: String,
	pub guild_id: Id<GuildMarker>,
	pub support_role_id: Id<RoleMarker>,
	pub ticket_category_id: Id<ChannelMarker>,
	pub welcome_channel_id: Id<ChannelMarker>,
}

/// Reads the bot configuration from the environment, loading a `.env` file first if one is present.
/// Fails with a diagnostic naming the offending variable if any value is absent or malformed.
pub fn parse_config() -> Result<ConfigData> {
	let _ = dotenvy::dotenv();

	let bot_token = required_var("DISCORD_TOKEN")?;
	let guild_id = parse_id("GUILD_ID", &required_var("GUILD_ID")?)?;
	let support_role_id = parse_id("SUPPORT_ROLE_ID", &required_var("SUPPORT_ROLE_ID")?)?;
	let ticket_category_id = parse_id("TICKET_CATEGORY_ID", &required_var("TICKET_CATEGORY_ID")?)?;
	let welcome_channel_id = parse_id("WELCOME_CHANNEL_ID", &required_var("WELCOME_CHANNEL_ID")?)?;

	Ok(ConfigData {
		bot_token,
		guild_id,
		support_role_id,
		ticket_category_id,
		welcome_channel_id,
	})
}

fn required_var(name: &str) -> Result<String> {
	std::env::var(name).map_err(|_| miette!("required environment variable {} is not set", name))
}

fn parse_id<M>(name: &str, value: &str) -> Result<Id<M>> {
	let raw_id: u64 = value
		.parse()
		.map_err(|_| miette!("environment variable {} must be a numeric ID (got {:?})", name, value))?;
	Id::new_checked(raw_id).ok_or_else(|| miette!("environment variable {} must be a nonzero ID", name))
}

#[cfg(test)]
mod tests {
	use super::parse_id;
	use twilight_model::id::marker::GuildMarker;

	#[test]
	fn numeric_id_parses() {
		let id = parse_id::<GuildMarker>("GUILD_ID", "1234567890").unwrap();
		assert_eq!(id.get(), 1234567890);
	}

	#[test]
	fn non_numeric_id_is_rejected_with_variable_name() {
		let error = parse_id::<GuildMarker>("GUILD_ID", "not-a-number").unwrap_err();
		assert!(error.to_string().contains("GUILD_ID"));
	}

	#[test]
	fn zero_id_is_rejected() {
		assert!(parse_id::<GuildMarker>("GUILD_ID", "0").is_err());
	}
}
