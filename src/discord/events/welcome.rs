// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use miette::IntoDiagnostic;
use twilight_http::client::Client;
use twilight_mention::fmt::Mention;
use twilight_model::channel::message::embed::Embed;
use twilight_model::gateway::payload::incoming::MemberAdd;
use twilight_model::id::Id;
use twilight_model::id::marker::UserMarker;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};
use twilight_validate::embed::EmbedValidationError;

const WELCOME_COLOR: u32 = 0xFF0000;
const WELCOME_FOOTER: &str = "Enjoy your stay!";

pub async fn handle_member_join(
	member_add: &MemberAdd,
	http_client: &Client,
	config: &ConfigData,
) -> miette::Result<()> {
	if member_add.guild_id != config.guild_id {
		return Ok(());
	}

	let guild_response = http_client
		.guild(config.guild_id)
		.with_counts(true)
		.await
		.into_diagnostic()?;
	let guild = guild_response.model().await.into_diagnostic()?;
	let member_count = guild.approximate_member_count.unwrap_or_default();

	let embed = welcome_embed(member_add.member.user.id, member_count).into_diagnostic()?;
	let send_result = http_client
		.create_message(config.welcome_channel_id)
		.embeds(&[embed])
		.await;
	if let Err(error) = send_result {
		tracing::warn!(source = ?error, "couldn't post the welcome message");
	}

	Ok(())
}

fn welcome_embed(user_id: Id<UserMarker>, member_count: u64) -> Result<Embed, EmbedValidationError> {
	let description = format!(
		"Hi {}, we're glad you joined!\n\nWe're currently **{}** members strong.\n\nIf you need help or have any questions, use our ticket system.",
		user_id.mention(),
		member_count
	);
	let embed = EmbedBuilder::new()
		.title("🎉 Welcome! 🎉")
		.description(description)
		.color(WELCOME_COLOR)
		.footer(EmbedFooterBuilder::new(WELCOME_FOOTER))
		.validate()?
		.build();
	Ok(embed)
}

#[cfg(test)]
mod tests {
	use super::welcome_embed;
	use twilight_model::id::Id;

	#[test]
	fn welcome_embed_mentions_the_member_and_count() {
		let embed = welcome_embed(Id::new(123456), 42).unwrap();
		let description = embed.description.unwrap();
		assert!(description.contains("<@123456>"));
		assert!(description.contains("**42**"));
		assert_eq!(embed.footer.unwrap().text, "Enjoy your stay!");
	}
}
