// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::split_member_arg;
use miette::IntoDiagnostic;
use twilight_http::client::Client;
use twilight_http::request::AuditLogReason;
use twilight_mention::fmt::Mention;
use twilight_model::gateway::payload::incoming::MessageCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::GuildMarker;

const DEFAULT_REASON: &str = "Not specified";

pub async fn handle_command(
	message: &MessageCreate,
	args: &str,
	guild_id: Id<GuildMarker>,
	http_client: &Client,
) -> miette::Result<()> {
	let Some((user_id, reason)) = split_member_arg(args) else {
		http_client
			.create_message(message.channel_id)
			.content("Usage: `!kick <member> [reason]`")
			.await
			.into_diagnostic()?;
		return Ok(());
	};
	let reason = if reason.is_empty() { DEFAULT_REASON } else { reason };

	http_client
		.remove_guild_member(guild_id, user_id)
		.reason(reason)
		.await
		.into_diagnostic()?;

	http_client
		.create_message(message.channel_id)
		.content(&format!("👢 {} was kicked. Reason: {}", user_id.mention(), reason))
		.await
		.into_diagnostic()?;

	Ok(())
}
