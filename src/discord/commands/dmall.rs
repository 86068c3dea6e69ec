// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::utils::members::send_direct_message;
use miette::IntoDiagnostic;
use twilight_http::client::Client;
use twilight_model::gateway::payload::incoming::MessageCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::{GuildMarker, UserMarker};

const MEMBER_PAGE_SIZE: u16 = 1000;

pub async fn handle_command(
	message: &MessageCreate,
	args: &str,
	guild_id: Id<GuildMarker>,
	http_client: &Client,
) -> miette::Result<()> {
	if args.is_empty() {
		http_client
			.create_message(message.channel_id)
			.content("Usage: `!dmall <message>`")
			.await
			.into_diagnostic()?;
		return Ok(());
	}

	http_client
		.create_message(message.channel_id)
		.content("📤 Sending the message to all members...")
		.await
		.into_diagnostic()?;

	let mut last_member_id: Option<Id<UserMarker>> = None;
	loop {
		let mut members_request = http_client.guild_members(guild_id).limit(MEMBER_PAGE_SIZE);
		if let Some(after_id) = last_member_id {
			members_request = members_request.after(after_id);
		}
		let members = members_request
			.await
			.into_diagnostic()?
			.models()
			.await
			.into_diagnostic()?;

		for member in &members {
			if member.user.bot {
				continue;
			}
			// One member with DMs closed shouldn't abort the rest of the sweep.
			if let Err(error) = send_direct_message(http_client, member.user.id, args).await {
				tracing::warn!(user_id = %member.user.id, source = ?error, "skipping a member who couldn't be messaged");
			}
		}

		if members.len() < usize::from(MEMBER_PAGE_SIZE) {
			break;
		}
		last_member_id = members.last().map(|member| member.user.id);
	}

	http_client
		.create_message(message.channel_id)
		.content("✅ Message sent.")
		.await
		.into_diagnostic()?;

	Ok(())
}
