// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::mute::MUTE_ROLE_NAME;
use super::split_member_arg;
use crate::discord::state::mutes::MuteTimers;
use miette::IntoDiagnostic;
use std::sync::Arc;
use tokio::sync::RwLock;
use twilight_http::client::Client;
use twilight_mention::fmt::Mention;
use twilight_model::gateway::payload::incoming::MessageCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::GuildMarker;
use type_map::concurrent::TypeMap;

pub async fn handle_command(
	message: &MessageCreate,
	args: &str,
	guild_id: Id<GuildMarker>,
	http_client: &Arc<Client>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let Some((user_id, _)) = split_member_arg(args) else {
		http_client
			.create_message(message.channel_id)
			.content("Usage: `!unmute <member>`")
			.await
			.into_diagnostic()?;
		return Ok(());
	};

	// Cancel any pending auto-unmute so the expired timer doesn't fire later and announce an
	// unmute that already happened.
	{
		let mut state = bot_state.write().await;
		if let Some(mute_timers) = state.get_mut::<MuteTimers>() {
			mute_timers.cancel(user_id);
		}
	}

	let roles = http_client
		.roles(guild_id)
		.await
		.into_diagnostic()?
		.models()
		.await
		.into_diagnostic()?;
	let Some(muted_role) = roles.iter().find(|role| role.name == MUTE_ROLE_NAME) else {
		return Ok(());
	};

	let member_response = http_client.guild_member(guild_id, user_id).await.into_diagnostic()?;
	let member = member_response.model().await.into_diagnostic()?;
	if !member.roles.contains(&muted_role.id) {
		return Ok(());
	}

	http_client
		.remove_guild_member_role(guild_id, user_id, muted_role.id)
		.await
		.into_diagnostic()?;

	http_client
		.create_message(message.channel_id)
		.content(&format!("🔊 {} has been unmuted.", user_id.mention()))
		.await
		.into_diagnostic()?;

	Ok(())
}
