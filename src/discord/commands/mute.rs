// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::split_member_arg;
use crate::discord::state::mutes::MuteTimers;
use miette::IntoDiagnostic;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, sleep};
use twilight_http::client::Client;
use twilight_mention::fmt::Mention;
use twilight_model::gateway::payload::incoming::MessageCreate;
use twilight_model::guild::Permissions;
use twilight_model::http::permission_overwrite::{PermissionOverwrite, PermissionOverwriteType};
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, RoleMarker, UserMarker};
use type_map::concurrent::TypeMap;

pub const MUTE_ROLE_NAME: &str = "Muted";

pub async fn handle_command(
	message: &MessageCreate,
	args: &str,
	guild_id: Id<GuildMarker>,
	http_client: &Arc<Client>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let parsed_args = split_member_arg(args).and_then(|(user_id, duration_arg)| {
		if duration_arg.is_empty() {
			Some((user_id, None))
		} else {
			match duration_arg.parse::<u64>() {
				Ok(minutes) if minutes > 0 => Some((user_id, Some(minutes))),
				_ => None,
			}
		}
	});
	let Some((user_id, duration_minutes)) = parsed_args else {
		http_client
			.create_message(message.channel_id)
			.content("Usage: `!mute <member> [minutes]`")
			.await
			.into_diagnostic()?;
		return Ok(());
	};

	let role_id = ensure_muted_role(http_client, guild_id).await?;
	http_client
		.add_guild_member_role(guild_id, user_id, role_id)
		.await
		.into_diagnostic()?;

	http_client
		.create_message(message.channel_id)
		.content(&format!("🔇 {} has been muted.", user_id.mention()))
		.await
		.into_diagnostic()?;

	if let Some(minutes) = duration_minutes {
		let timer = tokio::spawn(auto_unmute(
			Arc::clone(http_client),
			Arc::clone(&bot_state),
			guild_id,
			message.channel_id,
			user_id,
			role_id,
			minutes,
		));
		let mut state = bot_state.write().await;
		let mute_timers = state.entry::<MuteTimers>().or_insert_with(MuteTimers::default);
		mute_timers.schedule(user_id, timer);
	}

	Ok(())
}

/// Finds the mute role by name, creating it if the guild doesn't have one yet. A new role is
/// denied sending and speaking on every channel in the guild.
async fn ensure_muted_role(http_client: &Client, guild_id: Id<GuildMarker>) -> miette::Result<Id<RoleMarker>> {
	let roles = http_client
		.roles(guild_id)
		.await
		.into_diagnostic()?
		.models()
		.await
		.into_diagnostic()?;
	if let Some(role) = roles.iter().find(|role| role.name == MUTE_ROLE_NAME) {
		return Ok(role.id);
	}

	let new_role_response = http_client
		.create_role(guild_id)
		.name(MUTE_ROLE_NAME)
		.await
		.into_diagnostic()?;
	let new_role = new_role_response.model().await.into_diagnostic()?;

	let overwrite = PermissionOverwrite {
		allow: None,
		deny: Some(Permissions::SEND_MESSAGES | Permissions::SPEAK),
		id: new_role.id.cast(),
		kind: PermissionOverwriteType::Role,
	};
	let channels = http_client
		.guild_channels(guild_id)
		.await
		.into_diagnostic()?
		.models()
		.await
		.into_diagnostic()?;
	for channel in channels {
		http_client
			.update_channel_permission(channel.id, &overwrite)
			.await
			.into_diagnostic()?;
	}

	Ok(new_role.id)
}

async fn auto_unmute(
	http_client: Arc<Client>,
	bot_state: Arc<RwLock<TypeMap>>,
	guild_id: Id<GuildMarker>,
	channel_id: Id<ChannelMarker>,
	user_id: Id<UserMarker>,
	role_id: Id<RoleMarker>,
	minutes: u64,
) {
	sleep(Duration::from_secs(minutes * 60)).await;

	let unmute_result = http_client.remove_guild_member_role(guild_id, user_id, role_id).await;
	match unmute_result {
		Ok(_) => {
			let announcement = format!("🔊 {} has been unmuted automatically.", user_id.mention());
			let send_result = http_client.create_message(channel_id).content(&announcement).await;
			if let Err(error) = send_result {
				tracing::warn!(user_id = %user_id, source = ?error, "couldn't announce an automatic unmute");
			}
		}
		Err(error) => {
			tracing::warn!(user_id = %user_id, source = ?error, "couldn't remove the mute role after the mute expired");
		}
	}

	let mut state = bot_state.write().await;
	if let Some(mute_timers) = state.get_mut::<MuteTimers>() {
		mute_timers.clear(user_id);
	}
}
