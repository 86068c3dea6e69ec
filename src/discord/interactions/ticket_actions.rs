// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use crate::discord::state::tickets::{Ticket, TicketRegistry};
use crate::discord::utils::members::send_direct_message;
use crate::discord::utils::permissions::overwrites_for_request;
use crate::discord::utils::responses::{ephemeral_text_response, public_text_response};
use crate::discord::utils::transcript::export_transcript;
use miette::{IntoDiagnostic, bail};
use std::sync::Arc;
use tokio::sync::RwLock;
use twilight_http::client::Client;
use twilight_http::request::AuditLogReason;
use twilight_mention::fmt::Mention;
use twilight_model::channel::ChannelType;
use twilight_model::channel::message::MessageFlags;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::{ApplicationMarker, ChannelMarker};
use type_map::concurrent::TypeMap;

pub async fn close_ticket(
	interaction: &InteractionCreate,
	channel_id: Id<ChannelMarker>,
	ticket: &Ticket,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let interaction_client = http_client.interaction(application_id);
	let response = ephemeral_text_response("🗑️ Closing the ticket and sending the transcript...");
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	// Untrack the ticket before doing anything slow so a failed deletion can't leave a stale
	// entry pointing at a half-closed channel.
	{
		let mut state = bot_state.write().await;
		if let Some(registry) = state.get_mut::<TicketRegistry>() {
			registry.remove(channel_id);
		}
	}

	if let Err(error) = export_transcript(http_client, channel_id, ticket.owner).await {
		tracing::warn!(channel_id = %channel_id, source = ?error, "transcript export failed while closing a ticket");
	}

	http_client
		.delete_channel(channel_id)
		.reason("Ticket closed")
		.await
		.into_diagnostic()?;

	Ok(())
}

pub async fn send_transcript(
	interaction: &InteractionCreate,
	channel_id: Id<ChannelMarker>,
	ticket: &Ticket,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
) -> miette::Result<()> {
	let interaction_client = http_client.interaction(application_id);
	let response = ephemeral_text_response("📄 Sending the transcript over DM...");
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	export_transcript(http_client, channel_id, ticket.owner).await
}

pub async fn create_call(
	interaction: &InteractionCreate,
	channel_id: Id<ChannelMarker>,
	ticket: &Ticket,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: &Arc<ConfigData>,
) -> miette::Result<()> {
	let interaction_client = http_client.interaction(application_id);
	let response = ephemeral_text_response("🔗 Attempting to create the voice call...");
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	// The call gets the ticket channel's overwrites so it's visible to the same people.
	let channel_response = http_client.channel(channel_id).await.into_diagnostic()?;
	let ticket_channel = channel_response.model().await.into_diagnostic()?;
	let permission_overwrites = overwrites_for_request(&ticket_channel.permission_overwrites.unwrap_or_default());

	let call_name = format!("Call-{}", ticket.owner_name);
	let call_channel_response = http_client
		.create_guild_channel(config.guild_id, &call_name)
		.kind(ChannelType::GuildVoice)
		.parent_id(config.ticket_category_id)
		.permission_overwrites(&permission_overwrites)
		.await
		.into_diagnostic()?;
	let call_channel = call_channel_response.model().await.into_diagnostic()?;

	let followup = format!("📞 Call created: {}", call_channel.id.mention());
	interaction_client
		.create_followup(&interaction.token)
		.content(&followup)
		.flags(MessageFlags::EPHEMERAL)
		.await
		.into_diagnostic()?;

	Ok(())
}

pub async fn call_user(
	interaction: &InteractionCreate,
	channel_id: Id<ChannelMarker>,
	ticket: &Ticket,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
) -> miette::Result<()> {
	let notification = format!(
		"📲 The support team is waiting for you in your ticket: {}",
		channel_id.mention()
	);
	let response_text = match send_direct_message(http_client, ticket.owner, &notification).await {
		Ok(()) => format!("✅ {} has been notified over DM.", ticket.owner.mention()),
		Err(error) => {
			tracing::warn!(user_id = %ticket.owner, source = ?error, "couldn't notify the ticket owner over DM");
			String::from("❌ Couldn't send the user a DM.")
		}
	};

	let interaction_client = http_client.interaction(application_id);
	let response = ephemeral_text_response(response_text);
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	Ok(())
}

pub async fn claim_ticket(
	interaction: &InteractionCreate,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
) -> miette::Result<()> {
	let Some(member) = &interaction.member else {
		bail!("Claim interaction isn't from a guild member");
	};
	let Some(user) = &member.user else {
		bail!("Claim interaction member is not a user");
	};

	let interaction_client = http_client.interaction(application_id);
	let response = public_text_response(format!("✅ Ticket claimed by {}", user.id.mention()));
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	Ok(())
}

pub async fn leave_ticket(
	interaction: &InteractionCreate,
	channel_id: Id<ChannelMarker>,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
) -> miette::Result<()> {
	let Some(member) = &interaction.member else {
		bail!("Leave interaction isn't from a guild member");
	};
	let Some(user) = &member.user else {
		bail!("Leave interaction member is not a user");
	};

	// Dropping the member overwrite reverts the invoker to the @everyone deny, which hides
	// the channel again.
	http_client
		.delete_channel_permission(channel_id)
		.member(user.id)
		.await
		.into_diagnostic()?;

	let interaction_client = http_client.interaction(application_id);
	let response = ephemeral_text_response("🚪 You have left the ticket.");
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	Ok(())
}
