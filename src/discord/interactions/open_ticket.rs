// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use crate::discord::state::tickets::{Ticket, TicketRegistry, ticket_action_rows};
use crate::discord::utils::members::display_name;
use crate::discord::utils::responses::ephemeral_text_response;
use crate::discord::utils::ticket_id::generate_ticket_id;
use miette::{IntoDiagnostic, bail};
use std::sync::Arc;
use tokio::sync::RwLock;
use twilight_http::client::Client;
use twilight_mention::fmt::Mention;
use twilight_model::application::interaction::modal::ModalInteractionData;
use twilight_model::channel::ChannelType;
use twilight_model::channel::message::component::{ActionRow, Component, TextInput, TextInputStyle};
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::guild::Permissions;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_model::channel::permission_overwrite::{PermissionOverwrite, PermissionOverwriteType};
use twilight_model::id::Id;
use twilight_model::id::marker::{ApplicationMarker, RoleMarker};
use twilight_util::builder::InteractionResponseDataBuilder;
use type_map::concurrent::TypeMap;

pub const OPEN_TICKET_FORM_ID: &str = "open_ticket_form";
const TICKET_REASON_FIELD_ID: &str = "ticket_reason";
const MAX_TICKET_REASON_LENGTH: u16 = 500;
const TICKET_TYPE_LABEL: &str = "Support";

pub async fn present_form(
	interaction: &InteractionCreate,
	http_client: &Client,
	application_id: Id<ApplicationMarker>,
) -> miette::Result<()> {
	let reason_input = Component::TextInput(TextInput {
		custom_id: String::from(TICKET_REASON_FIELD_ID),
		label: String::from("What is the reason for your ticket?"),
		max_length: Some(MAX_TICKET_REASON_LENGTH),
		min_length: None,
		placeholder: None,
		required: Some(true),
		style: TextInputStyle::Paragraph,
		value: None,
	});
	let reason_row = Component::ActionRow(ActionRow {
		components: vec![reason_input],
	});

	let response = InteractionResponseDataBuilder::new()
		.custom_id(OPEN_TICKET_FORM_ID)
		.title("📨 Open Ticket")
		.components(vec![reason_row])
		.build();
	let response = InteractionResponse {
		kind: InteractionResponseType::Modal,
		data: Some(response),
	};
	let interaction_client = http_client.interaction(application_id);
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	Ok(())
}

pub async fn handle_form_submit(
	interaction: &InteractionCreate,
	modal_data: &ModalInteractionData,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: &Arc<ConfigData>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let Some(member) = &interaction.member else {
		bail!("Ticket form submitted outside of a guild");
	};
	let Some(user) = &member.user else {
		bail!("Ticket form submission isn't from a user");
	};

	let mut reason: Option<String> = None;
	for row in modal_data.components.iter() {
		for component in row.components.iter() {
			if component.custom_id.as_str() == TICKET_REASON_FIELD_ID {
				reason = component.value.clone();
			}
		}
	}
	// The form marks the field required, so an empty submission is a protocol violation
	// rather than user error.
	let Some(reason) = reason.filter(|reason| !reason.is_empty()) else {
		bail!("Ticket form submission is missing the required reason field");
	};

	let ticket_id = generate_ticket_id();
	let owner_name = display_name(member.nick.as_deref(), user);
	let channel_name = ticket_channel_name(&owner_name, &ticket_id);

	let everyone_role_id: Id<RoleMarker> = config.guild_id.cast();
	let permission_overwrites = [
		PermissionOverwrite {
			allow: Permissions::empty(),
			deny: Permissions::VIEW_CHANNEL,
			id: everyone_role_id.cast(),
			kind: PermissionOverwriteType::Role,
		},
		PermissionOverwrite {
			allow: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
			deny: Permissions::empty(),
			id: user.id.cast(),
			kind: PermissionOverwriteType::Member,
		},
		PermissionOverwrite {
			allow: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
			deny: Permissions::empty(),
			id: config.support_role_id.cast(),
			kind: PermissionOverwriteType::Role,
		},
	];

	let channel_response = http_client
		.create_guild_channel(config.guild_id, &channel_name)
		.kind(ChannelType::GuildText)
		.parent_id(config.ticket_category_id)
		.permission_overwrites(&permission_overwrites)
		.await
		.into_diagnostic()?;
	let channel = channel_response.model().await.into_diagnostic()?;

	{
		let mut state = bot_state.write().await;
		let registry = state.entry::<TicketRegistry>().or_insert_with(TicketRegistry::default);
		let ticket = Ticket {
			ticket_id: ticket_id.clone(),
			owner: user.id,
			owner_name,
			reason: reason.clone(),
		};
		registry.register(channel.id, ticket);
	}

	let header_message = ticket_header_message(&ticket_id, &reason);
	let action_rows = ticket_action_rows();
	http_client
		.create_message(channel.id)
		.content(&header_message)
		.components(&action_rows)
		.await
		.into_diagnostic()?;

	let confirmation = format!("✅ Your ticket has been created: {}", channel.id.mention());
	let response = ephemeral_text_response(confirmation);
	let interaction_client = http_client.interaction(application_id);
	interaction_client
		.create_response(interaction.id, &interaction.token, &response)
		.await
		.into_diagnostic()?;

	Ok(())
}

fn ticket_channel_name(owner_name: &str, ticket_id: &str) -> String {
	let sanitized_name = owner_name.to_lowercase().replace(' ', "-");
	format!("🎫・{}-{}", sanitized_name, ticket_id)
}

fn ticket_header_message(ticket_id: &str, reason: &str) -> String {
	format!(
		"**## New Ticket | {}**\nPlease wait for a member of the staff team to review your ticket.\n\n**Ticket ID:** `{}`\n**Reason for contact:** `{}`\n**Ticket type:** `{}`",
		TICKET_TYPE_LABEL, ticket_id, reason, TICKET_TYPE_LABEL
	)
}

#[cfg(test)]
mod tests {
	use super::{ticket_channel_name, ticket_header_message};

	#[test]
	fn channel_name_lowercases_and_hyphenates_the_owner() {
		assert_eq!(ticket_channel_name("Jane Doe", "AB12CD34"), "🎫・jane-doe-AB12CD34");
	}

	#[test]
	fn channel_name_keeps_single_word_names() {
		assert_eq!(ticket_channel_name("jane", "AB12CD34"), "🎫・jane-AB12CD34");
	}

	#[test]
	fn header_contains_the_ticket_id_and_reason() {
		let header = ticket_header_message("AB12CD34", "Need help with payment");
		assert!(header.contains("AB12CD34"));
		assert!(header.contains("Need help with payment"));
		assert!(header.contains("Support"));
	}
}
