// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::state::tickets::{TicketAction, TicketRegistry};
use super::utils::responses::{NOT_A_TICKET_CHANNEL, ephemeral_text_response};
use crate::config::ConfigData;
use miette::{IntoDiagnostic, bail};
use std::sync::Arc;
use tokio::sync::RwLock;
use twilight_http::client::Client;
use twilight_model::application::interaction::message_component::MessageComponentInteractionData;
use twilight_model::application::interaction::modal::ModalInteractionData;
use twilight_model::gateway::payload::incoming::InteractionCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::ApplicationMarker;
use type_map::concurrent::TypeMap;

mod open_ticket;
mod ticket_actions;

pub async fn route_interaction(
	interaction: &InteractionCreate,
	interaction_data: &MessageComponentInteractionData,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: &Arc<ConfigData>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	let Some(action) = TicketAction::from_custom_id(&interaction_data.custom_id) else {
		tracing::debug!(
			custom_id = %interaction_data.custom_id,
			"Ignoring component interaction with an unrecognized custom ID"
		);
		return Ok(());
	};

	if let TicketAction::OpenTicket = action {
		return open_ticket::present_form(interaction, http_client, application_id).await;
	}

	let Some(channel) = &interaction.channel else {
		bail!("Ticket button interaction has no channel");
	};

	// Every action other than opening a ticket only makes sense on a tracked ticket channel.
	let ticket = {
		let state = bot_state.read().await;
		state
			.get::<TicketRegistry>()
			.and_then(|registry| registry.lookup(channel.id))
			.cloned()
	};
	let Some(ticket) = ticket else {
		let response = ephemeral_text_response(NOT_A_TICKET_CHANNEL);
		let interaction_client = http_client.interaction(application_id);
		interaction_client
			.create_response(interaction.id, &interaction.token, &response)
			.await
			.into_diagnostic()?;
		return Ok(());
	};

	match action {
		// Handled above; it doesn't need a ticket context.
		TicketAction::OpenTicket => (),
		TicketAction::Close => {
			ticket_actions::close_ticket(interaction, channel.id, &ticket, http_client, application_id, bot_state).await?
		}
		TicketAction::Transcript => {
			ticket_actions::send_transcript(interaction, channel.id, &ticket, http_client, application_id).await?
		}
		TicketAction::CreateCall => {
			ticket_actions::create_call(interaction, channel.id, &ticket, http_client, application_id, config).await?
		}
		TicketAction::CallUser => {
			ticket_actions::call_user(interaction, channel.id, &ticket, http_client, application_id).await?
		}
		TicketAction::Claim => ticket_actions::claim_ticket(interaction, http_client, application_id).await?,
		TicketAction::Leave => ticket_actions::leave_ticket(interaction, channel.id, http_client, application_id).await?,
	}

	Ok(())
}

pub async fn route_modal_submit(
	interaction: &InteractionCreate,
	modal_data: &ModalInteractionData,
	http_client: &Arc<Client>,
	application_id: Id<ApplicationMarker>,
	config: &Arc<ConfigData>,
	bot_state: Arc<RwLock<TypeMap>>,
) -> miette::Result<()> {
	match modal_data.custom_id.as_str() {
		open_ticket::OPEN_TICKET_FORM_ID => {
			open_ticket::handle_form_submit(interaction, modal_data, http_client, application_id, config, bot_state)
				.await
		}
		_ => bail!("Unknown modal encountered: {}\n{:?}", modal_data.custom_id, modal_data),
	}
}
