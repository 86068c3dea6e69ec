// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::discord::state::tickets::open_ticket_button;
use miette::IntoDiagnostic;
use twilight_http::client::Client;
use twilight_model::channel::message::embed::Embed;
use twilight_model::gateway::payload::incoming::MessageCreate;
use twilight_util::builder::embed::EmbedBuilder;
use twilight_validate::embed::EmbedValidationError;

const PANEL_COLOR: u32 = 0xFF0000;

pub async fn handle_command(message: &MessageCreate, http_client: &Client) -> miette::Result<()> {
	let embed = panel_embed().into_diagnostic()?;
	let components = [open_ticket_button()];
	http_client
		.create_message(message.channel_id)
		.embeds(&[embed])
		.components(&components)
		.await
		.into_diagnostic()?;

	Ok(())
}

fn panel_embed() -> Result<Embed, EmbedValidationError> {
	let embed = EmbedBuilder::new()
		.title("🎫 Ticket System")
		.description(
			"Hi, this is the server's support service. ⚡\nClick the button below to open a ticket and a member of the staff team will get back to you.",
		)
		.color(PANEL_COLOR)
		.validate()?
		.build();
	Ok(embed)
}

#[cfg(test)]
mod tests {
	use super::panel_embed;

	#[test]
	fn panel_embed_is_valid_and_titled() {
		let embed = panel_embed().unwrap();
		assert_eq!(embed.title.unwrap(), "🎫 Ticket System");
	}
}
