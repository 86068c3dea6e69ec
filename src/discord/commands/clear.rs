// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::IntoDiagnostic;
use twilight_http::client::Client;
use twilight_model::gateway::payload::incoming::MessageCreate;
use twilight_model::id::Id;
use twilight_model::id::marker::MessageMarker;

pub async fn handle_command(message: &MessageCreate, args: &str, http_client: &Client) -> miette::Result<()> {
	let amount: u16 = match args.parse() {
		Ok(amount) if amount > 0 => amount,
		_ => {
			http_client
				.create_message(message.channel_id)
				.content("Usage: `!clear <amount>`")
				.await
				.into_diagnostic()?;
			return Ok(());
		}
	};

	// The invoking command message is deleted along with the requested amount. Bulk deletion
	// tops out at 100 messages per call.
	let fetch_limit = amount.saturating_add(1).min(100);
	let messages_response = http_client
		.channel_messages(message.channel_id)
		.limit(fetch_limit)
		.await
		.into_diagnostic()?;
	let messages = messages_response.models().await.into_diagnostic()?;
	let message_ids: Vec<Id<MessageMarker>> = messages.iter().map(|channel_message| channel_message.id).collect();

	if message_ids.len() == 1 {
		http_client
			.delete_message(message.channel_id, message_ids[0])
			.await
			.into_diagnostic()?;
	} else if !message_ids.is_empty() {
		http_client
			.delete_messages(message.channel_id, &message_ids)
			.await
			.into_diagnostic()?;
	}

	http_client
		.create_message(message.channel_id)
		.content(&format!("✅ {} messages deleted.", amount))
		.await
		.into_diagnostic()?;

	Ok(())
}
