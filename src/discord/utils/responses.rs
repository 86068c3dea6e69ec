// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use twilight_model::channel::message::MessageFlags;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};
use twilight_util::builder::InteractionResponseDataBuilder;

pub const NOT_A_TICKET_CHANNEL: &str = "❌ This channel is not a valid ticket.";

/// An interaction response with a text message only the invoking user can see.
pub fn ephemeral_text_response(content: impl Into<String>) -> InteractionResponse {
	let data = InteractionResponseDataBuilder::new()
		.content(content)
		.flags(MessageFlags::EPHEMERAL)
		.build();
	InteractionResponse {
		kind: InteractionResponseType::ChannelMessageWithSource,
		data: Some(data),
	}
}

/// An interaction response with a text message posted publicly to the channel.
pub fn public_text_response(content: impl Into<String>) -> InteractionResponse {
	let data = InteractionResponseDataBuilder::new().content(content).build();
	InteractionResponse {
		kind: InteractionResponseType::ChannelMessageWithSource,
		data: Some(data),
	}
}
