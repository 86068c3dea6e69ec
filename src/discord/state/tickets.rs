// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, UserMarker};

/// A button action on one of the bot's ticket panels, carried as the component custom ID.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TicketAction {
	OpenTicket,
	Close,
	Transcript,
	CreateCall,
	CallUser,
	Claim,
	Leave,
}

impl TicketAction {
	pub fn from_custom_id(id: &str) -> Option<Self> {
		match id {
			"open_ticket" => Some(Self::OpenTicket),
			"close_ticket" => Some(Self::Close),
			"transcript_ticket" => Some(Self::Transcript),
			"create_call" => Some(Self::CreateCall),
			"call_user" => Some(Self::CallUser),
			"claim_ticket" => Some(Self::Claim),
			"leave_ticket" => Some(Self::Leave),
			_ => None,
		}
	}

	pub fn as_custom_id(&self) -> &'static str {
		match self {
			Self::OpenTicket => "open_ticket",
			Self::Close => "close_ticket",
			Self::Transcript => "transcript_ticket",
			Self::CreateCall => "create_call",
			Self::CallUser => "call_user",
			Self::Claim => "claim_ticket",
			Self::Leave => "leave_ticket",
		}
	}

	pub fn button_label(&self) -> &'static str {
		match self {
			Self::OpenTicket => "📨 Open Ticket",
			Self::Close => "❌ Close",
			Self::Transcript => "📄 Transcript",
			Self::CreateCall => "📞 Create Call",
			Self::CallUser => "📲 Call User",
			Self::Claim => "✅ Claim",
			Self::Leave => "🚪 Leave",
		}
	}

	pub fn button_style(&self) -> ButtonStyle {
		match self {
			Self::OpenTicket => ButtonStyle::Danger,
			Self::Close => ButtonStyle::Danger,
			Self::Transcript => ButtonStyle::Secondary,
			Self::CreateCall => ButtonStyle::Primary,
			Self::CallUser => ButtonStyle::Success,
			Self::Claim => ButtonStyle::Success,
			Self::Leave => ButtonStyle::Secondary,
		}
	}

	fn button(&self) -> Component {
		let button = Button {
			custom_id: Some(String::from(self.as_custom_id())),
			disabled: false,
			emoji: None,
			label: Some(String::from(self.button_label())),
			style: self.button_style(),
			url: None,
			sku_id: None,
		};
		Component::Button(button)
	}
}

/// Metadata tracked for an open ticket channel.
#[derive(Clone, Debug)]
pub struct Ticket {
	pub ticket_id: String,
	pub owner: Id<UserMarker>,
	pub owner_name: String,
	pub reason: String,
}

/// All tickets opened during the current process lifetime, keyed by their channel.
/// Entries are registered when the ticket channel is created and removed when it's closed;
/// nothing survives a restart.
#[derive(Debug, Default)]
pub struct TicketRegistry {
	tickets: HashMap<Id<ChannelMarker>, Ticket>,
}

impl TicketRegistry {
	/// Tracks a ticket for its channel. A previous entry for the same channel is overwritten.
	pub fn register(&mut self, channel_id: Id<ChannelMarker>, ticket: Ticket) {
		self.tickets.insert(channel_id, ticket);
	}

	pub fn lookup(&self, channel_id: Id<ChannelMarker>) -> Option<&Ticket> {
		self.tickets.get(&channel_id)
	}

	pub fn remove(&mut self, channel_id: Id<ChannelMarker>) -> Option<Ticket> {
		self.tickets.remove(&channel_id)
	}
}

pub fn open_ticket_button() -> Component {
	Component::ActionRow(ActionRow {
		components: vec![TicketAction::OpenTicket.button()],
	})
}

/// The action rows posted with a ticket's header message. Discord caps a row at five buttons,
/// so the six actions are split across two rows.
pub fn ticket_action_rows() -> Vec<Component> {
	let first_row = ActionRow {
		components: vec![
			TicketAction::Close.button(),
			TicketAction::Transcript.button(),
			TicketAction::CreateCall.button(),
		],
	};
	let second_row = ActionRow {
		components: vec![
			TicketAction::CallUser.button(),
			TicketAction::Claim.button(),
			TicketAction::Leave.button(),
		],
	};
	vec![Component::ActionRow(first_row), Component::ActionRow(second_row)]
}

#[cfg(test)]
mod tests {
	use super::{Ticket, TicketAction, TicketRegistry};
	use twilight_model::id::Id;

	const ALL_ACTIONS: [TicketAction; 7] = [
		TicketAction::OpenTicket,
		TicketAction::Close,
		TicketAction::Transcript,
		TicketAction::CreateCall,
		TicketAction::CallUser,
		TicketAction::Claim,
		TicketAction::Leave,
	];

	fn ticket(ticket_id: &str, reason: &str) -> Ticket {
		Ticket {
			ticket_id: String::from(ticket_id),
			owner: Id::new(100),
			owner_name: String::from("jane"),
			reason: String::from(reason),
		}
	}

	#[test]
	fn actions_round_trip_through_custom_ids() {
		for action in ALL_ACTIONS {
			assert_eq!(TicketAction::from_custom_id(action.as_custom_id()), Some(action));
		}
	}

	#[test]
	fn unknown_custom_id_is_not_an_action() {
		assert_eq!(TicketAction::from_custom_id("close_tickets"), None);
		assert_eq!(TicketAction::from_custom_id(""), None);
	}

	#[test]
	fn registered_ticket_is_found_with_its_data() {
		let mut registry = TicketRegistry::default();
		let channel_id = Id::new(10);
		registry.register(channel_id, ticket("ABCD1234", "Need help with payment"));

		let found = registry.lookup(channel_id).unwrap();
		assert_eq!(found.ticket_id, "ABCD1234");
		assert_eq!(found.reason, "Need help with payment");
		assert_eq!(found.owner.get(), 100);
	}

	#[test]
	fn reregistering_a_channel_overwrites_the_entry() {
		let mut registry = TicketRegistry::default();
		let channel_id = Id::new(10);
		registry.register(channel_id, ticket("AAAAAAAA", "first"));
		registry.register(channel_id, ticket("BBBBBBBB", "second"));

		let found = registry.lookup(channel_id).unwrap();
		assert_eq!(found.ticket_id, "BBBBBBBB");
		assert_eq!(found.reason, "second");
	}

	#[test]
	fn removed_ticket_is_returned_and_gone() {
		let mut registry = TicketRegistry::default();
		let channel_id = Id::new(10);
		registry.register(channel_id, ticket("ABCD1234", "help"));

		let removed = registry.remove(channel_id).unwrap();
		assert_eq!(removed.ticket_id, "ABCD1234");
		assert!(registry.lookup(channel_id).is_none());
		assert!(registry.remove(channel_id).is_none());
	}
}
