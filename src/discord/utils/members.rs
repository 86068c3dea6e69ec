// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::Diagnostic;
use std::fmt;
use twilight_http::client::Client;
use twilight_http::error::Error;
use twilight_http::response::DeserializeBodyError;
use twilight_model::id::Id;
use twilight_model::id::marker::UserMarker;
use twilight_model::user::User;

/// The name a member is displayed under in the guild: the nickname if set, then the global
/// display name, then the account name.
pub fn display_name(nick: Option<&str>, user: &User) -> String {
	nick.map(String::from)
		.or_else(|| user.global_name.clone())
		.unwrap_or_else(|| user.name.clone())
}

/// Parses a member command argument, accepting a mention (`<@id>`, `<@!id>`) or a raw ID.
pub fn parse_member_arg(arg: &str) -> Option<Id<UserMarker>> {
	let raw_id = arg
		.strip_prefix("<@")
		.and_then(|mention| mention.strip_suffix('>'))
		.map(|mention| mention.strip_prefix('!').unwrap_or(mention))
		.unwrap_or(arg);
	let raw_id: u64 = raw_id.parse().ok()?;
	Id::new_checked(raw_id)
}

/// Error data for sending a direct message
#[derive(Debug, Diagnostic)]
pub enum DirectMessageError {
	Http(Error),
	Deserialize(DeserializeBodyError),
}

impl From<Error> for DirectMessageError {
	fn from(error: Error) -> Self {
		Self::Http(error)
	}
}

impl From<DeserializeBodyError> for DirectMessageError {
	fn from(error: DeserializeBodyError) -> Self {
		Self::Deserialize(error)
	}
}

impl std::error::Error for DirectMessageError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Http(error) => Some(error),
			Self::Deserialize(error) => Some(error),
		}
	}
}

impl fmt::Display for DirectMessageError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Http(error) => write!(f, "HTTP error: {}", error),
			Self::Deserialize(error) => write!(f, "deserialization error: {}", error),
		}
	}
}

/// Sends a DM to a user. Fails if the user has DMs disabled or has blocked the bot; callers
/// decide whether that's reported or swallowed.
pub async fn send_direct_message(
	http_client: &Client,
	user_id: Id<UserMarker>,
	content: &str,
) -> Result<(), DirectMessageError> {
	let dm_channel_response = http_client.create_private_channel(user_id).await?;
	let dm_channel = dm_channel_response.model().await?;
	http_client.create_message(dm_channel.id).content(content).await?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::parse_member_arg;

	#[test]
	fn member_mention_parses() {
		assert_eq!(parse_member_arg("<@123456>").unwrap().get(), 123456);
	}

	#[test]
	fn nickname_mention_parses() {
		assert_eq!(parse_member_arg("<@!123456>").unwrap().get(), 123456);
	}

	#[test]
	fn raw_id_parses() {
		assert_eq!(parse_member_arg("123456").unwrap().get(), 123456);
	}

	#[test]
	fn garbage_is_rejected() {
		assert!(parse_member_arg("jane").is_none());
		assert!(parse_member_arg("<@>").is_none());
		assert!(parse_member_arg("<@abc>").is_none());
		assert!(parse_member_arg("0").is_none());
	}
}
