// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::members::DirectMessageError;
use super::timestamp::datetime_from_timestamp;
use chrono::{DateTime, Utc};
use miette::IntoDiagnostic;
use std::path::Path;
use tokio::fs;
use twilight_http::client::Client;
use twilight_model::channel::Message;
use twilight_model::http::attachment::Attachment;
use twilight_model::id::Id;
use twilight_model::id::marker::{ChannelMarker, UserMarker};

const TRANSCRIPT_DIR: &str = "transcripts";
const TRANSCRIPT_MESSAGE_LIMIT: u16 = 100;

/// One rendered message of a ticket transcript.
pub struct TranscriptLine {
	pub timestamp: Option<DateTime<Utc>>,
	pub author: String,
	pub content: String,
}

impl TranscriptLine {
	fn from_message(message: &Message) -> Self {
		Self {
			timestamp: datetime_from_timestamp(&message.timestamp),
			author: message.author.name.clone(),
			content: message.content.clone(),
		}
	}
}

/// Renders transcript lines into the stored text form. Lines are expected oldest-first.
pub fn render_transcript(lines: impl IntoIterator<Item = TranscriptLine>) -> String {
	let rendered_lines: Vec<String> = lines
		.into_iter()
		.map(|line| {
			let timestamp = match line.timestamp {
				Some(timestamp) => timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
				None => String::from("unknown time"),
			};
			format!("[{}] {}: {}", timestamp, line.author, line.content)
		})
		.collect();
	rendered_lines.join("\n")
}

/// Exports the most recent history of a ticket channel: the transcript is written under
/// `transcripts/` (the file stays there; nothing reads it back) and then sent to the ticket
/// owner over DM. A refused DM is logged and swallowed; the export still counts as done.
pub async fn export_transcript(
	http_client: &Client,
	channel_id: Id<ChannelMarker>,
	owner: Id<UserMarker>,
) -> miette::Result<()> {
	let message_response = http_client
		.channel_messages(channel_id)
		.limit(TRANSCRIPT_MESSAGE_LIMIT)
		.await
		.into_diagnostic()?;
	let messages = message_response.models().await.into_diagnostic()?;

	// History arrives newest-first; transcripts read top to bottom.
	let lines = messages.iter().rev().map(TranscriptLine::from_message);
	let transcript = render_transcript(lines);

	fs::create_dir_all(TRANSCRIPT_DIR).await.into_diagnostic()?;
	let file_name = format!("transcript-{}.txt", channel_id);
	let file_path = Path::new(TRANSCRIPT_DIR).join(&file_name);
	fs::write(&file_path, &transcript).await.into_diagnostic()?;

	let attachment = Attachment::from_bytes(file_name, transcript.into_bytes(), 1);
	if let Err(error) = send_transcript_dm(http_client, owner, &attachment).await {
		tracing::warn!(user_id = %owner, source = ?error, "couldn't deliver the transcript over DM");
	}

	Ok(())
}

async fn send_transcript_dm(
	http_client: &Client,
	owner: Id<UserMarker>,
	attachment: &Attachment,
) -> Result<(), DirectMessageError> {
	let dm_channel_response = http_client.create_private_channel(owner).await?;
	let dm_channel = dm_channel_response.model().await?;
	http_client
		.create_message(dm_channel.id)
		.attachments(std::slice::from_ref(attachment))
		.await?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::{TranscriptLine, render_transcript};
	use chrono::{TimeZone, Utc};

	fn line(seconds: i64, author: &str, content: &str) -> TranscriptLine {
		TranscriptLine {
			timestamp: Utc.timestamp_opt(seconds, 0).single(),
			author: String::from(author),
			content: String::from(content),
		}
	}

	#[test]
	fn lines_render_in_given_order_with_timestamps() {
		let transcript = render_transcript(vec![
			line(1700000000, "jane", "hello"),
			line(1700000060, "staff", "hi, how can we help?"),
		]);
		assert_eq!(
			transcript,
			"[2023-11-14 22:13:20 UTC] jane: hello\n[2023-11-14 22:14:20 UTC] staff: hi, how can we help?"
		);
	}

	#[test]
	fn missing_timestamp_still_renders() {
		let transcript = render_transcript(vec![TranscriptLine {
			timestamp: None,
			author: String::from("jane"),
			content: String::from("hello"),
		}]);
		assert_eq!(transcript, "[unknown time] jane: hello");
	}

	#[test]
	fn empty_history_renders_empty() {
		assert_eq!(render_transcript(Vec::new()), "");
	}
}
