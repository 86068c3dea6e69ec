// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use miette::IntoDiagnostic;
use std::collections::HashMap;
use twilight_http::client::Client;
use twilight_model::channel::permission_overwrite::{
	PermissionOverwrite as ChannelPermissionOverwrite, PermissionOverwriteType as ChannelPermissionOverwriteType,
};
use twilight_model::guild::Permissions;
use twilight_model::id::Id;
use twilight_model::id::marker::{GuildMarker, RoleMarker, UserMarker};
use twilight_util::permission_calculator::PermissionCalculator;

/// Gets the guild-level permissions a member has from their roles. Channel overwrites are not
/// applied; this is the right check for administrator gating.
pub async fn member_guild_permissions(
	http_client: &Client,
	guild_id: Id<GuildMarker>,
	user_id: Id<UserMarker>,
	member_role_ids: &[Id<RoleMarker>],
) -> miette::Result<Permissions> {
	let guild_roles = http_client
		.roles(guild_id)
		.await
		.into_diagnostic()?
		.models()
		.await
		.into_diagnostic()?;

	let guild_everyone_role_id: Id<RoleMarker> = guild_id.cast();
	let role_permissions: HashMap<Id<RoleMarker>, Permissions> =
		guild_roles.iter().map(|role| (role.id, role.permissions)).collect();
	let everyone_role_permissions = role_permissions
		.get(&guild_everyone_role_id)
		.copied()
		.unwrap_or_else(Permissions::empty);
	let member_roles: Vec<(Id<RoleMarker>, Permissions)> = member_role_ids
		.iter()
		.map(|role_id| {
			(
				*role_id,
				role_permissions
					.get(role_id)
					.copied()
					.unwrap_or_else(Permissions::empty),
			)
		})
		.collect();

	let calculator = PermissionCalculator::new(guild_id, user_id, everyone_role_permissions, &member_roles);
	Ok(calculator.root())
}

pub async fn member_is_administrator(
	http_client: &Client,
	guild_id: Id<GuildMarker>,
	user_id: Id<UserMarker>,
	member_role_ids: &[Id<RoleMarker>],
) -> miette::Result<bool> {
	let permissions = member_guild_permissions(http_client, guild_id, user_id, member_role_ids).await?;
	Ok(permissions.contains(Permissions::ADMINISTRATOR))
}

/// Converts the permission overwrites read off an existing channel into the request form used
/// when creating a new channel with the same visibility.
pub fn overwrites_for_request(overwrites: &[ChannelPermissionOverwrite]) -> Vec<ChannelPermissionOverwrite> {
	overwrites
		.iter()
		.filter_map(|overwrite| {
			let kind = match overwrite.kind {
				ChannelPermissionOverwriteType::Member => ChannelPermissionOverwriteType::Member,
				ChannelPermissionOverwriteType::Role => ChannelPermissionOverwriteType::Role,
				_ => return None,
			};
			Some(ChannelPermissionOverwrite {
				allow: overwrite.allow,
				deny: overwrite.deny,
				id: overwrite.id,
				kind,
			})
		})
		.collect()
}
