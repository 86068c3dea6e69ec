// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::ConfigData;
use std::sync::Arc;
use twilight_http::client::Client;
use twilight_model::gateway::payload::incoming::MemberAdd;

mod welcome;

pub async fn route_member_add(
	member_add: &MemberAdd,
	http_client: &Arc<Client>,
	config: &Arc<ConfigData>,
) -> miette::Result<()> {
	welcome::handle_member_join(member_add, http_client, config).await
}
