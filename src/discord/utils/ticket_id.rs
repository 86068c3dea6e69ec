// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rand::Rng;

const TICKET_ID_LENGTH: usize = 8;
const TICKET_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a short display identifier for a new ticket. IDs are not checked for collisions,
/// so they label tickets but don't key them.
pub fn generate_ticket_id() -> String {
	let mut rng = rand::rng();
	(0..TICKET_ID_LENGTH)
		.map(|_| {
			let index = rng.random_range(0..TICKET_ID_CHARSET.len());
			TICKET_ID_CHARSET[index] as char
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::generate_ticket_id;

	#[test]
	fn ticket_ids_are_eight_characters() {
		for _ in 0..100 {
			assert_eq!(generate_ticket_id().chars().count(), 8);
		}
	}

	#[test]
	fn ticket_ids_use_uppercase_letters_and_digits_only() {
		for _ in 0..100 {
			let id = generate_ticket_id();
			assert!(
				id.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()),
				"unexpected character in ticket ID {:?}",
				id
			);
		}
	}
}
