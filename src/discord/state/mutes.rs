// © 2025 ElementalAlchemist and the Dainsleif Mains Development Team
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use tokio::task::JoinHandle;
use twilight_model::id::Id;
use twilight_model::id::marker::UserMarker;

/// Pending auto-unmute tasks keyed by the muted member. Tracking the handles lets an explicit
/// unmute (or a newer timed mute) abort the pending timer instead of racing it.
#[derive(Debug, Default)]
pub struct MuteTimers {
	timers: HashMap<Id<UserMarker>, JoinHandle<()>>,
}

impl MuteTimers {
	/// Records a pending auto-unmute task for a member, aborting any timer already scheduled
	/// for them.
	pub fn schedule(&mut self, user_id: Id<UserMarker>, handle: JoinHandle<()>) {
		if let Some(previous_timer) = self.timers.insert(user_id, handle) {
			previous_timer.abort();
		}
	}

	/// Aborts and forgets the pending timer for a member. Returns whether one was scheduled.
	pub fn cancel(&mut self, user_id: Id<UserMarker>) -> bool {
		match self.timers.remove(&user_id) {
			Some(timer) => {
				timer.abort();
				true
			}
			None => false,
		}
	}

	/// Forgets the timer entry for a member without aborting it. Called by an auto-unmute task
	/// for itself once it has fired.
	pub fn clear(&mut self, user_id: Id<UserMarker>) {
		self.timers.remove(&user_id);
	}

	pub fn is_scheduled(&self, user_id: Id<UserMarker>) -> bool {
		self.timers.contains_key(&user_id)
	}
}

#[cfg(test)]
mod tests {
	use super::MuteTimers;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicBool, Ordering};
	use tokio::time::{Duration, sleep};
	use twilight_model::id::Id;

	fn flag_timer(flag: Arc<AtomicBool>) -> tokio::task::JoinHandle<()> {
		tokio::spawn(async move {
			sleep(Duration::from_millis(50)).await;
			flag.store(true, Ordering::SeqCst);
		})
	}

	#[tokio::test]
	async fn cancel_aborts_a_pending_timer() {
		let mut timers = MuteTimers::default();
		let user_id = Id::new(1);
		let fired = Arc::new(AtomicBool::new(false));
		timers.schedule(user_id, flag_timer(Arc::clone(&fired)));

		assert!(timers.is_scheduled(user_id));
		assert!(timers.cancel(user_id));
		assert!(!timers.is_scheduled(user_id));

		sleep(Duration::from_millis(150)).await;
		assert!(!fired.load(Ordering::SeqCst));
	}

	#[tokio::test]
	async fn cancel_without_a_timer_reports_none() {
		let mut timers = MuteTimers::default();
		assert!(!timers.cancel(Id::new(1)));
	}

	#[tokio::test]
	async fn rescheduling_replaces_the_previous_timer() {
		let mut timers = MuteTimers::default();
		let user_id = Id::new(1);
		let first_fired = Arc::new(AtomicBool::new(false));
		let second_fired = Arc::new(AtomicBool::new(false));
		timers.schedule(user_id, flag_timer(Arc::clone(&first_fired)));
		timers.schedule(user_id, flag_timer(Arc::clone(&second_fired)));

		sleep(Duration::from_millis(150)).await;
		assert!(!first_fired.load(Ordering::SeqCst));
		assert!(second_fired.load(Ordering::SeqCst));
	}
}
