use std::time::{Duration, Instant};

/// Delay applied to begin-search triggers that were not clearly intentional.
pub const DEFAULT_ACTIVATION_DELAY: Duration = Duration::from_millis(150);

/// What asked the search surface to open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationSource {
	/// The dedicated keyboard shortcut.
	Shortcut,
	/// A click on the search trigger.
	Pointer,
	/// Focus arriving through tab traversal.
	Focus,
}

impl ActivationSource {
	#[must_use]
	pub fn is_intentional(self) -> bool {
		matches!(self, ActivationSource::Shortcut)
	}
}

/// Debounces begin-search triggers.
///
/// Intentional triggers open immediately and cancel anything pending.
/// Incidental ones schedule an open `delay` after the most recent trigger.
/// Time is passed in explicitly so callers decide how to tick it.
#[derive(Debug, Clone)]
pub struct ActivationDebouncer {
	delay: Duration,
	deadline: Option<Instant>,
}

impl Default for ActivationDebouncer {
	fn default() -> Self {
		Self::new(DEFAULT_ACTIVATION_DELAY)
	}
}

impl ActivationDebouncer {
	#[must_use]
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			deadline: None,
		}
	}

	/// Record a trigger. Returns `true` when the search should open right now.
	pub fn trigger(&mut self, source: ActivationSource, now: Instant) -> bool {
		if source.is_intentional() {
			self.deadline = None;
			return true;
		}
		self.deadline = Some(now + self.delay);
		false
	}

	/// Returns `true` once when a scheduled open falls due.
	pub fn poll(&mut self, now: Instant) -> bool {
		match self.deadline {
			Some(deadline) if now >= deadline => {
				self.deadline = None;
				true
			}
			_ => false,
		}
	}

	/// Drop a scheduled open, e.g. when focus leaves the search surface.
	pub fn cancel(&mut self) {
		self.deadline = None;
	}

	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.deadline.is_some()
	}
}
