//! Sensor events
//!
//! Every update returns the [`Events`] it produced. `Data` marks an accepted
//! reading (gyro) or a throttle tick (sonar); `Change` marks a moved smoothed value.
//! The sensor itself is the payload: read it after inspecting the events.

/// Event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// New reading available
    Data,
    /// Reading differs from the previous one
    Change,
}

impl Event {
    const fn bit(self) -> u8 {
        match self {
            Self::Data => 0b01,
            Self::Change => 0b10,
        }
    }
}

/// Set of events produced by one update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Events {
    bits: u8,
}

impl Events {
    /// No events
    pub const NONE: Self = Self { bits: 0 };

    /// Add an event to the set
    pub fn insert(&mut self, event: Event) {
        self.bits |= event.bit();
    }

    /// Whether `event` fired
    #[must_use]
    pub const fn contains(&self, event: Event) -> bool {
        self.bits & event.bit() != 0
    }

    /// Whether `Data` fired
    #[must_use]
    pub const fn data(&self) -> bool {
        self.contains(Event::Data)
    }

    /// Whether `Change` fired
    #[must_use]
    pub const fn change(&self) -> bool {
        self.contains(Event::Change)
    }

    /// Whether nothing fired
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Fired events, `Data` before `Change`
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        [Event::Data, Event::Change]
            .into_iter()
            .filter(|&event| self.contains(event))
    }
}

impl From<Event> for Events {
    fn from(event: Event) -> Self {
        let mut events = Self::NONE;
        events.insert(event);
        events
    }
}
