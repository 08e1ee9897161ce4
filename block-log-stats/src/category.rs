use std::fmt;

/// Kind of block membership change recorded in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventCategory {
    Add,
    Remove,
}

impl EventCategory {
    /// Categories in the order they are reported.
    pub const ALL: [Self; 2] = [EventCategory::Add, EventCategory::Remove];

    /// Literal substring identifying a line of this category, case-sensitive.
    pub fn pattern(&self) -> &'static str {
        match self {
            EventCategory::Add => "added to our current block",
            EventCategory::Remove => "removed from our current block",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Add => "Add",
            EventCategory::Remove => "Remove",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
