//! Server-computed points balance.

/// Point total for one challenge.
///
/// The value is authoritative on the server and only ever replaced by an
/// explicit re-fetch; the client never derives it from task points. `None`
/// means "not fetched yet"; a failed refresh keeps the previous value
/// instead of clearing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointsBalance {
    pub value: Option<i64>,
}

impl PointsBalance {
    pub fn replace(&mut self, value: i64) {
        self.value = Some(value);
    }
}
