//! Transient status banner shown above the board, plus the operation
//! bookkeeping that keeps overlapping requests deterministic.

use std::time::{Duration, Instant};

/// How long a banner stays up. Any newly shown message restarts the clock;
/// deadlines never stack.
pub const HIDE_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }
}

/// Banner state machine: hidden, or showing one message with a hide deadline.
///
/// Every operation calls [`begin`](Self::begin) when it starts and
/// [`finish`](Self::finish) with its id when it completes. A completion only
/// publishes its message if nothing newer has published since, so a slow
/// response racing a double-click cannot clobber the fresher result.
#[derive(Debug, Default)]
pub struct StatusBoard {
    next_op: u64,
    published_op: u64,
    current: Option<(StatusMessage, Instant)>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an operation id. Ids are handed out in start order.
    pub fn begin(&mut self) -> u64 {
        self.next_op += 1;
        self.next_op
    }

    /// Publish the result of operation `op` at time `now`. Stale completions
    /// (an operation older than the last published one) are dropped.
    pub fn finish(&mut self, op: u64, message: StatusMessage, now: Instant) -> bool {
        if op < self.published_op {
            return false;
        }
        self.published_op = op;
        self.current = Some((message, now));
        true
    }

    /// The message to render at `now`, if its deadline hasn't passed.
    pub fn visible(&self, now: Instant) -> Option<&StatusMessage> {
        match &self.current {
            Some((msg, shown_at)) if now.duration_since(*shown_at) < HIDE_AFTER => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_hidden() {
        let board = StatusBoard::new();
        assert_eq!(board.visible(Instant::now()), None);
    }

    #[test]
    fn test_auto_hides_after_five_seconds() {
        let mut board = StatusBoard::new();
        let t0 = Instant::now();
        let op = board.begin();
        board.finish(op, StatusMessage::success("Signed up"), t0);

        assert!(board.visible(t0).is_some());
        assert!(board.visible(t0 + Duration::from_millis(4999)).is_some());
        assert_eq!(board.visible(t0 + HIDE_AFTER), None);
    }

    #[test]
    fn test_error_hides_like_success() {
        // Hide behavior is uniform across levels.
        let mut board = StatusBoard::new();
        let t0 = Instant::now();
        let op = board.begin();
        board.finish(op, StatusMessage::error("Activity not found"), t0);

        assert_eq!(board.visible(t0).unwrap().level, StatusLevel::Error);
        assert_eq!(board.visible(t0 + HIDE_AFTER), None);
    }

    #[test]
    fn test_new_message_resets_deadline() {
        let mut board = StatusBoard::new();
        let t0 = Instant::now();
        let op1 = board.begin();
        board.finish(op1, StatusMessage::success("first"), t0);
        let op2 = board.begin();
        board.finish(op2, StatusMessage::success("second"), t0 + Duration::from_secs(4));

        // 6s after the first show, but only 2s after the second: visible,
        // and showing the newer text.
        let at = t0 + Duration::from_secs(6);
        assert_eq!(board.visible(at).unwrap().text, "second");
        assert_eq!(board.visible(t0 + Duration::from_secs(9) + Duration::from_millis(1)), None);
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut board = StatusBoard::new();
        let t0 = Instant::now();

        // Double-clicked remove: op 1 starts, op 2 starts, op 2 lands first.
        let op1 = board.begin();
        let op2 = board.begin();
        assert!(board.finish(op2, StatusMessage::success("removed"), t0));
        assert!(!board.finish(op1, StatusMessage::error("not signed up"), t0));

        assert_eq!(board.visible(t0).unwrap().text, "removed");
    }

    #[test]
    fn test_equal_op_may_republish() {
        // An operation may publish over itself (not over a newer one).
        let mut board = StatusBoard::new();
        let t0 = Instant::now();
        let op = board.begin();
        assert!(board.finish(op, StatusMessage::success("a"), t0));
        assert!(board.finish(op, StatusMessage::success("b"), t0));
        assert_eq!(board.visible(t0).unwrap().text, "b");
    }
}
