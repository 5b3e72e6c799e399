//! Sequence-numbered read streams
//!
//! Each logical read (status, history) hands out a monotonically increasing
//! sequence number when a request is issued. A response is applied only if no
//! later-issued request has settled yet, so results land in request order no
//! matter which response arrives first.

/// What happened to a response once it came back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The response was the newest one and is now visible
    Applied,
    /// A later request already settled; the response was dropped
    Superseded,
}

/// Latest known value of a remote read plus its bookkeeping
#[derive(Debug, Clone)]
pub struct ReadStream<T> {
    value: Option<T>,
    error: Option<String>,
    issued: u64,
    settled: u64,
}

impl<T> ReadStream<T> {
    pub fn new() -> Self {
        Self {
            value: None,
            error: None,
            issued: 0,
            settled: 0,
        }
    }

    /// Registers a new request and returns its sequence number
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Replaces the value if `seq` is still the newest settled request
    ///
    /// Clears the error on success.
    pub fn apply(&mut self, seq: u64, value: T) -> Refresh {
        if !self.accepts(seq) {
            return Refresh::Superseded;
        }
        self.settled = seq;
        self.value = Some(value);
        self.error = None;
        Refresh::Applied
    }

    /// Records a failure, keeping the last good value
    pub fn fail(&mut self, seq: u64, message: impl Into<String>) -> Refresh {
        if !self.accepts(seq) {
            return Refresh::Superseded;
        }
        self.settled = seq;
        self.error = Some(message.into());
        Refresh::Applied
    }

    /// Settles `seq` without touching value or error
    ///
    /// Used when the request became irrelevant for reasons other than order.
    pub fn discard(&mut self, seq: u64) {
        if self.accepts(seq) {
            self.settled = seq;
        }
    }

    /// Issues and applies in one step, for values that arrive without a read
    pub fn replace(&mut self, value: T) -> Refresh {
        let seq = self.begin();
        self.apply(seq, value)
    }

    fn accepts(&self, seq: u64) -> bool {
        seq > self.settled
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the newest issued request is still outstanding
    pub fn is_fetching(&self) -> bool {
        self.settled < self.issued
    }

    /// Whether any request was ever issued
    pub fn is_started(&self) -> bool {
        self.issued > 0
    }
}

impl<T> Default for ReadStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_responses_apply() {
        let mut stream = ReadStream::new();
        let a = stream.begin();
        assert!(stream.is_fetching());
        assert_eq!(stream.apply(a, "a"), Refresh::Applied);
        assert!(!stream.is_fetching());

        let b = stream.begin();
        assert_eq!(stream.apply(b, "b"), Refresh::Applied);
        assert_eq!(stream.value(), Some(&"b"));
    }

    #[test]
    fn test_late_response_is_superseded() {
        let mut stream = ReadStream::new();
        let a = stream.begin();
        let b = stream.begin();

        assert_eq!(stream.apply(b, "b"), Refresh::Applied);
        assert!(!stream.is_fetching());
        assert_eq!(stream.apply(a, "a"), Refresh::Superseded);
        assert_eq!(stream.value(), Some(&"b"));
    }

    #[test]
    fn test_older_response_still_fetching_newer() {
        let mut stream = ReadStream::new();
        let a = stream.begin();
        let b = stream.begin();

        assert_eq!(stream.apply(a, "a"), Refresh::Applied);
        assert!(stream.is_fetching());
        assert_eq!(stream.apply(b, "b"), Refresh::Applied);
        assert_eq!(stream.value(), Some(&"b"));
    }

    #[test]
    fn test_failure_keeps_stale_value() {
        let mut stream = ReadStream::new();
        let a = stream.begin();
        stream.apply(a, 1);

        let b = stream.begin();
        assert_eq!(stream.fail(b, "boom"), Refresh::Applied);
        assert_eq!(stream.value(), Some(&1));
        assert_eq!(stream.error(), Some("boom"));

        let c = stream.begin();
        stream.apply(c, 2);
        assert_eq!(stream.error(), None);
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut stream = ReadStream::new();
        let a = stream.begin();
        let b = stream.begin();
        stream.apply(b, 2);

        assert_eq!(stream.fail(a, "late boom"), Refresh::Superseded);
        assert_eq!(stream.error(), None);
    }

    #[test]
    fn test_replace_supersedes_in_flight_reads() {
        let mut stream = ReadStream::new();
        let poll = stream.begin();
        assert_eq!(stream.replace("command"), Refresh::Applied);
        assert_eq!(stream.apply(poll, "poll"), Refresh::Superseded);
        assert_eq!(stream.value(), Some(&"command"));
    }

    #[test]
    fn test_discard_settles_without_change() {
        let mut stream: ReadStream<i32> = ReadStream::new();
        let a = stream.begin();
        stream.discard(a);
        assert!(!stream.is_fetching());
        assert!(stream.value().is_none());
        assert!(stream.is_started());
    }
}
