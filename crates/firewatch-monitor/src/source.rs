//! Hazard point acquisition
//!
//! Every fetch is stamped with a monotonically increasing [`FetchTicket`]
//! so that responses arriving out of order can be recognized and dropped
//! by the render layer.

use firewatch_domain::traits::HazardApi;
use firewatch_domain::HazardPoint;
use std::future::Future;
use std::sync::Arc;

/// Sequence number of a fetch; later fetches compare greater
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    /// Raw sequence number
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Result of one fetch, tagged with its ticket
#[derive(Debug, Clone)]
pub struct FetchReply {
    /// Ticket issued when the fetch was dispatched
    pub ticket: FetchTicket,
    /// Points, or the error text of a failed fetch
    pub result: Result<Vec<HazardPoint>, String>,
}

/// Dispatches hazard fetches against the backend
pub struct PointSource<A> {
    api: Arc<A>,
    next_ticket: u64,
}

impl<A> PointSource<A>
where
    A: HazardApi + 'static,
{
    /// Create a source over a shared backend handle
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            next_ticket: 0,
        }
    }

    /// Issue a ticket and return the fetch as an owned future
    ///
    /// The future does not borrow the source, so it can be spawned and
    /// left in flight while later fetches are dispatched.
    pub fn dispatch(&mut self) -> impl Future<Output = FetchReply> + Send + 'static {
        self.next_ticket += 1;
        let ticket = FetchTicket(self.next_ticket);
        let api = Arc::clone(&self.api);

        async move {
            let result = api.fetch_points().await.map_err(|e| e.to_string());
            FetchReply { ticket, result }
        }
    }

    /// Number of tickets issued so far
    pub fn issued(&self) -> u64 {
        self.next_ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firewatch_client::MockHazardApi;

    #[tokio::test]
    async fn test_tickets_increase() {
        let api = Arc::new(MockHazardApi::new());
        let mut source = PointSource::new(api);

        let first = source.dispatch().await;
        let second = source.dispatch().await;

        assert!(second.ticket > first.ticket);
        assert_eq!(source.issued(), 2);
    }

    #[tokio::test]
    async fn test_failure_is_captured_as_text() {
        let api = Arc::new(MockHazardApi::new());
        api.fail_points_once("backend down");
        let mut source = PointSource::new(api);

        let reply = source.dispatch().await;
        let err = reply.result.unwrap_err();
        assert!(err.contains("backend down"));
    }
}
