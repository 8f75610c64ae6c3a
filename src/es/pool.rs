use elasticsearch::http::transport::{Connection, ConnectionPool};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

/// Static list of cluster nodes handed out in round-robin order.
///
/// The node list never changes after construction; no sniffing or
/// dead-node tracking is done.
#[derive(Debug, Clone)]
pub struct RoundRobinConnectionPool {
    connections: Vec<Connection>,
    cursor: Arc<AtomicUsize>,
}

impl RoundRobinConnectionPool {
    /// Returns `None` when `urls` is empty.
    pub fn new(urls: Vec<Url>) -> Option<Self> {
        if urls.is_empty() {
            return None;
        }
        Some(Self {
            connections: urls.into_iter().map(Connection::new).collect(),
            cursor: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    fn next_index(&self) -> usize {
        self.cursor.fetch_add(1, Ordering::Relaxed) % self.connections.len()
    }
}

impl ConnectionPool for RoundRobinConnectionPool {
    fn next(&self) -> &Connection {
        &self.connections[self.next_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(hosts: &[&str]) -> Vec<Url> {
        hosts.iter().map(|h| Url::parse(h).unwrap()).collect()
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(RoundRobinConnectionPool::new(vec![]).is_none());
    }

    #[test]
    fn cycles_through_nodes_in_order() {
        let pool =
            RoundRobinConnectionPool::new(urls(&["http://a:9200", "http://b:9200", "http://c:9200"]))
                .unwrap();
        assert_eq!(pool.len(), 3);

        let order: Vec<usize> = (0..7).map(|_| pool.next_index()).collect();
        assert_eq!(order, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn clones_share_the_cursor() {
        let pool = RoundRobinConnectionPool::new(urls(&["http://a:9200", "http://b:9200"])).unwrap();
        let other = pool.clone();

        assert_eq!(pool.next_index(), 0);
        assert_eq!(other.next_index(), 1);
        assert_eq!(pool.next_index(), 0);
    }
}
