use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use moka::future::Cache;

/// Key for a doctor's day: (doctor id, `YYYY-MM-DD`).
pub type DayKey = (String, String);

const BOOKED_CACHE_CAPACITY: u64 = 10_000;

/// Times booked through this service since the doctor list was last read.
/// Merged into what the API reports so a confirmed booking shows as taken
/// without a refetch.
#[derive(Clone)]
pub struct BookedSlots {
    cache: Cache<DayKey, Vec<String>>,
}

impl BookedSlots {
    pub fn new(idle: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(BOOKED_CACHE_CAPACITY)
                .time_to_idle(idle)
                .build(),
        }
    }

    /// Remote times for the day, plus any local bookings not in that list.
    pub async fn merged(&self, key: &DayKey, remote: Vec<String>) -> Vec<String> {
        let mut booked = remote;
        if let Some(local) = self.cache.get(key).await {
            for time in local {
                if !booked.contains(&time) {
                    booked.push(time);
                }
            }
        }
        booked
    }

    pub async fn get(&self, key: &DayKey) -> Vec<String> {
        self.cache.get(key).await.unwrap_or_default()
    }

    pub async fn record(&self, key: DayKey, time: String) {
        let mut booked = self.cache.get(&key).await.unwrap_or_default();
        if !booked.contains(&time) {
            booked.push(time);
        }
        self.cache.insert(key, booked).await;
    }
}

/// Bookings whose creation call has not returned yet.
#[derive(Clone, Default)]
pub struct InFlight {
    pending: Arc<Mutex<HashSet<(DayKey, String)>>>,
}

impl InFlight {
    /// Claims `(key, time)`. `None` when an identical booking is already pending.
    pub fn claim(&self, key: DayKey, time: String) -> Option<InFlightGuard> {
        let entry = (key, time);
        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if !pending.insert(entry.clone()) {
            return None;
        }
        Some(InFlightGuard {
            pending: Arc::clone(&self.pending),
            entry,
        })
    }
}

/// Releases its claim on drop, whatever the outcome of the call.
pub struct InFlightGuard {
    pending: Arc<Mutex<HashSet<(DayKey, String)>>>,
    entry: (DayKey, String),
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        pending.remove(&self.entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> DayKey {
        ("d1".to_string(), "2024-06-10".to_string())
    }

    #[tokio::test]
    async fn merges_local_bookings_once() {
        let booked = BookedSlots::new(Duration::from_secs(60));
        booked.record(key(), "10:00 AM".into()).await;
        booked.record(key(), "10:00 AM".into()).await;
        booked.record(key(), "01:00 PM".into()).await;

        let merged = booked.merged(&key(), vec!["10:00 AM".into(), "11:30 AM".into()]).await;
        assert_eq!(merged, vec!["10:00 AM", "11:30 AM", "01:00 PM"]);

        let other = ("d2".to_string(), "2024-06-10".to_string());
        assert!(booked.get(&other).await.is_empty());
    }

    #[test]
    fn duplicate_claims_are_refused_until_released() {
        let in_flight = InFlight::default();

        let guard = in_flight.claim(key(), "10:00 AM".into());
        assert!(guard.is_some());
        assert!(in_flight.claim(key(), "10:00 AM".into()).is_none());
        assert!(in_flight.claim(key(), "10:30 AM".into()).is_some());

        drop(guard);
        assert!(in_flight.claim(key(), "10:00 AM".into()).is_some());
    }
}
