use crate::shortcode::ShortCode;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// A stored link. Every field is fixed at creation; records are never
/// updated, deleted or reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The unique short code.
    pub shortcode: ShortCode,
    /// The redirect target.
    pub long_url: String,
    /// When the record was created.
    pub created_at: Timestamp,
    /// When the record stops resolving. Always later than `created_at`.
    pub expires_at: Timestamp,
}

impl LinkRecord {
    /// Length of the validity window.
    pub fn lifetime(&self) -> SignedDuration {
        self.expires_at.duration_since(self.created_at)
    }

    /// Liveness of this record at `now`.
    pub fn liveness(&self, now: Timestamp) -> Liveness {
        Liveness::of(self.expires_at, now)
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.liveness(now) == Liveness::Expired
    }
}

/// Logical state of a record, derived from the wall clock at read time.
///
/// `Active` becomes `Expired` once `now` is strictly after `expires_at`.
/// `Expired` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Liveness {
    Active,
    Expired,
}

impl Liveness {
    pub fn of(expires_at: Timestamp, now: Timestamp) -> Self {
        if now > expires_at {
            Liveness::Expired
        } else {
            Liveness::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(created_at: Timestamp, lifetime: SignedDuration) -> LinkRecord {
        LinkRecord {
            shortcode: ShortCode::new_unchecked("abc123"),
            long_url: "https://example.com".to_string(),
            created_at,
            expires_at: created_at + lifetime,
        }
    }

    #[test]
    fn active_until_strictly_after_expiry() {
        let created = Timestamp::from_second(1_000).unwrap();
        let rec = record(created, SignedDuration::from_mins(1));

        assert_eq!(rec.liveness(created), Liveness::Active);
        assert_eq!(rec.liveness(rec.expires_at), Liveness::Active);
        assert_eq!(
            rec.liveness(rec.expires_at + SignedDuration::from_nanos(1)),
            Liveness::Expired
        );
        assert!(rec.is_expired(rec.expires_at + SignedDuration::from_secs(60)));
    }

    #[test]
    fn lifetime_is_expiry_minus_creation() {
        let created = Timestamp::from_second(1_000).unwrap();
        let rec = record(created, SignedDuration::from_mins(45));
        assert_eq!(rec.lifetime(), SignedDuration::from_mins(45));
    }
}
